use std::path::Path;

use anyhow::{Context, Result, anyhow};
use dftk_cli::report::{self, Report};
use dftk_study::Study;
use tracing::{debug, info_span};

use crate::cli::{CenterArgs, FieldsArgs, SqlArgs, StudyArgs, VisitArgs};

fn load_study(dir: &Path) -> Result<Study> {
    if !dir.is_dir() {
        return Err(anyhow!("study directory not found: {}", dir.display()));
    }
    Study::from_dir(dir).with_context(|| format!("load study from {}", dir.display()))
}

fn print_report(report: &Report) {
    if let Some(title) = &report.title {
        println!("{title}");
    }
    println!("{}", report.to_table());
}

pub fn run_summary(args: &StudyArgs) -> Result<()> {
    let study = load_study(&args.study_dir)?;
    print_report(&report::summary(&study));
    Ok(())
}

pub fn run_plates(args: &StudyArgs) -> Result<()> {
    let study = load_study(&args.study_dir)?;
    print_report(&report::plates(&study));
    Ok(())
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let study = load_study(&args.study.study_dir)?;
    let plate = study
        .plate(args.plate)
        .ok_or_else(|| anyhow!("plate {} is not defined in the study setup", args.plate))?;
    let _span = info_span!("fields", plate = args.plate).entered();
    if args.json {
        let records = report::field_records(plate);
        debug!(fields = records.len(), "writing field records");
        let json = serde_json::to_string_pretty(&records).context("serialize fields")?;
        println!("{json}");
    } else {
        print_report(&report::fields(plate));
    }
    Ok(())
}

pub fn run_visit(args: &VisitArgs) -> Result<()> {
    let study = load_study(&args.study.study_dir)?;
    print_report(&report::visit(&study, args.visit));
    Ok(())
}

pub fn run_center(args: &CenterArgs) -> Result<()> {
    let study = load_study(&args.study.study_dir)?;
    print_report(&report::center(&study, args.pid));
    Ok(())
}

pub fn run_sql(args: &SqlArgs) -> Result<()> {
    let predicate = report::sql(&args.column, &args.ranges, args.min, args.max)
        .with_context(|| format!("parse range list {:?}", args.ranges))?;
    println!("{predicate}");
    Ok(())
}

pub fn run_codes() -> Result<()> {
    print_report(&report::codes(&Study::new()));
    Ok(())
}
