//! Command reports over a small study directory.

use std::fs;
use std::path::Path;

use dftk_cli::report::{self, Report};
use dftk_study::Study;
use insta::assert_snapshot;
use tempfile::TempDir;

const SETUP: &str = r#"{
  "study": {
    "name": "Pilot",
    "number": 12,
    "modules": [
      {"id": 1, "name": "demo", "fields": [
        {"id": 10, "name": "sex"},
        {"id": 11, "name": "dob"}
      ]}
    ],
    "plates": [
      {"number": 1, "description": "Demographics", "moduleRefs": [
        {"id": 1, "moduleId": 1, "fieldRefs": [
          {"id": 100, "fieldId": 11, "number": 8, "name": "dob", "type": "Date",
           "alias": "DOB$(plate)"},
          {"id": 101, "fieldId": 10, "number": 7, "name": "sex", "type": "Choice",
           "codes": [{"number": 1, "label": "Male"}, {"number": 2, "label": "Female"}],
           "rects": [{"x": 10, "y": 20, "w": 8, "h": 8}, {"x": 30, "y": 20, "w": 8, "h": 8}],
           "fieldExit": "dfneed(1) dfrange(1, 2)"}
        ]}
      ]},
      {"number": 3, "moduleRefs": []}
    ]
  }
}"#;

fn write_study(dir: &Path) {
    let lib = dir.join("lib");
    fs::create_dir_all(&lib).expect("create lib");
    fs::write(lib.join("DFsetup"), SETUP).expect("setup");
    fs::write(lib.join("DFvisit_map"), "1|S|Week %S|1|8|0|0|1|3|||3 1\n").expect("visit map");
    fs::write(lib.join("DFpage_map"), "3|1|Labs at week %S\n").expect("page map");
    fs::write(lib.join("DFdomain_map"), "Baseline|1\n").expect("domain map");
    fs::write(
        lib.join("DFcenters"),
        "5|Site|Univ|Addr|f|f|555-0100|Dr Grey|p|r|100 199\n",
    )
    .expect("centers");
    fs::write(lib.join("DFcountries"), "Norway|Europe|1-9\n").expect("countries");
    fs::write(lib.join("DFserver.cf"), "STUDY_NAME=PILOT-1\n").expect("config");
}

fn load() -> (TempDir, Study) {
    let dir = TempDir::new().expect("temp dir");
    write_study(dir.path());
    let study = Study::from_dir(dir.path()).expect("load study");
    (dir, study)
}

/// Title plus one `|`-joined line per row.
fn render(report: &Report) -> String {
    let mut lines = Vec::new();
    if let Some(title) = &report.title {
        lines.push(title.clone());
    }
    lines.push(report.header.join(" | "));
    lines.extend(report.rows.iter().map(|row| row.join(" | ")));
    lines.join("\n")
}

#[test]
fn plates_report() {
    let (_dir, study) = load();
    assert_snapshot!(render(&report::plates(&study)), @r"
    Plate | Description | Domain | Fields | Visual
    1 | Demographics | Baseline | 2 | 1
    3 | - | Other | 0 | 0
    ");
}

#[test]
fn fields_report() {
    let (_dir, study) = load();
    let plate = study.plate(1).expect("plate 1");
    assert_snapshot!(render(&report::fields(plate)), @r"
    Plate 1: Demographics
    # | Name | Alias | Type | Box | Codes
    7 | sex | - | Choice | (10,20,28,8) | 1=Male, 2=Female
    8 | dob | DOB001 | Date | - | -
    ");
}

#[test]
fn field_records_serialize() {
    let (_dir, study) = load();
    let plate = study.plate(1).expect("plate 1");
    let records = report::field_records(plate);
    let json = serde_json::to_value(&records).expect("json");
    assert_eq!(json[0]["type"], "Choice");
    assert_eq!(json[0]["field_id"], 10);
    assert_eq!(json[0]["bounding_box"]["width"], 28);
    assert_eq!(json[0]["codes"][1]["label"], "Female");
    assert_eq!(json[0]["edit_checks"][1], "dfrange(1, 2)");
    assert_eq!(json[1]["alias"], "DOB001");
    assert!(json[1]["bounding_box"].is_null());
}

#[test]
fn visit_report_uses_display_order() {
    let (_dir, study) = load();
    assert_snapshot!(render(&report::visit(&study, 1)), @r"
    Visit 1: Week 1 (type S)
    Order | Plate | Page | Required
    0 | 3 | Labs at week 1 | no
    1 | 1 | Demographics | yes
    ");
}

#[test]
fn center_report() {
    let (_dir, study) = load();
    assert_snapshot!(render(&report::center(&study, 150)), @r"
    Patient 150
    Item | Value
    Center | 5
    Investigator | Dr Grey
    Affiliation | Univ
    Contact | Site
    Phone | 555-0100
    Country | Norway
    Region | Europe
    ");
    assert_snapshot!(render(&report::center(&study, 7)), @r"
    Patient 7
    Item | Value
    Center | -
    ");
}

#[test]
fn summary_report() {
    let (dir, study) = load();
    let report = report::summary(&study);
    assert_eq!(report.title.as_deref(), Some("Study PILOT-1"));
    let value = |key: &str| {
        report
            .rows
            .iter()
            .find(|row| row[0] == key)
            .map(|row| row[1].clone())
    };
    assert_eq!(value("Number").as_deref(), Some("12"));
    assert_eq!(value("Directory"), Some(dir.path().display().to_string()));
    assert_eq!(value("Plates").as_deref(), Some("2"));
    assert_eq!(value("Fields").as_deref(), Some("2"));
    assert_eq!(value("Missing value codes").as_deref(), Some("1"));
    assert_eq!(value("Server settings").as_deref(), Some("1"));
}

#[test]
fn codes_report() {
    assert_snapshot!(render(&report::codes(&Study::new())), @r"
    Code | QC type | QC status | Simplified | Reason
    0 | unknown type | unresolved(pending) | unresolved | -
    1 | missing value | unresolved(new) | unresolved | approved
    2 | illegal value | unresolved(in unsent report) | unresolved | rejected
    3 | inconsistent value | resolved(NA) | resolved | pending
    4 | illegible value | resolved(irrelevant) | resolved | -
    5 | fax noise | resolved(corrected) | resolved | -
    6 | other problem | unresolved(in sent report) | unresolved | -
    7 | unknown type | deleted | unresolved | -
    21 | missing plate | unknown | resolved | -
    22 | overdue visit | unknown | resolved | -
    23 | EC missing plate | unknown | resolved | -
    ");
}

#[test]
fn reports_render_as_tables() {
    let (_dir, study) = load();
    let table = report::plates(&study).to_table();
    let rendered = table.to_string();
    assert!(rendered.contains("Demographics"));
    assert!(rendered.contains("Baseline"));
}
