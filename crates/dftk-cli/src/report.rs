//! Study queries rendered as rows for the `dftk` commands.
//!
//! Every command builds a [`Report`] from a loaded [`Study`]; the binary
//! turns it into a styled table. Keeping the rows as plain strings lets the
//! reports be checked without depending on terminal rendering.

use std::collections::BTreeSet;

use dftk_model::maps::PLATE_RANGE;
use dftk_model::{Code, FieldRef, FieldType, Plate, RangeList, RangeListError, Rect};
use dftk_study::Study;
use serde::Serialize;

use crate::table::EMPTY;

/// A titled table of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub title: Option<String>,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// Columns holding numbers.
    pub right_aligned: Vec<usize>,
    /// Two-column `name | value` layout.
    pub key_value: bool,
}

impl Report {
    fn listing(header: Vec<&'static str>) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    fn pairs() -> Self {
        Self {
            header: vec!["Item", "Value"],
            key_value: true,
            ..Self::default()
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn push_pair(&mut self, key: &str, value: impl ToString) {
        self.rows.push(vec![key.to_string(), value.to_string()]);
    }
}

fn or_empty(value: Option<&str>) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or(EMPTY)
        .to_string()
}

/// Counts of everything loaded from the study directory.
pub fn summary(study: &Study) -> Report {
    let mut report = Report::pairs();
    report.title = Some(format!(
        "Study {}",
        study.study_name().unwrap_or("(unnamed)")
    ));
    report.push_pair(
        "Number",
        study
            .number
            .map_or_else(|| EMPTY.to_string(), |n| n.to_string()),
    );
    report.push_pair(
        "Directory",
        study
            .study_dir
            .as_ref()
            .map_or_else(|| EMPTY.to_string(), |dir| dir.display().to_string()),
    );
    let plates = study.plate_list();
    let fields: usize = plates.iter().map(|plate| plate.field_list().len()).sum();
    report.push_pair("Styles", study.styles().count());
    report.push_pair("Modules", study.module_list().len());
    report.push_pair("Plates", plates.len());
    report.push_pair("Fields", fields);
    report.push_pair(
        "Visit map entries",
        study.visit_map().map_or(0, |map| map.entries().len()),
    );
    report.push_pair(
        "Page map entries",
        study.page_map().map_or(0, |map| map.entries().len()),
    );
    report.push_pair("Missing value codes", study.missing_map().entries().len());
    report.push_pair("Centers", study.centers().centers().len());
    report.push_pair("Countries", study.countries().countries().len());
    report.push_pair("Domains", study.domain_map().entries().len());
    report.push_pair("Server settings", study.server_config().len());
    report
}

/// One row per plate with its domain and field counts.
pub fn plates(study: &Study) -> Report {
    let mut report = Report::listing(vec!["Plate", "Description", "Domain", "Fields", "Visual"]);
    report.right_aligned = vec![0, 3, 4];
    for plate in study.plate_list() {
        report.push(vec![
            plate.number().to_string(),
            or_empty(plate.description.as_deref()),
            study.domain_map().label(plate.number()).to_string(),
            plate.field_list().len().to_string(),
            plate.visual_fields().count().to_string(),
        ]);
    }
    report
}

/// A plate field in the `fields --json` output.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRecord<'a> {
    pub id: i64,
    pub number: i64,
    pub name: Option<&'a str>,
    pub alias: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<&'a str>,
    pub module_id: i64,
    pub module_ref_id: i64,
    pub field_id: Option<i64>,
    pub blinded: bool,
    pub bounding_box: Option<Rect>,
    pub codes: &'a [Code],
    pub edit_checks: Vec<&'a str>,
}

impl<'a> FieldRecord<'a> {
    pub fn new(plate: &Plate, field: &'a FieldRef) -> Self {
        Self {
            id: field.id,
            number: field.number(),
            name: field.attrs.name.as_deref(),
            alias: field.attrs.expanded_alias(plate.number()),
            field_type: field.attrs.field_type.as_ref().map(FieldType::as_str),
            module_id: field.module_id,
            module_ref_id: field.module_ref_id,
            field_id: field.field_id,
            blinded: field.is_blinded(),
            bounding_box: field.bounding_box(),
            codes: &field.attrs.codes,
            edit_checks: field.attrs.edit_check_calls(),
        }
    }
}

pub fn field_records(plate: &Plate) -> Vec<FieldRecord<'_>> {
    plate
        .field_list()
        .into_iter()
        .map(|field| FieldRecord::new(plate, field))
        .collect()
}

fn format_codes(codes: &[Code]) -> String {
    if codes.is_empty() {
        return EMPTY.to_string();
    }
    codes
        .iter()
        .map(|code| format!("{}={}", code.code, code.label))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The fields of `plate` in field-number order.
pub fn fields(plate: &Plate) -> Report {
    let mut report = Report::listing(vec!["#", "Name", "Alias", "Type", "Box", "Codes"]);
    report.title = Some(match &plate.description {
        Some(description) => format!("Plate {}: {description}", plate.number()),
        None => format!("Plate {}", plate.number()),
    });
    report.right_aligned = vec![0];
    for record in field_records(plate) {
        report.push(vec![
            record.number.to_string(),
            or_empty(record.name),
            or_empty(record.alias.as_deref()),
            or_empty(record.field_type),
            record
                .bounding_box
                .map_or_else(|| EMPTY.to_string(), |bbox| bbox.to_string()),
            format_codes(record.codes),
        ]);
    }
    report
}

/// Plates numbers named by `list`, clamped to the plate number domain.
fn expand_plates(list: &RangeList, plates: &mut BTreeSet<i64>) {
    let (min, max) = PLATE_RANGE;
    for &(lo, hi) in list.ranges() {
        plates.extend(lo.max(min)..=hi.min(max));
    }
}

/// Label, type and plates of a visit, in the visit's display order.
pub fn visit(study: &Study, visit: i64) -> Report {
    let mut report = Report::listing(vec!["Order", "Plate", "Page", "Required"]);
    report.right_aligned = vec![0, 1];
    let label = study.visit_label(visit);
    let Some(entry) = study.visit_map().and_then(|map| map.entry(visit)) else {
        report.title = Some(format!("Visit {visit}: {label} (not in visit map)"));
        return report;
    };
    report.title = Some(format!("Visit {visit}: {label} (type {})", entry.visit_type));

    let mut plates = BTreeSet::new();
    expand_plates(&entry.required_plates, &mut plates);
    expand_plates(&entry.optional_plates, &mut plates);
    let mut ordered: Vec<i64> = plates.into_iter().collect();
    ordered.sort_by_key(|&plate| entry.plate_order(plate));
    for plate in ordered {
        report.push(vec![
            entry.plate_order(plate).to_string(),
            plate.to_string(),
            study.page_label(visit, plate),
            if entry.is_required(plate) { "yes" } else { "no" }.to_string(),
        ]);
    }
    report
}

/// Center, investigator and location responsible for patient `pid`.
pub fn center(study: &Study, pid: i64) -> Report {
    let mut report = Report::pairs();
    report.title = Some(format!("Patient {pid}"));
    let Some(center) = study.centers().center(pid) else {
        report.push_pair("Center", EMPTY);
        return report;
    };
    let countries = study.countries();
    let number = if center.is_error_monitor {
        format!("{} (error monitor)", center.number)
    } else {
        center.number.to_string()
    };
    report.push_pair("Center", number);
    report.push_pair("Investigator", or_empty(Some(center.investigator.as_str())));
    report.push_pair("Affiliation", or_empty(Some(center.affiliation.as_str())));
    report.push_pair("Contact", or_empty(Some(center.contact.as_str())));
    report.push_pair("Phone", or_empty(Some(center.phone.as_str())));
    report.push_pair("Country", countries.country(center.number));
    report.push_pair("Region", countries.region(center.number));
    report
}

/// SQL predicate selecting `column` values in `ranges`.
///
/// An empty range list selects nothing and renders as `false`.
pub fn sql(column: &str, ranges: &str, min: i64, max: i64) -> Result<String, RangeListError> {
    let list = RangeList::parse(min, max, ranges)?;
    Ok(list.to_sql(column).unwrap_or_else(|| "false".to_string()))
}

/// QC problem codes shown by the `codes` command.
const QC_CODES: [i64; 11] = [0, 1, 2, 3, 4, 5, 6, 7, 21, 22, 23];

/// QC type, QC status and reason status labels by code.
pub fn codes(study: &Study) -> Report {
    let mut report = Report::listing(vec!["Code", "QC type", "QC status", "Simplified", "Reason"]);
    report.right_aligned = vec![0];
    for code in QC_CODES {
        report.push(vec![
            code.to_string(),
            study.qc_type(code).to_string(),
            study.qc_status(code, false).to_string(),
            study.qc_status(code, true).to_string(),
            or_empty(study.reason_status(code)),
        ]);
    }
    report
}
