use csv::StringRecord;
use serde::Serialize;

use super::{PLATE_RANGE, VISIT_RANGE, column, optional_int, records};
use crate::label::expand_visit;
use crate::range_list::RangeList;

const MIN_COLUMNS: usize = 7;

/// Visit type code for cycle definitions, which carry no visit label.
const CYCLE_TYPE: &str = "C";

/// One line of `DFvisit_map`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitMapEntry {
    pub visits: RangeList,
    pub visit_type: String,
    pub label: String,
    pub date_plate: Option<i64>,
    pub date_field: Option<i64>,
    pub due_day: i64,
    pub overdue_allowance: i64,
    pub required_plates: RangeList,
    pub optional_plates: RangeList,
    pub missed_visit_notification: Option<i64>,
    pub termination_window: Option<String>,
    /// Plate display order; defaults to required then optional plates.
    pub display_order: RangeList,
}

impl VisitMapEntry {
    fn parse(record: &StringRecord) -> Option<Self> {
        let visit_type = column(record, 1);
        if visit_type == CYCLE_TYPE {
            return None;
        }
        let (visit_min, visit_max) = VISIT_RANGE;
        let (plate_min, plate_max) = PLATE_RANGE;
        let required = column(record, 7);
        let optional = column(record, 8);
        let order = column(record, 11);
        let display_order = if order.is_empty() {
            RangeList::parse(plate_min, plate_max, &format!("{required} {optional}"))
        } else {
            RangeList::parse(plate_min, plate_max, order)
        };
        let termination_window = column(record, 10);
        Some(Self {
            visits: RangeList::parse(visit_min, visit_max, column(record, 0)).ok()?,
            visit_type: visit_type.to_string(),
            label: column(record, 2).to_string(),
            date_plate: optional_int(column(record, 3)).ok()?,
            date_field: optional_int(column(record, 4)).ok()?,
            due_day: optional_int(column(record, 5)).ok()?.unwrap_or(0),
            overdue_allowance: optional_int(column(record, 6)).ok()?.unwrap_or(0),
            required_plates: RangeList::parse(plate_min, plate_max, required).ok()?,
            optional_plates: RangeList::parse(plate_min, plate_max, optional).ok()?,
            missed_visit_notification: optional_int(column(record, 9)).ok()?,
            termination_window: (!termination_window.is_empty())
                .then(|| termination_window.to_string()),
            display_order: display_order.ok()?,
        })
    }

    /// Sort key for `plate` within this visit.
    pub fn plate_order(&self, plate: i64) -> usize {
        self.display_order.position(plate)
    }

    pub fn is_required(&self, plate: i64) -> bool {
        self.required_plates.contains(plate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitMap {
    entries: Vec<VisitMapEntry>,
}

impl VisitMap {
    /// Replace all entries with those parsed from `text`.
    ///
    /// Returns the number of entries loaded.
    pub fn load(&mut self, text: &str) -> usize {
        self.entries = records(text, MIN_COLUMNS)
            .filter_map(|record| VisitMapEntry::parse(&record))
            .collect();
        self.entries.len()
    }

    pub fn entries(&self) -> &[VisitMapEntry] {
        &self.entries
    }

    /// First entry whose visit range covers `visit`.
    pub fn entry(&self, visit: i64) -> Option<&VisitMapEntry> {
        self.entries.iter().find(|entry| entry.visits.contains(visit))
    }

    /// Expanded label for `visit`, or `Visit <n>` when no entry covers it.
    pub fn label(&self, visit: i64) -> String {
        match self.entry(visit) {
            Some(entry) => expand_visit(&entry.label, visit),
            None => format!("Visit {visit}"),
        }
    }
}
