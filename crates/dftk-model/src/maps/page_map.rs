use csv::StringRecord;
use serde::Serialize;

use super::{PLATE_RANGE, VISIT_RANGE, column, records};
use crate::label::expand_page;
use crate::range_list::RangeList;

const MIN_COLUMNS: usize = 3;

/// Lines starting with this marker are not page labels.
const SKIP_MARKER: &str = "S";

/// One line of `DFpage_map`: plates, visits and a label template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMapEntry {
    pub plates: RangeList,
    pub visits: RangeList,
    pub label: String,
}

impl PageMapEntry {
    fn parse(record: &StringRecord) -> Option<Self> {
        let plates = column(record, 0);
        if plates == SKIP_MARKER {
            return None;
        }
        let (plate_min, plate_max) = PLATE_RANGE;
        let (visit_min, visit_max) = VISIT_RANGE;
        Some(Self {
            plates: RangeList::parse(plate_min, plate_max, plates).ok()?,
            visits: RangeList::parse(visit_min, visit_max, column(record, 1)).ok()?,
            label: column(record, 2).to_string(),
        })
    }

    pub fn matches(&self, visit: i64, plate: i64) -> bool {
        self.visits.contains(visit) && self.plates.contains(plate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMap {
    entries: Vec<PageMapEntry>,
}

impl PageMap {
    /// Replace all entries with those parsed from `text`.
    pub fn load(&mut self, text: &str) -> usize {
        self.entries = records(text, MIN_COLUMNS)
            .filter_map(|record| PageMapEntry::parse(&record))
            .collect();
        self.entries.len()
    }

    pub fn entries(&self) -> &[PageMapEntry] {
        &self.entries
    }

    /// Expanded label of the first entry covering `visit` and `plate`.
    pub fn label(&self, visit: i64, plate: i64) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| entry.matches(visit, plate))
            .map(|entry| expand_page(&entry.label, visit, plate))
    }
}
