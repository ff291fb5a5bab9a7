use csv::StringRecord;
use serde::Serialize;

use super::{PLATE_RANGE, column, records};
use crate::range_list::RangeList;

const MIN_COLUMNS: usize = 2;

/// Label used for plates no domain claims.
pub const OTHER_DOMAIN: &str = "Other";

/// One line of a domain map: a label and the plates it groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainMapEntry {
    pub label: String,
    pub plates: RangeList,
}

impl DomainMapEntry {
    fn parse(record: &StringRecord) -> Option<Self> {
        let (plate_min, plate_max) = PLATE_RANGE;
        Some(Self {
            label: column(record, 0).to_string(),
            plates: RangeList::parse(plate_min, plate_max, column(record, 1)).ok()?,
        })
    }

    /// Sort key for `plate` within this domain.
    pub fn plate_order(&self, plate: i64) -> usize {
        self.plates.position(plate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainMap {
    entries: Vec<DomainMapEntry>,
}

impl DomainMap {
    pub fn load(&mut self, text: &str) -> usize {
        self.entries = records(text, MIN_COLUMNS)
            .filter_map(|record| DomainMapEntry::parse(&record))
            .collect();
        self.entries.len()
    }

    pub fn entries(&self) -> &[DomainMapEntry] {
        &self.entries
    }

    pub fn entry(&self, plate: i64) -> Option<&DomainMapEntry> {
        self.entries.iter().find(|entry| entry.plates.contains(plate))
    }

    /// Domain label for `plate`, or [`OTHER_DOMAIN`].
    pub fn label(&self, plate: i64) -> &str {
        self.entry(plate)
            .map_or(OTHER_DOMAIN, |entry| entry.label.as_str())
    }
}
