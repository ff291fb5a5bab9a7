use csv::StringRecord;
use serde::Serialize;

use super::{CENTER_RANGE, column, records};
use crate::range_list::RangeList;

const MIN_COLUMNS: usize = 3;

/// Returned for centers no country claims.
pub const UNKNOWN: &str = "Unknown";

/// A country, its region and the centers located there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub name: String,
    pub region: String,
    pub centers: RangeList,
}

impl Country {
    fn parse(record: &StringRecord) -> Option<Self> {
        let (center_min, center_max) = CENTER_RANGE;
        Some(Self {
            name: column(record, 0).to_string(),
            region: column(record, 1).to_string(),
            centers: RangeList::parse(center_min, center_max, column(record, 2)).ok()?,
        })
    }
}

/// The `DFcountries` database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Countries {
    countries: Vec<Country>,
}

impl Countries {
    pub fn load(&mut self, text: &str) -> usize {
        self.countries = records(text, MIN_COLUMNS)
            .filter_map(|record| Country::parse(&record))
            .collect();
        self.countries.len()
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn entry(&self, center: i64) -> Option<&Country> {
        self.countries
            .iter()
            .find(|country| country.centers.contains(center))
    }

    pub fn country(&self, center: i64) -> &str {
        self.entry(center).map_or(UNKNOWN, |c| c.name.as_str())
    }

    pub fn region(&self, center: i64) -> &str {
        self.entry(center).map_or(UNKNOWN, |c| c.region.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_and_region_by_center() {
        let mut countries = Countries::default();
        assert_eq!(
            countries.load("Canada|North America|1-10\nFrance|Europe|11 12\nGhost|Nowhere\n"),
            2
        );
        assert_eq!(countries.country(5), "Canada");
        assert_eq!(countries.region(12), "Europe");
        assert_eq!(countries.country(13), UNKNOWN);
        assert_eq!(countries.region(13), UNKNOWN);
    }
}
