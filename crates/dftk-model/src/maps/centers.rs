use csv::StringRecord;
use serde::Serialize;

use super::{PATIENT_RANGE, column, records};
use crate::range_list::RangeList;

const MIN_COLUMNS: usize = 11;

/// First patient-range column; also holds the error-monitor marker.
const PATIENTS_COLUMN: usize = 10;

const ERROR_MONITOR: &str = "ERROR MONITOR";

/// One line of `DFcenters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Center {
    pub number: i64,
    /// Catch-all center for patients no other center claims.
    pub is_error_monitor: bool,
    pub contact: String,
    pub affiliation: String,
    pub address: String,
    pub primary_fax: String,
    pub secondary_fax: String,
    pub phone: String,
    pub investigator: String,
    pub investigator_phone: String,
    pub reply_address: String,
    pub patients: RangeList,
}

impl Center {
    fn parse(record: &StringRecord) -> Option<Self> {
        let (patient_min, patient_max) = PATIENT_RANGE;
        let mut patients = RangeList::new(patient_min, patient_max);
        let is_error_monitor = column(record, PATIENTS_COLUMN) == ERROR_MONITOR;
        if !is_error_monitor {
            for range in record.iter().skip(PATIENTS_COLUMN) {
                // Each column is a single `lo hi` pair.
                if let [lo, hi] = range.split(' ').collect::<Vec<_>>().as_slice() {
                    patients.append(lo.parse().ok()?, hi.parse().ok()?);
                }
            }
        }
        let text = |idx: usize| column(record, idx).to_string();
        Some(Self {
            number: column(record, 0).trim().parse().ok()?,
            is_error_monitor,
            contact: text(1),
            affiliation: text(2),
            address: text(3),
            primary_fax: text(4),
            secondary_fax: text(5),
            phone: text(6),
            investigator: text(7),
            investigator_phone: text(8),
            reply_address: text(9),
            patients,
        })
    }
}

/// The `DFcenters` database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Centers {
    centers: Vec<Center>,
}

impl Centers {
    pub fn load(&mut self, text: &str) -> usize {
        self.centers = records(text, MIN_COLUMNS)
            .filter_map(|record| Center::parse(&record))
            .collect();
        self.centers.len()
    }

    pub fn centers(&self) -> &[Center] {
        &self.centers
    }

    pub fn by_number(&self, number: i64) -> Option<&Center> {
        self.centers.iter().find(|center| center.number == number)
    }

    /// Center responsible for patient `pid`.
    ///
    /// The first center whose patient ranges cover `pid` wins. Unclaimed
    /// patients belong to the error-monitor center (the last one listed if
    /// there are several); without one the patient has no center.
    pub fn center(&self, pid: i64) -> Option<&Center> {
        let mut error_monitor = None;
        for center in &self.centers {
            if center.patients.contains(pid) {
                return Some(center);
            }
            if center.is_error_monitor {
                error_monitor = Some(center);
            }
        }
        error_monitor
    }

    /// Number of the center for `pid`, or `0` when there is none.
    pub fn center_number(&self, pid: i64) -> i64 {
        self.center(pid).map_or(0, |center| center.number)
    }
}
