//! Numeric QC and reason codes from DataFax audit and QC records.
//!
//! Reports key formatting off the exact label text, so the labels here are
//! fixed.

use serde::{Deserialize, Serialize};

/// QC problem type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QcProblem {
    MissingValue,
    IllegalValue,
    InconsistentValue,
    IllegibleValue,
    FaxNoise,
    Other,
    MissingPlate,
    OverdueVisit,
    EcMissingPlate,
}

impl QcProblem {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => Self::MissingValue,
            2 => Self::IllegalValue,
            3 => Self::InconsistentValue,
            4 => Self::IllegibleValue,
            5 => Self::FaxNoise,
            6 => Self::Other,
            21 => Self::MissingPlate,
            22 => Self::OverdueVisit,
            23 => Self::EcMissingPlate,
            _ => return None,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MissingValue => "missing value",
            Self::IllegalValue => "illegal value",
            Self::InconsistentValue => "inconsistent value",
            Self::IllegibleValue => "illegible value",
            Self::FaxNoise => "fax noise",
            Self::Other => "other problem",
            Self::MissingPlate => "missing plate",
            Self::OverdueVisit => "overdue visit",
            Self::EcMissingPlate => "EC missing plate",
        }
    }
}

/// Label for a QC type code; unknown codes read `unknown type`.
pub fn qc_type_label(code: i64) -> &'static str {
    QcProblem::from_code(code).map_or("unknown type", QcProblem::label)
}

/// QC resolution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QcStatus {
    Pending,
    New,
    InUnsentReport,
    ResolvedNa,
    ResolvedIrrelevant,
    ResolvedCorrected,
    InSentReport,
    Deleted,
}

impl QcStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Self::Pending,
            1 => Self::New,
            2 => Self::InUnsentReport,
            3 => Self::ResolvedNa,
            4 => Self::ResolvedIrrelevant,
            5 => Self::ResolvedCorrected,
            6 => Self::InSentReport,
            7 => Self::Deleted,
            _ => return None,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "unresolved(pending)",
            Self::New => "unresolved(new)",
            Self::InUnsentReport => "unresolved(in unsent report)",
            Self::ResolvedNa => "resolved(NA)",
            Self::ResolvedIrrelevant => "resolved(irrelevant)",
            Self::ResolvedCorrected => "resolved(corrected)",
            Self::InSentReport => "unresolved(in sent report)",
            Self::Deleted => "deleted",
        }
    }
}

/// Label for a QC status code.
///
/// With `simplify`, codes collapse to `unresolved` (0, 1, 2, 6, 7) or
/// `resolved` (everything else, including unknown codes). Otherwise unknown
/// codes read `unknown`.
pub fn qc_status_label(code: i64, simplify: bool) -> &'static str {
    if simplify {
        return if matches!(code, 0 | 1 | 2 | 6 | 7) {
            "unresolved"
        } else {
            "resolved"
        };
    }
    QcStatus::from_code(code).map_or("unknown", QcStatus::label)
}

/// Review status of a reason-for-change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonStatus {
    Approved,
    Rejected,
    Pending,
}

impl ReasonStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Approved),
            2 => Some(Self::Rejected),
            3 => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Pending => "pending",
        }
    }
}

pub fn reason_status_label(code: i64) -> Option<&'static str> {
    ReasonStatus::from_code(code).map(ReasonStatus::label)
}
