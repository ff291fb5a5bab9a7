//! Lookup tables loaded from the pipe-delimited files in a study's `lib/`
//! directory.
//!
//! Every table keeps its entries in file order and answers lookups with the
//! first matching entry, so an entry shadowed by an earlier overlapping one
//! is never returned. Lines with too few columns or unparseable numbers are
//! skipped without error.

use csv::{ReaderBuilder, StringRecord};

mod centers;
mod countries;
mod domain_map;
mod missing_map;
mod page_map;
mod visit_map;

pub use centers::{Center, Centers};
pub use countries::{Countries, Country, UNKNOWN};
pub use domain_map::{DomainMap, DomainMapEntry, OTHER_DOMAIN};
pub use missing_map::{MissingMap, MissingMapEntry};
pub use page_map::{PageMap, PageMapEntry};
pub use visit_map::{VisitMap, VisitMapEntry};

/// Visit numbers in visit and page maps.
pub const VISIT_RANGE: (i64, i64) = (0, 65535);
/// Plate numbers in visit, page and domain maps.
pub const PLATE_RANGE: (i64, i64) = (0, 500);
/// Center numbers in the countries database.
pub const CENTER_RANGE: (i64, i64) = (1, 21460);
/// Patient ids in the centers database.
pub const PATIENT_RANGE: (i64, i64) = (1, 281_474_976_710_656);

/// Read `text` as `|`-separated records with at least `min_columns` columns.
///
/// Quotes carry no meaning in these files and rows may be ragged, so the
/// reader runs unquoted and flexible. Blank lines yield no record.
fn records(text: &str, min_columns: usize) -> impl Iterator<Item = StringRecord> + '_ {
    ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes())
        .into_records()
        .filter_map(Result::ok)
        .filter(move |record| record.len() >= min_columns)
}

/// Column `idx`, or an empty string when the line is short.
fn column(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

/// Parse an optional integer column; empty means `None`.
fn optional_int(text: &str) -> Result<Option<i64>, std::num::ParseIntError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        trimmed.parse().map(Some)
    }
}
