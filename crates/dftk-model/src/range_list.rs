//! Integer interval sets as written in DataFax configuration files.
//!
//! Range lists appear in visit maps, page maps, center databases and on
//! report command lines. The textual form is loose because the files are
//! edited by hand:
//!
//! ```text
//! *                 every value in [min, max]
//! 1-3, 5            1, 2, 3 and 5
//! 1~3 5 7 - 9       `~` is a range separator, blanks separate items
//! ```
//!
//! Pairs are kept in the order they were written and are never merged, so
//! `position` can be used as a display-order key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RangeListError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeList {
    min: i64,
    max: i64,
    values: Vec<(i64, i64)>,
}

impl RangeList {
    /// Create an empty range list bounded by `[min, max]`.
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            values: Vec::new(),
        }
    }

    /// Parse `text` into a new range list bounded by `[min, max]`.
    pub fn parse(min: i64, max: i64, text: &str) -> Result<Self, RangeListError> {
        let mut list = Self::new(min, max);
        list.set_from_str(text)?;
        Ok(list)
    }

    /// Replace the contents of this list with the ranges in `text`.
    ///
    /// Ranges are stored exactly as written: `10-5` is kept as `(10, 5)` and
    /// therefore never matches. On error the list is left unchanged.
    pub fn set_from_str(&mut self, text: &str) -> Result<(), RangeListError> {
        let normalized = normalize_range_syntax(text);
        let mut values = Vec::new();
        for item in normalized.split(',') {
            if item.is_empty() {
                continue;
            }
            if item == "*" {
                values.push((self.min, self.max));
                continue;
            }
            let parts: Vec<&str> = item.split('-').collect();
            let pair = if let [lo, hi] = parts.as_slice() {
                (parse_endpoint(item, lo)?, parse_endpoint(item, hi)?)
            } else {
                let single = parse_endpoint(item, parts[0])?;
                (single, single)
            };
            values.push(pair);
        }
        self.values = values;
        Ok(())
    }

    /// Append a range, swapping the endpoints if `lo > hi`.
    pub fn append(&mut self, lo: i64, hi: i64) {
        if lo > hi {
            self.values.push((hi, lo));
        } else {
            self.values.push((lo, hi));
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.values
            .iter()
            .any(|&(lo, hi)| value >= lo && value <= hi)
    }

    /// Index of the first range covering `value`, or `len()` when none does.
    pub fn position(&self, value: i64) -> usize {
        self.values
            .iter()
            .position(|&(lo, hi)| value >= lo && value <= hi)
            .unwrap_or(self.values.len())
    }

    /// SQL predicate equivalent to [`RangeList::contains`] on `column`.
    ///
    /// Returns `None` for an empty list so callers can omit the clause.
    pub fn to_sql(&self, column: &str) -> Option<String> {
        if self.values.is_empty() {
            return None;
        }
        let clauses: Vec<String> = self
            .values
            .iter()
            .map(|&(lo, hi)| {
                if lo == hi {
                    format!("{column}={lo}")
                } else {
                    format!("{column} between {lo} and {hi}")
                }
            })
            .collect();
        Some(format!("({})", clauses.join(" or ")))
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn ranges(&self) -> &[(i64, i64)] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for RangeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, &(lo, hi)) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            if lo == hi {
                write!(f, "{lo}")?;
            } else {
                write!(f, "{lo}-{hi}")?;
            }
        }
        Ok(())
    }
}

fn parse_endpoint(item: &str, text: &str) -> Result<i64, RangeListError> {
    text.trim()
        .parse::<i64>()
        .map_err(|source| RangeListError {
            item: item.to_string(),
            source,
        })
}

/// Rewrite the loose range syntax into comma separated `lo-hi` items.
///
/// `~` becomes `-`, blanks next to a `-` or `,` are dropped and any other
/// run of blanks becomes a comma.
fn normalize_range_syntax(text: &str) -> String {
    let replaced = text.trim().replace('~', "-");
    let mut out = String::with_capacity(replaced.len());
    let mut pending_blank = false;
    for ch in replaced.chars() {
        if ch.is_whitespace() {
            pending_blank = true;
            continue;
        }
        if pending_blank {
            pending_blank = false;
            let joined = ch == '-' || ch == ',' || out.ends_with('-') || out.ends_with(',');
            if !joined {
                out.push(',');
            }
        }
        out.push(ch);
    }
    out
}
