//! Attribute schema shared by styles, module fields and plate field refs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rect::{Rect, bounding_box, normalize_boxes};

/// Field data type as named in the setup file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FieldType {
    Number,
    String,
    Date,
    Time,
    Choice,
    Check,
    Vas,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Number => "Number",
            FieldType::String => "String",
            FieldType::Date => "Date",
            FieldType::Time => "Time",
            FieldType::Choice => "Choice",
            FieldType::Check => "Check",
            FieldType::Vas => "VAS",
            FieldType::Other(name) => name,
        }
    }

    /// Choice and check fields store a code that maps onto a box.
    pub fn is_coded(&self) -> bool {
        matches!(self, FieldType::Choice | FieldType::Check)
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Number" => FieldType::Number,
            "String" => FieldType::String,
            "Date" => FieldType::Date,
            "Time" => FieldType::Time,
            "Choice" => FieldType::Choice,
            "Check" => FieldType::Check,
            "VAS" => FieldType::Vas,
            other => FieldType::Other(other.to_string()),
        })
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(field_type) => field_type,
            Err(never) => match never {},
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a choice/check coding.
///
/// `code` keeps the textual form from the setup file; stored values are
/// compared against it as text, so `"01"` and `"1"` are different codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub code: String,
    pub label: String,
}

impl Code {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Result of decoding a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded<'a> {
    /// Position of the matching code, which is also the box to mark.
    pub box_index: Option<usize>,
    pub text: &'a str,
}

/// Edit-check scripts attached to the four field hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCheckHooks {
    pub plate_enter: Option<String>,
    pub field_enter: Option<String>,
    pub field_exit: Option<String>,
    pub plate_exit: Option<String>,
}

impl EditCheckHooks {
    /// Hook scripts in execution order: plate enter, field enter, field exit, plate exit.
    pub fn scripts(&self) -> impl Iterator<Item = &str> {
        [
            &self.plate_enter,
            &self.field_enter,
            &self.field_exit,
            &self.plate_exit,
        ]
        .into_iter()
        .filter_map(|script| script.as_deref())
    }
}

/// Attributes common to [`Style`](crate::Style), [`Field`](crate::Field)
/// and [`FieldRef`](crate::FieldRef).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAttributes {
    pub number: i64,
    pub name: Option<String>,
    /// May contain `$(plate)`, `$(rplate)` and `$(field)` placeholders.
    pub alias: Option<String>,
    pub style_name: Option<String>,
    pub description: Option<String>,
    pub field_type: Option<FieldType>,
    pub legal: Option<String>,
    pub format: Option<String>,
    pub help: Option<String>,
    pub constant: Option<String>,
    pub prompt: Option<String>,
    pub comment: Option<String>,
    pub units: Option<String>,
    pub edit_checks: EditCheckHooks,
    pub skip_number: Option<i64>,
    pub skip_condition: Option<String>,
    pub inherited: Option<i64>,
    pub locked: Option<i64>,
    pub reason_level: Option<i64>,
    pub blinded: String,
    pub required: String,
    pub store: i64,
    pub usage: String,
    pub mapping: Option<String>,
    pub year_cutoff: Option<i64>,
    pub date_rounding: Option<String>,
    pub codes: Vec<Code>,
    /// Field boxes, already normalized; load raw boxes with
    /// [`FieldAttributes::set_rects`].
    pub rects: Vec<Rect>,
}

impl Default for FieldAttributes {
    fn default() -> Self {
        Self {
            number: 0,
            name: None,
            alias: None,
            style_name: None,
            description: None,
            field_type: None,
            legal: None,
            format: None,
            help: None,
            constant: None,
            prompt: None,
            comment: None,
            units: None,
            edit_checks: EditCheckHooks::default(),
            skip_number: None,
            skip_condition: None,
            inherited: None,
            locked: None,
            reason_level: None,
            blinded: "No".to_string(),
            required: "Optional".to_string(),
            store: 1,
            usage: "Standard".to_string(),
            mapping: None,
            year_cutoff: None,
            date_rounding: None,
            codes: Vec::new(),
            rects: Vec::new(),
        }
    }
}

impl FieldAttributes {
    /// Replace the boxes with the normalized form of `raw`.
    pub fn set_rects(&mut self, raw: &[Rect]) {
        self.rects = normalize_boxes(raw);
    }

    /// Union of all boxes; `None` for fields that are not drawn on the form.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box(&self.rects)
    }

    pub fn is_blinded(&self) -> bool {
        self.blinded == "Yes"
    }

    pub fn is_coded(&self) -> bool {
        self.field_type.as_ref().is_some_and(FieldType::is_coded)
    }

    /// Decode a stored value into its display text.
    ///
    /// Coded fields return the label of the first code whose text equals
    /// `value` along with that code's position. Anything else, including
    /// an unmapped code, comes back unchanged with no box.
    pub fn decode<'a>(&'a self, value: &'a str) -> Decoded<'a> {
        if self.is_coded()
            && let Some((idx, code)) = self
                .codes
                .iter()
                .enumerate()
                .find(|(_, code)| code.code == value)
        {
            return Decoded {
                box_index: Some(idx),
                text: &code.label,
            };
        }
        Decoded {
            box_index: None,
            text: value,
        }
    }

    /// Alias with placeholders filled in for a field on `plate`.
    pub fn expanded_alias(&self, plate: i64) -> Option<String> {
        let alias = self.alias.as_deref()?;
        Some(
            alias
                .replace("$(plate)", &format!("{plate:03}"))
                .replace("$(rplate)", &plate.to_string())
                .replace("$(field)", &self.number.to_string()),
        )
    }

    /// Edit-check invocations from all hooks, in hook order.
    pub fn edit_check_calls(&self) -> Vec<&str> {
        self.edit_checks
            .scripts()
            .flat_map(split_edit_checks)
            .collect()
    }
}

fn is_ident_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'@'
}

/// Split a hook script into edit-check invocations.
///
/// Each invocation is an identifier, optionally followed by an argument
/// list. A `)` inside double quotes or after a backslash does not close the
/// list; an unterminated list runs to the end of the script.
pub fn split_edit_checks(script: &str) -> Vec<&str> {
    let bytes = script.as_bytes();
    let len = bytes.len();
    let mut calls = Vec::new();
    let mut i = 0;
    while i < len {
        while i < len && !is_ident_char(bytes[i]) {
            i += 1;
        }
        if i >= len {
            break;
        }
        let start = i;
        while i < len && is_ident_char(bytes[i]) {
            i += 1;
        }
        if i >= len || bytes[i] != b'(' {
            calls.push(&script[start..i]);
            continue;
        }
        i += 1;
        let mut in_quote = false;
        let mut escaped = false;
        while i < len {
            let ch = bytes[i];
            i += 1;
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                b'\\' => escaped = true,
                b'"' => in_quote = !in_quote,
                b')' if !in_quote => break,
                _ => {}
            }
        }
        calls.push(&script[start..i]);
    }
    calls
}
