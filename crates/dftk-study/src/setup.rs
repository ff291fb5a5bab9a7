//! Serde schema for the `DFsetup` JSON document.
//!
//! Setup files are written by several generations of the DataFax setup tool
//! and are loose about types: numbers sometimes arrive as strings, code
//! numbers as either, and optional lists as `null`. The deserializers here
//! accept all of those forms and [`SetupField::into_attributes`] converts
//! the result into the model's [`FieldAttributes`].

use dftk_model::{Code, EditCheckHooks, FieldAttributes, FieldType, Rect};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetupDocument {
    #[serde(default)]
    pub study: Option<SetupStudy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetupStudy {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "int")]
    pub number: Option<i64>,
    #[serde(default, deserialize_with = "list")]
    pub styles: Vec<SetupStyle>,
    #[serde(default, deserialize_with = "list")]
    pub modules: Vec<SetupModule>,
    #[serde(default, deserialize_with = "list")]
    pub plates: Vec<SetupPlate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStyle {
    pub style_name: String,
    #[serde(flatten)]
    pub field: SetupField,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetupModule {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "list")]
    pub fields: Vec<SetupModuleField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetupModuleField {
    pub id: i64,
    #[serde(flatten)]
    pub field: SetupField,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupPlate {
    pub number: i64,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "list")]
    pub module_refs: Vec<SetupModuleRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupModuleRef {
    pub id: i64,
    pub module_id: i64,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "int")]
    pub instance: Option<i64>,
    #[serde(default, deserialize_with = "list")]
    pub field_refs: Vec<SetupFieldRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupFieldRef {
    pub id: i64,
    pub field_id: i64,
    #[serde(flatten)]
    pub field: SetupField,
}

/// Field attributes shared by styles, module fields and field refs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupField {
    #[serde(default, deserialize_with = "int")]
    pub number: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub style_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "text")]
    pub field_type: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub legal: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub help: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub constant: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub units: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub field_enter: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub field_exit: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub plate_enter: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub plate_exit: Option<String>,
    #[serde(default, rename = "skipTo", deserialize_with = "int")]
    pub skip_number: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub skip_condition: Option<String>,
    #[serde(default, rename = "inheritedBitmap", deserialize_with = "int")]
    pub inherited: Option<i64>,
    #[serde(default, rename = "lockedBitmap", deserialize_with = "int")]
    pub locked: Option<i64>,
    #[serde(default, rename = "level", deserialize_with = "int")]
    pub reason_level: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub blinded: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub required: Option<String>,
    #[serde(default, deserialize_with = "int")]
    pub store: Option<i64>,
    #[serde(default, rename = "use", deserialize_with = "text")]
    pub usage: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub mapping: Option<String>,
    #[serde(default, deserialize_with = "int")]
    pub year_cutoff: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub date_rounding: Option<String>,
    #[serde(default, deserialize_with = "list")]
    pub codes: Vec<SetupCode>,
    #[serde(default, deserialize_with = "list")]
    pub rects: Vec<SetupRect>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetupCode {
    /// Kept as text; `1` and `"1"` are the same code, `"01"` is not.
    #[serde(deserialize_with = "required_text")]
    pub number: String,
    #[serde(default, deserialize_with = "text")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SetupRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl From<SetupRect> for Rect {
    fn from(rect: SetupRect) -> Self {
        Rect::new(rect.x, rect.y, rect.w, rect.h)
    }
}

impl SetupField {
    /// Convert into model attributes, filling unset flags with their
    /// defaults and normalizing the raw boxes.
    pub fn into_attributes(self) -> FieldAttributes {
        let defaults = FieldAttributes::default();
        let rects: Vec<Rect> = self.rects.iter().copied().map(Rect::from).collect();
        let mut attrs = FieldAttributes {
            number: self.number.unwrap_or(defaults.number),
            name: self.name,
            alias: self.alias,
            style_name: self.style_name,
            description: self.description,
            field_type: self.field_type.map(FieldType::from),
            legal: self.legal,
            format: self.format,
            help: self.help,
            constant: self.constant,
            prompt: self.prompt,
            comment: self.comment,
            units: self.units,
            edit_checks: EditCheckHooks {
                plate_enter: self.plate_enter,
                field_enter: self.field_enter,
                field_exit: self.field_exit,
                plate_exit: self.plate_exit,
            },
            skip_number: self.skip_number,
            skip_condition: self.skip_condition,
            inherited: self.inherited,
            locked: self.locked,
            reason_level: self.reason_level,
            blinded: self.blinded.unwrap_or(defaults.blinded),
            required: self.required.unwrap_or(defaults.required),
            store: self.store.unwrap_or(defaults.store),
            usage: self.usage.unwrap_or(defaults.usage),
            mapping: self.mapping,
            year_cutoff: self.year_cutoff,
            date_rounding: self.date_rounding,
            codes: self
                .codes
                .into_iter()
                .map(|code| Code::new(code.number, code.label.unwrap_or_default()))
                .collect(),
            rects: Vec::new(),
        };
        attrs.set_rects(&rects);
        attrs
    }
}

/// Parse a complete setup document.
pub fn parse_setup(json: &str) -> serde_json::Result<SetupDocument> {
    serde_json::from_str(json)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Bool(value) => value.to_string(),
            Scalar::Text(value) => value,
        }
    }

    fn into_int(self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(value),
            Scalar::Text(value) => value.trim().parse().ok(),
            Scalar::Float(_) | Scalar::Bool(_) => None,
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_text)
}

/// Integers may be written as numbers or numeric strings; anything else
/// reads as unset.
fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_int))
}

fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
