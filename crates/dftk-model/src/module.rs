use serde::{Deserialize, Serialize};

use crate::field::FieldAttributes;

/// A named field template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    pub attrs: FieldAttributes,
}

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: FieldAttributes::default(),
        }
    }
}

/// A field template owned by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: i64,
    pub module_id: i64,
    pub attrs: FieldAttributes,
}

/// A reusable group of fields, instantiated on plates through module refs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    id: i64,
    name: String,
    pub description: Option<String>,
    fields: Vec<Field>,
}

impl Module {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_field(&mut self, id: i64, attrs: FieldAttributes) -> &mut Field {
        self.fields.push(Field {
            id,
            module_id: self.id,
            attrs,
        });
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }

    pub fn field_by_id(&self, id: i64) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Order fields by case-insensitive name; unnamed fields sort first.
    pub fn sort_fields(&mut self) {
        self.fields.sort_by_cached_key(|field| {
            field
                .attrs
                .name
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default()
        });
    }
}
