//! Plates and the module/field references placed on them.
//!
//! A plate owns its module refs and each module ref owns its field refs;
//! nothing points back up the tree. The flattened, number-ordered field list
//! is computed on first use and dropped whenever a field ref is added.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::field::{Decoded, FieldAttributes};
use crate::rect::Rect;

/// A field as placed on a plate, with any per-plate overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRef {
    pub id: i64,
    pub module_ref_id: i64,
    /// Module that owns the referenced template field.
    pub module_id: i64,
    /// Template field this ref instantiates, if it resolved.
    pub field_id: Option<i64>,
    pub attrs: FieldAttributes,
}

impl FieldRef {
    pub fn new(id: i64, attrs: FieldAttributes) -> Self {
        Self {
            id,
            module_ref_id: 0,
            module_id: 0,
            field_id: None,
            attrs,
        }
    }

    pub fn number(&self) -> i64 {
        self.attrs.number
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        self.attrs.bounding_box()
    }

    pub fn decode<'a>(&'a self, value: &'a str) -> Decoded<'a> {
        self.attrs.decode(value)
    }

    pub fn is_blinded(&self) -> bool {
        self.attrs.is_blinded()
    }
}

/// An instance of a module on a plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRef {
    pub id: i64,
    pub module_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub instance: i64,
    field_refs: Vec<FieldRef>,
}

impl ModuleRef {
    pub fn new(id: i64, module_id: i64) -> Self {
        Self {
            id,
            module_id,
            name: None,
            description: None,
            instance: 0,
            field_refs: Vec::new(),
        }
    }

    pub fn field_refs(&self) -> &[FieldRef] {
        &self.field_refs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldSlot {
    module_ref: usize,
    field_ref: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plate {
    number: i64,
    pub description: Option<String>,
    module_refs: Vec<ModuleRef>,
    #[serde(skip)]
    fields: OnceLock<Vec<FieldSlot>>,
}

impl Plate {
    pub fn new(number: i64) -> Self {
        Self {
            number,
            description: None,
            module_refs: Vec::new(),
            fields: OnceLock::new(),
        }
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn module_refs(&self) -> &[ModuleRef] {
        &self.module_refs
    }

    pub fn module_ref(&self, id: i64) -> Option<&ModuleRef> {
        self.module_refs.iter().find(|module_ref| module_ref.id == id)
    }

    /// Add a module ref, replacing any existing ref with the same id.
    pub fn add_module_ref(&mut self, module_ref: ModuleRef) -> &mut ModuleRef {
        self.field_change();
        let idx = match self.module_refs.iter().position(|m| m.id == module_ref.id) {
            Some(idx) => {
                self.module_refs[idx] = module_ref;
                idx
            }
            None => {
                self.module_refs.push(module_ref);
                self.module_refs.len() - 1
            }
        };
        &mut self.module_refs[idx]
    }

    /// Add a field ref to the module ref `module_ref_id`.
    ///
    /// A field ref with the same id in that module ref is replaced.
    pub fn add_field_ref(&mut self, module_ref_id: i64, mut field_ref: FieldRef) -> Result<&FieldRef> {
        let module_idx = self
            .module_refs
            .iter()
            .position(|m| m.id == module_ref_id)
            .ok_or(ModelError::UnknownModuleRef {
                plate: self.number,
                id: module_ref_id,
            })?;
        self.field_change();
        let module_ref = &mut self.module_refs[module_idx];
        field_ref.module_ref_id = module_ref.id;
        field_ref.module_id = module_ref.module_id;
        let refs = &mut module_ref.field_refs;
        let idx = match refs.iter().position(|f| f.id == field_ref.id) {
            Some(idx) => {
                refs[idx] = field_ref;
                idx
            }
            None => {
                refs.push(field_ref);
                refs.len() - 1
            }
        };
        Ok(&self.module_refs[module_idx].field_refs[idx])
    }

    /// Drop the cached field list.
    pub fn field_change(&mut self) {
        self.fields = OnceLock::new();
    }

    /// All field refs on the plate, ordered by field number.
    pub fn field_list(&self) -> Vec<&FieldRef> {
        self.slots().iter().map(|slot| self.resolve(*slot)).collect()
    }

    /// The `position`-th field in [`Plate::field_list`] order, counting from 1.
    ///
    /// This is positional, not a lookup by field number; the two only agree
    /// when the plate's field numbers run contiguously from 1.
    pub fn field_at(&self, position: usize) -> Option<&FieldRef> {
        let idx = position.checked_sub(1)?;
        self.slots().get(idx).map(|slot| self.resolve(*slot))
    }

    /// Field refs that have geometry on the form.
    pub fn visual_fields(&self) -> impl Iterator<Item = &FieldRef> {
        self.field_list()
            .into_iter()
            .filter(|field| field.bounding_box().is_some())
    }

    fn slots(&self) -> &[FieldSlot] {
        self.fields.get_or_init(|| {
            let mut slots: Vec<FieldSlot> = self
                .module_refs
                .iter()
                .enumerate()
                .flat_map(|(module_ref, m)| {
                    (0..m.field_refs.len()).map(move |field_ref| FieldSlot {
                        module_ref,
                        field_ref,
                    })
                })
                .collect();
            slots.sort_by_key(|slot| self.resolve(*slot).number());
            slots
        })
    }

    fn resolve(&self, slot: FieldSlot) -> &FieldRef {
        &self.module_refs[slot.module_ref].field_refs[slot.field_ref]
    }
}
