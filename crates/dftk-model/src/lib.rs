//! DataFax study metadata model.
//!
//! Plates, modules and fields from the study setup, the geometry of field
//! boxes on the CRF, and the range-indexed lookup tables (visit map, page
//! map, centers, ...) that reports use to label and order records.

pub mod error;
pub mod field;
pub mod label;
pub mod maps;
pub mod module;
pub mod plate;
pub mod qc;
pub mod range_list;
pub mod rect;

pub use error::{ModelError, RangeListError, Result};
pub use field::{Code, Decoded, EditCheckHooks, FieldAttributes, FieldType, split_edit_checks};
pub use maps::{
    Center, Centers, Countries, Country, DomainMap, DomainMapEntry, MissingMap, MissingMapEntry,
    PageMap, PageMapEntry, VisitMap, VisitMapEntry,
};
pub use module::{Field, Module, Style};
pub use plate::{FieldRef, ModuleRef, Plate};
pub use qc::{
    QcProblem, QcStatus, ReasonStatus, qc_status_label, qc_type_label, reason_status_label,
};
pub use range_list::RangeList;
pub use rect::{Rect, bounding_box, normalize_boxes};
