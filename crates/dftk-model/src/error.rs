use std::num::ParseIntError;

use thiserror::Error;

/// A range list item whose endpoint is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid range item {item:?}: {source}")]
pub struct RangeListError {
    pub item: String,
    #[source]
    pub source: ParseIntError,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("style already exists: {name}")]
    DuplicateStyle { name: String },

    #[error("module name already exists: {name}")]
    DuplicateModuleName { name: String },

    #[error("module id already exists: {id}")]
    DuplicateModuleId { id: i64 },

    #[error("no module ids left to allocate")]
    ModuleIdsExhausted,

    #[error("plate number already exists: {number}")]
    DuplicatePlate { number: i64 },

    #[error("plate {plate} has no module reference with id {id}")]
    UnknownModuleRef { plate: i64, id: i64 },

    #[error(transparent)]
    RangeList(#[from] RangeListError),
}

pub type Result<T> = std::result::Result<T, ModelError>;
