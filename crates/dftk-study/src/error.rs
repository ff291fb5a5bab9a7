use std::path::PathBuf;

use dftk_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse study setup: {source}")]
    SetupJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("module ref {module_ref} on plate {plate} names unknown module {module_id}")]
    UnknownModule {
        plate: i64,
        module_ref: i64,
        module_id: i64,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl StudyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures that leave the study usable, such as a malformed
    /// setup file.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SetupJson { .. } | Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;
