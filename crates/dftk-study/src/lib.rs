//! DataFax study aggregate.
//!
//! [`Study`] ties the setup tree (styles, modules, plates) to the study's
//! lookup tables and server configuration, and loads all of them from a
//! study directory.

pub mod config;
pub mod error;
pub mod loader;
pub mod setup;
pub mod study;

pub use config::ServerConfig;
pub use error::{Result, StudyError};
pub use study::Study;
