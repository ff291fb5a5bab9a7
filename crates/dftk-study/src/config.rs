//! `DFserver.cf` study server configuration.

use std::collections::BTreeMap;

/// Key holding the display name of the study.
pub const STUDY_NAME: &str = "STUDY_NAME";

/// `KEY=VALUE` settings from `DFserver.cf`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    values: BTreeMap<String, String>,
}

impl ServerConfig {
    /// Parse `KEY=VALUE` lines.
    ///
    /// Lines without `=` are ignored. The value stops at a second `=`, so
    /// `A=b=c` sets `A` to `b`. Later lines override earlier ones.
    pub fn parse(text: &str) -> Self {
        let values = text
            .lines()
            .filter_map(|line| {
                let mut parts = line.split('=');
                let key = parts.next()?;
                let value = parts.next()?;
                Some((key.to_string(), value.to_string()))
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
