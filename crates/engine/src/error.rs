use std::{io, path::PathBuf};

use thiserror::Error;

/// Problems with the rule file. Always fatal, and always raised before any
/// deletion takes place.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("folders[{index}].{field}: {reason}")]
    Invalid {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(index: usize, field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            index,
            field,
            reason: reason.into(),
        }
    }
}
