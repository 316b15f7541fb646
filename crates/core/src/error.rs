use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("Build directory '{}' not found", .path.display())]
    MissingSourceDirectory { path: PathBuf },

    #[error("No files matching '{pattern}' found in '{}'", .path.display())]
    NoMatchingFiles { path: PathBuf, pattern: String },

    #[error("No firmware files with recognizable versions found")]
    UnresolvableVersion,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OrganizeError>;

impl OrganizeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingSourceDirectory { .. } => {
                Some("Make sure to run 'npm run build && pio run' first")
            }
            Self::NoMatchingFiles { .. } => Some("Run 'pio run' to build firmware first"),
            _ => None,
        }
    }
}
