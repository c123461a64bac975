use std::fmt;

use thiserror::Error;

/// High-level error type shared across apk-file components.
#[derive(Debug, Error)]
pub enum ApkFileError {
    #[error("{value} is not a valid {field}, allowed: {}", .allowed.join(", "))]
    Validation {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },
    #[error("input error: {0}")]
    Input(String),
    #[error("requesting {url} failed: {message}")]
    Fetch { url: String, message: String },
    #[error("creating document failed: {0}")]
    Parse(String),
    #[error("{format} is not a supported output format, allowed: {}", .valid.join(", "))]
    UnsupportedFormat {
        format: String,
        valid: Vec<&'static str>,
    },
    #[error("export error: {0}")]
    Export(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ApkFileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<serde_yaml::Error> for ApkFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for ApkFileError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ApkFileError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}

impl ApkFileError {
    pub fn context<T: fmt::Display>(self, ctx: T) -> Self {
        match self {
            ApkFileError::Input(msg) => ApkFileError::Input(format!("{ctx}: {msg}")),
            ApkFileError::Parse(msg) => ApkFileError::Parse(format!("{ctx}: {msg}")),
            ApkFileError::Export(msg) => ApkFileError::Export(format!("{ctx}: {msg}")),
            ApkFileError::Fetch { url, message } => ApkFileError::Fetch {
                url,
                message: format!("{ctx}: {message}"),
            },
            other => other,
        }
    }
}
