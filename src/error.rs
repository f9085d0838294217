//! Error types for persona input

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when a `field=value` pair cannot become a form update.
///
/// Typed updates through [`crate::FormUpdate`] never fail; only the textual
/// surface used by the CLI can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{field}' (known fields: {known})")]
    UnknownField { field: String, known: String },

    #[error("'{value}' is not a valid {field} (valid options: {valid})")]
    InvalidOption {
        field: String,
        value: String,
        valid: String,
    },

    #[error("invalid color '{0}': expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("expected field=value, got '{0}'")]
    MalformedAssignment(String),
}

impl FormError {
    /// Create an unknown field error listing the accepted names
    pub fn unknown_field<'a>(
        field: impl Into<String>,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownField {
            field: field.into(),
            known: known.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Create an invalid option error listing the declared options
    pub fn invalid_option<'a>(
        field: impl Into<String>,
        value: impl Into<String>,
        valid: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::InvalidOption {
            field: field.into(),
            value: value.into(),
            valid: valid.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}

/// Errors that can occur when loading or saving persona files
#[derive(Error, Debug)]
pub enum PersonaFileError {
    #[error("failed to read persona file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse persona TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize persona TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}
