//! Error types for exporting persona cards

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while writing an exported card
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing or renaming the output file failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The SVG could not be decoded for rasterization
    #[error("failed to decode SVG: {0}")]
    Decode(String),

    /// Decoding did not finish in time
    #[error("SVG decode did not finish within {0:?}")]
    DecodeTimeout(Duration),

    /// The rasterization worker thread could not be started
    #[error("failed to start rasterization worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The decode worker stopped without reporting a result
    #[error("rasterization worker exited without a result")]
    WorkerLost,

    /// The pixel surface could not be allocated
    #[error("cannot allocate a {width}x{height} pixel surface")]
    Surface { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    /// Scale factor outside the supported range
    #[error("scale factor {scale} is outside 1..={max}")]
    InvalidScale { scale: u32, max: u32 },
}

impl ExportError {
    /// Create an I/O error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = ExportError::DecodeTimeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "SVG decode did not finish within 250ms");
    }

    #[test]
    fn test_invalid_scale_display() {
        let err = ExportError::InvalidScale { scale: 12, max: 8 };
        assert!(err.to_string().contains("1..=8"));
    }
}
