//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Separates the three failure classes of a conversion (missing source, malformed
//! SVG, unwritable destination) and adds semantic variants for argument
//! validation and configuration problems.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("SVG source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed SVG in {}: {source}", path.display())]
    MalformedSvg {
        path: PathBuf,
        #[source]
        source: resvg::usvg::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Output {width}x{height} exceeds the limit of {max_pixels} pixels")]
    TooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    #[error("{} would overwrite {}, already produced from another file", input.display(), output.display())]
    DuplicateOutput { input: PathBuf, output: PathBuf },

    #[error("Size must be greater than 0, got: {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("Config error in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    /// True for failures caused by the source document rather than the destination.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::SourceNotFound { .. } | Error::Read { .. } | Error::MalformedSvg { .. }
        )
    }
}
