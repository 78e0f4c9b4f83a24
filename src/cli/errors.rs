use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid size parameter: {size}. Expected WxH, N, Wx, xH or 'original'")]
    InvalidSize { size: String },

    #[error("Invalid background color: {color}")]
    InvalidColor { color: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error(transparent)]
    Conversion(#[from] svgpng::Error),
}
