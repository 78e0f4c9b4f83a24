use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{FitMode, OutputSize, Rgba};

/// Largest output accepted, in pixels (1 GiB of RGBA8).
pub const MAX_PIXELS: u64 = 16_384 * 16_384;

/// Reject outputs too large to allocate.
pub fn check_pixel_budget(width: u32, height: u32) -> Result<()> {
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(Error::TooLarge {
            width,
            height,
            max_pixels: MAX_PIXELS,
        });
    }
    Ok(())
}

/// Conversion parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    pub size: OutputSize,
    pub fit: FitMode,
    /// Multiplier applied to the document size; only used with `OutputSize::Original`
    pub scale: f32,
    /// Resolution used to resolve physical units (mm, in, pt)
    pub dpi: f32,
    /// Canvas color painted under the drawing; None keeps it transparent
    pub background: Option<Rgba>,
    /// Invert the RGB channels of the drawing, keeping its alpha
    pub negate_colors: bool,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            size: OutputSize::default(),
            fit: FitMode::Contain,
            scale: 1.0,
            dpi: 96.0,
            background: None,
            negate_colors: false,
        }
    }
}

impl ConversionParams {
    /// Exact output of `width` x `height`, everything else default.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size: OutputSize::Exact { width, height },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.size {
            OutputSize::Exact { width, height } if width == 0 || height == 0 => {
                return Err(Error::ZeroSize { width, height });
            }
            OutputSize::Width(0) => return Err(Error::ZeroSize { width: 0, height: 0 }),
            OutputSize::Height(0) => return Err(Error::ZeroSize { width: 0, height: 0 }),
            OutputSize::Exact { width, height } => check_pixel_budget(width, height)?,
            _ => {}
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "scale",
                value: self.scale.to_string(),
            });
        }
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "dpi",
                value: self.dpi.to_string(),
            });
        }
        Ok(())
    }

    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let params: ConversionParams =
            serde_json::from_str(&text).map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })?;
        params.validate()?;
        debug!("Loaded conversion parameters from {:?}: {:?}", path, params);
        Ok(params)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
