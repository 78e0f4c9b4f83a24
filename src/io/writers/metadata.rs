use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::ConversionParams;
use crate::core::render::RenderedImage;
use crate::error::{Error, Result};
use crate::io::writers::atomic::write_atomically;
use crate::types::{FitMode, Rgba};

/// Description of one conversion, written next to the PNG as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionMetadata {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub source_width: f32,
    pub source_height: f32,
    pub width: u32,
    pub height: u32,
    pub fit: FitMode,
    pub background: Option<Rgba>,
    pub negate_colors: bool,
    pub generated_at: DateTime<Utc>,
}

impl ConversionMetadata {
    pub fn new(
        source: &Path,
        destination: &Path,
        image: &RenderedImage,
        params: &ConversionParams,
    ) -> Self {
        Self {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source_width: image.source_width,
            source_height: image.source_height,
            width: image.width,
            height: image.height,
            fit: params.fit,
            background: params.background,
            negate_colors: params.negate_colors,
            generated_at: Utc::now(),
        }
    }
}

/// Sidecar location for a PNG: same stem, `.json` extension.
pub fn sidecar_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("json")
}

pub fn write_sidecar(output_path: &Path, meta: &ConversionMetadata) -> Result<PathBuf> {
    let path = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(meta).map_err(|source| Error::Config {
        path: path.clone(),
        source,
    })?;
    write_atomically(&path, |w| Ok(w.write_all(json_string.as_bytes())?))?;

    info!("Created metadata sidecar: {:?}", path);
    Ok(path)
}
