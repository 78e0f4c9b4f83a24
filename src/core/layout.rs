use tracing::{debug, warn};

use crate::core::params::{ConversionParams, check_pixel_budget};
use crate::error::{Error, Result};
use crate::types::{FitMode, OutputSize};

/// Scale and offset that map document user units onto the output canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

fn clamp_dimension(value: f32) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.min(u32::MAX as f32) as u32
    } else {
        1
    }
}

/// Pixel dimensions of the output for a document of `source_width` x `source_height`.
pub fn resolve_output_size(
    source_width: f32,
    source_height: f32,
    params: &ConversionParams,
) -> Result<(u32, u32)> {
    if !(source_width > 0.0 && source_height > 0.0) {
        return Err(Error::Processing(format!(
            "document has no drawable size: {}x{}",
            source_width, source_height
        )));
    }

    let (width, height) = match params.size {
        OutputSize::Exact { width, height } => (width, height),
        OutputSize::Width(width) => {
            let height = (width as f32 * source_height / source_width).round();
            (width, clamp_dimension(height))
        }
        OutputSize::Height(height) => {
            let width = (height as f32 * source_width / source_height).round();
            (clamp_dimension(width), height)
        }
        OutputSize::Original => (
            clamp_dimension((source_width * params.scale).ceil()),
            clamp_dimension((source_height * params.scale).ceil()),
        ),
    };

    if width == 0 || height == 0 {
        return Err(Error::ZeroSize { width, height });
    }
    check_pixel_budget(width, height)?;

    if params.scale != 1.0 && !matches!(params.size, OutputSize::Original) {
        warn!(
            "Scale {} ignored because an explicit output size ({}) was requested",
            params.scale, params.size
        );
    }

    debug!(
        "Resolved output size {}x{} from document {}x{} ({})",
        width, height, source_width, source_height, params.size
    );
    Ok((width, height))
}

/// Placement of a `source_width` x `source_height` document inside a
/// `width` x `height` canvas.
pub fn fit_transform(
    source_width: f32,
    source_height: f32,
    width: u32,
    height: u32,
    fit: FitMode,
) -> Placement {
    let sx = width as f32 / source_width;
    let sy = height as f32 / source_height;

    let uniform = match fit {
        FitMode::Stretch => {
            return Placement {
                scale_x: sx,
                scale_y: sy,
                translate_x: 0.0,
                translate_y: 0.0,
            };
        }
        FitMode::Contain => sx.min(sy),
        FitMode::Cover => sx.max(sy),
    };

    Placement {
        scale_x: uniform,
        scale_y: uniform,
        translate_x: (width as f32 - source_width * uniform) / 2.0,
        translate_y: (height as f32 - source_height * uniform) / 2.0,
    }
}
