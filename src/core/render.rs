use resvg::tiny_skia::{Color, Pixmap, PixmapPaint, Transform};
use resvg::usvg;
use tracing::{debug, info};

use crate::core::layout::{fit_transform, resolve_output_size};
use crate::core::params::ConversionParams;
use crate::error::{Error, Result};

/// Rasterized output held in memory as straight-alpha RGBA8
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub source_width: f32,
    pub source_height: f32,
    pub pixels: Vec<u8>,
}

impl RenderedImage {
    /// RGBA of the pixel at (`x`, `y`), or None when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or_else(|| {
        Error::Processing(format!("cannot allocate a {}x{} canvas", width, height))
    })
}

/// Invert color channels of a premultiplied buffer in place. For a pixel with
/// alpha `a` the straight inverse `1 - c` premultiplies to `a - c`.
fn negate_premultiplied(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = a.saturating_sub(px[0]);
        px[1] = a.saturating_sub(px[1]);
        px[2] = a.saturating_sub(px[2]);
    }
}

fn demultiply(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

/// Rasterize a parsed tree according to `params`.
pub fn render_tree(tree: &usvg::Tree, params: &ConversionParams) -> Result<RenderedImage> {
    params.validate()?;

    let source = tree.size();
    let (source_width, source_height) = (source.width(), source.height());
    let (width, height) = resolve_output_size(source_width, source_height, params)?;
    let placement = fit_transform(source_width, source_height, width, height, params.fit);
    let transform = Transform::from_row(
        placement.scale_x,
        0.0,
        0.0,
        placement.scale_y,
        placement.translate_x,
        placement.translate_y,
    );
    debug!("Render placement: {:?}", placement);

    let mut canvas = new_pixmap(width, height)?;
    if let Some(bg) = params.background {
        canvas.fill(Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
    }

    if params.background.is_none() && !params.negate_colors {
        resvg::render(tree, transform, &mut canvas.as_mut());
    } else {
        let mut layer = new_pixmap(width, height)?;
        resvg::render(tree, transform, &mut layer.as_mut());
        if params.negate_colors {
            negate_premultiplied(layer.data_mut());
        }
        canvas.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    info!(
        "Rendered {}x{} document to {}x{} pixels",
        source_width, source_height, width, height
    );

    Ok(RenderedImage {
        width,
        height,
        source_width,
        source_height,
        pixels: demultiply(&canvas),
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::io::svg::parse_svg;
    use crate::types::{FitMode, OutputSize, Rgba};

    const HALF_BLUE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
        <rect x="0" y="0" width="5" height="10" fill="#0000ff"/>
    </svg>"##;

    const WIDE_GREEN: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 10">
        <rect width="20" height="10" fill="#00ff00"/>
    </svg>"##;

    fn tree(svg: &str) -> usvg::Tree {
        parse_svg(svg.as_bytes(), Path::new("test.svg"), 96.0).unwrap()
    }

    #[test]
    fn transparent_background_by_default() {
        let image = render_tree(&tree(HALF_BLUE), &ConversionParams::with_size(20, 20)).unwrap();
        assert_eq!(image.pixels.len(), 20 * 20 * 4);
        assert_eq!(image.pixel(2, 10), Some([0, 0, 255, 255]));
        assert_eq!(image.pixel(17, 10), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(20, 0), None);
    }

    #[test]
    fn background_fills_uncovered_area() {
        let mut params = ConversionParams::with_size(20, 20);
        params.background = Some(Rgba::WHITE);
        let image = render_tree(&tree(HALF_BLUE), &params).unwrap();
        assert_eq!(image.pixel(2, 10), Some([0, 0, 255, 255]));
        assert_eq!(image.pixel(17, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn negation_keeps_alpha_and_spares_background() {
        let mut params = ConversionParams::with_size(20, 20);
        params.negate_colors = true;
        let image = render_tree(&tree(HALF_BLUE), &params).unwrap();
        assert_eq!(image.pixel(2, 10), Some([255, 255, 0, 255]));
        assert_eq!(image.pixel(17, 10), Some([0, 0, 0, 0]));

        params.background = Some(Rgba::BLACK);
        let image = render_tree(&tree(HALF_BLUE), &params).unwrap();
        assert_eq!(image.pixel(17, 10), Some([0, 0, 0, 255]));
    }

    #[test]
    fn contain_letterboxes_wide_document() {
        let image = render_tree(&tree(WIDE_GREEN), &ConversionParams::with_size(20, 20)).unwrap();
        assert_eq!(image.pixel(10, 2), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(10, 10), Some([0, 255, 0, 255]));
        assert_eq!(image.pixel(10, 17), Some([0, 0, 0, 0]));
    }

    #[test]
    fn stretch_and_cover_fill_the_canvas() {
        for fit in [FitMode::Stretch, FitMode::Cover] {
            let mut params = ConversionParams::with_size(20, 20);
            params.fit = fit;
            let image = render_tree(&tree(WIDE_GREEN), &params).unwrap();
            assert_eq!(image.pixel(10, 1), Some([0, 255, 0, 255]), "{fit}");
            assert_eq!(image.pixel(1, 18), Some([0, 255, 0, 255]), "{fit}");
        }
    }

    #[test]
    fn original_size_uses_document_size() {
        let mut params = ConversionParams::default();
        params.size = OutputSize::Original;
        params.scale = 2.0;
        let image = render_tree(&tree(WIDE_GREEN), &params).unwrap();
        assert_eq!((image.width, image.height), (40, 20));
        assert_eq!((image.source_width, image.source_height), (20.0, 10.0));
    }
}
