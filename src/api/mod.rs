//! High-level, ergonomic library API: convert an SVG file to a PNG file or to an
//! in-memory buffer, and batch helpers for directories. Prefer these entrypoints
//! over the low-level `core` and `io` modules when integrating svgpng.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::params::ConversionParams;
use crate::core::render::{RenderedImage, render_tree};
use crate::error::{Error, Result};
use crate::io::svg::load_svg;
use crate::io::writers::metadata::{ConversionMetadata, write_sidecar};
use crate::io::writers::png::write_rgba_png;

/// Default source of the application icon, relative to the working directory
pub const DEFAULT_SOURCE: &str = "assets/icon/app_icon.svg";
/// Default destination of the rasterized icon
pub const DEFAULT_DESTINATION: &str = "assets/icon/app_icon.png";

/// Outcome of a conversion written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub destination: PathBuf,
    pub width: u32,
    pub height: u32,
    pub sidecar: Option<PathBuf>,
}

/// Rasterize the SVG at `source` into memory (no disk writes)
pub fn render_svg_to_buffer(source: &Path, params: &ConversionParams) -> Result<RenderedImage> {
    params.validate()?;
    let tree = load_svg(source, params.dpi)?;
    render_tree(&tree, params)
}

/// Rasterize the SVG at `source` and write it as PNG to `destination`,
/// overwriting any existing file
pub fn convert_svg_to_path(
    source: &Path,
    destination: &Path,
    params: &ConversionParams,
) -> Result<ConversionSummary> {
    convert_svg_with_options(source, destination, params, false)
}

/// Like [`convert_svg_to_path`], optionally writing a JSON metadata sidecar.
///
/// The sidecar is committed before the PNG, so a failed sidecar write leaves
/// `destination` untouched.
pub fn convert_svg_with_options(
    source: &Path,
    destination: &Path,
    params: &ConversionParams,
    sidecar: bool,
) -> Result<ConversionSummary> {
    let image = render_svg_to_buffer(source, params)?;

    let sidecar = if sidecar {
        let meta = ConversionMetadata::new(source, destination, &image, params);
        Some(write_sidecar(destination, &meta)?)
    } else {
        None
    };

    write_rgba_png(destination, image.width, image.height, &image.pixels)?;
    info!(
        "Converted {:?} -> {:?} ({}x{})",
        source, destination, image.width, image.height
    );

    Ok(ConversionSummary {
        destination: destination.to_path_buf(),
        width: image.width,
        height: image.height,
        sidecar,
    })
}

/// The original one-shot conversion: default icon paths at 1024x1024
pub fn convert_default_icon() -> Result<ConversionSummary> {
    convert_svg_to_path(
        Path::new(DEFAULT_SOURCE),
        Path::new(DEFAULT_DESTINATION),
        &ConversionParams::default(),
    )
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: usize,
    pub skipped: usize,
    pub errors: usize,
}

fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg") || ext.eq_ignore_ascii_case("svgz"))
}

/// Split the entries of `input_dir` into SVG/SVGZ files (sorted by path) and
/// a count of everything else, subdirectories included.
fn scan_directory(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut files = Vec::new();
    let mut others = 0;
    for entry in std::fs::read_dir(input_dir).map_err(Error::from)? {
        let path = entry.map_err(Error::from)?.path();
        if path.is_file() && is_svg_path(&path) {
            files.push(path);
        } else {
            others += 1;
        }
    }
    files.sort();
    Ok((files, others))
}

/// SVG/SVGZ files directly inside `input_dir`, sorted by path
pub fn iterate_svg_files(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let (files, _) = scan_directory(input_dir)?;
    Ok(files.into_iter())
}

/// Convert every SVG in `input_dir` to `<stem>.png` in `output_dir`.
/// Entries that are not SVG files count as skipped. A file whose PNG name was
/// already produced by an earlier file (`icon.svg` and `icon.svgz`) is an
/// error rather than an overwrite. If `continue_on_error` is true, failures are
/// counted in the report and processing continues; otherwise the first error
/// is returned.
pub fn convert_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &ConversionParams,
    continue_on_error: bool,
    sidecar: bool,
) -> Result<BatchReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir).map_err(|source| Error::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let (files, others) = scan_directory(input_dir)?;
    let mut report = BatchReport {
        skipped: others,
        ..BatchReport::default()
    };
    info!(
        "Found {} SVG files in {:?} ({} other entries skipped)",
        files.len(),
        input_dir,
        report.skipped
    );

    // Lowercased so that names differing only in case clash on any filesystem.
    let mut claimed: HashSet<String> = HashSet::new();

    for path in files {
        let Some(stem) = path.file_stem() else {
            report.skipped += 1;
            continue;
        };
        let mut name = stem.to_os_string();
        name.push(".png");
        let output_path = output_dir.join(&name);

        let result = if claimed.insert(name.to_string_lossy().to_lowercase()) {
            info!("Processing: {:?} -> {:?}", path, output_path);
            convert_svg_with_options(&path, &output_path, params, sidecar)
        } else {
            Err(Error::DuplicateOutput {
                input: path.clone(),
                output: output_path,
            })
        };

        match result {
            Ok(_) => report.converted += 1,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    Ok(report)
}
