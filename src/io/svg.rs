use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use resvg::usvg::{self, fontdb};
use tracing::{debug, info};

use crate::error::{Error, Result};

static SYSTEM_FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    info!("Loaded {} system font faces", db.len());
    Arc::new(db)
});

/// Read the raw bytes of an SVG or SVGZ document.
pub fn read_svg_source(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => {
            debug!("Read {} bytes from {:?}", data.len(), path);
            Ok(data)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse SVG bytes into a render tree.
///
/// `origin` names the document in errors and anchors relative `href`s: its
/// parent directory becomes the resources directory.
pub fn parse_svg(data: &[u8], origin: &Path, dpi: f32) -> Result<usvg::Tree> {
    let mut options = usvg::Options::default();
    options.dpi = dpi;
    options.resources_dir = fs::canonicalize(origin)
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));
    options.fontdb = SYSTEM_FONTS.clone();

    let tree = usvg::Tree::from_data(data, &options).map_err(|source| Error::MalformedSvg {
        path: origin.to_path_buf(),
        source,
    })?;

    let size = tree.size();
    debug!(
        "Parsed {:?}: document size {}x{}",
        origin,
        size.width(),
        size.height()
    );
    Ok(tree)
}

/// Read and parse in one step.
pub fn load_svg(path: &Path, dpi: f32) -> Result<usvg::Tree> {
    let data = read_svg_source(path)?;
    parse_svg(&data, path, dpi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.svg");
        assert!(matches!(
            read_svg_source(&path),
            Err(Error::SourceNotFound { path: p }) if p == path
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = parse_svg(b"this is not xml", Path::new("garbage.svg"), 96.0).unwrap_err();
        assert!(matches!(err, Error::MalformedSvg { .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn parses_view_box_size() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 32"></svg>"#;
        let tree = parse_svg(svg, Path::new("inline.svg"), 96.0).unwrap();
        assert_eq!(tree.size().width(), 64.0);
        assert_eq!(tree.size().height(), 32.0);
    }
}
