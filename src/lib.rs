#![doc = r#"
svgpng — rasterize SVG icons to fixed-size PNG images.

This crate provides a typed API for turning SVG (or SVGZ) documents into PNG files or
in-memory RGBA buffers, with exact or aspect-derived output sizes, fit modes,
background colors and color negation. Parsing and rasterization are delegated to
`resvg`; PNG encoding to `image`. It powers the `svgpng` CLI and can be embedded in
your own Rust applications (for example from a `build.rs` that generates app icons).

Add dependency
--------------
```toml
[dependencies]
svgpng = "0.1"
```

Quick start: the app icon at 1024x1024
--------------------------------------
```rust,no_run
use std::path::Path;
use svgpng::{convert_svg_to_path, ConversionParams};

fn main() -> svgpng::Result<()> {
    convert_svg_to_path(
        Path::new("assets/icon/app_icon.svg"),
        Path::new("assets/icon/app_icon.png"),
        &ConversionParams::with_size(1024, 1024),
    )?;
    Ok(())
}
```

Render in-memory to `RenderedImage`
-----------------------------------
```rust,no_run
use std::path::Path;
use svgpng::{render_svg_to_buffer, ConversionParams, FitMode, OutputSize, Rgba};

fn main() -> svgpng::Result<()> {
    let params = ConversionParams {
        size: OutputSize::Width(256),
        fit: FitMode::Contain,
        background: Some(Rgba::WHITE),
        ..ConversionParams::default()
    };
    let image = render_svg_to_buffer(Path::new("logo.svg"), &params)?;

    // Straight-alpha RGBA8, row-major.
    assert_eq!(image.pixels.len(), (image.width * image.height * 4) as usize);
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use svgpng::{convert_directory_to_path, ConversionParams, OutputSize};

fn main() -> svgpng::Result<()> {
    let params = ConversionParams {
        size: OutputSize::square(512),
        ..ConversionParams::default()
    };
    let report = convert_directory_to_path(
        Path::new("icons/svg"),
        Path::new("icons/png"),
        &params,
        true,  // continue_on_error
        false, // no JSON sidecars
    )?;

    println!("converted={} skipped={} errors={}", report.converted, report.skipped, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `svgpng::Result<T>`; match on `svgpng::Error` to handle
specific cases.

```rust,no_run
use std::path::Path;
use svgpng::{convert_svg_to_path, ConversionParams, Error};

fn main() {
    match convert_svg_to_path(Path::new("in.svg"), Path::new("out.png"), &ConversionParams::default()) {
        Ok(_) => {}
        Err(Error::SourceNotFound { path }) => eprintln!("no such file: {}", path.display()),
        Err(Error::MalformedSvg { source, .. }) => eprintln!("bad SVG: {source}"),
        Err(Error::Write { path, source }) => eprintln!("cannot write {}: {source}", path.display()),
        Err(other) => eprintln!("other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`types`] — `OutputSize`, `FitMode`, `Rgba`.
- [`core`] — parameters, layout math and rendering.
- [`io`] — SVG loading and PNG/metadata writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::ConversionParams;
pub use crate::core::render::RenderedImage;
pub use crate::error::{Error, Result};
pub use crate::types::{FitMode, OutputSize, Rgba};

// Loading and writing
pub use crate::io::svg::{load_svg, parse_svg, read_svg_source};
pub use crate::io::writers::metadata::{ConversionMetadata, write_sidecar};
pub use crate::io::writers::png::{encode_rgba_png, write_rgba_png};

// High-level API re-exports
pub use crate::api::{
    BatchReport, ConversionSummary, DEFAULT_DESTINATION, DEFAULT_SOURCE, convert_default_icon,
    convert_directory_to_path, convert_svg_to_path, convert_svg_with_options, iterate_svg_files,
    render_svg_to_buffer,
};
