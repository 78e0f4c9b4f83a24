//! I/O layer: reading and parsing SVG sources (`svg`) and `writers` for PNG
//! output and JSON metadata sidecars.
pub mod svg;
pub use svg::{load_svg, parse_svg, read_svg_source};

pub mod writers;
