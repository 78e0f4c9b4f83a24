//! Core conversion building blocks: parameters, output size and placement
//! math, and rasterization of a parsed tree. These are internal primitives
//! consumed by the high-level `api` module.
pub mod layout;
pub mod params;
pub mod render;
