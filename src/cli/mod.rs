//! Command Line Interface (CLI) layer for svgpng.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and batch
//! conversion. It wires user-provided options to the library API exposed
//! via `svgpng::api`.
//!
//! If you are embedding svgpng into another application, prefer the
//! high-level `svgpng::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
