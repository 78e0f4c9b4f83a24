//! svgpng CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, dispatch to
//! single-file or batch conversion, and exit with appropriate status.
//! Without arguments it converts `assets/icon/app_icon.svg` to a 1024x1024
//! `assets/icon/app_icon.png`. For programmatic use, prefer the library API
//! (`svgpng::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
