use tracing::info;
use tracing_subscriber::EnvFilter;

use svgpng::{
    ConversionParams, OutputSize, Rgba, convert_directory_to_path, convert_svg_with_options,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Parameters from `--config` (or defaults) with explicit flags applied on top.
pub fn resolve_params(args: &CliArgs) -> Result<ConversionParams, AppError> {
    let mut params = match &args.config {
        Some(path) => ConversionParams::from_json_file(path)?,
        None => ConversionParams::default(),
    };

    if let Some(size) = &args.size {
        params.size = size
            .parse::<OutputSize>()
            .map_err(|_| AppError::InvalidSize { size: size.clone() })?;
    }
    if let Some(fit) = args.fit {
        params.fit = fit;
    }
    if let Some(scale) = args.scale {
        params.scale = scale;
    }
    if let Some(dpi) = args.dpi {
        params.dpi = dpi;
    }
    if let Some(color) = &args.background {
        let parsed = color.parse::<Rgba>().map_err(|_| AppError::InvalidColor {
            color: color.clone(),
        })?;
        params.background = Some(parsed);
    }
    if args.negate_colors {
        params.negate_colors = true;
    }

    params.validate()?;
    Ok(params)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let params = resolve_params(&args)?;
    info!("Conversion parameters: {:?}", params);

    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch conversion from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report =
            convert_directory_to_path(&input_dir, &output_dir, &params, args.batch, args.sidecar)?;

        info!("Batch conversion complete!");
        info!("Converted: {}", report.converted);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
    } else {
        let summary = convert_svg_with_options(&args.input, &args.output, &params, args.sidecar)?;
        info!(
            "Successfully converted: {:?} -> {:?} ({}x{})",
            args.input, summary.destination, summary.width, summary.height
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use svgpng::FitMode;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("svgpng").chain(argv.iter().copied()))
    }

    #[test]
    fn no_flags_reproduce_the_icon_conversion() {
        let args = parse(&[]);
        assert_eq!(args.input, std::path::PathBuf::from("assets/icon/app_icon.svg"));
        assert_eq!(args.output, std::path::PathBuf::from("assets/icon/app_icon.png"));
        assert_eq!(resolve_params(&args).unwrap(), ConversionParams::with_size(1024, 1024));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("params.json");
        std::fs::write(&config, r#"{ "size": "64", "fit": "cover", "dpi": 72 }"#).unwrap();

        let args = parse(&[
            "--config",
            config.to_str().unwrap(),
            "--size",
            "128x",
            "--background",
            "#fff",
        ]);
        let params = resolve_params(&args).unwrap();
        assert_eq!(params.size, OutputSize::Width(128));
        assert_eq!(params.fit, FitMode::Cover);
        assert_eq!(params.dpi, 72.0);
        assert_eq!(params.background, Some(Rgba::WHITE));
    }

    #[test]
    fn invalid_flags_are_reported() {
        assert!(matches!(
            resolve_params(&parse(&["--size", "0"])),
            Err(AppError::InvalidSize { .. })
        ));
        assert!(matches!(
            resolve_params(&parse(&["--background", "blue-ish"])),
            Err(AppError::InvalidColor { .. })
        ));
        assert!(matches!(
            resolve_params(&parse(&["--size", "original", "--scale=-1"])),
            Err(AppError::Conversion(svgpng::Error::InvalidArgument { arg: "scale", .. }))
        ));
    }

    #[test]
    fn oversized_canvas_is_rejected_before_rendering() {
        assert!(matches!(
            resolve_params(&parse(&["--size", "200000"])),
            Err(AppError::Conversion(svgpng::Error::TooLarge { .. }))
        ));
    }

    #[test]
    fn batch_without_directories_fails() {
        let err = run(parse(&["--batch"])).unwrap_err();
        assert!(err.to_string().contains("--input-dir"));
    }
}
