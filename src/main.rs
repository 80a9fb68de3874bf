use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use sheetpack::cli::{CliArgs, CompressionLevel};
use sheetpack::config::{CompressConfig, LoadedConfig};
use sheetpack::pipeline::{Settings, generate};
use sheetpack::sprite::ResizeOptions;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let settings = merge_config_with_args(&cli)?;

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Sheetpack v{}", env!("CARGO_PKG_VERSION"));

    let atlas = generate(&settings)?;

    info!(
        "Done! Packed {} sprites into {}x{}",
        atlas.sprites.len(),
        atlas.width,
        atlas.height
    );

    Ok(())
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CliArgs) -> Result<Settings> {
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };
    let config = loaded_config
        .as_ref()
        .map(|lc| lc.config.clone())
        .unwrap_or_default();

    // Input pattern: CLI > config
    let input = args
        .input
        .clone()
        .or_else(|| loaded_config.as_ref().and_then(LoadedConfig::resolve_input))
        .context("no input pattern given on the command line or in the config file")?;

    // Output path: CLI > config > default
    let output = args.output.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(LoadedConfig::resolve_output)
            .unwrap_or_else(|| PathBuf::from(&config.output))
    });

    let padding = args.padding.unwrap_or(config.padding);
    let spacing = args.spacing.unwrap_or(config.spacing);

    // Resize: CLI size switches it on, mode and filter fall back to the config
    let resize_config = config.resize.clone().unwrap_or_default();
    let resize = args
        .resize
        .or(config.resize.as_ref().map(|r| r.size))
        .map(|size| ResizeOptions {
            size,
            mode: args.resize_mode.unwrap_or(resize_config.mode),
            filter: args.resize_filter.unwrap_or(resize_config.filter),
        });

    // Boolean flags: CLI presence sets them, otherwise use config
    let trim = !args.no_trim && config.trim;
    let grid_metadata = args.grid_metadata || config.grid_metadata;
    let stable_order = args.stable_order || config.stable_order;
    let preserve_ids = args.preserve_ids || config.preserve_ids;

    let compress = if args.compress.is_some() {
        args.compress
    } else {
        config
            .compress
            .as_ref()
            .map(|c| match c {
                CompressConfig::Level(n) if *n <= 6 => Ok(CompressionLevel::Level(*n)),
                CompressConfig::Max(s) if s.eq_ignore_ascii_case("max") => {
                    Ok(CompressionLevel::Max)
                }
                other => Err(anyhow::anyhow!(
                    "invalid compress value {:?} in config file. Valid values: 0-6, \"max\"",
                    other
                )),
            })
            .transpose()?
    };

    Ok(Settings {
        input,
        output,
        format: args.format.unwrap_or(config.format),
        max_size: args.max_size.unwrap_or(config.max_size),
        padding: padding.saturating_add(spacing),
        trim,
        scale: args.scale.unwrap_or(config.scale),
        resize,
        grid_size: args.grid_size.or(config.grid_size),
        grid_metadata,
        stable_order,
        preserve_ids,
        compress,
    })
}
