use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "sheetpack")]
#[command(version, about = "Sprite sheet packer for Phaser and Tiled", long_about = None)]
pub struct CliArgs {
    /// Input images: a glob pattern, a directory, or a single file
    #[arg(required_unless_present = "config")]
    pub input: Option<String>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output atlas image path; metadata is written next to it [default: atlas.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Metadata format [default: phaser-hash]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum atlas width and height, a power of two [default: 2048]
    #[arg(long, value_parser = parse_power_of_two)]
    pub max_size: Option<u32>,

    /// Padding between sprites in pixels [default: 2]
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Extra spacing added on top of padding [default: 0]
    #[arg(long)]
    pub spacing: Option<u32>,

    /// Disable sprite trimming (remove transparent borders)
    #[arg(long)]
    pub no_trim: bool,

    /// Scale factor recorded in metadata; pixels are not scaled [default: 1]
    #[arg(long, value_name = "FACTOR")]
    pub scale: Option<f32>,

    /// Resize every sprite into a square box of this many pixels
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    pub resize: Option<u32>,

    /// How sprites fit the resize box [default: contain]
    #[arg(long, value_enum)]
    pub resize_mode: Option<ResizeMode>,

    /// Resize filter algorithm [default: lanczos]
    #[arg(long, value_enum)]
    pub resize_filter: Option<ResizeFilter>,

    /// Snap every sprite to cells of this size
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    pub grid_size: Option<u32>,

    /// Include grid cell coordinates in the frame metadata
    #[arg(long)]
    pub grid_metadata: bool,

    /// Order sprites by key instead of size so builds are reproducible
    #[arg(long)]
    pub stable_order: bool,

    /// Keep sprite ids stable across builds using the atlas manifest (needs --stable-order)
    #[arg(long)]
    pub preserve_ids: bool,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Metadata schema written next to the atlas image
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Phaser JSON hash: frames keyed by name
    #[default]
    PhaserHash,
    /// Phaser JSON array: frames carry their own filename
    PhaserArray,
    /// Tiled tileset (requires --grid-size)
    Tiled,
}

/// How a sprite is fitted into the resize box
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMode {
    /// Fit inside the box, keeping aspect ratio
    #[default]
    Contain,
    /// Fill the box, keeping aspect ratio and cropping the overflow
    Cover,
    /// Force the exact box size
    Stretch,
}

/// Resize filter algorithm
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Lanczos with window 3 (highest quality)
    #[default]
    Lanczos,
    /// Nearest neighbor (best for pixel art)
    Nearest,
    /// Bilinear interpolation
    Linear,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

/// Parse an atlas size, rejecting anything that is not a power of two
pub fn parse_power_of_two(s: &str) -> Result<u32, String> {
    let n = s
        .parse::<u32>()
        .map_err(|_e| format!("invalid size: {}", s))?;
    check_power_of_two(n)
}

pub fn check_power_of_two(n: u32) -> Result<u32, String> {
    if n.is_power_of_two() {
        Ok(n)
    } else {
        Err(format!("max size must be a power of two, got {}", n))
    }
}
