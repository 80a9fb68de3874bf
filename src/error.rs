use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the packer itself. No partial layout survives any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    #[error(
        "Sprites do not fit in a {max_size}x{max_size} atlas. \
         Try increasing --max-size or packing fewer sprites"
    )]
    CapacityExceeded { max_size: u32 },

    #[error(
        "Grid atlas capacity exceeded: sprites do not fit in a {max_size}x{max_size} atlas \
         using {grid_size}px grid cells. Try increasing --max-size, reducing --grid-size \
         or packing fewer sprites"
    )]
    GridCapacityExceeded { max_size: u32, grid_size: u32 },

    #[error("Sprite '{key}' has an invalid size {width}x{height}; both sides must be at least 1")]
    InvalidSize { key: String, width: u32, height: u32 },

    #[error("Grid size must be at least 1")]
    ZeroGridSize,
}

#[derive(Error, Debug)]
pub enum SheetpackError {
    #[error("No input images matched '{0}'")]
    NoInputFound(String),

    #[error("None of the {0} matched images could be read")]
    NoReadableImages(usize),

    #[error("Invalid input pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Sprite key '{key}' is produced by both '{first}' and '{second}'")]
    DuplicateKey {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to read manifest '{path}': {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest '{path}': {source}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("The tiled output format requires a grid size (--grid-size)")]
    TiledRequiresGrid,

    #[error(transparent)]
    Pack(#[from] PackError),
}
