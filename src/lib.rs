pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod packing;
pub mod pipeline;
pub mod sprite;

pub use atlas::{Atlas, AtlasBuilder};
pub use cli::{CliArgs, OutputFormat};
pub use error::{PackError, SheetpackError};
pub use manifest::{Manifest, reorder_from_manifest};
pub use packing::{PackResult, Packer, Placement, SpriteDescriptor};
pub use pipeline::{Settings, generate};
pub use sprite::{PackedSprite, SourceSprite, TrimInfo};
