use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::atlas::{Atlas, AtlasBuilder};
use crate::cli::{CompressionLevel, OutputFormat, check_power_of_two};
use crate::error::SheetpackError;
use crate::manifest::{Manifest, manifest_path, reorder_from_manifest};
use crate::output::{MetadataOptions, save_atlas_image, write_metadata};
use crate::sprite::{LoadOptions, ResizeOptions, load_sprites};

/// Fully resolved settings for one atlas build
#[derive(Debug, Clone)]
pub struct Settings {
    /// Glob pattern, directory, or file
    pub input: String,
    /// Atlas image path; metadata and manifest sit next to it
    pub output: PathBuf,
    pub format: OutputFormat,
    pub max_size: u32,
    /// Padding with spacing already added
    pub padding: u32,
    pub trim: bool,
    pub scale: f32,
    pub resize: Option<ResizeOptions>,
    pub grid_size: Option<u32>,
    pub grid_metadata: bool,
    pub stable_order: bool,
    pub preserve_ids: bool,
    pub compress: Option<CompressionLevel>,
}

impl Settings {
    /// Settings with defaults for everything but input and output
    pub fn new(input: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            format: OutputFormat::PhaserHash,
            max_size: 2048,
            padding: 2,
            trim: true,
            scale: 1.0,
            resize: None,
            grid_size: None,
            grid_metadata: false,
            stable_order: false,
            preserve_ids: false,
            compress: None,
        }
    }

    /// Reject combinations that can never produce an atlas
    pub fn validate(&self) -> Result<()> {
        check_power_of_two(self.max_size).map_err(anyhow::Error::msg)?;
        if self.grid_size == Some(0) {
            bail!("grid size must be at least 1");
        }
        if self.format == OutputFormat::Tiled && self.grid_size.is_none() {
            return Err(SheetpackError::TiledRequiresGrid.into());
        }
        if self.preserve_ids && !self.stable_order {
            bail!("--preserve-ids requires --stable-order");
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            bail!("scale must be a positive number, got {}", self.scale);
        }
        Ok(())
    }

    /// Metadata file path: the atlas path with a `.json` extension
    pub fn metadata_path(&self) -> PathBuf {
        self.output.with_extension("json")
    }

    pub fn manifest_path(&self) -> PathBuf {
        manifest_path(&self.output)
    }
}

/// Load, order, pack, composite, and write one atlas with its metadata.
///
/// With stable ordering the manifest is rewritten at the end of the run;
/// with id preservation it is also read first to seed the order.
pub fn generate(settings: &Settings) -> Result<Atlas> {
    settings.validate()?;

    let load_options = LoadOptions {
        trim: settings.trim,
        resize: settings.resize,
    };
    let sprites = load_sprites(&settings.input, &load_options)?;
    info!("Loaded {} sprites", sprites.len());

    let mut builder = AtlasBuilder::new(settings.max_size)
        .padding(settings.padding)
        .grid_size(settings.grid_size)
        .stable_order(settings.stable_order);

    let manifest_file = settings.manifest_path();
    let previous = if settings.stable_order && settings.preserve_ids {
        Manifest::load(&manifest_file)?
    } else {
        None
    };

    let sprites = if settings.stable_order && settings.preserve_ids {
        let reconciled = reorder_from_manifest(sprites, previous.as_ref());
        match &previous {
            Some(_) => info!(
                "Manifest: {} new, {} removed sprites",
                reconciled.added.len(),
                reconciled.removed.len()
            ),
            None => info!("No manifest found, creating {}", manifest_file.display()),
        }
        for key in &reconciled.removed {
            warn!("Sprite '{}' was removed since the last build", key);
        }
        builder = builder.preserve_input_order();
        reconciled.sprites
    } else {
        sprites
    };

    let atlas = builder.build(sprites)?;

    if let Some(parent) = settings.output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    save_atlas_image(&atlas, &settings.output, settings.compress)?;
    info!("Saved {}", settings.output.display());

    let image_name = settings
        .output
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let metadata_path = settings.metadata_path();
    write_metadata(
        &atlas,
        &metadata_path,
        &MetadataOptions {
            format: settings.format,
            image: &image_name,
            scale: settings.scale,
            grid_metadata: settings.grid_metadata,
        },
    )?;
    info!("Generated {}", metadata_path.display());

    if settings.stable_order {
        Manifest::from_order(atlas.sprite_order(), previous.as_ref()).save(&manifest_file)?;
        info!("Updated {}", manifest_file.display());
    }

    Ok(atlas)
}
