use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use image::ImageReader;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::{ResizeOptions, SourceSprite, TrimInfo, resize_sprite, trim_sprite};
use crate::error::SheetpackError;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// A discovered image file and its path relative to the input base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePath {
    pub path: PathBuf,
    pub relative: PathBuf,
}

/// Per-sprite processing applied while loading
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Remove transparent borders
    pub trim: bool,
    /// Resize before trimming
    pub resize: Option<ResizeOptions>,
}

/// Load every image matched by `pattern`.
///
/// Files that cannot be decoded are skipped with a warning. The run fails
/// only when nothing matched, nothing was readable, or two files map to
/// the same key. Sprites come back in discovery order.
pub fn load_sprites(pattern: &str, options: &LoadOptions) -> Result<Vec<SourceSprite>> {
    let image_paths = discover_images(pattern)?;
    let total = image_paths.len();

    info!("Loading {} images...", total);

    let loaded: Vec<_> = image_paths
        .par_iter()
        .map(|img_path| load_single_sprite(img_path, options))
        .collect();

    let mut sprites = Vec::with_capacity(total);
    for result in loaded {
        match result {
            Ok(sprite) => sprites.push(sprite),
            Err(e) => warn!("Skipping sprite: {}", e),
        }
    }

    if sprites.is_empty() {
        return Err(SheetpackError::NoReadableImages(total).into());
    }

    check_unique_keys(&sprites)?;

    Ok(sprites)
}

/// Expand `pattern` into the supported image files it matches.
///
/// A plain directory is searched recursively; a plain file matches itself.
pub fn discover_images(pattern: &str) -> Result<Vec<ImagePath>> {
    let (glob_pattern, base) = expand_pattern(pattern);

    let entries = glob::glob(&glob_pattern).map_err(|e| SheetpackError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() && is_supported_image(&path) => {
                let normalized = without_cur_dir(&path);
                let relative = match normalized.strip_prefix(&base) {
                    Ok(relative) => relative.to_path_buf(),
                    Err(_) => {
                        warn!(
                            "{} is outside input base {}, keying by full path",
                            path.display(),
                            base.display()
                        );
                        normalized.clone()
                    }
                };
                paths.push(ImagePath { path, relative });
            }
            Ok(_) => {}
            Err(e) => warn!("Cannot read {}: {}", e.path().display(), e.error()),
        }
    }

    if paths.is_empty() {
        return Err(SheetpackError::NoInputFound(pattern.to_string()).into());
    }

    debug!("Pattern '{}' matched {} images", pattern, paths.len());
    Ok(paths)
}

/// Check if a pattern contains glob characters.
pub(crate) fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

/// Drop `.` components so `./sprites/a.png` and `sprites/a.png` compare equal
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Turn user input into a glob pattern plus the directory keys are relative to.
/// The base never contains `.` components.
fn expand_pattern(pattern: &str) -> (String, PathBuf) {
    if is_glob_pattern(pattern) {
        let base: PathBuf = Path::new(pattern)
            .components()
            .take_while(|c| !is_glob_pattern(&c.as_os_str().to_string_lossy()))
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        return (pattern.to_string(), base);
    }

    let path = Path::new(pattern);
    if path.is_dir() {
        let recursive = path.join("**").join("*");
        return (recursive.to_string_lossy().into_owned(), without_cur_dir(path));
    }

    let base = path.parent().map(without_cur_dir).unwrap_or_default();
    (pattern.to_string(), base)
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Join the normal components of a path with `/` regardless of platform
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn load_single_sprite(
    img_path: &ImagePath,
    options: &LoadOptions,
) -> std::result::Result<SourceSprite, SheetpackError> {
    let path = &img_path.path;
    let img = ImageReader::open(path)
        .map_err(|e| SheetpackError::ImageLoad {
            path: path.clone(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| SheetpackError::ImageLoad {
            path: path.clone(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SheetpackError::ImageLoad {
            path: path.clone(),
            source: e,
        })?
        .into_rgba8();

    let img = match &options.resize {
        Some(resize) => resize_sprite(img, resize),
        None => img,
    };

    let (image, trim_info) = if options.trim {
        trim_sprite(&img)
    } else {
        let (w, h) = img.dimensions();
        (img, TrimInfo::untrimmed(w, h))
    };

    Ok(SourceSprite {
        path: path.clone(),
        key: slash_path(&img_path.relative.with_extension("")),
        file_name: slash_path(&img_path.relative),
        image,
        trim_info,
    })
}

fn check_unique_keys(sprites: &[SourceSprite]) -> std::result::Result<(), SheetpackError> {
    let mut seen: HashMap<&str, &Path> = HashMap::with_capacity(sprites.len());
    for sprite in sprites {
        if let Some(first) = seen.insert(&sprite.key, &sprite.path) {
            return Err(SheetpackError::DuplicateKey {
                key: sprite.key.clone(),
                first: first.to_path_buf(),
                second: sprite.path.clone(),
            });
        }
    }
    Ok(())
}
