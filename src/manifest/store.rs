use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;

use super::Manifest;
use crate::error::SheetpackError;

/// Manifest location for an atlas image: `out/atlas.png` -> `out/atlas.manifest.json`
pub fn manifest_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("manifest.json")
}

impl Manifest {
    /// Read a manifest, or `None` when this is the first build.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No manifest at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(SheetpackError::ManifestRead {
                    path: path.to_path_buf(),
                    source: e,
                }
                .into());
            }
        };

        let manifest = serde_json::from_str(&content).map_err(|e| SheetpackError::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Some(manifest))
    }

    /// Write the manifest as pretty JSON.
    ///
    /// The content goes to a sibling temp file first and is renamed into
    /// place, so readers see either the old or the new manifest.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("json.tmp");

        let write_err = |e| SheetpackError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        };
        fs::write(&tmp_path, content).map_err(write_err)?;
        fs::rename(&tmp_path, path).map_err(write_err)?;

        debug!("Wrote manifest {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_manifest_path() {
        assert_eq!(
            manifest_path(Path::new("out/atlas.png")),
            PathBuf::from("out/atlas.manifest.json")
        );
        assert_eq!(
            manifest_path(Path::new("sheet")),
            PathBuf::from("sheet.manifest.json")
        );
    }

    #[test]
    fn test_missing_manifest_is_none() {
        let dir = tempdir().unwrap();
        let loaded = Manifest::load(&dir.path().join("atlas.manifest.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atlas.manifest.json");
        let manifest = Manifest::from_order(vec!["b".to_string(), "a".to_string()], None);

        manifest.save(&path).unwrap();
        let loaded = Manifest::load(&path).unwrap().unwrap();

        assert_eq!(loaded, manifest);
        assert!(!dir.path().join("atlas.manifest.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_manifest_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atlas.manifest.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SheetpackError>(),
            Some(SheetpackError::ManifestParse { .. })
        ));
    }
}
