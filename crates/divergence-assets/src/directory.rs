use std::path::{Path, PathBuf};

use divergence_core::error::{DivergenceError, ResourceError, Result};
use divergence_core::traits::SpriteSource;
use divergence_core::{Canvas, GlyphSet, Scale};

use crate::config::{self, ASSET_ROOT_ENV};
use crate::decode::decode_png;

/// Reads sprite sheets from an asset directory
///
/// ```text
/// root/
///   Large/NixieAuthentic.png
///   Large/NixieTubeLeft.png
///   ...
///   Small/NixieTubeSingle.png
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Sheets are looked up under `root/{Scale}/`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use the root configured through `DIVERGENCE_ASSETS` or [`config::set_asset_root`]
    pub fn from_env() -> Result<Self> {
        config::asset_root().map(Self::new).ok_or_else(|| {
            DivergenceError::ConfigError(format!(
                "No asset root configured; set {ASSET_ROOT_ENV}"
            ))
        })
    }

    /// Directory holding the per-scale folders
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of one sheet
    pub fn sheet_path(&self, kind: GlyphSet, scale: Scale) -> Option<PathBuf> {
        kind.resource_path(scale).map(|rel| self.root.join(rel))
    }
}

impl SpriteSource for DirectorySource {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn load_sheet(&self, kind: GlyphSet, scale: Scale) -> Result<Canvas> {
        let path = self
            .sheet_path(kind, scale)
            .ok_or(ResourceError::Missing { kind, scale })?;
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DivergenceError::from(ResourceError::NotFound { path: path.clone() })
            },
            _ => DivergenceError::Io(e),
        })?;
        log::debug!("Read {} ({} bytes)", path.display(), bytes.len());
        decode_png(&bytes, &path)
    }
}
