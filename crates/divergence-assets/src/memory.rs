use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use divergence_core::error::{ResourceError, Result};
use divergence_core::traits::SpriteSource;
use divergence_core::{Canvas, GlyphSet, Scale};

use crate::decode::decode_png;

/// Encoded PNG sheets held in memory, decoded when the cache asks
///
/// Fill it with `include_bytes!` to ship the assets inside a binary.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: HashMap<(GlyphSet, Scale), Arc<[u8]>>,
}

impl MemorySource {
    /// An empty source; every load fails with `Missing` until sheets are added
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the PNG bytes of a single sheet
    pub fn insert(&mut self, kind: GlyphSet, scale: Scale, png: impl Into<Arc<[u8]>>) {
        self.sheets.insert((kind, scale), png.into());
    }

    /// Builder form of [`MemorySource::insert`]
    pub fn with_sheet(mut self, kind: GlyphSet, scale: Scale, png: impl Into<Arc<[u8]>>) -> Self {
        self.insert(kind, scale, png);
        self
    }

    /// Whether PNG bytes are registered for this sheet
    pub fn contains(&self, kind: GlyphSet, scale: Scale) -> bool {
        self.sheets.contains_key(&(kind, scale))
    }

    /// Number of registered sheets across all scales
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// True when no sheet is registered
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl SpriteSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load_sheet(&self, kind: GlyphSet, scale: Scale) -> Result<Canvas> {
        let bytes = self
            .sheets
            .get(&(kind, scale))
            .ok_or(ResourceError::Missing { kind, scale })?;
        let origin = PathBuf::from(kind.resource_path(scale).unwrap_or_default());
        decode_png(bytes, &origin)
    }
}
