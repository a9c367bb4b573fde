//! Shared, reference-counted sprite sheets
//!
//! Decoded sheets are big, and concurrent renders at one scale usually want
//! the same ones. The cache keeps a table per [`Scale`], each behind its own
//! lock. A render acquires a [`SpriteHandle`] per sheet; the sheet stays
//! decoded while any handle is alive and is freed by the release that drops
//! the last one.
//!
//! ## Load and evict
//!
//! Acquire takes the scale lock, decodes the sheet if the table has no entry,
//! and bumps the count before unlocking. Release decrements without the lock;
//! only the release that reaches zero locks and checks again. If another
//! acquire got in first, the count is above zero again and nothing happens.
//! The entry leaves the table and its pixels are dropped with the lock held.

use std::collections::HashMap;
use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ResourceError, Result};
use crate::glyph_set::GlyphSet;
use crate::layout::Metrics;
use crate::params::Scale;
use crate::traits::SpriteSource;
use crate::Canvas;

struct CacheEntry {
    kind: GlyphSet,
    scale: Scale,
    sheet: Canvas,
    refs: AtomicUsize,
}

type SheetTable = HashMap<GlyphSet, Arc<CacheEntry>>;

/// Live sheets for every scale tier
pub struct SpriteCache {
    source: Arc<dyn SpriteSource>,
    tables: [Mutex<SheetTable>; 3],
}

impl std::fmt::Debug for SpriteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteCache")
            .field("source", &self.source.name())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Snapshot of what the cache holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Live sheets, indexed by [`Scale::index`]
    pub entries: [usize; 3],
    /// Outstanding handles across all sheets
    pub references: usize,
}

impl CacheStats {
    /// Live sheets across every scale
    pub fn total_entries(&self) -> usize {
        self.entries.iter().sum()
    }
}

impl SpriteCache {
    /// An empty cache that loads from `source` on demand
    pub fn new(source: Arc<dyn SpriteSource>) -> Self {
        Self {
            source,
            tables: Default::default(),
        }
    }

    /// Name of the underlying sprite source
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    fn table(&self, scale: Scale) -> &Mutex<SheetTable> {
        &self.tables[scale.index()]
    }

    /// Borrow the sheet for a single `kind`, loading it on first use
    pub fn acquire(self: &Arc<Self>, kind: GlyphSet, scale: Scale) -> Result<SpriteHandle> {
        if !kind.is_single() {
            return Err(ResourceError::Missing { kind, scale }.into());
        }

        let mut table = self.table(scale).lock();
        let entry = match table.get(&kind) {
            Some(entry) => Arc::clone(entry),
            None => {
                let sheet = self.source.load_sheet(kind, scale)?;
                validate_sheet(kind, scale, &sheet)?;
                log::debug!(
                    "Loaded sprite sheet {kind:?} at {scale} ({}x{}) from {}",
                    sheet.width(),
                    sheet.height(),
                    self.source.name()
                );
                let entry = Arc::new(CacheEntry {
                    kind,
                    scale,
                    sheet,
                    refs: AtomicUsize::new(0),
                });
                table.insert(kind, Arc::clone(&entry));
                entry
            },
        };
        entry.refs.fetch_add(1, Ordering::AcqRel);
        drop(table);

        Ok(SpriteHandle {
            cache: Arc::clone(self),
            entry: ManuallyDrop::new(entry),
        })
    }

    /// Acquire every sheet in `kinds`; nothing stays acquired on failure
    pub fn acquire_set(self: &Arc<Self>, kinds: GlyphSet, scale: Scale) -> Result<SpriteSet> {
        let handles = kinds
            .sheets()
            .map(|kind| self.acquire(kind, scale))
            .collect::<Result<Vec<_>>>()?;
        Ok(SpriteSet { kinds, handles })
    }

    fn release(&self, entry: Arc<CacheEntry>) {
        if entry.refs.fetch_sub(1, Ordering::AcqRel) != 1 {
            return;
        }

        let kind = entry.kind;
        let scale = entry.scale;
        let mut table = self.table(scale).lock();
        let still_unused = entry.refs.load(Ordering::Acquire) == 0
            && table
                .get(&kind)
                .is_some_and(|live| Arc::ptr_eq(live, &entry));
        if still_unused {
            table.remove(&kind);
            log::debug!("Evicted sprite sheet {kind:?} at {scale}");
        }
        drop(entry);
    }

    /// Live sheets at `scale`
    pub fn len(&self, scale: Scale) -> usize {
        self.table(scale).lock().len()
    }

    /// True when no scale holds a live sheet
    pub fn is_empty(&self) -> bool {
        Scale::ALL.iter().all(|&scale| self.len(scale) == 0)
    }

    /// Outstanding handles on one sheet; 0 when it is not loaded
    pub fn ref_count(&self, kind: GlyphSet, scale: Scale) -> usize {
        self.table(scale)
            .lock()
            .get(&kind)
            .map_or(0, |entry| entry.refs.load(Ordering::Acquire))
    }

    /// Entry and reference counts, one scale lock at a time
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();
        for scale in Scale::ALL {
            let table = self.table(scale).lock();
            stats.entries[scale.index()] = table.len();
            stats.references += table
                .values()
                .map(|entry| entry.refs.load(Ordering::Acquire))
                .sum::<usize>();
        }
        stats
    }
}

/// Glyph sheets must hold the full 19x5 grid
fn validate_sheet(kind: GlyphSet, scale: Scale, sheet: &Canvas) -> Result<()> {
    if !kind.is_glyph_sheet() {
        return Ok(());
    }
    let min = Metrics::new(scale).glyph_sheet_size();
    if sheet.width() < min.width || sheet.height() < min.height {
        return Err(ResourceError::InvalidSheet {
            kind,
            scale,
            width: sheet.width(),
            height: sheet.height(),
            min_width: min.width,
            min_height: min.height,
        }
        .into());
    }
    Ok(())
}

/// A borrowed sprite sheet; released when dropped
pub struct SpriteHandle {
    cache: Arc<SpriteCache>,
    // Taken exactly once, in `Drop`
    entry: ManuallyDrop<Arc<CacheEntry>>,
}

impl SpriteHandle {
    /// The single sheet this handle holds
    pub fn kind(&self) -> GlyphSet {
        self.entry.kind
    }

    /// Scale tier the sheet was decoded for
    pub fn scale(&self) -> Scale {
        self.entry.scale
    }

    /// Decoded pixels of the sheet
    pub fn sheet(&self) -> &Canvas {
        &self.entry.sheet
    }

    /// Give the sheet back now instead of at end of scope
    pub fn release(self) {
        drop(self);
    }
}

impl Deref for SpriteHandle {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        &self.entry.sheet
    }
}

impl Drop for SpriteHandle {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: `entry` is never touched again after this take
        let entry = unsafe { ManuallyDrop::take(&mut self.entry) };
        self.cache.release(entry);
    }
}

impl std::fmt::Debug for SpriteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteHandle")
            .field("kind", &self.kind())
            .field("scale", &self.scale())
            .finish()
    }
}

/// The handles one render holds
#[derive(Debug)]
pub struct SpriteSet {
    kinds: GlyphSet,
    handles: Vec<SpriteHandle>,
}

impl SpriteSet {
    /// Union of every sheet in the set
    pub fn kinds(&self) -> GlyphSet {
        self.kinds
    }

    /// Pixels of one single-flag sheet, if it was acquired
    pub fn get(&self, kind: GlyphSet) -> Option<&Canvas> {
        self.handles
            .iter()
            .find(|h| h.kind() == kind)
            .map(SpriteHandle::sheet)
    }
}
