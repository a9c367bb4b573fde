//! The roles at the edges of a render
//!
//! Divergence never touches an image codec itself. Anything that reads or
//! writes image files comes in through one of these traits.
//!
//! - [`SpriteSource`] - Hands out decoded sprite sheets
//! - [`ImageDecoder`] - Reads a background image from disk
//! - [`Exporter`] - Turns a finished canvas into file bytes

use std::path::Path;

use crate::error::Result;
use crate::glyph_set::GlyphSet;
use crate::params::Scale;
use crate::Canvas;

/// Where sprite sheets come from
///
/// Called by the sprite cache the first time a sheet is needed, with the
/// cache's lock for that scale held. Every call should return the same
/// pixels for the same `(kind, scale)`.
///
/// ```ignore
/// struct Solid;
///
/// impl SpriteSource for Solid {
///     fn name(&self) -> &'static str {
///         "solid"
///     }
///
///     fn load_sheet(&self, kind: GlyphSet, scale: Scale) -> Result<Canvas> {
///         Canvas::new(2280, 1450, PixelFormat::Rgba8)
///     }
/// }
/// ```
pub trait SpriteSource: Send + Sync {
    /// Used in logs
    fn name(&self) -> &'static str;

    /// Decode the sheet for a single `kind` at `scale`
    fn load_sheet(&self, kind: GlyphSet, scale: Scale) -> Result<Canvas>;
}

/// Reads background images named by path
pub trait ImageDecoder: Send + Sync {
    fn name(&self) -> &'static str;

    fn decode_file(&self, path: &Path) -> Result<Canvas>;
}

/// Where canvases become files
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode the canvas into this exporter's format
    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>>;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}
