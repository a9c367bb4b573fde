//! The engine: format, classify, lay out, acquire, composite

use std::sync::Arc;

use crate::cache::SpriteCache;
use crate::error::{DivergenceError, LimitError, Result};
use crate::format::format;
use crate::layout::{self, Layout};
use crate::params::{DivergenceArgs, ForcedSpacing, Limits};
use crate::render::{draw_background, draw_layout};
use crate::spacing;
use crate::traits::{ImageDecoder, SpriteSource};
use crate::types::Size;
use crate::{Canvas, PixelFormat};

/// Draws divergence meters
///
/// Cheap to clone; clones share one sprite cache. Safe to call from any
/// number of threads at once.
///
/// ```ignore
/// let divergence = Divergence::builder()
///     .sprites(Arc::new(DirectorySource::new("assets")))
///     .decoder(Arc::new(ImageFileDecoder))
///     .build()?;
///
/// let canvas = divergence.draw("1.048596", &DivergenceArgs::small_black())?;
/// ```
#[derive(Clone)]
pub struct Divergence {
    cache: Arc<SpriteCache>,
    decoder: Option<Arc<dyn ImageDecoder>>,
    format: PixelFormat,
}

impl std::fmt::Debug for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Divergence")
            .field("sprites", &self.cache.source_name())
            .field("decoder", &self.decoder.as_ref().map(|d| d.name()))
            .field("format", &self.format)
            .finish()
    }
}

impl Divergence {
    /// Start configuring an engine
    pub fn builder() -> DivergenceBuilder {
        DivergenceBuilder::new()
    }

    /// Draw `text` onto a new canvas
    ///
    /// Fails on a strict-mode violation, an enabled limit, or a sprite or
    /// background that cannot be loaded. Every acquired sheet is released
    /// before returning, whatever the outcome.
    pub fn draw(&self, text: &str, args: &DivergenceArgs) -> Result<Canvas> {
        let layout = self.layout(text, args)?;
        let kinds = layout.required_sheets();
        let sprites = self.cache.acquire_set(kinds, args.scale)?;
        log::debug!("Acquired {kinds:?} at {}", args.scale);

        let mut canvas = Canvas::new(layout.size.width, layout.size.height, self.format)?;
        draw_background(&mut canvas, &args.background, self.decoder.as_deref())?;
        draw_layout(&mut canvas, &layout, &sprites)?;
        Ok(canvas)
    }

    /// Format, classify and place `text` without drawing it
    pub fn layout(&self, text: &str, args: &DivergenceArgs) -> Result<Layout> {
        let formatted = format(text, args);
        log::debug!("Formatted {text:?} as {formatted:?}");

        let authenticity = args.authenticity.resolve(&formatted)?;
        log::debug!("Authenticity {:?} resolved to {authenticity:?}", args.authenticity);

        check_limits(&formatted, &args.limits)?;

        let layout = Layout::new(&formatted, args, authenticity.allows_authentic());
        log::debug!("Canvas size {}", layout.size);
        Ok(layout)
    }

    /// Size of the canvas [`draw`](Self::draw) would return
    pub fn calculate_size(&self, text: &str, args: &DivergenceArgs) -> Size {
        layout::calculate_size(text, args)
    }

    /// `args` with spacing solved so the canvas is exactly `size`
    pub fn calculate_spacing_for(
        &self,
        size: Size,
        text: &str,
        args: &DivergenceArgs,
        forced: ForcedSpacing,
    ) -> Result<DivergenceArgs> {
        spacing::calculate_spacing_for(size, text, args, forced)
    }

    /// The cache shared by every clone of this engine
    pub fn sprite_cache(&self) -> &Arc<SpriteCache> {
        &self.cache
    }

    /// Format of the canvases [`Divergence::draw`] returns
    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }
}

fn check_limits(formatted: &str, limits: &Limits) -> Result<()> {
    if !limits.enabled {
        return Ok(());
    }
    let lines: Vec<&str> = formatted.split('\n').collect();
    if lines.len() > limits.max_lines {
        return Err(LimitError::TooManyLines {
            lines: lines.len(),
            max: limits.max_lines,
        }
        .into());
    }
    for (i, line) in lines.iter().enumerate() {
        let length = line.chars().count();
        if length > limits.max_length {
            return Err(LimitError::LineTooLong {
                line: i + 1,
                length,
                max: limits.max_length,
            }
            .into());
        }
    }
    Ok(())
}

/// Configures a [`Divergence`]
///
/// A sprite source (or a shared cache) is required. The decoder is only
/// needed for backgrounds given as file paths.
#[derive(Default)]
pub struct DivergenceBuilder {
    sprites: Option<Arc<dyn SpriteSource>>,
    decoder: Option<Arc<dyn ImageDecoder>>,
    format: PixelFormat,
    cache: Option<Arc<SpriteCache>>,
}

impl DivergenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where sprite sheets are loaded from
    pub fn sprites(mut self, source: Arc<dyn SpriteSource>) -> Self {
        self.sprites = Some(source);
        self
    }

    /// Reads backgrounds given as file paths
    pub fn decoder(mut self, decoder: Arc<dyn ImageDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Pixel format of drawn canvases (default: RGBA)
    pub fn format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Share a sprite cache with other engines; takes precedence over `sprites`
    pub fn with_sprite_cache(mut self, cache: Arc<SpriteCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Finish the engine; fails without a sprite source or cache
    pub fn build(self) -> Result<Divergence> {
        let cache = match (self.cache, self.sprites) {
            (Some(cache), _) => cache,
            (None, Some(source)) => Arc::new(SpriteCache::new(source)),
            (None, None) => {
                return Err(DivergenceError::ConfigError(
                    "No sprite source configured".into(),
                ))
            },
        };
        log::debug!(
            "Built divergence engine with sprites from {}",
            cache.source_name()
        );
        Ok(Divergence {
            cache,
            decoder: self.decoder,
            format: self.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph_set::GlyphSet;
    use crate::layout::Metrics;
    use crate::params::{Authenticity, Scale};

    struct BlankSource;

    impl SpriteSource for BlankSource {
        fn name(&self) -> &'static str {
            "blank"
        }

        fn load_sheet(&self, kind: GlyphSet, scale: Scale) -> Result<Canvas> {
            let metrics = Metrics::new(scale);
            let size = if kind.is_glyph_sheet() {
                metrics.glyph_sheet_size()
            } else {
                metrics.tube_size()
            };
            Canvas::new(size.width, size.height, PixelFormat::Rgba8)
        }
    }

    fn engine() -> Divergence {
        Divergence::builder()
            .sprites(Arc::new(BlankSource))
            .build()
            .unwrap()
    }

    #[test]
    fn builder_requires_sprites() {
        let err = Divergence::builder().build().unwrap_err();
        assert!(matches!(err, DivergenceError::ConfigError(_)));
    }

    #[test]
    fn draw_matches_measure_and_releases_everything() {
        let divergence = engine();
        let args = DivergenceArgs::small_black();
        let canvas = divergence.draw("1.048596\nEl Psy", &args).unwrap();
        assert_eq!(
            canvas.size(),
            divergence.calculate_size("1.048596\nEl Psy", &args)
        );
        assert!(divergence.sprite_cache().is_empty());
    }

    #[test]
    fn strict_failure_acquires_nothing() {
        let divergence = engine();
        let args = DivergenceArgs::small().with_authenticity(Authenticity::Strict);
        let err = divergence.draw("AB", &args).unwrap_err();
        assert_eq!(err.not_authentic_text(), Some("AB"));
        assert!(divergence.sprite_cache().is_empty());
    }

    #[test]
    fn limits_checked_only_when_enabled() {
        let divergence = engine();
        let long = "1".repeat(25);
        let args = DivergenceArgs::small();
        assert!(divergence.draw(&long, &args).is_ok());

        let limited = args.with_limits(Limits::enabled());
        let err = divergence.draw(&long, &limited).unwrap_err();
        assert!(matches!(
            err,
            DivergenceError::LimitExceeded(LimitError::LineTooLong {
                line: 1,
                length: 25,
                max: 24
            })
        ));
        let err = divergence.draw("1\n2\n3\n4", &limited).unwrap_err();
        assert!(matches!(
            err,
            DivergenceError::LimitExceeded(LimitError::TooManyLines { lines: 4, max: 3 })
        ));
        // Measuring ignores limits
        assert_eq!(divergence.calculate_size(&long, &limited).width, 6 + 33 * 25);
    }

    #[test]
    fn rgb_output_format() {
        let divergence = Divergence::builder()
            .sprites(Arc::new(BlankSource))
            .format(PixelFormat::Rgb8)
            .build()
            .unwrap();
        let canvas = divergence.draw("1", &DivergenceArgs::small()).unwrap();
        assert_eq!(canvas.format(), PixelFormat::Rgb8);
    }

    #[test]
    fn engines_share_a_cache() {
        let cache = Arc::new(SpriteCache::new(Arc::new(BlankSource)));
        let a = Divergence::builder()
            .with_sprite_cache(cache.clone())
            .build()
            .unwrap();
        let b = a.clone();
        assert!(Arc::ptr_eq(a.sprite_cache(), &cache));
        assert!(Arc::ptr_eq(b.sprite_cache(), &cache));
    }
}
