//! Divergence - nixie tube meters from sprite sheets
//!
//! Text goes in, a canvas of nixie tubes comes out. Every tube and glyph is
//! copied from a pre-rendered sprite sheet, so output is pixel-identical at
//! every call.
//!
//! # Example
//!
//! ```no_run
//! use divergence::prelude::*;
//!
//! let divergence = divergence::from_dir("assets")?;
//! let canvas = divergence.draw("1.048596", &DivergenceArgs::small_black())?;
//! divergence::export::save_png(&canvas, "meter.png")?;
//! # Ok::<(), DivergenceError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `assets`: directory and in-memory sprite sources, file backgrounds
//! - `export`: PNG and PPM encoders

pub use divergence_core::{
    authenticity, calculate_size, calculate_spacing_for, error, format, is_authentic,
    is_semi_authentic, traits, types, Alignment, Authenticity, Background, BackgroundImage,
    CacheStats, Canvas, Color, Divergence, DivergenceArgs, DivergenceBuilder, DivergenceError,
    Escape, ForcedSpacing, GlyphSet, Layout, Limits, Metrics, PixelFormat, Point, Rect, Result,
    Scale, Size, Spacing, SpriteCache, SpriteHandle, TubeShape,
};

#[cfg(feature = "assets")]
pub use divergence_assets as assets;

#[cfg(feature = "export")]
pub use divergence_export as export;

#[cfg(feature = "assets")]
mod setup {
    use std::path::PathBuf;
    use std::sync::Arc;

    use divergence_assets::{DirectorySource, ImageFileDecoder};
    use divergence_core::{Divergence, Result};

    /// An engine reading sprites from `root`, with file backgrounds enabled
    pub fn from_dir(root: impl Into<PathBuf>) -> Result<Divergence> {
        Divergence::builder()
            .sprites(Arc::new(DirectorySource::new(root)))
            .decoder(Arc::new(ImageFileDecoder))
            .build()
    }

    /// Like [`from_dir`], with the root taken from `DIVERGENCE_ASSETS`
    pub fn from_env() -> Result<Divergence> {
        let source = DirectorySource::from_env()?;
        log::debug!("Using sprite sheets under {}", source.root().display());
        Divergence::builder()
            .sprites(Arc::new(source))
            .decoder(Arc::new(ImageFileDecoder))
            .build()
    }
}

#[cfg(feature = "assets")]
pub use setup::{from_dir, from_env};

/// Common imports for typical usage
pub mod prelude {
    pub use divergence_core::{
        error::{DivergenceError, Result},
        traits::{Exporter, ImageDecoder, SpriteSource},
        Alignment, Authenticity, Background, Canvas, Color, Divergence, DivergenceArgs, Escape,
        ForcedSpacing, Limits, PixelFormat, Scale, Size, Spacing,
    };
}
