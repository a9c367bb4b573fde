//! Divergence Core: text in, nixie tubes out
//!
//! A divergence meter is a row (or a few rows) of nixie tubes. Every tube is a
//! pre-rendered frame with a pre-rendered glyph on top, both copied out of
//! sprite sheets. Nothing is rasterized at request time.
//!
//! ## The Pipeline
//!
//! Every piece of text follows the same journey:
//!
//! 1. **Formatting** - line endings, escapes and padding are resolved ([`format`])
//! 2. **Authenticity** - the text decides which glyph sets it may use ([`authenticity`])
//! 3. **Layout** - canvas size and every tube position are computed ([`layout`])
//! 4. **Acquisition** - the sprite sheets the text needs are pulled from a
//!    shared, reference-counted cache ([`cache`])
//! 5. **Compositing** - background, tubes and glyphs are blitted onto a
//!    [`Canvas`] ([`render`])
//!
//! The spacing solver ([`spacing`]) runs layout backwards: give it a target
//! canvas size and it returns the margins that produce it.
//!
//! ## Draw Your First Meter
//!
//! ```rust,no_run
//! use divergence_core::{Divergence, DivergenceArgs, Scale};
//! # use std::sync::Arc;
//! # use divergence_core::traits::SpriteSource;
//! # fn sprite_source() -> Arc<dyn SpriteSource> { unimplemented!() }
//!
//! let divergence = Divergence::builder()
//!     .sprites(sprite_source())
//!     .build()?;
//!
//! let args = DivergenceArgs::small_black();
//! let canvas = divergence.draw("1.048596", &args)?;
//! assert_eq!(canvas.width(), divergence.calculate_size("1.048596", &args).width);
//! # Ok::<(), divergence_core::DivergenceError>(())
//! ```
//!
//! ## The Traits At The Edges
//!
//! Decoding and encoding images is somebody else's job. Plug it in through:
//!
//! - [`traits::SpriteSource`] - Hands out decoded sprite sheets
//! - [`traits::ImageDecoder`] - Turns a background image file into pixels
//! - [`traits::Exporter`] - Turns a finished canvas into file bytes

pub mod authenticity;
pub mod background;
pub mod cache;
pub mod canvas;
pub mod divergence;
pub mod error;
pub mod format;
pub mod glyph_set;
pub mod layout;
pub mod params;
pub mod render;
pub mod spacing;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use authenticity::{is_authentic, is_semi_authentic};
pub use background::{Background, BackgroundImage};
pub use cache::{CacheStats, SpriteCache, SpriteHandle};
pub use canvas::{Canvas, PixelFormat};
pub use divergence::{Divergence, DivergenceBuilder};
pub use error::{DivergenceError, Result};
pub use format::format;
pub use glyph_set::{GlyphSet, TubeShape};
pub use layout::{calculate_size, Layout, Metrics};
pub use params::{
    Alignment, Authenticity, DivergenceArgs, Escape, ForcedSpacing, Limits, Scale, Spacing,
};
pub use spacing::calculate_spacing_for;
pub use types::{Point, Rect, Size};

/// Plain geometry shared by layout and compositing
pub mod types {
    /// A pixel position; may lie outside the canvas
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Point {
        pub x: i32,
        pub y: i32,
    }

    impl Point {
        pub const fn new(x: i32, y: i32) -> Self {
            Self { x, y }
        }

        /// Saturates at the `i32` range
        pub const fn offset(self, dx: i32, dy: i32) -> Self {
            Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
        }
    }

    /// Width and height of a canvas or sprite, in pixels
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Size {
        pub width: u32,
        pub height: u32,
    }

    impl Size {
        pub const fn new(width: u32, height: u32) -> Self {
            Self { width, height }
        }
    }

    impl std::fmt::Display for Size {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}x{}", self.width, self.height)
        }
    }

    /// A source region inside a sprite sheet
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Rect {
        pub x: u32,
        pub y: u32,
        pub width: u32,
        pub height: u32,
    }

    impl Rect {
        pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
            Self {
                x,
                y,
                width,
                height,
            }
        }
    }
}

/// Straight-alpha RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}
