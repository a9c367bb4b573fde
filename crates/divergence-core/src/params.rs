//! How a divergence meter should be drawn
//!
//! Everything a render call needs travels in one immutable [`DivergenceArgs`].
//! Nothing here is global: limits that used to be process-wide switches are
//! plain fields with the same defaults.

use std::fmt;
use std::str::FromStr;

use crate::background::Background;
use crate::error::{DivergenceError, Result};

/// Size tier of the pre-rendered sprite sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scale {
    /// 132x428 tubes with 10px side caps
    #[default]
    Large,
    /// 66x214 tubes with 5px side caps
    Medium,
    /// 33x107 tubes with 3px side caps
    Small,
}

impl Scale {
    /// Every tier, largest first
    pub const ALL: [Scale; 3] = [Scale::Large, Scale::Medium, Scale::Small];

    /// Linear ratio applied to every base pixel dimension
    pub const fn ratio(self) -> f64 {
        match self {
            Scale::Large => 1.00,
            Scale::Medium => 0.50,
            Scale::Small => 0.25,
        }
    }

    /// Stable slot for per-scale tables
    pub const fn index(self) -> usize {
        match self {
            Scale::Large => 0,
            Scale::Medium => 1,
            Scale::Small => 2,
        }
    }

    /// Folder name used for this tier's sheets
    pub const fn name(self) -> &'static str {
        match self {
            Scale::Large => "Large",
            Scale::Medium => "Medium",
            Scale::Small => "Small",
        }
    }
}

/// Which glyph set characters are drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Authenticity {
    /// Authentic glyphs where available, fallback font otherwise
    #[default]
    Lax,
    /// Only authentic glyphs; anything else is an error
    Strict,
    /// Only the fallback font
    None,
    /// Pick one of the above from the text at render time
    Decide,
}

/// Placement of lines shorter than the longest one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Near,
    Center,
    Far,
}

/// How backslash escapes are treated while formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Escape {
    /// Backslashes are literal
    #[default]
    None,
    /// Only `\n` and `\r` are escapes
    NewLines,
    /// Every backslash starts an escape
    All,
}

macro_rules! parseable_enum {
    ($ty:ident, $kind:literal, [$($idx:literal => $variant:ident : $($alias:literal)|+),+ $(,)?]) => {
        impl TryFrom<u8> for $ty {
            type Error = DivergenceError;

            fn try_from(value: u8) -> Result<Self> {
                match value {
                    $($idx => Ok($ty::$variant),)+
                    other => Err(DivergenceError::InvalidEnumValue {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl FromStr for $ty {
            type Err = DivergenceError;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($($alias)|+ => Ok($ty::$variant),)+
                    _ => Err(DivergenceError::InvalidEnumValue {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

parseable_enum!(Scale, "scale", [
    0 => Large: "large" | "l",
    1 => Medium: "medium" | "m",
    2 => Small: "small" | "s",
]);

parseable_enum!(Authenticity, "authenticity", [
    0 => Lax: "lax",
    1 => Strict: "strict",
    2 => None: "none",
    3 => Decide: "decide",
]);

parseable_enum!(Alignment, "alignment", [
    0 => Near: "near" | "left",
    1 => Center: "center" | "centre",
    2 => Far: "far" | "right",
]);

parseable_enum!(Escape, "escape", [
    0 => None: "none",
    1 => NewLines: "newlines" | "new-lines",
    2 => All: "all",
]);

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Border and line margins around the tube grid, in output pixels
///
/// Values may be negative to make tubes overlap the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Spacing {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    /// Gap between consecutive lines of tubes
    pub line: i32,
}

impl Spacing {
    /// No margins at all
    pub const EMPTY: Spacing = Spacing::new(0, 0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32, line: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            line,
        }
    }

    /// Same margin on all four sides
    pub const fn uniform(all: i32, line: i32) -> Self {
        Self::new(all, all, all, all, line)
    }

    /// Same left and right, same top and bottom
    pub const fn symmetric(horizontal: i32, vertical: i32, line: i32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical, line)
    }

    /// `left + right`, widened so extreme margins cannot overflow
    pub const fn horizontal(&self) -> i64 {
        self.left as i64 + self.right as i64
    }

    /// `top + bottom`, widened like [`Spacing::horizontal`]
    pub const fn vertical(&self) -> i64 {
        self.top as i64 + self.bottom as i64
    }

    /// `(horizontal, vertical)`
    pub const fn total(&self) -> (i64, i64) {
        (self.horizontal(), self.vertical())
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Left={} Top={} Right={} Bottom={} Line={}",
            self.left, self.top, self.right, self.bottom, self.line
        )
    }
}

/// Optional caps on text size, checked before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    pub enabled: bool,
    /// Characters per line
    pub max_length: usize,
    pub max_lines: usize,
}

impl Limits {
    /// Longest line accepted when limits are on
    pub const DEFAULT_MAX_LENGTH: usize = 24;
    /// Most lines accepted when limits are on
    pub const DEFAULT_MAX_LINES: usize = 3;

    /// Default caps, switched on
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            max_length: Self::DEFAULT_MAX_LENGTH,
            max_lines: Self::DEFAULT_MAX_LINES,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            enabled: false,
            max_length: Self::DEFAULT_MAX_LENGTH,
            max_lines: Self::DEFAULT_MAX_LINES,
        }
    }
}

/// Spacing sides pinned by the caller when solving for a target size
///
/// At most one side per axis may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForcedSpacing {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub line: Option<i32>,
}

impl ForcedSpacing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the left margin
    pub fn left(mut self, value: i32) -> Self {
        self.left = Some(value);
        self
    }

    /// Pin the top margin
    pub fn top(mut self, value: i32) -> Self {
        self.top = Some(value);
        self
    }

    /// Pin the right margin
    pub fn right(mut self, value: i32) -> Self {
        self.right = Some(value);
        self
    }

    /// Pin the bottom margin
    pub fn bottom(mut self, value: i32) -> Self {
        self.bottom = Some(value);
        self
    }

    /// Pin the gap between lines
    pub fn line(mut self, value: i32) -> Self {
        self.line = Some(value);
        self
    }
}

/// Arguments for drawing a divergence meter
#[derive(Debug, Clone, Default)]
pub struct DivergenceArgs {
    pub spacing: Spacing,
    pub scale: Scale,
    pub authenticity: Authenticity,
    pub background: Background,
    /// Alignment of lines shorter than the longest
    pub alignment: Alignment,
    /// Pad short lines with spaces so every line has the same width
    pub use_padding: bool,
    /// With center alignment, keep tubes on a shared column grid.
    /// No effect when `use_padding` is set.
    pub align_tubes: bool,
    pub escape: Escape,
    pub limits: Limits,
}

impl DivergenceArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Medium tubes on a transparent background
    pub fn medium() -> Self {
        Self::default().with_scale(Scale::Medium)
    }

    /// Small tubes on a transparent background
    pub fn small() -> Self {
        Self::default().with_scale(Scale::Small)
    }

    /// Large tubes on black
    pub fn large_black() -> Self {
        Self::default().with_background(crate::Color::black())
    }

    /// Medium tubes on black
    pub fn medium_black() -> Self {
        Self::medium().with_background(crate::Color::black())
    }

    /// Small tubes on black
    pub fn small_black() -> Self {
        Self::small().with_background(crate::Color::black())
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Replace the scale tier
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_authenticity(mut self, authenticity: Authenticity) -> Self {
        self.authenticity = authenticity;
        self
    }

    /// Replace the background; takes a color, bitmap or path
    pub fn with_background(mut self, background: impl Into<Background>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_padding(mut self, use_padding: bool) -> Self {
        self.use_padding = use_padding;
        self
    }

    pub fn with_align_tubes(mut self, align_tubes: bool) -> Self {
        self.align_tubes = align_tubes;
        self
    }

    pub fn with_escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }

    /// Replace the line and length limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
