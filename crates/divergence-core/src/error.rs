//! Error types for Divergence

use std::path::PathBuf;

use thiserror::Error;

use crate::glyph_set::GlyphSet;
use crate::params::Scale;

/// Result type used throughout Divergence
pub type Result<T> = std::result::Result<T, DivergenceError>;

/// Main error type for Divergence
#[derive(Debug, Error)]
pub enum DivergenceError {
    #[error("Invalid {kind} value: {value}")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("{0} spacing cannot both be specified")]
    ConflictingSpacing(Axis),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(#[from] LimitError),

    #[error("The following text does not contain only numbers and decimals: {text}")]
    NotAuthentic { text: String },

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DivergenceError {
    /// The offending text of a strict-mode violation
    pub fn not_authentic_text(&self) -> Option<&str> {
        match self {
            Self::NotAuthentic { text } => Some(text),
            _ => None,
        }
    }
}

/// Spacing axis named by a conflicting solve request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("Left and Right"),
            Axis::Vertical => f.write_str("Top and Bottom"),
        }
    }
}

/// Per-call length and line caps
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitError {
    #[error("text has {lines} lines, which is greater than the maximum ({max})")]
    TooManyLines { lines: usize, max: usize },

    #[error("line {line} has {length} characters, which is longer than the maximum ({max})")]
    LineTooLong {
        line: usize,
        length: usize,
        max: usize,
    },
}

/// Sprite sheet and background image errors
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Resource not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error(
        "Sprite sheet {kind:?} at {scale} is {width}x{height}, expected at least {min_width}x{min_height}"
    )]
    InvalidSheet {
        kind: GlyphSet,
        scale: Scale,
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    #[error("No sprite sheet {kind:?} for scale {scale}")]
    Missing { kind: GlyphSet, scale: Scale },
}

/// Compositing errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Sprite sheet {0:?} was not acquired for this render")]
    SpriteNotAcquired(GlyphSet),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Format not supported: {0}")]
    FormatNotSupported(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
