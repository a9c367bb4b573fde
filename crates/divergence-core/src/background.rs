//! What goes behind the tubes

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{Canvas, Color};

/// Where a background image comes from
///
/// A `Bitmap` stays owned by the caller and is only borrowed for the draw.
/// A `File` is decoded by the render call that needs it and dropped when
/// that call returns.
#[derive(Debug, Clone)]
pub enum BackgroundImage {
    Bitmap(Arc<Canvas>),
    File(PathBuf),
}

/// Background instructions for a render
#[derive(Debug, Clone, Default)]
pub struct Background {
    /// Fill color; transparent when unset
    pub color: Option<Color>,
    pub image: Option<BackgroundImage>,
    /// Scale the image to cover the canvas, cropping from the center
    pub scale_to_fit: bool,
}

impl Background {
    /// Fully transparent, no image
    pub fn none() -> Self {
        Self::default()
    }

    /// A solid fill
    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// A caller-owned bitmap over a transparent fill
    pub fn bitmap(image: Arc<Canvas>, scale_to_fit: bool) -> Self {
        Self {
            color: None,
            image: Some(BackgroundImage::Bitmap(image)),
            scale_to_fit,
        }
    }

    /// An image file, decoded on each draw
    pub fn file(path: impl Into<PathBuf>, scale_to_fit: bool) -> Self {
        Self {
            color: None,
            image: Some(BackgroundImage::File(path.into())),
            scale_to_fit,
        }
    }

    /// Fill color drawn under the image
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// True when drawing leaves the canvas transparent
    pub fn is_none(&self) -> bool {
        self.color.is_none() && self.image.is_none()
    }
}

impl From<Color> for Background {
    fn from(color: Color) -> Self {
        Self::color(color)
    }
}

impl From<Arc<Canvas>> for Background {
    fn from(image: Arc<Canvas>) -> Self {
        Self::bitmap(image, true)
    }
}

impl From<PathBuf> for Background {
    fn from(path: PathBuf) -> Self {
        Self::file(path, true)
    }
}

impl From<&str> for Background {
    fn from(path: &str) -> Self {
        Self::file(path, true)
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("None");
        }
        if let Some(color) = self.color {
            write!(f, "Color={color}")?;
            if self.image.is_some() {
                f.write_str(" ")?;
            }
        }
        if let Some(image) = &self.image {
            f.write_str("Background=")?;
            match image {
                BackgroundImage::Bitmap(canvas) => {
                    write!(f, "{}x{}", canvas.width(), canvas.height())?
                },
                BackgroundImage::File(path) => match path.file_name() {
                    Some(name) => write!(f, "{}", name.to_string_lossy())?,
                    None => write!(f, "{}", path.display())?,
                },
            }
            if self.scale_to_fit {
                f.write_str(" (scaled)")?;
            }
        }
        Ok(())
    }
}
