//! `image` crate to canvas

use std::path::Path;

use divergence_core::error::{ResourceError, Result};
use divergence_core::traits::ImageDecoder;
use divergence_core::{Canvas, PixelFormat};
use image::{DynamicImage, ImageFormat};

fn to_canvas(image: DynamicImage) -> Result<Canvas> {
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    Canvas::from_raw(width, height, PixelFormat::Rgba8, rgba.into_raw())
}

/// Decode PNG bytes into an RGBA canvas; `origin` names them in errors
pub fn decode_png(bytes: &[u8], origin: &Path) -> Result<Canvas> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|e| {
        ResourceError::Decode {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    to_canvas(image)
}

/// Decodes background files with `image::open`
///
/// PNG, JPEG and BMP are recognized, by extension or by content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileDecoder;

impl ImageFileDecoder {
    /// Decoder for PNG, JPEG and BMP files
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for ImageFileDecoder {
    fn name(&self) -> &'static str {
        "image"
    }

    fn decode_file(&self, path: &Path) -> Result<Canvas> {
        if !path.is_file() {
            return Err(ResourceError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let image = image::open(path).map_err(|e| ResourceError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        to_canvas(image)
    }
}
