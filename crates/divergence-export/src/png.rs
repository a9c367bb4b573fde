//! PNG export through the `image` crate

use divergence_core::error::{ExportError, Result};
use divergence_core::traits::Exporter;
use divergence_core::{Canvas, PixelFormat};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

/// Encode a canvas as PNG, keeping its channel layout
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let color = match canvas.format() {
        PixelFormat::Rgba8 => ExtendedColorType::Rgba8,
        PixelFormat::Rgb8 => ExtendedColorType::Rgb8,
    };

    let mut png_data = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png_data, CompressionType::Default, FilterType::Sub);
    encoder
        .write_image(canvas.data(), canvas.width(), canvas.height(), color)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {e}")))?;

    Ok(png_data)
}

/// PNG exporter for drawn meters
///
/// ```
/// use divergence_core::traits::Exporter;
/// use divergence_export::PngExporter;
///
/// assert_eq!(PngExporter::new().mime_type(), "image/png");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl PngExporter {
    /// Create a PNG exporter
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>> {
        encode_png(canvas)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn exporter_identity() {
        let exporter = PngExporter::new();
        assert_eq!(exporter.name(), "png");
        assert_eq!(exporter.extension(), "png");
    }

    #[test]
    fn rgba_and_rgb_both_encode() {
        let rgba = Canvas::from_raw(
            2,
            2,
            PixelFormat::Rgba8,
            vec![
                255, 0, 0, 255, // red
                0, 255, 0, 255, // green
                0, 0, 255, 255, // blue
                255, 255, 255, 0, // clear white
            ],
        )
        .unwrap();
        let png = PngExporter.export(&rgba).unwrap();
        assert_eq!(&png[0..8], &MAGIC);

        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 255, 255, 0]);

        let rgb = rgba.convert(PixelFormat::Rgb8);
        let png = PngExporter.export(&rgb).unwrap();
        assert_eq!(&png[0..8], &MAGIC);
    }
}
