//! Pixel buffers: the destination canvas and every decoded sprite sheet
//!
//! Pixels are stored row-major with straight (non-premultiplied) alpha.
//! Sprites are blended source-over; everything drawn is clipped to the
//! destination, so placements may run off any edge.

use crate::error::{RenderError, Result};
use crate::types::{Point, Rect, Size};
use crate::Color;

/// How pixels are arranged in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    #[default]
    Rgba8,
    /// Opaque; alpha reads back as 255 and writes are composited away
    Rgb8,
}

impl PixelFormat {
    /// Bytes one pixel takes in the buffer
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::Rgb8 => 3,
        }
    }
}

/// An addressable RGB(A) pixel buffer
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn buffer_len(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height }.into());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
        .ok_or_else(|| RenderError::InvalidDimensions { width, height }.into())
}

impl Canvas {
    /// A zeroed canvas: transparent black, or opaque black for `Rgb8`
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = buffer_len(width, height, format)?;
        Ok(Self {
            width,
            height,
            format,
            data: vec![0; len],
        })
    }

    /// Wrap an existing buffer; its length must match the dimensions exactly
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height, format)?;
        if data.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height together
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Channel layout of the buffer
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Raw pixels, row-major with no padding between rows
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Give up the canvas and keep the pixel buffer
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * self.format.bytes_per_pixel()
    }

    /// RGBA at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(match self.format {
            PixelFormat::Rgba8 => [
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ],
            PixelFormat::Rgb8 => [self.data[i], self.data[i + 1], self.data[i + 2], 255],
        })
    }

    /// Overwrite a pixel without blending; ignored outside the canvas
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        let bpp = self.format.bytes_per_pixel();
        self.data[i..i + bpp].copy_from_slice(&rgba[..bpp]);
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_array();
        let bpp = self.format.bytes_per_pixel();
        for px in self.data.chunks_exact_mut(bpp) {
            px.copy_from_slice(&rgba[..bpp]);
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let sa = u32::from(src[3]);
        if sa == 0 {
            return;
        }
        if sa == 255 {
            self.put_pixel(x, y, src);
            return;
        }
        let Some(dst) = self.pixel(x, y) else {
            return;
        };
        let da = u32::from(dst[3]);
        let inv = 255 - sa;
        // Alpha scaled by 255 to keep precision through the color step
        let out_a = sa * 255 + da * inv;
        let mut out = [0u8; 4];
        for c in 0..3 {
            let num = u32::from(src[c]) * sa * 255 + u32::from(dst[c]) * da * inv;
            out[c] = ((num + out_a / 2) / out_a) as u8;
        }
        out[3] = ((out_a + 127) / 255) as u8;
        self.put_pixel(x, y, out);
    }

    /// Composite `src_rect` of `src` with its top-left corner at `dst`
    pub fn blit(&mut self, src: &Canvas, src_rect: Rect, dst: Point) {
        // Keep the source rectangle inside the source
        let src_w = src_rect.width.min(src.width.saturating_sub(src_rect.x));
        let src_h = src_rect.height.min(src.height.saturating_sub(src_rect.y));

        let x0 = i64::from(dst.x).max(0);
        let y0 = i64::from(dst.y).max(0);
        let x1 = (i64::from(dst.x) + i64::from(src_w)).min(i64::from(self.width));
        let y1 = (i64::from(dst.y) + i64::from(src_h)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0..y1 {
            let sy = (y - i64::from(dst.y)) as u32 + src_rect.y;
            for x in x0..x1 {
                let sx = (x - i64::from(dst.x)) as u32 + src_rect.x;
                if let Some(px) = src.pixel(sx, sy) {
                    self.blend_pixel(x as u32, y as u32, px);
                }
            }
        }
    }

    /// Composite all of `src`, resampled bilinearly to `size`, at `dst`
    pub fn draw_scaled(&mut self, src: &Canvas, dst: Point, size: Size) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        if size == src.size() {
            self.blit(src, Rect::new(0, 0, src.width, src.height), dst);
            return;
        }

        let x0 = i64::from(dst.x).max(0);
        let y0 = i64::from(dst.y).max(0);
        let x1 = (i64::from(dst.x) + i64::from(size.width)).min(i64::from(self.width));
        let y1 = (i64::from(dst.y) + i64::from(size.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let sx_ratio = f64::from(src.width) / f64::from(size.width);
        let sy_ratio = f64::from(src.height) / f64::from(size.height);
        for y in y0..y1 {
            let fy = ((y - i64::from(dst.y)) as f64 + 0.5) * sy_ratio - 0.5;
            for x in x0..x1 {
                let fx = ((x - i64::from(dst.x)) as f64 + 0.5) * sx_ratio - 0.5;
                let px = src.sample_bilinear(fx, fy);
                self.blend_pixel(x as u32, y as u32, px);
            }
        }
    }

    fn sample_bilinear(&self, fx: f64, fy: f64) -> [u8; 4] {
        let max_x = f64::from(self.width - 1);
        let max_y = f64::from(self.height - 1);
        let fx = fx.clamp(0.0, max_x);
        let fy = fy.clamp(0.0, max_y);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - f64::from(x0);
        let ty = fy - f64::from(y0);

        let p00 = self.pixel(x0, y0).unwrap_or_default();
        let p10 = self.pixel(x1, y0).unwrap_or_default();
        let p01 = self.pixel(x0, y1).unwrap_or_default();
        let p11 = self.pixel(x1, y1).unwrap_or_default();

        let mut out = [0u8; 4];
        for c in 0..4 {
            let top = f64::from(p00[c]) * (1.0 - tx) + f64::from(p10[c]) * tx;
            let bottom = f64::from(p01[c]) * (1.0 - tx) + f64::from(p11[c]) * tx;
            out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Copy into another pixel format; dropping alpha keeps the color channels
    pub fn convert(&self, format: PixelFormat) -> Canvas {
        if format == self.format {
            return self.clone();
        }
        let bpp = format.bytes_per_pixel();
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * bpp);
        for y in 0..self.height {
            for x in 0..self.width {
                let px = self.pixel(x, y).unwrap_or_default();
                data.extend_from_slice(&px[..bpp]);
            }
        }
        Canvas {
            width: self.width,
            height: self.height,
            format,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: Color) -> Canvas {
        let mut canvas = Canvas::new(width, height, PixelFormat::Rgba8).unwrap();
        canvas.clear(color);
        canvas
    }

    #[test]
    fn rejects_bad_dimensions_and_buffers() {
        assert!(Canvas::new(0, 4, PixelFormat::Rgba8).is_err());
        assert!(Canvas::from_raw(2, 2, PixelFormat::Rgb8, vec![0; 11]).is_err());
        let canvas = Canvas::from_raw(2, 2, PixelFormat::Rgb8, vec![7; 12]).unwrap();
        assert_eq!(canvas.stride(), 6);
        assert_eq!(canvas.pixel(1, 1), Some([7, 7, 7, 255]));
        assert_eq!(canvas.pixel(2, 0), None);
    }

    #[test]
    fn blit_clips_negative_origin() {
        let mut dst = solid(4, 4, Color::black());
        let src = solid(3, 3, Color::white());
        dst.blit(&src, Rect::new(0, 0, 3, 3), Point::new(-2, -2));
        assert_eq!(dst.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 255]));
        assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn blit_reads_only_source_rect() {
        let mut src = solid(4, 1, Color::black());
        src.put_pixel(2, 0, [255, 0, 0, 255]);
        let mut dst = Canvas::new(2, 1, PixelFormat::Rgba8).unwrap();
        dst.blit(&src, Rect::new(2, 0, 2, 1), Point::new(0, 0));
        assert_eq!(dst.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn transparent_source_leaves_destination() {
        let mut dst = solid(2, 2, Color::rgb(10, 20, 30));
        let src = Canvas::new(2, 2, PixelFormat::Rgba8).unwrap();
        dst.blit(&src, Rect::new(0, 0, 2, 2), Point::new(0, 0));
        assert_eq!(dst.pixel(1, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn half_alpha_blends_over_opaque() {
        let mut dst = solid(1, 1, Color::black());
        let src = solid(1, 1, Color::rgba(255, 255, 255, 128));
        dst.blit(&src, Rect::new(0, 0, 1, 1), Point::new(0, 0));
        let px = dst.pixel(0, 0).unwrap();
        assert_eq!(px[3], 255);
        assert!((127..=129).contains(&px[0]), "got {px:?}");
    }

    #[test]
    fn blend_over_transparent_keeps_source_color() {
        let mut dst = Canvas::new(1, 1, PixelFormat::Rgba8).unwrap();
        let src = solid(1, 1, Color::rgba(200, 100, 50, 128));
        dst.blit(&src, Rect::new(0, 0, 1, 1), Point::new(0, 0));
        assert_eq!(dst.pixel(0, 0), Some([200, 100, 50, 128]));
    }

    #[test]
    fn draw_scaled_covers_target() {
        let mut dst = Canvas::new(6, 4, PixelFormat::Rgba8).unwrap();
        let src = solid(3, 2, Color::rgb(0, 128, 255));
        dst.draw_scaled(&src, Point::new(0, 0), Size::new(6, 4));
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(dst.pixel(x, y), Some([0, 128, 255, 255]));
            }
        }
    }

    #[test]
    fn convert_drops_alpha() {
        let canvas = solid(2, 1, Color::rgba(1, 2, 3, 4));
        let rgb = canvas.convert(PixelFormat::Rgb8);
        assert_eq!(rgb.data(), &[1, 2, 3, 1, 2, 3]);
    }
}
