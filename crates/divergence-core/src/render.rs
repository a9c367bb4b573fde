//! Compositing: background first, then tubes, then glyphs

use crate::background::{Background, BackgroundImage};
use crate::cache::SpriteSet;
use crate::error::{DivergenceError, RenderError, Result};
use crate::layout::Layout;
use crate::traits::ImageDecoder;
use crate::types::{Point, Rect, Size};
use crate::{Canvas, Color};

/// Clear the canvas and lay the background image over it.
///
/// A `File` image is decoded here and dropped before returning.
pub fn draw_background(
    canvas: &mut Canvas,
    background: &Background,
    decoder: Option<&dyn ImageDecoder>,
) -> Result<()> {
    canvas.clear(background.color.unwrap_or(Color::transparent()));

    match &background.image {
        None => Ok(()),
        Some(BackgroundImage::Bitmap(image)) => {
            draw_image(canvas, image, background.scale_to_fit);
            Ok(())
        },
        Some(BackgroundImage::File(path)) => {
            let decoder = decoder.ok_or_else(|| {
                DivergenceError::ConfigError(format!(
                    "no image decoder configured for background {}",
                    path.display()
                ))
            })?;
            let image = decoder.decode_file(path)?;
            log::debug!(
                "Decoded background {} ({}x{}) with {}",
                path.display(),
                image.width(),
                image.height(),
                decoder.name()
            );
            draw_image(canvas, &image, background.scale_to_fit);
            Ok(())
        },
    }
}

fn draw_image(canvas: &mut Canvas, image: &Canvas, scale_to_fit: bool) {
    if scale_to_fit && image.size() != canvas.size() {
        // Cover the canvas, cropping whatever overhangs evenly
        let scale = (f64::from(canvas.width()) / f64::from(image.width()))
            .max(f64::from(canvas.height()) / f64::from(image.height()));
        let size = Size::new(
            ((f64::from(image.width()) * scale).round() as u32).max(1),
            ((f64::from(image.height()) * scale).round() as u32).max(1),
        );
        canvas.draw_scaled(image, centered(canvas.size(), size), size);
    } else {
        let origin = centered(canvas.size(), image.size());
        canvas.blit(
            image,
            Rect::new(0, 0, image.width(), image.height()),
            origin,
        );
    }
}

/// Origin that centers `inner` on `outer`; negative when it overhangs
fn centered(outer: Size, inner: Size) -> Point {
    let offset = |o: u32, i: u32| ((i64::from(o) - i64::from(i)) / 2) as i32;
    Point::new(
        offset(outer.width, inner.width),
        offset(outer.height, inner.height),
    )
}

/// Blit every tube frame and glyph of `layout`
pub fn draw_layout(canvas: &mut Canvas, layout: &Layout, sprites: &SpriteSet) -> Result<()> {
    for cell in layout.cells() {
        let kind = cell.shape.sheet();
        let tube = sprites
            .get(kind)
            .ok_or(RenderError::SpriteNotAcquired(kind))?;
        canvas.blit(
            tube,
            Rect::new(0, 0, tube.width(), tube.height()),
            cell.tube_origin,
        );

        let Some(glyph) = cell.glyph else {
            continue;
        };
        let sheet = sprites
            .get(glyph.sheet)
            .ok_or(RenderError::SpriteNotAcquired(glyph.sheet))?;
        log::trace!(
            "Blit {:?} as {:?}[{}] at {:?}",
            cell.ch,
            glyph.sheet,
            glyph.index,
            cell.glyph_origin
        );
        canvas.blit(sheet, layout.metrics.glyph_rect(glyph.index), cell.glyph_origin);
    }
    Ok(())
}
