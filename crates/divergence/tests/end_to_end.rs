//! Disk to disk: sprite sheets in a temp dir, PNG out

use std::path::Path;
use std::sync::Arc;

use divergence::export::{save, save_png, PnmExporter};
use divergence::prelude::*;
use divergence::{assets::config::set_asset_root, GlyphSet, Metrics};
use image::{Rgba, RgbaImage};

const GLYPH: Rgba<u8> = Rgba([255, 160, 40, 255]);
const FRAME: Rgba<u8> = Rgba([30, 30, 30, 255]);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_sheets(root: &Path, scale: Scale) {
    let m = Metrics::new(scale);
    std::fs::create_dir_all(root.join(scale.name())).unwrap();
    for kind in GlyphSet::all().sheets() {
        let image = if kind.is_glyph_sheet() {
            let size = m.glyph_sheet_size();
            RgbaImage::from_pixel(size.width, size.height, GLYPH)
        } else {
            RgbaImage::from_pixel(m.tube_width + 2 * m.side_width, m.tube_height, FRAME)
        };
        image
            .save(root.join(kind.resource_path(scale).unwrap()))
            .unwrap();
    }
}

#[test]
fn draw_and_save_png() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    write_sheets(dir.path(), Scale::Small);

    let divergence = divergence::from_dir(dir.path()).unwrap();
    let args = DivergenceArgs::small_black();
    let canvas = divergence.draw("1.048596", &args).unwrap();

    let out = dir.path().join("meter.png");
    save_png(&canvas, &out).unwrap();
    let decoded = image::open(&out).unwrap().into_rgba8();
    assert_eq!(decoded.dimensions(), (canvas.width(), canvas.height()));

    // Middle of the first glyph
    let m = Metrics::new(Scale::Small);
    let x = m.side_width + m.glyph_offset_x + m.glyph_width / 2;
    let y = m.glyph_offset_y + m.glyph_height / 2;
    assert_eq!(*decoded.get_pixel(x, y), GLYPH);
    assert_eq!(*decoded.get_pixel(0, 0), FRAME);
}

#[test]
fn ppm_export_matches_canvas_size() {
    let dir = tempfile::tempdir().unwrap();
    write_sheets(dir.path(), Scale::Small);
    let divergence = divergence::from_dir(dir.path()).unwrap();
    let canvas = divergence.draw("10:24", &DivergenceArgs::small()).unwrap();

    let out = dir.path().join("meter.ppm");
    save(&PnmExporter, &canvas, &out).unwrap();
    let bytes = std::fs::read(&out).unwrap();
    let header = format!("P6\n{} {}\n255\n", canvas.width(), canvas.height());
    assert!(bytes.starts_with(header.as_bytes()));
    assert_eq!(
        bytes.len(),
        header.len() + (canvas.width() * canvas.height() * 3) as usize
    );
}

#[test]
fn bitmap_background_stays_with_caller() {
    let dir = tempfile::tempdir().unwrap();
    write_sheets(dir.path(), Scale::Small);
    let divergence = divergence::from_dir(dir.path()).unwrap();

    let mut bg = Canvas::new(8, 8, PixelFormat::Rgba8).unwrap();
    bg.clear(Color::rgb(0, 0, 200));
    let bg = Arc::new(bg);
    let args = DivergenceArgs::small()
        .with_spacing(Spacing::uniform(10, 0))
        .with_background(bg.clone());

    let canvas = divergence.draw("1", &args).unwrap();
    assert_eq!(canvas.pixel(0, 0), Some([0, 0, 200, 255]));
    assert_eq!(Arc::strong_count(&bg), 2);
}

#[test]
fn from_env_reads_configured_root() {
    let dir = tempfile::tempdir().unwrap();
    write_sheets(dir.path(), Scale::Medium);
    set_asset_root(Some(dir.path().to_path_buf()));

    let divergence = divergence::from_env().unwrap();
    let canvas = divergence.draw("0.571024", &DivergenceArgs::medium()).unwrap();
    assert_eq!(canvas.height(), Metrics::new(Scale::Medium).tube_height);
    set_asset_root(None);
}
