//! How long formatting, measuring and drawing take at each scale

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use divergence::traits::SpriteSource;
use divergence::{
    calculate_size, format, Canvas, Divergence, DivergenceArgs, Escape, GlyphSet, Metrics,
    PixelFormat, Result, Scale,
};

/// Opaque sheets of the right size, generated once per load
struct FlatSource;

impl SpriteSource for FlatSource {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn load_sheet(&self, kind: GlyphSet, scale: Scale) -> Result<Canvas> {
        let m = Metrics::new(scale);
        let size = if kind.is_glyph_sheet() {
            m.glyph_sheet_size()
        } else {
            m.tube_size()
        };
        let mut sheet = Canvas::new(size.width, size.height, PixelFormat::Rgba8)?;
        sheet.clear(divergence::Color::rgb(200, 120, 40));
        Ok(sheet)
    }
}

fn bench_format(c: &mut Criterion) {
    let args = DivergenceArgs::default().with_escape(Escape::All).with_padding(true);
    c.bench_function("format_three_lines", |b| {
        b.iter(|| format(black_box("1.048596\\n10:24\\nEl Psy Kongroo"), &args))
    });
}

fn bench_measure(c: &mut Criterion) {
    let args = DivergenceArgs::default();
    c.bench_function("calculate_size", |b| {
        b.iter(|| calculate_size(black_box("1.048596\n0.571024"), &args))
    });
}

fn bench_draw(c: &mut Criterion) {
    let divergence = Divergence::builder()
        .sprites(Arc::new(FlatSource))
        .build()
        .unwrap();

    for scale in Scale::ALL {
        let args = DivergenceArgs::default()
            .with_scale(scale)
            .with_background(divergence::Color::black());
        // Hold one handle so sheets are not reloaded between iterations
        let _warm = divergence
            .sprite_cache()
            .acquire_set(GlyphSet::all(), scale)
            .unwrap();
        c.bench_function(&format!("draw_{}", scale.name().to_lowercase()), |b| {
            b.iter(|| divergence.draw(black_box("1.048596"), &args).unwrap())
        });
    }
}

criterion_group!(benches, bench_format, bench_measure, bench_draw);
criterion_main!(benches);
