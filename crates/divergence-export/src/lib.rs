//! Canvas to file bytes
//!
//! Two exporters: PNG through the `image` crate, and binary PPM with no
//! dependencies at all.

use std::io::Write;
use std::path::Path;

use divergence_core::error::Result;
use divergence_core::traits::Exporter;
use divergence_core::{Canvas, PixelFormat};

pub mod png;

pub use png::{encode_png, PngExporter};

/// Binary PPM (`P6`) exporter; alpha is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct PnmExporter;

impl PnmExporter {
    /// Create a PPM exporter
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PnmExporter {
    fn name(&self) -> &'static str {
        "ppm"
    }

    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>> {
        let rgb = canvas.convert(PixelFormat::Rgb8);
        let mut output = Vec::with_capacity(rgb.data().len() + 32);
        writeln!(&mut output, "P6")?;
        writeln!(&mut output, "{} {}", rgb.width(), rgb.height())?;
        writeln!(&mut output, "255")?;
        output.extend_from_slice(rgb.data());
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "ppm"
    }

    fn mime_type(&self) -> &'static str {
        "image/x-portable-pixmap"
    }
}

/// Encode with `exporter` and write the bytes to `path`
pub fn save(exporter: &dyn Exporter, canvas: &Canvas, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = exporter.export(canvas)?;
    std::fs::write(path, &bytes)?;
    log::debug!(
        "Wrote {} ({} bytes) with {}",
        path.display(),
        bytes.len(),
        exporter.name()
    );
    Ok(())
}

/// Write `canvas` to `path` as PNG
pub fn save_png(canvas: &Canvas, path: impl AsRef<Path>) -> Result<()> {
    save(&PngExporter, canvas, path)
}
