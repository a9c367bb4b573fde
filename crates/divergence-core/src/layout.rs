//! Pixel geometry of a divergence meter
//!
//! Every measurement starts from a base pixel value at Large scale and goes
//! through [`Metrics::scaled`], so size, placement and the spacing solver can
//! never disagree by a rounding step.
//!
//! The canvas is an affine function of the spacing:
//!
//! ```text
//! width  = max(1, left + right + 2 * side + tube_width * longest_line)
//! height = max(1, top + bottom + tube_height * lines + line * (lines - 1))
//! ```

use crate::authenticity::{is_authentic_char, is_font_a, is_font_b, FONT_A_START, FONT_B_START};
use crate::format::format;
use crate::glyph_set::{GlyphSet, TubeShape};
use crate::params::{Alignment, DivergenceArgs, Scale, Spacing};
use crate::types::{Point, Rect, Size};

/// Pixel sizes of one scale tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub scale: Scale,
    /// Width of the cap on each outer side of a line of tubes
    pub side_width: u32,
    pub tube_width: u32,
    pub tube_height: u32,
    /// Glyph position inside its tube
    pub glyph_offset_x: u32,
    pub glyph_offset_y: u32,
    pub glyph_width: u32,
    pub glyph_height: u32,
}

impl Metrics {
    /// Glyph sheets are a grid of this many columns
    pub const COLUMNS: u32 = 19;
    /// and this many rows
    pub const ROWS: u32 = 5;

    const BASE_SIDE_WIDTH: u32 = 10;
    const BASE_TUBE_WIDTH: u32 = 132;
    const BASE_TUBE_HEIGHT: u32 = 428;
    const BASE_GLYPH_OFFSET_X: u32 = 6;
    const BASE_GLYPH_OFFSET_Y: u32 = 58;
    const BASE_GLYPH_WIDTH: u32 = 120;
    const BASE_GLYPH_HEIGHT: u32 = 290;

    /// Metrics for `scale`, every base size rounded up
    pub fn new(scale: Scale) -> Self {
        Self {
            scale,
            side_width: Self::scaled(scale, Self::BASE_SIDE_WIDTH),
            tube_width: Self::scaled(scale, Self::BASE_TUBE_WIDTH),
            tube_height: Self::scaled(scale, Self::BASE_TUBE_HEIGHT),
            glyph_offset_x: Self::scaled(scale, Self::BASE_GLYPH_OFFSET_X),
            glyph_offset_y: Self::scaled(scale, Self::BASE_GLYPH_OFFSET_Y),
            glyph_width: Self::scaled(scale, Self::BASE_GLYPH_WIDTH),
            glyph_height: Self::scaled(scale, Self::BASE_GLYPH_HEIGHT),
        }
    }

    /// A base pixel value at `scale`, rounded up
    pub fn scaled(scale: Scale, value: u32) -> u32 {
        (f64::from(value) * scale.ratio()).ceil() as u32
    }

    /// One tube without caps
    pub fn tube_size(&self) -> Size {
        Size::new(self.tube_width, self.tube_height)
    }

    /// One grid cell of a glyph sheet
    pub fn glyph_size(&self) -> Size {
        Size::new(self.glyph_width, self.glyph_height)
    }

    /// Smallest glyph sheet that holds the whole grid
    pub fn glyph_sheet_size(&self) -> Size {
        Size::new(
            self.glyph_width * Self::COLUMNS,
            self.glyph_height * Self::ROWS,
        )
    }

    /// Source rectangle of glyph `index` in a glyph sheet
    pub fn glyph_rect(&self, index: u32) -> Rect {
        Rect::new(
            (index % Self::COLUMNS) * self.glyph_width,
            (index / Self::COLUMNS) * self.glyph_height,
            self.glyph_width,
            self.glyph_height,
        )
    }

    /// Unclamped `(width, height)`, affine in every spacing value
    ///
    /// May be zero or negative when the spacing eats the tubes; the spacing
    /// solver works on this so its answer measures back exactly.
    pub fn raw_extent(&self, spacing: &Spacing, lines: usize, max_length: usize) -> (i64, i64) {
        let lines = lines as i64;
        let width = spacing.horizontal()
            + 2 * i64::from(self.side_width)
            + i64::from(self.tube_width) * max_length as i64;
        let height = spacing.vertical()
            + i64::from(self.tube_height) * lines
            + i64::from(spacing.line) * (lines - 1);
        (width, height)
    }

    /// Canvas size for `lines` lines of up to `max_length` characters
    pub fn canvas_size(&self, spacing: &Spacing, lines: usize, max_length: usize) -> Size {
        let (width, height) = self.raw_extent(spacing, lines, max_length);
        Size::new(clamp_dimension(width), clamp_dimension(height))
    }
}

fn clamp_dimension(value: i64) -> u32 {
    value.clamp(1, i64::from(u32::MAX)) as u32
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Where a glyph comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRef {
    /// Always a single glyph sheet
    pub sheet: GlyphSet,
    /// Cell index in the 19 column grid
    pub index: u32,
}

impl GlyphRef {
    /// Sheet and index for `c`, or `None` when nothing is drawn
    pub fn lookup(c: char, authentic: bool) -> Option<Self> {
        if c == ' ' {
            return None;
        }
        if authentic && is_authentic_char(c) {
            // Slot 0 holds the decimal point, digits follow
            let index = c.to_digit(10).map_or(0, |d| d + 1);
            return Some(Self {
                sheet: GlyphSet::AUTHENTIC,
                index,
            });
        }
        if is_font_a(c) {
            return Some(Self {
                sheet: GlyphSet::FONT_A,
                index: c as u32 - FONT_A_START as u32,
            });
        }
        if is_font_b(c) {
            return Some(Self {
                sheet: GlyphSet::FONT_B,
                index: c as u32 - FONT_B_START as u32,
            });
        }
        None
    }
}

/// One tube and the glyph inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub shape: TubeShape,
    /// Top-left of the tube sprite, including the left cap if it has one
    pub tube_origin: Point,
    pub glyph_origin: Point,
    pub glyph: Option<GlyphRef>,
}

/// A positioned line of tubes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    /// Top-left of the first cell, right of its cap
    pub origin: Point,
    pub cells: Vec<Cell>,
}

/// Everything needed to composite one formatted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub metrics: Metrics,
    pub size: Size,
    pub lines: Vec<LayoutLine>,
}

impl Layout {
    /// Place every tube of already formatted text.
    ///
    /// `authentic` decides whether digits and `.` use the authentic sheet.
    pub fn new(formatted: &str, args: &DivergenceArgs, authentic: bool) -> Self {
        let metrics = Metrics::new(args.scale);
        let spacing = args.spacing;
        let text_lines: Vec<Vec<char>> = formatted.split('\n').map(|l| l.chars().collect()).collect();
        let max_length = text_lines.iter().map(Vec::len).max().unwrap_or(0);
        let size = metrics.canvas_size(&spacing, text_lines.len(), max_length);

        let tube_width = metrics.tube_width as i32;
        let side_width = metrics.side_width as i32;
        let glyph_offset = (metrics.glyph_offset_x as i32, metrics.glyph_offset_y as i32);
        let needs_alignment = !args.use_padding && args.alignment != Alignment::Near;

        let lines = text_lines
            .iter()
            .enumerate()
            .map(|(row, chars)| {
                let length = chars.len();
                let row_pitch = i64::from(metrics.tube_height) + i64::from(spacing.line);
                let mut x = i64::from(spacing.left) + i64::from(side_width);
                let y = i64::from(spacing.top) + row as i64 * row_pitch;

                let shortfall = (max_length - length) as i64;
                let tube = i64::from(tube_width);
                if needs_alignment && shortfall != 0 {
                    x += match args.alignment {
                        Alignment::Far => shortfall * tube,
                        _ if args.align_tubes => (shortfall / 2) * tube,
                        _ => (shortfall * tube) / 2,
                    };
                }
                let origin = Point::new(saturate(x), saturate(y));

                let cells = chars
                    .iter()
                    .enumerate()
                    .map(|(column, &ch)| {
                        let cell_origin =
                            origin.offset(saturate(column as i64 * i64::from(tube_width)), 0);
                        let shape = TubeShape::for_column(column, length);
                        let tube_origin = if shape.has_left_cap() {
                            cell_origin.offset(-side_width, 0)
                        } else {
                            cell_origin
                        };
                        Cell {
                            ch,
                            shape,
                            tube_origin,
                            glyph_origin: cell_origin.offset(glyph_offset.0, glyph_offset.1),
                            glyph: GlyphRef::lookup(ch, authentic),
                        }
                    })
                    .collect();

                LayoutLine { origin, cells }
            })
            .collect();

        Self {
            metrics,
            size,
            lines,
        }
    }

    /// Every cell, line by line
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.lines.iter().flat_map(|line| line.cells.iter())
    }

    /// The smallest set of sheets that draws this layout
    pub fn required_sheets(&self) -> GlyphSet {
        self.cells().fold(GlyphSet::empty(), |set, cell| {
            let set = set | cell.shape.sheet();
            match cell.glyph {
                Some(glyph) => set | glyph.sheet,
                None => set,
            }
        })
    }

    /// Number of lines, at least 1
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of the longest line in characters
    pub fn max_length(&self) -> usize {
        self.lines.iter().map(|l| l.cells.len()).max().unwrap_or(0)
    }
}

/// Canvas size of `text` drawn with `args`, without touching any sprite
pub fn calculate_size(text: &str, args: &DivergenceArgs) -> Size {
    let formatted = format(text, args);
    measure(&formatted, args.scale, &args.spacing)
}

/// Line count and longest line of already formatted text
pub(crate) fn text_extent(formatted: &str) -> (usize, usize) {
    formatted
        .split('\n')
        .fold((0, 0), |(lines, max), line| (lines + 1, max.max(line.chars().count())))
}

/// Canvas size of already formatted text
pub(crate) fn measure(formatted: &str, scale: Scale, spacing: &Spacing) -> Size {
    let (lines, max_length) = text_extent(formatted);
    Metrics::new(scale).canvas_size(spacing, lines, max_length)
}
