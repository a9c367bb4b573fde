//! Sprite sheet kinds and tube frame shapes

use bitflags::bitflags;

use crate::params::Scale;

bitflags! {
    /// One bit per sprite sheet; a render asks for the union it needs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct GlyphSet: u8 {
        const AUTHENTIC = 1 << 0;
        const FONT_A = 1 << 1;
        const FONT_B = 1 << 2;
        const TUBE_LEFT = 1 << 3;
        const TUBE_MID = 1 << 4;
        const TUBE_RIGHT = 1 << 5;
        const TUBE_SINGLE = 1 << 6;

        const TUBES_SIDES = Self::TUBE_LEFT.bits() | Self::TUBE_RIGHT.bits();
        const TUBES_FULL = Self::TUBES_SIDES.bits() | Self::TUBE_MID.bits();
        const TUBES_ALL = Self::TUBES_FULL.bits() | Self::TUBE_SINGLE.bits();
        const FONTS_AB = Self::FONT_A.bits() | Self::FONT_B.bits();
        const FONTS_ALL = Self::FONTS_AB.bits() | Self::AUTHENTIC.bits();
    }
}

impl GlyphSet {
    /// Every individual sheet, in load order
    pub const SHEETS: [GlyphSet; 7] = [
        GlyphSet::AUTHENTIC,
        GlyphSet::FONT_A,
        GlyphSet::FONT_B,
        GlyphSet::TUBE_LEFT,
        GlyphSet::TUBE_MID,
        GlyphSet::TUBE_RIGHT,
        GlyphSet::TUBE_SINGLE,
    ];

    /// The single sheets contained in this set
    pub fn sheets(self) -> impl Iterator<Item = GlyphSet> {
        Self::SHEETS.into_iter().filter(move |s| self.contains(*s))
    }

    /// Whether this is exactly one sheet
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// Sheets laid out as the 19x5 glyph grid
    pub fn is_glyph_sheet(self) -> bool {
        self.is_single() && Self::FONTS_ALL.contains(self)
    }

    /// Resource name of a single sheet, `None` for unions
    pub fn resource_name(self) -> Option<&'static str> {
        let name = match self {
            s if s == Self::AUTHENTIC => "Authentic",
            s if s == Self::FONT_A => "FontA",
            s if s == Self::FONT_B => "FontB",
            s if s == Self::TUBE_LEFT => "TubeLeft",
            s if s == Self::TUBE_MID => "TubeMid",
            s if s == Self::TUBE_RIGHT => "TubeRight",
            s if s == Self::TUBE_SINGLE => "TubeSingle",
            _ => return None,
        };
        Some(name)
    }

    /// Relative asset path, e.g. `Small/NixieTubeLeft.png`
    pub fn resource_path(self, scale: Scale) -> Option<String> {
        self.resource_name()
            .map(|name| format!("{}/Nixie{}.png", scale.name(), name))
    }
}

/// Frame variant drawn behind a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TubeShape {
    Left,
    Mid,
    Right,
    /// The only tube on its line; carries both side caps
    Single,
}

impl TubeShape {
    /// Shape of column `index` on a line holding `length` characters
    pub fn for_column(index: usize, length: usize) -> Self {
        if index == 0 {
            if length == 1 {
                TubeShape::Single
            } else {
                TubeShape::Left
            }
        } else if index + 1 < length {
            TubeShape::Mid
        } else {
            TubeShape::Right
        }
    }

    /// Tube sheet drawn for this shape
    pub fn sheet(self) -> GlyphSet {
        match self {
            TubeShape::Left => GlyphSet::TUBE_LEFT,
            TubeShape::Mid => GlyphSet::TUBE_MID,
            TubeShape::Right => GlyphSet::TUBE_RIGHT,
            TubeShape::Single => GlyphSet::TUBE_SINGLE,
        }
    }

    /// Whether the frame starts with a left side cap
    pub fn has_left_cap(self) -> bool {
        matches!(self, TubeShape::Left | TubeShape::Single)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composites_expand_to_sheets() {
        let sheets: Vec<_> = GlyphSet::TUBES_FULL.sheets().collect();
        assert_eq!(
            sheets,
            vec![GlyphSet::TUBE_LEFT, GlyphSet::TUBE_MID, GlyphSet::TUBE_RIGHT]
        );
        assert_eq!(GlyphSet::all().sheets().count(), 7);
        assert!(GlyphSet::FONT_B.is_glyph_sheet());
        assert!(!GlyphSet::TUBE_MID.is_glyph_sheet());
        assert!(!GlyphSet::FONTS_AB.is_glyph_sheet());
    }

    #[test]
    fn resource_paths() {
        assert_eq!(
            GlyphSet::TUBE_LEFT.resource_path(Scale::Small).as_deref(),
            Some("Small/NixieTubeLeft.png")
        );
        assert_eq!(
            GlyphSet::AUTHENTIC.resource_path(Scale::Large).as_deref(),
            Some("Large/NixieAuthentic.png")
        );
        assert_eq!(GlyphSet::TUBES_SIDES.resource_name(), None);
    }

    #[test]
    fn tube_shapes_by_position() {
        assert_eq!(TubeShape::for_column(0, 1), TubeShape::Single);
        assert_eq!(TubeShape::for_column(0, 2), TubeShape::Left);
        assert_eq!(TubeShape::for_column(1, 2), TubeShape::Right);
        assert_eq!(TubeShape::for_column(1, 3), TubeShape::Mid);
        assert_eq!(TubeShape::for_column(2, 3), TubeShape::Right);
    }
}
