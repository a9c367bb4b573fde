//! Solve spacing for a target canvas size
//!
//! Canvas size is affine in the spacing, so one measurement with the pinned
//! sides is enough: whatever is left over goes to the free sides.

use crate::error::{Axis, DivergenceError, RenderError, Result};
use crate::format::format;
use crate::layout::{text_extent, Metrics};
use crate::params::{DivergenceArgs, ForcedSpacing, Spacing};
use crate::types::Size;

/// Returns `args` with spacing that makes `text` exactly `size` pixels.
///
/// At most one side per axis may be forced. With one side forced the other
/// takes the whole difference; with neither, the difference is split and an
/// odd pixel goes right or bottom. Line spacing is `forced.line` or 0.
/// Results may be negative.
pub fn calculate_spacing_for(
    size: Size,
    text: &str,
    args: &DivergenceArgs,
    forced: ForcedSpacing,
) -> Result<DivergenceArgs> {
    if forced.left.is_some() && forced.right.is_some() {
        return Err(DivergenceError::ConflictingSpacing(Axis::Horizontal));
    }
    if forced.top.is_some() && forced.bottom.is_some() {
        return Err(DivergenceError::ConflictingSpacing(Axis::Vertical));
    }

    let formatted = format(text, args);
    let pinned = Spacing::new(
        forced.left.unwrap_or(0),
        forced.top.unwrap_or(0),
        forced.right.unwrap_or(0),
        forced.bottom.unwrap_or(0),
        forced.line.unwrap_or(0),
    );
    let (lines, max_length) = text_extent(&formatted);
    let (width, height) = Metrics::new(args.scale).raw_extent(&pinned, lines, max_length);

    let dx = difference(size.width, width, size)?;
    let dy = difference(size.height, height, size)?;
    let (left, right) = split(dx, forced.left, forced.right);
    let (top, bottom) = split(dy, forced.top, forced.bottom);
    let spacing = Spacing::new(left, top, right, bottom, pinned.line);

    log::debug!("Solved spacing for {size}: {spacing}");
    Ok(args.clone().with_spacing(spacing))
}

fn difference(target: u32, measured: i64, size: Size) -> Result<i32> {
    i32::try_from(i64::from(target) - measured).map_err(|_| {
        RenderError::InvalidDimensions {
            width: size.width,
            height: size.height,
        }
        .into()
    })
}

/// Distribute `diff` over the two sides of one axis
fn split(diff: i32, near: Option<i32>, far: Option<i32>) -> (i32, i32) {
    match (near, far) {
        (Some(near), _) => (near, diff),
        (None, Some(far)) => (diff, far),
        (None, None) => {
            let near = diff / 2;
            (near, diff - near)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculate_size;
    use crate::params::Scale;

    #[test]
    fn forced_left_and_top() {
        let args = DivergenceArgs::default().with_scale(Scale::Small);
        let forced = ForcedSpacing::new().left(5).top(2);
        let solved = calculate_spacing_for(Size::new(960, 540), "1.130426", &args, forced).unwrap();
        let spacing = solved.spacing;
        assert_eq!((spacing.left, spacing.top), (5, 2));
        assert_eq!(spacing.right, 960 - 5 - (6 + 33 * 8));
        assert_eq!(spacing.bottom, 540 - 2 - 107);
        assert_eq!(calculate_size("1.130426", &solved), Size::new(960, 540));
    }

    #[test]
    fn free_axis_splits_odd_pixel_to_trailing_side() {
        let args = DivergenceArgs::small();
        // 6 + 33 = 39 wide, 107 tall
        let solved =
            calculate_spacing_for(Size::new(44, 100), "1", &args, ForcedSpacing::new()).unwrap();
        assert_eq!(solved.spacing, Spacing::new(2, -3, 3, -4, 0));
    }

    #[test]
    fn forced_far_side_gives_near_side_the_rest() {
        let args = DivergenceArgs::small();
        let forced = ForcedSpacing::new().right(10).bottom(-5).line(4);
        let solved = calculate_spacing_for(Size::new(200, 300), "12\n34", &args, forced).unwrap();
        assert_eq!(solved.spacing.right, 10);
        assert_eq!(solved.spacing.bottom, -5);
        assert_eq!(solved.spacing.line, 4);
        assert_eq!(calculate_size("12\n34", &solved), Size::new(200, 300));
    }

    #[test]
    fn conflicting_sides_rejected() {
        let args = DivergenceArgs::default();
        let err = calculate_spacing_for(
            Size::new(10, 10),
            "1",
            &args,
            ForcedSpacing::new().left(1).right(1),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DivergenceError::ConflictingSpacing(Axis::Horizontal)
        ));
        let err = calculate_spacing_for(
            Size::new(10, 10),
            "1",
            &args,
            ForcedSpacing::new().top(1).bottom(1),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Top and Bottom spacing cannot both be specified");
    }

    #[test]
    fn forced_side_past_the_tubes_still_measures_back() {
        let args = DivergenceArgs::small();
        let forced = ForcedSpacing::new().left(-1000).top(2);
        let solved = calculate_spacing_for(Size::new(960, 540), "1", &args, forced).unwrap();
        assert_eq!(solved.spacing.left, -1000);
        assert_eq!(solved.spacing.right, 960 + 1000 - (6 + 33));
        assert_eq!(solved.spacing.bottom, 540 - 2 - 107);
        assert_eq!(calculate_size("1", &solved), Size::new(960, 540));
    }

    #[test]
    fn unreachable_target_is_an_error() {
        let args = DivergenceArgs::small();
        let forced = ForcedSpacing::new().left(i32::MIN);
        let err = calculate_spacing_for(Size::new(u32::MAX, 10), "1", &args, forced).unwrap_err();
        assert!(matches!(
            err,
            DivergenceError::Render(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn input_args_untouched() {
        let args = DivergenceArgs::small().with_spacing(Spacing::uniform(7, 1));
        let _ = calculate_spacing_for(Size::new(500, 500), "1", &args, ForcedSpacing::new()).unwrap();
        assert_eq!(args.spacing, Spacing::uniform(7, 1));
    }
}
