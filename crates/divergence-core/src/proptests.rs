use super::*;
use proptest::prelude::*;

fn alignment() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Near),
        Just(Alignment::Center),
        Just(Alignment::Far)
    ]
}

fn scale() -> impl Strategy<Value = Scale> {
    prop_oneof![Just(Scale::Large), Just(Scale::Medium), Just(Scale::Small)]
}

/// At most one pinned side per axis
fn axis() -> impl Strategy<Value = (Option<i32>, Option<i32>)> {
    prop_oneof![
        Just((None, None)),
        (-2000..200i32).prop_map(|v| (Some(v), None)),
        (-2000..200i32).prop_map(|v| (None, Some(v))),
    ]
}

// Property: digits, dots, spaces and newlines are always authentic
proptest! {
    #[test]
    fn prop_authentic_text_decides_strict(text in "[0-9. \n]{0,32}") {
        prop_assert!(is_authentic(&text));
        prop_assert_eq!(
            Authenticity::Decide.resolve(&text).unwrap(),
            Authenticity::Strict
        );
    }
}

// Property: padding already padded text changes nothing
proptest! {
    #[test]
    fn prop_padding_idempotent(text in "[ -~\n]{0,48}", alignment in alignment()) {
        let once = format::pad_lines(&text, alignment);
        let twice = format::pad_lines(&once, alignment);
        prop_assert_eq!(once, twice);
    }
}

// Property: width grows with the longest line and ignores line spacing
proptest! {
    #[test]
    fn prop_width_monotonic(
        length in 0usize..40,
        line in -100i32..100,
        scale in scale(),
    ) {
        let args = DivergenceArgs::default().with_scale(scale);
        let short = calculate_size(&"8".repeat(length), &args);
        let long = calculate_size(&"8".repeat(length + 1), &args);
        prop_assert!(long.width > short.width);

        let text = format!("{}\n8", "8".repeat(length));
        let spaced = args.clone().with_spacing(Spacing::new(0, 0, 0, 0, line));
        prop_assert_eq!(
            calculate_size(&text, &args).width,
            calculate_size(&text, &spaced).width
        );
    }
}

// Property: solving for a size and measuring with the result gives it back
proptest! {
    #[test]
    fn prop_spacing_round_trip(
        width in 1u32..4000,
        height in 1u32..4000,
        text in "[0-9.:]{1,12}(\n[0-9.:]{0,12}){0,2}",
        (left, right) in axis(),
        (top, bottom) in axis(),
        line in proptest::option::of(0..50i32),
        scale in scale(),
    ) {
        let args = DivergenceArgs::default().with_scale(scale);
        let forced = ForcedSpacing { left, top, right, bottom, line };
        let target = Size::new(width, height);
        let solved = calculate_spacing_for(target, &text, &args, forced).unwrap();
        prop_assert_eq!(calculate_size(&text, &solved), target);
        if let Some(left) = left {
            prop_assert_eq!(solved.spacing.left, left);
        }
        if let Some(bottom) = bottom {
            prop_assert_eq!(solved.spacing.bottom, bottom);
        }
    }
}
