use capforge::config::EditorConfig;
use capforge::geometry::{KeyShape, KeyboardLayout};
use capforge::layer::{HorizontalAlign, VerticalAlign};
use capforge::layouts::{generate_layout, generate_layout_with, layout_options, LayoutType};
use rstest::rstest;
use std::collections::HashSet;
use strum::IntoEnumIterator;

#[rstest]
#[case(LayoutType::Sixty, 61)]
#[case(LayoutType::Iso60, 62)]
#[case(LayoutType::Tkl, 87)]
#[case(LayoutType::Full, 104)]
fn test_key_counts(#[case] ty: LayoutType, #[case] expected: usize) {
    let layout = generate_layout(ty);
    assert_eq!(layout.total_keys, expected, "{} key count", ty);
    assert_eq!(layout.keys.len(), expected, "{} totalKeys consistency", ty);
}

#[test]
fn test_key_ids_unique_per_layout() {
    for ty in LayoutType::iter() {
        let layout = generate_layout(ty);
        let ids: HashSet<_> = layout.keys.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids.len(), layout.keys.len(), "{} has duplicate key ids", ty);
    }
}

#[test]
fn test_bounding_box_matches_declared_dimensions() {
    for ty in LayoutType::iter() {
        let layout = generate_layout(ty);
        let (width, height) = KeyboardLayout::bounding_box(&layout.keys);
        assert!(
            (layout.width - width).abs() < 1e-4,
            "{} width {} != bounding box {}",
            ty,
            layout.width,
            width
        );
        assert!(
            (layout.height - height).abs() < 1e-4,
            "{} height {} != bounding box {}",
            ty,
            layout.height,
            height
        );
    }
}

#[test]
fn test_sixty_dimensions() {
    let layout = generate_layout(LayoutType::Sixty);
    assert_eq!(layout.width, 15.0);
    assert_eq!(layout.height, 5.0);
}

#[test]
fn test_composite_dimensions() {
    let tkl = generate_layout(LayoutType::Tkl);
    assert_eq!((tkl.width, tkl.height), (18.5, 6.5));

    let full = generate_layout(LayoutType::Full);
    assert_eq!((full.width, full.height), (23.5, 6.5));
}

/// The alpha block of the composite layouts is the 60% layout embedded
/// verbatim, shifted down past the function-row gap. Matching legends at
/// the same logical row/col must have identical rectangles once the shift
/// is removed.
#[rstest]
#[case(LayoutType::Tkl)]
#[case(LayoutType::Full)]
fn test_alpha_block_composability(#[case] ty: LayoutType) {
    let sixty = generate_layout(LayoutType::Sixty);
    let composite = generate_layout(ty);

    for alpha in &sixty.keys {
        let legend = alpha.layers[0].content_str();
        let twin = composite.keys.iter().find(|key| {
            key.row == alpha.row
                && key.col == alpha.col
                && key.layers.first().map(|l| l.content_str()) == Some(legend)
                && (key.y - (alpha.y + 1.5)).abs() < 1e-4
        });
        let twin = twin.unwrap_or_else(|| {
            panic!("{}: alpha key '{}' missing from composite", ty, legend)
        });
        assert!(
            (twin.x - alpha.x).abs() < 1e-4,
            "{}: '{}' drifted on x",
            ty,
            legend
        );
        assert_eq!(
            (twin.width, twin.height),
            (alpha.width, alpha.height),
            "{}: '{}' changed size",
            ty,
            legend
        );
    }
}

#[test]
fn test_generated_keys_seed_one_centered_text_layer() {
    let cfg = EditorConfig::default();
    let layout = generate_layout_with(LayoutType::Sixty, &cfg);

    for key in &layout.keys {
        assert_eq!(key.layers.len(), 1, "key {} must seed one layer", key.id);
        let layer = &key.layers[0];
        assert_eq!(layer.alignment, HorizontalAlign::Center);
        assert_eq!(layer.vertical_alignment, VerticalAlign::Center);
        assert_eq!(
            layer.offset_y, cfg.legend_nudge_y,
            "generated legends sit slightly above center"
        );
        assert!(layer.offset_y < 0.0);
        assert_eq!(key.color, cfg.default_keycap_color);
        assert_eq!(key.text_color, cfg.default_legend_color);
    }

    let space = layout
        .keys
        .iter()
        .find(|k| k.layers[0].content_str() == "Space")
        .expect("60% has a spacebar");
    assert_eq!(space.width, 6.25);
}

#[test]
fn test_iso_enter_is_the_only_shaped_key() {
    let iso = generate_layout(LayoutType::Iso60);
    let shaped: Vec<_> = iso
        .keys
        .iter()
        .filter(|k| k.shape == KeyShape::IsoEnter)
        .collect();
    assert_eq!(shaped.len(), 1);
    let enter = shaped[0];
    assert_eq!(enter.layers[0].content_str(), "Enter");
    assert_eq!((enter.x, enter.y, enter.width, enter.height), (13.5, 1.0, 1.5, 2.0));

    for ty in [LayoutType::Sixty, LayoutType::Tkl, LayoutType::Full] {
        let layout = generate_layout(ty);
        assert!(
            layout.keys.iter().all(|k| k.shape == KeyShape::Rect),
            "{} should have no shaped keys",
            ty
        );
    }
}

#[test]
fn test_numpad_tall_and_wide_keys() {
    let full = generate_layout(LayoutType::Full);

    let plus = full
        .keys
        .iter()
        .find(|k| k.layers[0].content_str() == "+" && k.y == 2.5)
        .expect("numpad +");
    assert_eq!(plus.height, 2.0);

    let zero = full
        .keys
        .iter()
        .find(|k| k.layers[0].content_str() == "0" && k.y == 5.5)
        .expect("numpad 0");
    assert_eq!(zero.width, 2.0);
}

#[test]
fn test_function_row_gap_offsets() {
    let tkl = generate_layout(LayoutType::Tkl);
    let x_of = |legend: &str| {
        tkl.keys
            .iter()
            .find(|k| k.y == 0.0 && k.layers[0].content_str() == legend)
            .map(|k| k.x)
            .unwrap_or_else(|| panic!("function row key {}", legend))
    };

    assert_eq!(x_of("Esc"), 0.0);
    assert_eq!(x_of("F3"), 3.0);
    assert_eq!(x_of("F4"), 4.5);
    assert_eq!(x_of("F8"), 9.0);
    assert_eq!(x_of("F12"), 13.5);
    assert_eq!(x_of("PrtSc"), 14.5);
}

#[test]
fn test_layout_options_catalog() {
    let options = layout_options();
    assert_eq!(options.len(), 4);
    let sixty = options
        .iter()
        .find(|o| o.id == LayoutType::Sixty)
        .expect("catalog has 60%");
    assert_eq!(sixty.key_count, 61);
    assert!(!sixty.description.is_empty());
}

#[test]
fn test_parse_round_trips_display() {
    for ty in LayoutType::iter() {
        let parsed = LayoutType::parse(&ty.to_string()).expect("display form parses back");
        assert_eq!(parsed, ty);
    }
    assert!(LayoutType::parse("40%").is_err());
}
