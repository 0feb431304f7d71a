//! Edge case tests for tessera-layout
//!
//! Exercises the public API end to end through the dispatcher.

use tessera_layout::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixed(width: f32, height: f32) -> Style {
    Style { width: SizeValue::px(width), height: SizeValue::px(height), ..Default::default() }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

// ============================================================================
// BLOCK
// ============================================================================

#[test]
fn test_adjacent_margins_collapse_to_larger() {
    init_tracing();
    let ctx = LayoutContext::default();
    let first_margin = Spacing { bottom: Length::px(20.0), ..Default::default() };
    let second_margin = Spacing { top: Length::px(30.0), ..Default::default() };
    let first = Node::new(Style { margin: first_margin, ..fixed(100.0, 50.0) });
    let second = Node::new(Style { margin: second_margin, ..fixed(100.0, 50.0) });
    let mut root = Node::with_children(Style::default(), vec![first, second]);

    let size = layout(&mut root, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(root.children[1].rect.y, 80.0);
    assert_eq!(size.height, 130.0);
}

#[test]
fn test_trailing_margin_counts_toward_height() {
    let ctx = LayoutContext::default();
    let child = Node::new(Style { margin: Spacing::vertical(10.0), ..fixed(10.0, 10.0) });
    let mut root = Node::with_children(Style::default(), vec![child]);

    let size = layout(&mut root, Constraints::unbounded(), &ctx);

    assert_eq!(root.children[0].rect.y, 10.0);
    assert_eq!(size.height, 30.0);
}

#[test]
fn test_aspect_ratio_height() {
    let ctx = LayoutContext::default();
    let mut node =
        Node::new(Style { width: SizeValue::px(800.0), aspect_ratio: Some(16.0 / 9.0), ..Default::default() });
    let size = layout(&mut node, Constraints::unbounded(), &ctx);
    assert!(approx(size.height, 450.0));
}

#[test]
fn test_aspect_ratio_min_height_wins() {
    let ctx = LayoutContext::default();

    let mut explicit_width = Node::new(Style {
        width: SizeValue::px(800.0),
        aspect_ratio: Some(16.0 / 9.0),
        min_height: Some(Length::px(600.0)),
        ..Default::default()
    });
    let size = layout(&mut explicit_width, Constraints::unbounded(), &ctx);
    assert_eq!(size, Size::new(800.0, 600.0));

    // With both axes auto the width follows the clamped height
    let mut both_auto = Node::new(Style {
        aspect_ratio: Some(2.0),
        min_height: Some(Length::px(300.0)),
        ..Default::default()
    });
    let size = layout(&mut both_auto, Constraints::loose(400.0, 1000.0), &ctx);
    assert_eq!(size.height, 300.0);
    // 600 wide, clamped back into the 400px constraint
    assert_eq!(size.width, 400.0);
}

#[test]
fn test_negative_width_is_auto() {
    let ctx = LayoutContext::default();
    let mut node = Node::new(Style { width: SizeValue::px(-50.0), ..Default::default() });
    let size = layout(&mut node, Constraints::loose(120.0, 100.0), &ctx);
    assert_eq!(size.width, 120.0);
}

#[test]
fn test_intrinsic_width_keywords() {
    let ctx = LayoutContext::default().with_text_metrics(|text: &str, _: &TextStyle| TextMeasurement {
        width: text.chars().count() as f32 * 10.0,
        ascent: 8.0,
        descent: 2.0,
    });
    let text = || Node::text(Style::default(), "one three");

    let mut min = Node::with_children(Style { width: SizeValue::MinContent, ..Default::default() }, vec![text()]);
    assert_eq!(layout(&mut min, Constraints::loose(500.0, 500.0), &ctx).width, 50.0);

    let mut max = Node::with_children(Style { width: SizeValue::MaxContent, ..Default::default() }, vec![text()]);
    assert_eq!(layout(&mut max, Constraints::loose(500.0, 500.0), &ctx).width, 90.0);

    let mut fit = Node::with_children(
        Style { width: SizeValue::FitContent(Length::px(70.0)), ..Default::default() },
        vec![text()],
    );
    assert_eq!(layout(&mut fit, Constraints::loose(500.0, 500.0), &ctx).width, 70.0);
}

#[test]
fn test_malformed_constraints_clamp_to_max() {
    let ctx = LayoutContext::default();
    let mut node = Node::new(fixed(50.0, 50.0));
    let constraints = Constraints::new(300.0, 100.0, 0.0, 100.0);
    let size = layout(&mut node, constraints, &ctx);
    assert_eq!(size.width, 100.0);
}

#[test]
fn test_rem_and_em_resolution() {
    let ctx = LayoutContext::default().with_root_font_size(10.0);
    let mut node = Node::new(Style {
        font_size: Some(Length::px(20.0)),
        width: SizeValue::Fixed(Length::em(2.0)),
        height: SizeValue::Fixed(Length::rem(3.0)),
        ..Default::default()
    });
    let size = layout(&mut node, Constraints::unbounded(), &ctx);
    assert_eq!(size, Size::new(40.0, 30.0));
}

// ============================================================================
// FLEXBOX
// ============================================================================

#[test]
fn test_grow_splits_free_space_by_ratio() {
    init_tracing();
    let ctx = LayoutContext::default();
    let grow = |g: f32| Node::new(Style { flex_grow: g, ..fixed(0.0, 10.0) });
    let mut row = Node::with_children(
        Style { display: Display::Flex, width: SizeValue::px(300.0), ..Default::default() },
        vec![grow(1.0), grow(2.0)],
    );

    layout(&mut row, Constraints::unbounded(), &ctx);

    assert!(approx(row.children[0].rect.width, 100.0));
    assert!(approx(row.children[1].rect.width, 200.0));
}

#[test]
fn test_flex_writing_mode_swaps_axes() {
    let ctx = LayoutContext::default();
    let mut row = Node::with_children(
        Style { display: Display::Flex, writing_mode: WritingMode::VerticalLr, ..Default::default() },
        vec![Node::new(fixed(20.0, 20.0)), Node::new(fixed(20.0, 20.0))],
    );

    layout(&mut row, Constraints::unbounded(), &ctx);

    assert_eq!(row.children[0].rect.y, 0.0);
    assert_eq!(row.children[1].rect.y, 20.0);
    assert_eq!(row.children[1].rect.x, 0.0);
}

#[test]
fn test_flex_text_items_wrap_after_shrinking() {
    let ctx = LayoutContext::default().with_text_metrics(|text: &str, _: &TextStyle| TextMeasurement {
        width: text.chars().count() as f32 * 10.0,
        ascent: 8.0,
        descent: 2.0,
    });
    let text = |content: &str| Node::text(Style { font_size: Some(Length::px(10.0)), ..Default::default() }, content);
    let mut row = Node::with_children(
        Style {
            display: Display::Flex,
            width: SizeValue::px(100.0),
            align_items: AlignItems::FlexStart,
            ..Default::default()
        },
        vec![text("aaaa bbbb"), text("cccc dddd")],
    );

    layout(&mut row, Constraints::unbounded(), &ctx);

    // Both items measure 90 wide and shrink evenly to fit 100
    assert!(approx(row.children[0].rect.width, 50.0));
    assert!(approx(row.children[0].rect.height, 24.0));
}

// ============================================================================
// GRID
// ============================================================================

#[test]
fn test_grid_gap_between_columns() {
    init_tracing();
    let ctx = LayoutContext::default();
    let mut grid = Node::with_children(
        Style {
            display: Display::Grid,
            grid_template_columns: vec![GridTrack::px(100.0), GridTrack::px(100.0)],
            gap: Length::px(10.0),
            ..Default::default()
        },
        vec![Node::new(Style::default()), Node::new(Style::default())],
    );

    let size = layout(&mut grid, Constraints::loose(800.0, 600.0), &ctx);

    assert_eq!(size.width, 210.0);
    assert_eq!(grid.children[1].rect.x, 110.0);
}

#[test]
fn test_grid_auto_placement_row_major() {
    let ctx = LayoutContext::default();
    let columns = 4;
    let children = (0..10).map(|_| Node::new(fixed(25.0, 5.0))).collect();
    let mut grid = Node::with_children(
        Style {
            display: Display::Grid,
            grid_template_columns: vec![GridTrack::px(25.0); columns],
            ..Default::default()
        },
        children,
    );

    layout(&mut grid, Constraints::unbounded(), &ctx);

    for (i, child) in grid.children.iter().enumerate() {
        assert_eq!(child.rect.x, (i % columns) as f32 * 25.0, "item {i}");
        assert_eq!(child.rect.y, (i / columns) as f32 * 5.0, "item {i}");
    }
}

#[test]
fn test_grid_area_registration_errors() {
    let mut areas = GridTemplateAreas::new(2, 2);
    assert!(areas.add_area("header", 0, 1, 0, 2).is_ok());

    let overlap = areas.add_area("sidebar", 0, 2, 0, 1).unwrap_err();
    assert!(matches!(overlap, GridAreaError::Overlap { ref existing, .. } if existing == "header"));

    let outside = areas.add_area("footer", 2, 3, 0, 2).unwrap_err();
    assert!(matches!(outside, GridAreaError::OutOfBounds { .. }));

    let wrapped: LayoutError = outside.into();
    assert!(wrapped.to_string().contains("footer"));
}

#[test]
fn test_grid_named_areas_place_items() {
    let ctx = LayoutContext::default();
    let areas = GridTemplateAreas::parse(&["header header", "sidebar main"]).unwrap();
    let item = |name: &str| Node::new(Style { grid_area: Some(name.to_string()), ..Default::default() });
    let mut grid = Node::with_children(
        Style {
            display: Display::Grid,
            grid_template_columns: vec![GridTrack::px(50.0), GridTrack::px(150.0)],
            grid_template_rows: vec![GridTrack::px(20.0), GridTrack::px(100.0)],
            grid_template_areas: Some(areas),
            ..Default::default()
        },
        vec![item("main"), item("header"), item("sidebar")],
    );

    layout(&mut grid, Constraints::unbounded(), &ctx);

    assert_eq!(grid.children[0].rect, Rect::new(50.0, 20.0, 150.0, 100.0));
    assert_eq!(grid.children[1].rect, Rect::new(0.0, 0.0, 200.0, 20.0));
    assert_eq!(grid.children[2].rect, Rect::new(0.0, 20.0, 50.0, 100.0));
}

#[test]
fn test_grid_padding_offsets_items() {
    let ctx = LayoutContext::default();
    let mut grid = Node::with_children(
        Style {
            display: Display::Grid,
            padding: Spacing::uniform(8.0),
            border: Spacing::uniform(2.0),
            grid_template_columns: vec![GridTrack::px(30.0)],
            ..Default::default()
        },
        vec![Node::new(fixed(30.0, 30.0))],
    );

    let size = layout(&mut grid, Constraints::unbounded(), &ctx);

    assert_eq!(size, Size::new(50.0, 50.0));
    assert_eq!((grid.children[0].rect.x, grid.children[0].rect.y), (10.0, 10.0));
}

// ============================================================================
// UNITS
// ============================================================================

#[test]
fn test_unknown_unit_parses_as_pixels() {
    assert_eq!(Length::parse("12furlongs"), Some(Length::px(12.0)));
    assert_eq!(Length::parse("1.5em"), Some(Length::em(1.5)));
    assert!(Length::parse("unbounded").is_some_and(|l| l.is_unbounded()));
}

#[test]
fn test_viewport_units_follow_context() {
    let ctx = LayoutContext::new(1000.0, 500.0, 16.0);
    assert_eq!(Length::vmin(10.0).resolve(&ctx, 16.0), 50.0);
    assert_eq!(Length::vmax(10.0).resolve(&ctx, 16.0), 100.0);
}
