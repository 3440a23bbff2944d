#![allow(clippy::float_cmp)]

use super::*;

fn absolute(width: u32) -> LayoutPolicy {
    LayoutPolicy::Absolute { available_width: width }
}

fn expect_absolute(layout: &Layout) -> (u32, u32, u32, Padding) {
    match layout.sizing {
        Sizing::Absolute { cell_size, rendered_width, rendered_height, padding } => {
            (cell_size, rendered_width, rendered_height, padding)
        }
        Sizing::Percentage { .. } => panic!("expected absolute sizing, got {layout:?}"),
    }
}

// =============================================================
// cell_size
// =============================================================

#[test]
fn cell_size_floors() {
    assert_eq!(cell_size(640, 64), 10);
    assert_eq!(cell_size(645, 64), 10);
    assert_eq!(cell_size(639, 64), 9);
}

#[test]
fn cell_size_is_at_least_one() {
    assert_eq!(cell_size(0, 64), 1);
    assert_eq!(cell_size(10, 64), 1);
}

#[test]
fn cell_size_never_overflows_surface() {
    for columns in 1..=128 {
        for width in [0_u32, 1, 7, 63, 64, 100, 333, 640, 1024, 1921] {
            let size = cell_size(width, columns);
            assert!(size >= 1);
            if width >= columns {
                assert!(size * columns <= width, "{size} * {columns} > {width}");
            }
        }
    }
}

// =============================================================
// Padding
// =============================================================

#[test]
fn padding_even_slack_splits_evenly() {
    let pad = Padding::centering(100, 90);
    assert_eq!(pad, Padding { left: 5, right: 5, top: 5, bottom: 5 });
}

#[test]
fn padding_odd_slack_favors_right() {
    let pad = Padding::centering(101, 90);
    assert_eq!(pad.left, 5);
    assert_eq!(pad.right, 6);
    assert_eq!(pad.top, 5);
    assert_eq!(pad.bottom, 6);
}

#[test]
fn padding_zero_when_rendered_fills_or_overflows() {
    assert_eq!(Padding::centering(640, 640), Padding::default());
    assert_eq!(Padding::centering(10, 128), Padding::default());
}

#[test]
fn padding_plus_rendered_equals_available() {
    for columns in [2_u32, 3, 7, 64, 100, 128] {
        for width in [128_u32, 300, 641, 999, 1280] {
            let layout = compute_layout(Some(f64::from(columns)), Some(10.0), absolute(width));
            let (_, rendered_width, _, padding) = expect_absolute(&layout);
            if width >= rendered_width {
                assert_eq!(padding.left + padding.right + rendered_width, width);
            } else {
                assert_eq!((padding.left, padding.right), (0, 0));
            }
        }
    }
}

// =============================================================
// compute_layout: absolute
// =============================================================

#[test]
fn size_64_on_640_surface() {
    let layout = Layout::for_request(GridRequest::Size(64.0), absolute(640));
    assert_eq!(layout.grid.columns, 64);
    let (cell, width, height, padding) = expect_absolute(&layout);
    assert_eq!(cell, 10);
    assert_eq!(width, 640);
    assert_eq!(height, 10 * layout.grid.rows);
    assert_eq!(padding, Padding::default());
}

#[test]
fn narrow_surface_centers_grid() {
    let layout = compute_layout(Some(64.0), Some(42.0), absolute(650));
    let (cell, width, height, padding) = expect_absolute(&layout);
    assert_eq!(cell, 10);
    assert_eq!(width, 640);
    assert_eq!(height, 420);
    assert_eq!(padding, Padding { left: 5, right: 5, top: 5, bottom: 5 });
}

#[test]
fn tiny_surface_overflows_with_unit_cells() {
    let layout = compute_layout(Some(128.0), Some(128.0), absolute(50));
    let (cell, width, _, padding) = expect_absolute(&layout);
    assert_eq!(cell, 1);
    assert_eq!(width, 128);
    assert_eq!(padding, Padding::default());
}

#[test]
fn compute_layout_validates_request() {
    let layout = compute_layout(None, Some(1e6), absolute(640));
    assert_eq!(layout.grid, GridSize { columns: 128, rows: 128 });
}

#[test]
fn compute_layout_derives_missing_rows() {
    let layout = compute_layout(Some(100.0), None, absolute(1000));
    assert_eq!(layout.grid, GridSize { columns: 100, rows: 65 });
    let explicit = Layout::for_request(GridRequest::Explicit { columns: Some(100.0), rows: None }, absolute(1000));
    assert_eq!(layout, explicit);
}

#[test]
fn compute_layout_derives_missing_columns() {
    let layout = compute_layout(None, Some(26.0), absolute(1000));
    assert_eq!(layout.grid, GridSize { columns: 40, rows: 26 });
}

#[test]
fn huge_width_with_tall_grid_saturates() {
    let layout = compute_layout(Some(2.0), Some(128.0), absolute(100_000_000));
    let (cell, width, height, padding) = expect_absolute(&layout);
    assert_eq!(cell, 50_000_000);
    assert_eq!(width, 100_000_000);
    assert_eq!(height, u32::MAX);
    assert_eq!(padding, Padding::default());
}

// =============================================================
// surface_style
// =============================================================

#[test]
fn absolute_surface_style_pads_frame_only() {
    let layout = compute_layout(Some(64.0), Some(42.0), absolute(650));
    let style = layout.surface_style();
    assert_eq!(style.width, "640px");
    assert_eq!(style.height, "420px");
    assert_eq!(style.frame_padding, Padding { left: 5, right: 5, top: 5, bottom: 5 });
}

#[test]
fn percentage_surface_style_fills_width() {
    let layout = compute_layout(Some(64.0), Some(42.0), LayoutPolicy::Percentage);
    let style = layout.surface_style();
    assert_eq!(style.width, "100%");
    assert_eq!(style.height, "auto");
    assert_eq!(style.frame_padding, Padding::default());
}

#[test]
fn absolute_style_is_pixels() {
    let layout = compute_layout(Some(64.0), Some(42.0), absolute(640));
    let style = layout.style();
    assert_eq!(style.mode, SizingMode::Absolute);
    assert_eq!(style.value, 10.0);
    assert_eq!(style.css_rule(), ".pixel { width: 10px; padding-bottom: 10px; box-sizing: border-box; }");
}

#[test]
fn absolute_cell_size_ignores_measured_width() {
    let layout = compute_layout(Some(64.0), Some(42.0), absolute(640));
    assert_eq!(layout.cell_size_for(9999.0), 10);
}

// =============================================================
// compute_layout: percentage
// =============================================================

#[test]
fn percentage_policy_from_missing_width() {
    assert_eq!(LayoutPolicy::from_width(None), LayoutPolicy::Percentage);
    assert_eq!(LayoutPolicy::from_width(Some(300)), absolute(300));
}

#[test]
fn percentage_layout_sizes_cells_relative() {
    let layout = compute_layout(Some(64.0), Some(42.0), LayoutPolicy::Percentage);
    assert_eq!(layout.sizing, Sizing::Percentage { percent: 1.5625 });
    let style = layout.style();
    assert_eq!(style.mode, SizingMode::Percentage);
    assert_eq!(style.css_rule(), ".pixel { width: 1.5625%; padding-bottom: 1.5625%; box-sizing: border-box; }");
}

#[test]
fn percentage_cell_size_derives_from_measured_width() {
    let layout = compute_layout(Some(64.0), Some(42.0), LayoutPolicy::Percentage);
    assert_eq!(layout.cell_size_for(640.0), 10);
    assert_eq!(layout.cell_size_for(655.9), 10);
    assert_eq!(layout.cell_size_for(0.0), 1);
    assert_eq!(layout.cell_size_for(-20.0), 1);
    assert_eq!(layout.cell_size_for(f64::NAN), 1);
}

#[test]
fn policies_agree_on_cell_size() {
    let abs = compute_layout(Some(50.0), Some(32.0), absolute(777));
    let pct = compute_layout(Some(50.0), Some(32.0), LayoutPolicy::Percentage);
    assert_eq!(abs.cell_size_for(777.0), pct.cell_size_for(777.0));
}

#[test]
fn layout_serializes_with_mode_tag() {
    let layout = compute_layout(Some(2.0), Some(2.0), absolute(20));
    let json = serde_json::to_value(layout).unwrap();
    assert_eq!(json["sizing"]["mode"], "absolute");
    assert_eq!(json["sizing"]["cell_size"], 10);
    assert_eq!(json["grid"]["columns"], 2);
}
