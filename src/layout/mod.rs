mod text;
pub(crate) mod types;
pub use types::*;
use text::*;

use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::{LabelPosition, RatingConfig};
use crate::shape::{ShapeGeometry, VIEWPORT_HEIGHT};

const TOP_LABEL_MIN_Y: f32 = -30.0;
/// Vertical position of a `down` label as a fraction of the view box height.
const DOWN_LABEL_FRACTION: f32 = 0.8;
const RIGHT_LABEL_GROUP_SHIFT: f32 = 6.0;
const LARGE_TOP_LABEL_SHIFT: f32 = 20.0;
const LARGE_TOP_LABEL_FONT_SIZE: f32 = 40.0;
/// Height removed from the output when the label is beside the row.
const SIDE_LABEL_HEIGHT_PADDING: f32 = 10.0;

pub fn compute_offsets(
    indicator_count: u32,
    shape: &ShapeGeometry,
    direction: LabelPosition,
    label: Option<LabelMetrics>,
) -> LayoutOffsets {
    let pitch = shape.pitch();
    let total_width = indicator_count as f32 * pitch;
    let leading = match (direction, label) {
        (LabelPosition::Left, Some(metrics)) => metrics.width + shape.label_gap,
        _ => 0.0,
    };
    let translate_x = (0..indicator_count)
        .map(|index| index as f32 * pitch + leading)
        .collect();

    let view_box = match label {
        None => ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: total_width,
            height: VIEWPORT_HEIGHT,
        },
        Some(metrics) => {
            let height = VIEWPORT_HEIGHT + metrics.height;
            match direction {
                LabelPosition::Top => ViewBox {
                    min_x: 0.0,
                    min_y: TOP_LABEL_MIN_Y,
                    width: total_width,
                    height,
                },
                LabelPosition::Down => ViewBox {
                    min_x: 0.0,
                    min_y: 0.0,
                    width: total_width,
                    height,
                },
                LabelPosition::Left | LabelPosition::Right => ViewBox {
                    min_x: 0.0,
                    min_y: 0.0,
                    width: total_width + metrics.width + shape.label_gap,
                    height,
                },
            }
        }
    };

    LayoutOffsets {
        translate_x,
        total_width,
        view_box,
    }
}

pub fn compute_layout(
    config: &RatingConfig,
    layout_config: &LayoutConfig,
    viewport: &RenderConfig,
) -> RatingLayout {
    let style = &config.style;
    let shape = ShapeGeometry::for_kind(style.shape_kind);
    let rating = config.normalized();
    let direction = style.direction;

    let label_text = rating.label_text();
    let metrics = style.show_label.then(|| {
        measure_label(
            &label_text,
            style.label_font_size,
            &style.label_font_family,
            layout_config,
        )
    });

    let offsets = compute_offsets(rating.indicator_count, &shape, direction, metrics);

    let label = metrics.map(|metrics| {
        let (x, y) = label_anchor(&shape, direction, &offsets, metrics);
        LabelLayout {
            text: label_text.clone(),
            x,
            y,
            width: metrics.width,
            height: metrics.height,
            font_size: style.label_font_size,
            font_family: style.label_font_family.clone(),
            color: style.label_color.clone(),
        }
    });

    let shift_x = if direction == LabelPosition::Right {
        RIGHT_LABEL_GROUP_SHIFT
    } else {
        0.0
    };
    let shift_y = if label.is_some()
        && direction == LabelPosition::Top
        && style.label_font_size >= LARGE_TOP_LABEL_FONT_SIZE
    {
        LARGE_TOP_LABEL_SHIFT
    } else {
        0.0
    };

    let height = if direction.is_vertical() {
        viewport.height
    } else {
        (viewport.height - SIDE_LABEL_HEIGHT_PADDING).max(0.0)
    };

    RatingLayout {
        shape,
        direction,
        offsets,
        indicator_shift: (shift_x, shift_y),
        label_shift_y: shift_y,
        label,
        width: viewport.width,
        height,
    }
}

/// Baseline start of the label text in view box coordinates.
fn label_anchor(
    shape: &ShapeGeometry,
    direction: LabelPosition,
    offsets: &LayoutOffsets,
    metrics: LabelMetrics,
) -> (f32, f32) {
    match direction {
        LabelPosition::Left => (0.0, shape.side_label_baseline),
        LabelPosition::Right => (offsets.total_width, shape.side_label_baseline),
        LabelPosition::Top => ((offsets.total_width - metrics.width) / 2.0, 0.0),
        LabelPosition::Down => (
            (offsets.total_width - metrics.width) / 2.0,
            offsets.view_box.height * DOWN_LABEL_FRACTION,
        ),
    }
}
