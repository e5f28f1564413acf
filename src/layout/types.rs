use serde::Serialize;
use std::fmt;

use crate::ir::LabelPosition;
use crate::shape::ShapeGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelMetrics {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            fmt_coord(self.min_x),
            fmt_coord(self.min_y),
            fmt_coord(self.width),
            fmt_coord(self.height)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOffsets {
    pub translate_x: Vec<f32>,
    pub total_width: f32,
    pub view_box: ViewBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelLayout {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub font_family: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingLayout {
    pub shape: ShapeGeometry,
    pub direction: LabelPosition,
    pub offsets: LayoutOffsets,
    pub indicator_shift: (f32, f32),
    pub label_shift_y: f32,
    pub label: Option<LabelLayout>,
    pub width: f32,
    pub height: f32,
}

/// Compact coordinate text: integers print without a fraction, everything
/// else keeps two decimals.
pub fn fmt_coord(value: f32) -> String {
    if (value - value.round()).abs() < 0.005 {
        let rounded = value.round();
        if rounded == 0.0 {
            "0".to_string()
        } else {
            format!("{rounded:.0}")
        }
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_print_compactly() {
        assert_eq!(fmt_coord(62.0), "62");
        assert_eq!(fmt_coord(-30.0), "-30");
        assert_eq!(fmt_coord(-0.0), "0");
        assert_eq!(fmt_coord(18.6), "18.60");
    }

    #[test]
    fn view_box_formats_as_svg_attribute() {
        let view_box = ViewBox {
            min_x: 0.0,
            min_y: -30.0,
            width: 350.0,
            height: 106.6,
        };
        assert_eq!(view_box.to_string(), "0 -30 350 106.60");
    }
}
