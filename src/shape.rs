use serde::Serialize;

use crate::ir::ShapeKind;

pub const VIEWPORT_HEIGHT: f32 = 80.0;
pub const BOUNDING_WIDTH: f32 = 62.0;

pub const STAR_POINTS: &str = "30,8 38,31 62,34 45,47 52,70 30,57 8,70 16,47 -2,34 22,31 30,8";
pub const TRIANGLE_POINTS: &str = "2,62 32,12 62,62";
pub const INVERTED_TRIANGLE_POINTS: &str = "2,12 32,62 62,12";

pub const CIRCLE_CX: f32 = 30.0;
pub const CIRCLE_CY: f32 = 37.0;
pub const CIRCLE_R: f32 = 30.0;

const STAR_MARGIN_RIGHT: f32 = 8.0;
const DEFAULT_MARGIN_RIGHT: f32 = 5.0;
const LABEL_PADDING: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outline {
    Polygon { points: &'static str },
    Circle { cx: f32, cy: f32, r: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeGeometry {
    pub kind: ShapeKind,
    pub outline: Outline,
    pub bounding_width: f32,
    pub right_margin: f32,
    /// Space between the indicator row and a side label.
    pub label_gap: f32,
    /// Baseline of a `left`/`right` label.
    pub side_label_baseline: f32,
    pub clip_id: &'static str,
}

impl ShapeGeometry {
    pub const fn for_kind(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Star => STAR,
            ShapeKind::Triangle => TRIANGLE,
            ShapeKind::InvertedTriangle => INVERTED_TRIANGLE,
            ShapeKind::Circle => CIRCLE,
        }
    }

    pub fn pitch(&self) -> f32 {
        self.bounding_width + self.right_margin
    }
}

pub const STAR: ShapeGeometry = ShapeGeometry {
    kind: ShapeKind::Star,
    outline: Outline::Polygon {
        points: STAR_POINTS,
    },
    bounding_width: BOUNDING_WIDTH,
    right_margin: STAR_MARGIN_RIGHT,
    label_gap: LABEL_PADDING,
    side_label_baseline: 53.0,
    clip_id: "starClipPath",
};

pub const TRIANGLE: ShapeGeometry = ShapeGeometry {
    kind: ShapeKind::Triangle,
    outline: Outline::Polygon {
        points: TRIANGLE_POINTS,
    },
    bounding_width: BOUNDING_WIDTH,
    right_margin: DEFAULT_MARGIN_RIGHT,
    label_gap: LABEL_PADDING / 2.0,
    side_label_baseline: 46.0,
    clip_id: "triangleClipPath",
};

pub const INVERTED_TRIANGLE: ShapeGeometry = ShapeGeometry {
    kind: ShapeKind::InvertedTriangle,
    outline: Outline::Polygon {
        points: INVERTED_TRIANGLE_POINTS,
    },
    bounding_width: BOUNDING_WIDTH,
    right_margin: DEFAULT_MARGIN_RIGHT,
    label_gap: LABEL_PADDING / 2.0,
    side_label_baseline: 46.0,
    clip_id: "invertedTriangleClipPath",
};

pub const CIRCLE: ShapeGeometry = ShapeGeometry {
    kind: ShapeKind::Circle,
    outline: Outline::Circle {
        cx: CIRCLE_CX,
        cy: CIRCLE_CY,
        r: CIRCLE_R,
    },
    bounding_width: BOUNDING_WIDTH,
    right_margin: DEFAULT_MARGIN_RIGHT,
    label_gap: LABEL_PADDING / 2.0,
    side_label_baseline: 46.0,
    clip_id: "circleClipPath",
};

pub const ALL_SHAPES: [ShapeGeometry; 4] = [STAR, TRIANGLE, INVERTED_TRIANGLE, CIRCLE];
