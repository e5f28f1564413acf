use serde::Serialize;
use std::fmt;

use crate::color::{GradientSegment, interpolate};
use crate::config::StyleSettings;
use crate::ir::RatingConfig;
use crate::layout::RatingLayout;
use crate::shape::{Outline, ShapeGeometry, VIEWPORT_HEIGHT};
use crate::value::{FillKind, IndicatorFill};

pub const ANIMATION_STAGGER_MS: u32 = 150;
pub const ANIMATION_DURATION_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Paint {
    None,
    Solid(String),
    Gradient(u32),
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::None => f.write_str("none"),
            Paint::Solid(color) => f.write_str(color),
            Paint::Gradient(index) => write!(f, "url(#{})", gradient_id(*index)),
        }
    }
}

pub fn gradient_id(index: u32) -> String {
    format!("gradient{index}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
}

/// Color animation from `from` to the element's own color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub from: String,
    pub delay_ms: u32,
    pub duration_ms: u32,
}

impl Animation {
    pub fn staggered(from: &str, index: u32) -> Self {
        Self {
            from: from.to_string(),
            delay_ms: index * ANIMATION_STAGGER_MS,
            duration_ms: ANIMATION_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    Shape {
        outline: Outline,
        fill: Paint,
        stroke: Option<Stroke>,
        translate_x: f32,
        animation: Option<Animation>,
    },
    Rect {
        x: f32,
        width: f32,
        height: f32,
        fill: Paint,
    },
    ClipGroup {
        clip_id: &'static str,
        translate_x: f32,
        children: Vec<Primitive>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientDef {
    pub index: u32,
    pub segment: GradientSegment,
    pub animation: Option<Animation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPalette {
    pub fill_color: String,
    pub empty_fill_color: String,
    pub gradients: Vec<Option<GradientSegment>>,
    pub animate: bool,
}

impl IndicatorPalette {
    /// `indicator_count` is the drawn count, so the ramp always ends at
    /// `gradient_end` on the last indicator.
    pub fn from_style(style: &StyleSettings, indicator_count: u32) -> Self {
        let gradients = if style.show_gradient {
            interpolate(&style.gradient_start, &style.gradient_end, indicator_count)
        } else {
            Vec::new()
        };
        Self {
            fill_color: style.fill_color.clone(),
            empty_fill_color: style.empty_fill_color.clone(),
            gradients,
            animate: style.show_animation,
        }
    }

    fn has_gradient(&self, index: u32) -> bool {
        matches!(self.gradients.get(index as usize), Some(Some(_)))
    }

    fn filled_paint(&self, index: u32) -> Paint {
        if self.has_gradient(index) {
            Paint::Gradient(index)
        } else {
            Paint::Solid(self.fill_color.clone())
        }
    }

    fn filled_animation(&self, index: u32, paint: &Paint) -> Option<Animation> {
        match paint {
            Paint::Solid(_) if self.animate => {
                Some(Animation::staggered(&self.empty_fill_color, index))
            }
            _ => None,
        }
    }
}

pub fn render_indicator(
    fill: &IndicatorFill,
    translate_x: f32,
    shape: &ShapeGeometry,
    palette: &IndicatorPalette,
    stroke: Option<&Stroke>,
) -> Vec<Primitive> {
    let index = fill.index;
    match fill.kind {
        FillKind::Empty => vec![Primitive::Shape {
            outline: shape.outline,
            fill: Paint::Solid(palette.empty_fill_color.clone()),
            stroke: stroke.cloned(),
            translate_x,
            animation: None,
        }],
        FillKind::Full => {
            let paint = palette.filled_paint(index);
            let animation = palette.filled_animation(index, &paint);
            vec![Primitive::Shape {
                outline: shape.outline,
                fill: paint,
                stroke: stroke.cloned(),
                translate_x,
                animation,
            }]
        }
        FillKind::Partial => {
            let paint = palette.filled_paint(index);
            let animation = palette.filled_animation(index, &paint);
            let empty_width = shape.bounding_width * (1.0 - fill.ratio as f32);
            let mut primitives = vec![Primitive::ClipGroup {
                clip_id: shape.clip_id,
                translate_x,
                children: vec![
                    Primitive::Shape {
                        outline: shape.outline,
                        fill: paint,
                        stroke: None,
                        translate_x: 0.0,
                        animation,
                    },
                    Primitive::Rect {
                        x: shape.bounding_width - empty_width,
                        width: empty_width,
                        height: VIEWPORT_HEIGHT,
                        fill: Paint::Solid(palette.empty_fill_color.clone()),
                    },
                ],
            }];
            if let Some(stroke) = stroke {
                primitives.push(Primitive::Shape {
                    outline: shape.outline,
                    fill: Paint::None,
                    stroke: Some(stroke.clone()),
                    translate_x,
                    animation: None,
                });
            }
            primitives
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorScene {
    pub gradients: Vec<GradientDef>,
    pub primitives: Vec<Primitive>,
}

pub fn build_scene(config: &RatingConfig, layout: &RatingLayout) -> IndicatorScene {
    let style = &config.style;
    let rating = config.normalized();
    let palette = IndicatorPalette::from_style(style, rating.indicator_count);
    let stroke = style.show_stroke.then(|| Stroke {
        color: style.stroke_color.clone(),
        width: style.stroke_width,
    });

    let gradients = palette
        .gradients
        .iter()
        .enumerate()
        .filter_map(|(index, segment)| {
            let index = index as u32;
            segment.map(|segment| GradientDef {
                index,
                segment,
                animation: palette
                    .animate
                    .then(|| Animation::staggered(&palette.empty_fill_color, index)),
            })
        })
        .collect();

    let primitives = rating
        .fills()
        .iter()
        .zip(&layout.offsets.translate_x)
        .flat_map(|(fill, translate_x)| {
            render_indicator(fill, *translate_x, &layout.shape, &palette, stroke.as_ref())
        })
        .collect();

    IndicatorScene {
        gradients,
        primitives,
    }
}
