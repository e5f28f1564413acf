use crate::data::{
    DataViewObjects, get_bool, get_fill, get_number, get_string, properties as props,
};
use crate::ir::{LabelPosition, ShapeKind};
use crate::value::clamp_indicator_count;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FILL: &str = "#FBB040";
pub const DEFAULT_EMPTY_FILL: &str = "#E6E7E8";
pub const DEFAULT_STROKE: &str = "#000000";
pub const DEFAULT_GRADIENT_START: &str = "#FF0000";
pub const DEFAULT_GRADIENT_END: &str = "#00FF00";
pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI";
pub const DEFAULT_FONT_COLOR: &str = "#000000";
pub const DEFAULT_FONT_SIZE: f32 = 20.0;
pub const DEFAULT_INDICATOR_COUNT: u32 = 5;
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
pub const MIN_STROKE_WIDTH: f32 = 1.0;
pub const MAX_STROKE_WIDTH: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSettings {
    pub shape_kind: ShapeKind,
    pub indicator_count: u32,
    pub show_gradient: bool,
    pub fill_color: String,
    pub empty_fill_color: String,
    pub gradient_start: String,
    pub gradient_end: String,
    pub show_stroke: bool,
    pub stroke_color: String,
    pub stroke_width: f32,
    pub show_animation: bool,
    pub show_label: bool,
    pub direction: LabelPosition,
    pub label_font_size: f32,
    pub label_font_family: String,
    pub label_color: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            shape_kind: ShapeKind::Star,
            indicator_count: DEFAULT_INDICATOR_COUNT,
            show_gradient: false,
            fill_color: DEFAULT_FILL.to_string(),
            empty_fill_color: DEFAULT_EMPTY_FILL.to_string(),
            gradient_start: DEFAULT_GRADIENT_START.to_string(),
            gradient_end: DEFAULT_GRADIENT_END.to_string(),
            show_stroke: false,
            stroke_color: DEFAULT_STROKE.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            show_animation: true,
            show_label: true,
            direction: LabelPosition::Down,
            label_font_size: DEFAULT_FONT_SIZE,
            label_font_family: DEFAULT_FONT_FAMILY.to_string(),
            label_color: DEFAULT_FONT_COLOR.to_string(),
        }
    }
}

impl StyleSettings {
    pub fn from_objects(objects: &DataViewObjects) -> Self {
        let defaults = Self::default();
        let symbol = get_string(objects, props::VISUAL_SYMBOL, defaults.shape_kind.as_token());
        let direction = get_string(objects, props::DIRECTION, defaults.direction.as_token());
        let count = get_number(
            objects,
            props::NUM_STARS,
            defaults.indicator_count as f64,
        );
        let stroke_width = get_number(objects, props::STROKE_WIDTH, DEFAULT_STROKE_WIDTH as f64);
        let font_size = get_number(objects, props::FONT_SIZE, DEFAULT_FONT_SIZE as f64);

        Self {
            shape_kind: ShapeKind::from_token_or_default(&symbol),
            indicator_count: clamp_indicator_count(count),
            show_gradient: get_bool(objects, props::SHOW_GRADIENT, defaults.show_gradient),
            fill_color: get_fill(objects, props::STAR_FILL, DEFAULT_FILL),
            empty_fill_color: get_fill(objects, props::EMPTY_STAR_FILL, DEFAULT_EMPTY_FILL),
            gradient_start: get_fill(objects, props::GRADIENT_START_COLOR, DEFAULT_GRADIENT_START),
            gradient_end: get_fill(objects, props::GRADIENT_END_COLOR, DEFAULT_GRADIENT_END),
            show_stroke: get_bool(objects, props::SHOW_STROKE, defaults.show_stroke),
            stroke_color: get_fill(objects, props::STAR_STROKE, DEFAULT_STROKE),
            stroke_width: clamp_stroke_width(stroke_width as f32),
            show_animation: get_bool(objects, props::SHOW_ANIMATION, defaults.show_animation),
            show_label: get_bool(objects, props::SHOW_LABEL, defaults.show_label),
            direction: LabelPosition::from_token_or_default(&direction),
            label_font_size: if font_size.is_finite() && font_size > 0.0 {
                font_size as f32
            } else {
                DEFAULT_FONT_SIZE
            },
            label_font_family: get_string(objects, props::FONT_FAMILY, DEFAULT_FONT_FAMILY),
            label_color: get_fill(objects, props::FONT_COLOR, DEFAULT_FONT_COLOR),
        }
    }
}

pub fn clamp_stroke_width(width: f32) -> f32 {
    if width.is_nan() {
        return DEFAULT_STROKE_WIDTH;
    }
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub fast_text_metrics: bool,
    /// Label box height as a multiple of the font size when no font is found.
    pub label_line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            fast_text_metrics: false,
            label_line_height: 1.33,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: Option<String>,
    /// Embed the tooltip rows as the document `<title>`.
    pub tooltips: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 120.0,
            background: None,
            tooltips: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub objects: DataViewObjects,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn style_for(&self, overrides: &DataViewObjects) -> StyleSettings {
        StyleSettings::from_objects(&merge_objects(&self.objects, overrides))
    }
}

/// Overlays `overrides` on `base` property by property.
pub fn merge_objects(base: &DataViewObjects, overrides: &DataViewObjects) -> DataViewObjects {
    let mut merged = base.clone();
    for (object_name, object) in overrides {
        match (merged.get_mut(object_name), object.as_object()) {
            (Some(serde_json::Value::Object(existing)), Some(incoming)) => {
                for (key, value) in incoming {
                    existing.insert(key.clone(), value.clone());
                }
            }
            _ => {
                merged.insert(object_name.clone(), object.clone());
            }
        }
    }
    merged
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    objects: Option<DataViewObjects>,
    render: Option<RenderConfigFile>,
    layout: Option<LayoutConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
    tooltips: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    fast_text_metrics: Option<bool>,
    label_line_height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed);
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(objects) = parsed.objects {
        config.objects = objects;
    }
    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if render.background.is_some() {
            config.render.background = render.background;
        }
        if let Some(v) = render.tooltips {
            config.render.tooltips = v;
        }
    }
    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.fast_text_metrics {
            config.layout.fast_text_metrics = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn objects(value: serde_json::Value) -> DataViewObjects {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn empty_objects_give_defaults() {
        let style = StyleSettings::from_objects(&DataViewObjects::new());
        assert_eq!(style, StyleSettings::default());
        assert_eq!(style.fill_color, "#FBB040");
        assert_eq!(style.direction, LabelPosition::Down);
        assert_eq!(style.label_font_family, "Segoe UI");
    }

    #[test]
    fn stroke_width_is_clamped() {
        let style = StyleSettings::from_objects(&objects(json!({
            "stroke": { "show": true, "strokeWidth": 10 }
        })));
        assert_eq!(style.stroke_width, 4.0);
        let style = StyleSettings::from_objects(&objects(json!({
            "stroke": { "strokeWidth": 0 }
        })));
        assert_eq!(style.stroke_width, 1.0);
    }

    #[test]
    fn unsupported_shape_and_direction_fall_back() {
        let style = StyleSettings::from_objects(&objects(json!({
            "starproperties": { "visualSymbol": "hexagon", "numStars": 12 },
            "dataLabel": { "direction": "middle" }
        })));
        assert_eq!(style.shape_kind, ShapeKind::Star);
        assert_eq!(style.indicator_count, 10);
        assert_eq!(style.direction, LabelPosition::Down);
    }

    #[test]
    fn overrides_merge_per_property() {
        let base = objects(json!({
            "starStyle": { "starFill": "#111111", "emptyStarFill": "#222222" }
        }));
        let overrides = objects(json!({
            "starStyle": { "starFill": "#333333" },
            "dataLabel": { "show": false }
        }));
        let merged = merge_objects(&base, &overrides);
        let style = StyleSettings::from_objects(&merged);
        assert_eq!(style.fill_color, "#333333");
        assert_eq!(style.empty_fill_color, "#222222");
        assert!(!style.show_label);
    }

    #[test]
    fn config_file_fields_apply() {
        let parsed: ConfigFile = serde_json::from_value(json!({
            "objects": { "starproperties": { "visualSymbol": "circle" } },
            "render": { "width": 640, "height": 200 },
            "layout": { "fastTextMetrics": true }
        }))
        .expect("config file should parse");
        let mut config = Config::default();
        apply_config_file(&mut config, parsed);
        assert_eq!(config.render.width, 640.0);
        assert!(config.layout.fast_text_metrics);
        let style = config.style_for(&DataViewObjects::new());
        assert_eq!(style.shape_kind, ShapeKind::Circle);
    }
}
