use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::config::StyleSettings;
use crate::data::solid_fill;
use crate::value::{MAX_INDICATORS, MIN_INDICATORS};

pub const FORMAT_OBJECTS: [&str; 5] = [
    "starproperties",
    "starStyle",
    "stroke",
    "starAnimation",
    "dataLabel",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInstance {
    pub display_name: &'static str,
    pub object_name: &'static str,
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_values: Option<Value>,
}

impl ObjectInstance {
    fn new(display_name: &'static str, object_name: &'static str) -> Self {
        Self {
            display_name,
            object_name,
            properties: Map::new(),
            valid_values: None,
        }
    }

    fn with(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }
}

/// Instances the pane shows for `object_name`. Unknown objects yield none.
pub fn enumerate_object_instances(object_name: &str, style: &StyleSettings) -> Vec<ObjectInstance> {
    match object_name {
        "starproperties" => {
            let mut instance = ObjectInstance::new("Indicator Configuration", "starproperties")
                .with("visualSymbol", json!(style.shape_kind.as_token()))
                .with("numStars", json!(style.indicator_count));
            instance.valid_values = Some(json!({
                "numStars": { "numberRange": { "min": MIN_INDICATORS, "max": MAX_INDICATORS } }
            }));
            vec![instance]
        }
        "starStyle" => {
            let instance = ObjectInstance::new("Indicator style", "starStyle")
                .with("showGradient", json!(style.show_gradient));
            let instance = if style.show_gradient {
                instance
                    .with("gradientStartColor", solid_fill(&style.gradient_start))
                    .with("gradientEndColor", solid_fill(&style.gradient_end))
            } else {
                instance.with("starFill", solid_fill(&style.fill_color))
            };
            vec![instance.with("emptyStarFill", solid_fill(&style.empty_fill_color))]
        }
        "stroke" => {
            let mut instance =
                ObjectInstance::new("Border", "stroke").with("show", json!(style.show_stroke));
            if style.show_stroke {
                instance = instance
                    .with("starStroke", solid_fill(&style.stroke_color))
                    .with("strokeWidth", json!(style.stroke_width));
            }
            vec![instance]
        }
        "starAnimation" => vec![
            ObjectInstance::new("Animation", "starAnimation")
                .with("show", json!(style.show_animation)),
        ],
        "dataLabel" => {
            let mut instances = vec![
                ObjectInstance::new("Data Label", "dataLabel").with("show", json!(style.show_label)),
            ];
            if style.show_label {
                instances.push(
                    ObjectInstance::new("Data Label", "dataLabel")
                        .with("direction", json!(style.direction.as_token()))
                        .with("fontColor", solid_fill(&style.label_color))
                        .with("fontFamily", json!(style.label_font_family))
                        .with("fontSize", json!(style.label_font_size)),
                );
            }
            instances
        }
        other => {
            log::debug!("no format pane object named {other:?}");
            Vec::new()
        }
    }
}

pub fn enumerate_all(style: &StyleSettings) -> Vec<ObjectInstance> {
    FORMAT_OBJECTS
        .iter()
        .flat_map(|object_name| enumerate_object_instances(object_name, style))
        .collect()
}
