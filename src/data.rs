use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RenderError;
use crate::value::js_number_to_string;

static DECIMAL_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(Infinity|(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?)$").unwrap()
});
static RADIX_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0([xXoObB])([0-9a-fA-F]+)$").unwrap());

pub type DataViewObjects = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyRef {
    pub object_name: &'static str,
    pub property_name: &'static str,
}

const fn prop(object_name: &'static str, property_name: &'static str) -> PropertyRef {
    PropertyRef {
        object_name,
        property_name,
    }
}

pub mod properties {
    use super::{PropertyRef, prop};

    pub const VISUAL_SYMBOL: PropertyRef = prop("starproperties", "visualSymbol");
    pub const NUM_STARS: PropertyRef = prop("starproperties", "numStars");
    pub const SHOW_GRADIENT: PropertyRef = prop("starStyle", "showGradient");
    pub const STAR_FILL: PropertyRef = prop("starStyle", "starFill");
    pub const EMPTY_STAR_FILL: PropertyRef = prop("starStyle", "emptyStarFill");
    pub const GRADIENT_START_COLOR: PropertyRef = prop("starStyle", "gradientStartColor");
    pub const GRADIENT_END_COLOR: PropertyRef = prop("starStyle", "gradientEndColor");
    pub const SHOW_STROKE: PropertyRef = prop("stroke", "show");
    pub const STROKE_WIDTH: PropertyRef = prop("stroke", "strokeWidth");
    pub const STAR_STROKE: PropertyRef = prop("stroke", "starStroke");
    pub const SHOW_ANIMATION: PropertyRef = prop("starAnimation", "show");
    pub const SHOW_LABEL: PropertyRef = prop("dataLabel", "show");
    pub const DIRECTION: PropertyRef = prop("dataLabel", "direction");
    pub const FONT_COLOR: PropertyRef = prop("dataLabel", "fontColor");
    pub const FONT_FAMILY: PropertyRef = prop("dataLabel", "fontFamily");
    pub const FONT_SIZE: PropertyRef = prop("dataLabel", "fontSize");
}

pub fn get_value(objects: &DataViewObjects, property: PropertyRef) -> Option<&Value> {
    objects
        .get(property.object_name)?
        .as_object()?
        .get(property.property_name)
        .filter(|value| !value.is_null())
}

pub fn get_bool(objects: &DataViewObjects, property: PropertyRef, default: bool) -> bool {
    match get_value(objects, property) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => match text.trim() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

pub fn get_number(objects: &DataViewObjects, property: PropertyRef, default: f64) -> f64 {
    match get_value(objects, property) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(default),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(default),
        _ => default,
    }
}

pub fn get_string(objects: &DataViewObjects, property: PropertyRef, default: &str) -> String {
    match get_value(objects, property) {
        Some(Value::String(text)) => text.clone(),
        _ => default.to_string(),
    }
}

/// Reads a color property stored either as `"#hex"` or as the host's fill
/// object `{"solid": {"color": "#hex"}}`.
pub fn get_fill(objects: &DataViewObjects, property: PropertyRef, default: &str) -> String {
    let color = match get_value(objects, property) {
        Some(Value::String(text)) => Some(text.as_str()),
        Some(fill @ Value::Object(_)) => fill
            .get("solid")
            .and_then(|solid| solid.get("color"))
            .and_then(Value::as_str),
        _ => None,
    };
    color.unwrap_or(default).to_string()
}

pub fn solid_fill(color: &str) -> Value {
    serde_json::json!({ "solid": { "color": color } })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRoles {
    #[serde(default)]
    pub value: bool,
    #[serde(default)]
    pub max: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataField {
    pub display_name: String,
    #[serde(default)]
    pub roles: FieldRoles,
    /// Host format string; a `%` marks the field as a percentage.
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub values: Vec<Value>,
}

impl DataField {
    pub fn new(display_name: &str, roles: FieldRoles, value: f64) -> Self {
        Self {
            display_name: display_name.to_string(),
            roles,
            format: None,
            values: vec![Value::from(value)],
        }
    }

    pub fn first_number(&self) -> f64 {
        self.values.first().map(js_number).unwrap_or(f64::NAN)
    }

    pub fn is_percent(&self) -> bool {
        self.format.as_deref().is_some_and(|fmt| fmt.contains('%'))
    }

    pub fn display_text(&self) -> String {
        self.values
            .iter()
            .map(js_to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataView {
    #[serde(default)]
    pub values: Vec<DataField>,
    #[serde(default)]
    pub objects: DataViewObjects,
}

impl DataView {
    pub fn from_json(text: &str) -> Result<Self, RenderError> {
        json5::from_str(text).map_err(|err| RenderError::InvalidDataView(err.to_string()))
    }

    pub fn from_values(value: f64, max: Option<f64>) -> Self {
        let mut values = vec![DataField::new(
            "Value",
            FieldRoles {
                value: true,
                max: false,
            },
            value,
        )];
        if let Some(max) = max {
            values.push(DataField::new(
                "Max",
                FieldRoles {
                    value: false,
                    max: true,
                },
                max,
            ));
        }
        Self {
            values,
            objects: DataViewObjects::new(),
        }
    }

    pub fn value_field(&self) -> Option<&DataField> {
        self.values.iter().find(|field| field.roles.value)
    }

    pub fn max_field(&self) -> Option<&DataField> {
        self.values
            .iter()
            .find(|field| !field.roles.value && field.roles.max)
    }
}

/// JavaScript `Number(x)` for JSON values.
pub fn js_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => string_to_number(text),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

// Only the literal forms `Number()` accepts; Rust's float parser also takes
// `inf`, `nan` and mixed-case `infinity`.
fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if DECIMAL_LITERAL_RE.is_match(trimmed) {
        return trimmed.parse().unwrap_or(f64::NAN);
    }
    let Some(caps) = RADIX_LITERAL_RE.captures(trimmed) else {
        return f64::NAN;
    };
    let radix = match &caps[1] {
        "x" | "X" => 16,
        "o" | "O" => 8,
        _ => 2,
    };
    caps[2].chars().try_fold(0.0f64, |acc, ch| {
        ch.to_digit(radix).map(|digit| acc * radix as f64 + digit as f64)
    })
    .unwrap_or(f64::NAN)
}

pub fn js_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number
            .as_f64()
            .map(js_number_to_string)
            .unwrap_or_else(|| number.to_string()),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
