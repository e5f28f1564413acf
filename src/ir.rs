use serde::{Deserialize, Serialize};

use crate::config::StyleSettings;
use crate::value::{NormalizedRating, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    #[default]
    Star,
    Triangle,
    InvertedTriangle,
    Circle,
}

impl ShapeKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "star" => Some(Self::Star),
            "triangle" => Some(Self::Triangle),
            "invertedTriangle" => Some(Self::InvertedTriangle),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }

    pub fn from_token_or_default(token: &str) -> Self {
        Self::from_token(token).unwrap_or_else(|| {
            log::debug!("unknown indicator shape {token:?}; using star");
            Self::default()
        })
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Triangle => "triangle",
            Self::InvertedTriangle => "invertedTriangle",
            Self::Circle => "circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Top,
    #[default]
    Down,
    Left,
    Right,
}

impl LabelPosition {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "top" => Some(Self::Top),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn from_token_or_default(token: &str) -> Self {
        Self::from_token(token).unwrap_or_else(|| {
            log::debug!("unknown label position {token:?}; using down");
            Self::default()
        })
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Down)
    }
}

/// Everything one render needs. Rebuilt from the data view on each update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingConfig {
    pub value: f64,
    pub max: Option<f64>,
    pub value_as_percent: bool,
    pub style: StyleSettings,
}

impl RatingConfig {
    pub fn new(value: f64, max: Option<f64>) -> Self {
        Self {
            value,
            max,
            value_as_percent: false,
            style: StyleSettings::default(),
        }
    }

    pub fn with_style(mut self, style: StyleSettings) -> Self {
        self.style = style;
        self
    }

    pub fn normalized(&self) -> NormalizedRating {
        normalize(
            self.value,
            self.max,
            self.style.indicator_count,
            self.value_as_percent,
        )
    }
}
