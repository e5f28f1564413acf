use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::data::DataView;
use crate::value::to_fixed;

/// Values with more fractional digits than this are rounded.
pub const MAX_TOOLTIP_DECIMALS: usize = 2;

static FLOAT_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|\d+\.?\d*(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?))")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipItem {
    pub display_name: String,
    pub value: String,
}

pub fn tooltip_items(data_view: &DataView) -> Vec<TooltipItem> {
    data_view
        .values
        .iter()
        .map(|field| TooltipItem {
            display_name: field.display_name.clone(),
            value: format_tooltip_value(&field.display_text()),
        })
        .collect()
}

pub fn format_tooltip_value(text: &str) -> String {
    let Some(number) = parse_float_prefix(text) else {
        return text.to_string();
    };
    if count_decimals(text) <= MAX_TOOLTIP_DECIMALS {
        text.to_string()
    } else {
        to_fixed(number, MAX_TOOLTIP_DECIMALS)
    }
}

fn count_decimals(text: &str) -> usize {
    text.split('.').nth(1).map_or(0, |fraction| fraction.chars().count())
}

fn parse_float_prefix(text: &str) -> Option<f64> {
    let captures = FLOAT_PREFIX_RE.captures(text)?;
    let literal = captures.get(1)?.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataField, FieldRoles};
    use serde_json::json;

    #[test]
    fn short_values_pass_through() {
        assert_eq!(format_tooltip_value("3.7"), "3.7");
        assert_eq!(format_tooltip_value("3.75"), "3.75");
        assert_eq!(format_tooltip_value("42"), "42");
        assert_eq!(format_tooltip_value(""), "");
        assert_eq!(format_tooltip_value("n/a"), "n/a");
    }

    #[test]
    fn long_fractions_round_to_two_digits() {
        assert_eq!(format_tooltip_value("3.14159"), "3.14");
        assert_eq!(format_tooltip_value("2.005"), "2.00");
        assert_eq!(format_tooltip_value("0.125"), "0.13");
    }

    #[test]
    fn joined_rows_use_leading_number() {
        assert_eq!(format_tooltip_value("3.5,4.25"), "3.50");
    }

    #[test]
    fn float_prefix_matches_parse_float() {
        assert_eq!(parse_float_prefix("  12.5abc"), Some(12.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("abc"), None);
    }

    #[test]
    fn items_follow_field_order() {
        let view = DataView {
            values: vec![
                DataField::new("Score", FieldRoles { value: true, max: false }, 3.14159),
                DataField {
                    display_name: "Region".to_string(),
                    values: vec![json!("North"), json!("South")],
                    ..DataField::default()
                },
            ],
            ..DataView::default()
        };
        let items = tooltip_items(&view);
        assert_eq!(
            items,
            vec![
                TooltipItem {
                    display_name: "Score".to_string(),
                    value: "3.14".to_string(),
                },
                TooltipItem {
                    display_name: "Region".to_string(),
                    value: "North,South".to_string(),
                },
            ]
        );
    }
}
