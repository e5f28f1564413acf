use serde::Serialize;

pub const MIN_INDICATORS: u32 = 3;
pub const MAX_INDICATORS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRating {
    /// Value after label rounding, before scaling.
    pub value: f64,
    pub value_label: String,
    pub effective_max: f64,
    pub indicator_count: u32,
    /// Fill amount on the indicator scale. Not clamped; only the first
    /// `indicator_count` units are ever drawn.
    pub scaled_value: f64,
}

impl NormalizedRating {
    pub fn fill_ratio(&self, index: u32) -> f64 {
        fill_ratio(index, self.scaled_value)
    }

    pub fn fills(&self) -> Vec<IndicatorFill> {
        (0..self.indicator_count)
            .map(|index| IndicatorFill::new(index, self.fill_ratio(index)))
            .collect()
    }

    pub fn label_text(&self) -> String {
        to_fixed(self.scaled_value, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillKind {
    Empty,
    Partial,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorFill {
    pub index: u32,
    pub ratio: f64,
    pub kind: FillKind,
}

impl IndicatorFill {
    pub fn new(index: u32, ratio: f64) -> Self {
        let kind = if ratio >= 1.0 {
            FillKind::Full
        } else if ratio > 0.0 {
            FillKind::Partial
        } else {
            FillKind::Empty
        };
        Self { index, ratio, kind }
    }
}

pub fn clamp_indicator_count(count: f64) -> u32 {
    if !count.is_finite() {
        return 5;
    }
    count
        .round()
        .clamp(MIN_INDICATORS as f64, MAX_INDICATORS as f64) as u32
}

pub fn normalize(
    value: f64,
    max: Option<f64>,
    indicator_count: u32,
    value_as_percent: bool,
) -> NormalizedRating {
    let indicator_count = indicator_count.clamp(MIN_INDICATORS, MAX_INDICATORS);
    // A zero or NaN maximum is treated as missing.
    let max = max.filter(|m| *m != 0.0 && !m.is_nan());

    let (value, value_label, effective_max) = if value_as_percent {
        let label = format!("{}%", js_number_to_string(value * 100.0));
        (value, label, max.unwrap_or(1.0))
    } else {
        let label = to_fixed(value, 1);
        let rounded = label.parse::<f64>().unwrap_or(f64::NAN);
        (rounded, label, max.unwrap_or(indicator_count as f64))
    };

    let scale = indicator_count as f64 / effective_max;
    NormalizedRating {
        value,
        value_label,
        effective_max,
        indicator_count,
        scaled_value: value * scale,
    }
}

pub fn fill_ratio(index: u32, scaled_value: f64) -> f64 {
    let index = index as f64;
    if index + 1.0 <= scaled_value {
        1.0
    } else if scaled_value > index {
        scaled_value - index
    } else {
        0.0
    }
}

/// `Number.prototype.toFixed`: exact decimal ties round away from zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() >= 1e21 {
        return js_number_to_string(value);
    }

    let exact = format!("{:.80}", value.abs());
    let rounded = match exact.split_once('.') {
        Some((_, fraction)) if is_exact_tie(&fraction[digits..]) => {
            let scale = 10f64.powi(digits as i32);
            let truncated = format!("{:.*}", digits + 1, value.abs());
            let kept = &truncated[..truncated.len() - 1];
            let base: f64 = kept.parse().unwrap_or(0.0);
            let bumped = base + 1.0 / scale;
            format!("{:.*}", digits, bumped)
        }
        _ => format!("{:.*}", digits, value.abs()),
    };

    if value < 0.0 {
        format!("-{rounded}")
    } else {
        rounded
    }
}

fn is_exact_tie(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('5') && chars.all(|ch| ch == '0')
}

/// Shortest round-trip rendering, matching JavaScript for the ranges a
/// rating value takes.
pub fn js_number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn partial_fill_scenario() {
        let rating = normalize(3.7, Some(5.0), 5, false);
        let fills = rating.fills();
        assert_eq!(fills[0].kind, FillKind::Full);
        assert_eq!(fills[1].kind, FillKind::Full);
        assert_eq!(fills[2].kind, FillKind::Full);
        assert_eq!(fills[3].kind, FillKind::Partial);
        assert_close(fills[3].ratio, 0.7);
        assert_eq!(fills[4].kind, FillKind::Empty);
    }

    #[test]
    fn zero_value_is_all_empty() {
        let rating = normalize(0.0, None, 5, false);
        assert_eq!(rating.scaled_value, 0.0);
        assert!(rating.fills().iter().all(|f| f.kind == FillKind::Empty));
    }

    #[test]
    fn missing_max_uses_indicator_count() {
        let rating = normalize(5.0, None, 5, false);
        assert_eq!(rating.effective_max, 5.0);
        assert!(rating.fills().iter().all(|f| f.kind == FillKind::Full));
    }

    #[test]
    fn zero_max_counts_as_missing() {
        let rating = normalize(2.0, Some(0.0), 4, false);
        assert_eq!(rating.effective_max, 4.0);
        assert_close(rating.scaled_value, 2.0);
    }

    #[test]
    fn excess_value_is_truncated_not_rejected() {
        let rating = normalize(50.0, Some(5.0), 5, false);
        assert_close(rating.scaled_value, 50.0);
        let fills = rating.fills();
        assert_eq!(fills.len(), 5);
        assert!(fills.iter().all(|f| f.ratio == 1.0));
    }

    #[test]
    fn scaling_uses_rounded_value() {
        // 2.96 rounds to 3.0 before scaling, so the third indicator is full.
        let rating = normalize(2.96, None, 5, false);
        assert_eq!(rating.value_label, "3.0");
        assert_eq!(rating.fill_ratio(2), 1.0);
        assert_eq!(rating.fill_ratio(3), 0.0);
    }

    #[test]
    fn percent_mode_keeps_raw_value() {
        let rating = normalize(0.74, None, 5, true);
        assert_eq!(rating.value_label, "74%");
        assert_eq!(rating.effective_max, 1.0);
        assert_close(rating.scaled_value, 3.7);
    }

    #[test]
    fn indicator_count_is_clamped() {
        assert_eq!(normalize(1.0, None, 1, false).indicator_count, 3);
        assert_eq!(normalize(1.0, None, 40, false).indicator_count, 10);
        assert_eq!(clamp_indicator_count(7.4), 7);
        assert_eq!(clamp_indicator_count(f64::NAN), 5);
    }

    #[test]
    fn fill_is_monotonic_with_single_partial() {
        for count in MIN_INDICATORS..=MAX_INDICATORS {
            for step in 0..=100 {
                let max = 10.0;
                let value = max * step as f64 / 100.0;
                let rating = normalize(value, Some(max), count, false);
                let fills = rating.fills();
                let partials = fills.iter().filter(|f| f.kind == FillKind::Partial).count();
                assert!(partials <= 1, "count {count} value {value}");
                for pair in fills.windows(2) {
                    assert!(pair[0].ratio >= pair[1].ratio);
                }
                let sum: f64 = fills.iter().map(|f| f.ratio).sum();
                let expected = rating.scaled_value.clamp(0.0, count as f64);
                assert!((sum - expected).abs() < 1e-9, "count {count} value {value}");
            }
        }
    }

    #[test]
    fn negative_values_are_empty() {
        let rating = normalize(-2.0, None, 5, false);
        assert!(rating.fills().iter().all(|f| f.ratio == 0.0));
    }

    #[test]
    fn to_fixed_matches_javascript() {
        assert_eq!(to_fixed(3.7, 1), "3.7");
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(0.35, 1), "0.3");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(3.14159, 2), "3.14");
        assert_eq!(to_fixed(-0.04, 1), "-0.0");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(f64::NAN, 1), "NaN");
        assert_eq!(to_fixed(4.0, 1), "4.0");
    }

    #[test]
    fn js_number_formatting() {
        assert_eq!(js_number_to_string(74.0), "74");
        assert_eq!(js_number_to_string(3.5), "3.5");
        assert_eq!(js_number_to_string(-0.0), "0");
    }
}
