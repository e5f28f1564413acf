use crate::config::LayoutConfig;
use crate::text_metrics;

use super::LabelMetrics;

pub(super) fn measure_label(
    text: &str,
    font_size: f32,
    font_family: &str,
    config: &LayoutConfig,
) -> LabelMetrics {
    let width = text_width(text, font_size, font_family, config.fast_text_metrics);
    let height = if config.fast_text_metrics {
        None
    } else {
        text_metrics::measure_text_height(font_size, font_family)
    }
    .unwrap_or(font_size * config.label_line_height);
    LabelMetrics { width, height }
}

pub(super) fn char_width_factor(ch: char) -> f32 {
    // Advance widths of a Segoe UI-like face at 1px; labels are mostly digits.
    match ch {
        '0' | '2' | '3' | '4' | '5' | '6' | '7' | '8' | '9' => 0.559,
        '1' => 0.559,
        '.' | ',' => 0.251,
        '%' => 0.826,
        '-' => 0.387,
        '+' => 0.714,
        ' ' => 0.274,
        'N' => 0.763,
        'a' => 0.550,
        'I' => 0.272,
        'f' => 0.340,
        'i' => 0.235,
        'n' => 0.585,
        't' => 0.305,
        'y' => 0.556,
        _ => 0.568,
    }
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, fast_metrics: bool) -> f32 {
    if fast_metrics {
        return fallback_text_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| fallback_text_width(text, font_size))
}

fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> LayoutConfig {
        LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn fallback_width_scales_with_font_size() {
        let w20 = fallback_text_width("3.7", 20.0);
        let w40 = fallback_text_width("3.7", 40.0);
        assert!((w40 - w20 * 2.0).abs() < 0.01, "width should double with font size");
    }

    #[test]
    fn fast_metrics_use_line_height_factor() {
        let metrics = measure_label("3.7", 20.0, "Segoe UI", &fast());
        assert!((metrics.height - 26.6).abs() < 0.001);
        assert!((metrics.width - (0.559 * 2.0 + 0.251) * 20.0).abs() < 0.001);
    }

    #[test]
    fn every_char_has_positive_width() {
        for ch in ['0', '.', '%', '-', 'N', '\u{4e2d}'] {
            assert!(char_width_factor(ch) > 0.0, "char {:?} has zero width", ch);
        }
    }
}
