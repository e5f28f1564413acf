use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static SHORTHAND_HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#?([a-f\d])([a-f\d])([a-f\d])$").unwrap());
static FULL_HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Boundary color `step` of `steps` on the straight line from `self` to `end`.
    pub fn lerp(self, end: Rgb, step: u32, steps: u32) -> Rgb {
        let channel = |from: u8, to: u8| -> u8 {
            let from = from as f64;
            let to = to as f64;
            let value = from + (to - from) * step as f64 / steps.max(1) as f64;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(self.r, end.r),
            g: channel(self.g, end.g),
            b: channel(self.b, end.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Parses `#RRGGBB` (hash optional, case-insensitive).
///
/// Three-digit input is first rewritten with the legacy shorthand rule: the
/// match is replaced by the decimal string of
/// `2 * (Number(match) + Number(d1) + Number(d2))`. That string is never six
/// hex digits long, so shorthand colors come back as `None` and callers fall
/// back to a solid fill. Existing configurations depend on that outcome.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let expanded = expand_shorthand(hex.trim());
    let caps = FULL_HEX_RE.captures(&expanded)?;
    let channel = |idx: usize| u8::from_str_radix(&caps[idx], 16).ok();
    Some(Rgb {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
    })
}

fn expand_shorthand(hex: &str) -> String {
    let Some(caps) = SHORTHAND_HEX_RE.captures(hex) else {
        return hex.to_string();
    };
    let sum = js_number(&caps[0]) + js_number(&caps[1]) + js_number(&caps[2]);
    let doubled = 2.0 * sum;
    if doubled.is_nan() {
        "NaN".to_string()
    } else {
        format!("{doubled}")
    }
}

// Decimal-only string to number conversion; anything else is NaN.
fn js_number(text: &str) -> f64 {
    if text.chars().all(|ch| ch.is_ascii_digit()) {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

pub fn rgb_to_hex(channel: u8) -> String {
    format!("{channel:02x}")
}

pub fn full_color_hex(color: Rgb) -> String {
    format!(
        "#{}{}{}",
        rgb_to_hex(color.r),
        rgb_to_hex(color.g),
        rgb_to_hex(color.b)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradientSegment {
    pub start: Rgb,
    pub end: Rgb,
}

/// Splits the `start`..`end` ramp into `steps` per-indicator segments.
///
/// Segment `i` runs from boundary color `i - 1` to boundary color `i`. The
/// first segment starts at `start` as given and the last one ends at `end` as
/// given, so rounding never drifts the outer colors. A segment is `None` when
/// either of its colors does not parse.
pub fn interpolate(start: &str, end: &str, steps: u32) -> Vec<Option<GradientSegment>> {
    let start_rgb = hex_to_rgb(start);
    let end_rgb = hex_to_rgb(end);
    if start_rgb.is_none() || end_rgb.is_none() {
        log::debug!("gradient colors {start:?} -> {end:?} did not parse; using solid fill");
    }

    let mut segments = Vec::with_capacity(steps as usize);
    let mut start_hex: String;
    let mut end_hex = String::new();
    for step in 0..steps {
        start_hex = if step == 0 {
            start.to_string()
        } else {
            end_hex.clone()
        };
        end_hex = if step + 1 == steps {
            end.to_string()
        } else {
            match (start_rgb, end_rgb) {
                (Some(from), Some(to)) => full_color_hex(from.lerp(to, step, steps)),
                _ => String::new(),
            }
        };
        let segment = hex_to_rgb(&start_hex)
            .zip(hex_to_rgb(&end_hex))
            .map(|(start, end)| GradientSegment { start, end });
        segments.push(segment);
    }
    segments
}
