use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    let metrics = guard.font(font_family)?;
    Some(metrics.width(text, font_size))
}

/// Height of one line of text (ascender to descender plus line gap).
pub fn measure_text_height(font_size: f32, font_family: &str) -> Option<f32> {
    if font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    let metrics = guard.font(font_family)?;
    Some(metrics.line_height(font_size))
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FontMetrics>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn font(&mut self, font_family: &str) -> Option<&FontMetrics> {
        let key = normalize_family_key(font_family);
        if !self.cache.contains_key(&key) {
            let metrics = self.load(&key);
            if metrics.is_none() {
                log::debug!("no font found for {key:?}; using fallback widths");
            }
            self.cache.insert(key.clone(), metrics);
        }
        self.cache.get(&key).and_then(Option::as_ref)
    }

    fn load(&mut self, font_family: &str) -> Option<FontMetrics> {
        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" => Family::SansSerif,
                "monospace" => Family::Monospace,
                _ => Family::Name(*name),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| {
                Face::parse(data, index).ok().map(|face| FontMetrics::from_face(&face))
            })
            .flatten()
    }
}

struct FontMetrics {
    units_per_em: f32,
    ascender: f32,
    descender: f32,
    line_gap: f32,
    ascii_advances: [u16; 128],
    advances: HashMap<char, u16>,
}

impl FontMetrics {
    fn from_face(face: &Face<'_>) -> Self {
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        // Labels are numbers with an optional sign, separator or percent
        // sign; anything outside ASCII is picked up here.
        let mut advances = HashMap::new();
        for ch in ['\u{2212}', '\u{00a0}', '\u{2009}'] {
            if let Some(glyph) = face.glyph_index(ch) {
                advances.insert(ch, face.glyph_hor_advance(glyph).unwrap_or(0));
            }
        }
        Self {
            units_per_em: face.units_per_em().max(1) as f32,
            ascender: face.ascender() as f32,
            descender: face.descender() as f32,
            line_gap: face.line_gap() as f32,
            ascii_advances,
            advances,
        }
    }

    fn width(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em;
        let fallback = font_size * 0.56;
        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| {
                let advance = if ch.is_ascii() {
                    self.ascii_advances[ch as usize]
                } else {
                    self.advances.get(&ch).copied().unwrap_or(0)
                };
                if advance == 0 {
                    fallback
                } else {
                    advance as f32 * scale
                }
            })
            .sum::<f32>()
            .max(0.0)
    }

    fn line_height(&self, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em;
        ((self.ascender - self.descender + self.line_gap) * scale).max(0.0)
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
