use crate::ir::{LabelPosition, ShapeKind};
use crate::layout::{LabelLayout, ViewBox};
use crate::value::{IndicatorFill, NormalizedRating};
use crate::visual::RenderedRating;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub shape: ShapeKind,
    pub direction: LabelPosition,
    pub width: f32,
    pub height: f32,
    pub view_box: ViewBox,
    pub view_box_attr: String,
    pub indicator_shift: [f32; 2],
    pub label_shift_y: f32,
    pub rating: NormalizedRating,
    pub indicators: Vec<IndicatorDump>,
    pub label: Option<LabelLayout>,
    pub gradient_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDump {
    pub translate_x: f32,
    #[serde(flatten)]
    pub fill: IndicatorFill,
}

impl LayoutDump {
    pub fn from_rendered(rendered: &RenderedRating) -> Self {
        let layout = &rendered.layout;
        let rating = rendered.config.normalized();
        let indicators = rating
            .fills()
            .into_iter()
            .zip(&layout.offsets.translate_x)
            .map(|(fill, translate_x)| IndicatorDump {
                translate_x: *translate_x,
                fill,
            })
            .collect();

        LayoutDump {
            shape: layout.shape.kind,
            direction: layout.direction,
            width: layout.width,
            height: layout.height,
            view_box: layout.offsets.view_box,
            view_box_attr: layout.offsets.view_box.to_string(),
            indicator_shift: [layout.indicator_shift.0, layout.indicator_shift.1],
            label_shift_y: layout.label_shift_y,
            rating,
            indicators,
            label: layout.label.clone(),
            gradient_count: rendered.scene.gradients.len(),
        }
    }
}

pub fn write_layout_dump(path: &Path, rendered: &RenderedRating) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_rendered(rendered);
    serde_json::to_writer_pretty(writer, &dump)?;
    log::debug!("wrote layout dump to {}", path.display());
    Ok(())
}
