use ratings_rs_renderer::{DataView, RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingRenderOptions {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
    tooltips: Option<bool>,
    /// Base style objects, same shape as the data view's `objects`.
    objects: Option<serde_json::Map<String, serde_json::Value>>,
}

fn build_render_options(options: RatingRenderOptions) -> RenderOptions {
    // No system fonts in the browser sandbox.
    let mut render_options = RenderOptions::fast_text();

    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }
    if options.background.is_some() {
        render_options.render.background = options.background;
    }
    if let Some(tooltips) = options.tooltips {
        render_options.render.tooltips = tooltips;
    }
    if let Some(objects) = options.objects {
        render_options.objects = objects;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_rating_svg(
    data_view_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<RatingRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        RatingRenderOptions::default()
    };

    let data_view =
        DataView::from_json(data_view_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    render_with_options(&data_view, build_render_options(options))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
