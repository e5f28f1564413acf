use crate::config::{Config, RenderConfig, StyleSettings};
use crate::data::{DataField, DataView, js_to_string};
use crate::error::RenderError;
use crate::format_pane::{ObjectInstance, enumerate_object_instances};
use crate::indicator::{IndicatorScene, build_scene};
use crate::ir::RatingConfig;
use crate::layout::{RatingLayout, compute_layout};
use crate::render::render_svg;
use crate::tooltip::{TooltipItem, tooltip_items};

/// Render lifecycle notifications, one start and one outcome per update.
pub trait VisualHost {
    fn rendering_started(&mut self);
    fn rendering_finished(&mut self);
    fn rendering_failed(&mut self, error: &RenderError);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogHost;

impl VisualHost for LogHost {
    fn rendering_started(&mut self) {
        log::debug!("rendering started");
    }

    fn rendering_finished(&mut self) {
        log::debug!("rendering finished");
    }

    fn rendering_failed(&mut self, error: &RenderError) {
        log::warn!("rendering failed: {error}");
    }
}

#[derive(Debug, Clone)]
pub struct RenderedRating {
    pub config: RatingConfig,
    pub layout: RatingLayout,
    pub scene: IndicatorScene,
    pub tooltips: Vec<TooltipItem>,
    pub svg: String,
}

pub fn validate_viewport(render: &RenderConfig) -> Result<(), RenderError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(render.width) && valid(render.height) {
        Ok(())
    } else {
        Err(RenderError::InvalidViewport {
            width: render.width,
            height: render.height,
        })
    }
}

/// Reads value, max and style from the data view. A missing value column
/// reads as 0 and a missing max as absent. A value that is not a number
/// stays NaN, which draws every indicator empty.
pub fn convert(data_view: &DataView, config: &Config) -> RatingConfig {
    let style = config.style_for(&data_view.objects);
    let value_field = data_view.value_field();

    let value = match value_field.and_then(|field| field.values.first().map(|raw| (field, raw))) {
        Some((field, raw)) => {
            let value = field.first_number();
            if value.is_nan() {
                log::debug!(
                    "field {:?} holds non-numeric value {:?}; drawing it as NaN",
                    field.display_name,
                    js_to_string(raw)
                );
            }
            value
        }
        None => 0.0,
    };
    let max = data_view
        .max_field()
        .filter(|field| !field.values.is_empty())
        .map(DataField::first_number);

    RatingConfig {
        value,
        max,
        value_as_percent: value_field.is_some_and(DataField::is_percent),
        style,
    }
}

pub fn render_rating(data_view: &DataView, config: &Config) -> Result<RenderedRating, RenderError> {
    validate_viewport(&config.render)?;
    let rating = convert(data_view, config);
    let layout = compute_layout(&rating, &config.layout, &config.render);
    let scene = build_scene(&rating, &layout);
    let tooltips = tooltip_items(data_view);
    let embedded: &[TooltipItem] = if config.render.tooltips { &tooltips } else { &[] };
    let svg = render_svg(&layout, &scene, config.render.background.as_deref(), embedded);
    log::debug!(
        "rendered {} {:?} indicators, label {:?}",
        rating.style.indicator_count,
        rating.style.shape_kind,
        layout.label.as_ref().map(|label| label.text.as_str())
    );
    Ok(RenderedRating {
        config: rating,
        layout,
        scene,
        tooltips,
        svg,
    })
}

pub struct RatingsVisual<H: VisualHost = LogHost> {
    host: H,
    config: Config,
    current: Option<RenderedRating>,
}

impl<H: VisualHost> RatingsVisual<H> {
    pub fn new(host: H, config: Config) -> Self {
        Self {
            host,
            config,
            current: None,
        }
    }

    /// Recomputes everything from `data_view` sized to `viewport`. Failures
    /// go to the host; the previous output is dropped either way.
    pub fn update(&mut self, data_view: Option<&DataView>, viewport: &RenderConfig) {
        self.host.rendering_started();
        self.current = None;
        self.config.render = viewport.clone();

        let Some(data_view) = data_view else {
            self.host.rendering_finished();
            return;
        };

        match render_rating(data_view, &self.config) {
            Ok(rendered) => {
                self.current = Some(rendered);
                self.host.rendering_finished();
            }
            Err(err) => self.host.rendering_failed(&err),
        }
    }

    pub fn rendered(&self) -> Option<&RenderedRating> {
        self.current.as_ref()
    }

    pub fn svg(&self) -> Option<&str> {
        self.current.as_ref().map(|rendered| rendered.svg.as_str())
    }

    pub fn enumerate_object_instances(&self, object_name: &str) -> Vec<ObjectInstance> {
        let style = self
            .current
            .as_ref()
            .map(|rendered| rendered.config.style.clone())
            .unwrap_or_else(|| StyleSettings::from_objects(&self.config.objects));
        enumerate_object_instances(object_name, &style)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn destroy(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FieldRoles;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct RecordingHost {
        events: Vec<String>,
    }

    impl VisualHost for RecordingHost {
        fn rendering_started(&mut self) {
            self.events.push("started".to_string());
        }

        fn rendering_finished(&mut self) {
            self.events.push("finished".to_string());
        }

        fn rendering_failed(&mut self, error: &RenderError) {
            self.events.push(format!("failed: {error}"));
        }
    }

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.layout.fast_text_metrics = true;
        config
    }

    #[test]
    fn missing_fields_read_as_zero() {
        let rating = convert(&DataView::default(), &Config::default());
        assert_eq!(rating.value, 0.0);
        assert_eq!(rating.max, None);
        assert!(!rating.value_as_percent);
    }

    #[test]
    fn percent_format_switches_mode() {
        let mut view = DataView::from_values(0.74, None);
        view.values[0].format = Some("0.0%".to_string());
        let rating = convert(&view, &Config::default());
        assert!(rating.value_as_percent);
        assert_eq!(rating.normalized().value_label, "74%");
    }

    #[test]
    fn non_numeric_value_draws_empty_indicators() {
        let view = DataView {
            values: vec![DataField {
                display_name: "Score".to_string(),
                roles: FieldRoles { value: true, max: false },
                values: vec![json!("n/a")],
                ..DataField::default()
            }],
            ..DataView::default()
        };
        let rating = convert(&view, &Config::default());
        assert!(rating.value.is_nan());
        let normalized = rating.normalized();
        assert_eq!(normalized.value_label, "NaN");
        assert!(normalized.fills().iter().all(|fill| fill.ratio == 0.0));

        let mut visual = RatingsVisual::new(RecordingHost::default(), fast_config());
        visual.update(Some(&view), &RenderConfig::default());
        assert_eq!(visual.host().events, vec!["started", "finished"]);
        assert!(visual.svg().is_some_and(|svg| svg.contains(">NaN</text>")));
    }

    #[test]
    fn update_reports_lifecycle() {
        let mut visual = RatingsVisual::new(RecordingHost::default(), fast_config());
        visual.update(Some(&DataView::from_values(3.7, Some(5.0))), &RenderConfig::default());
        assert_eq!(visual.host().events, vec!["started", "finished"]);
        assert!(visual.svg().is_some_and(|svg| svg.contains(">3.7</text>")));
        assert_eq!(visual.rendered().map(|r| r.tooltips.len()), Some(2));
    }

    #[test]
    fn bad_viewport_fails_and_clears_output() {
        let mut visual = RatingsVisual::new(RecordingHost::default(), fast_config());
        let view = DataView::from_values(2.0, None);
        visual.update(Some(&view), &RenderConfig::default());
        assert!(visual.svg().is_some());

        let viewport = RenderConfig {
            width: 0.0,
            ..RenderConfig::default()
        };
        visual.update(Some(&view), &viewport);
        assert!(visual.svg().is_none());
        assert_eq!(visual.host().events.len(), 4);
        assert!(visual.host().events[3].starts_with("failed: invalid viewport"));
    }

    #[test]
    fn no_data_view_still_finishes() {
        let mut visual = RatingsVisual::new(RecordingHost::default(), fast_config());
        visual.update(None, &RenderConfig::default());
        assert_eq!(visual.host().events, vec!["started", "finished"]);
        assert_eq!(visual.enumerate_object_instances("dataLabel").len(), 2);
    }
}
