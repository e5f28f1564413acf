#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod format_pane;
pub mod indicator;
pub mod ir;
pub mod layout;
pub mod layout_dump;
#[cfg(feature = "cli")]
pub mod logging;
pub mod render;
pub mod shape;
pub mod text_metrics;
pub mod tooltip;
pub mod value;
pub mod visual;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, StyleSettings};
pub use data::{DataField, DataView, DataViewObjects, FieldRoles};
pub use error::RenderError;
pub use ir::{LabelPosition, RatingConfig, ShapeKind};
pub use visual::{LogHost, RatingsVisual, RenderedRating, VisualHost, render_rating};

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub render: RenderConfig,
    pub layout: LayoutConfig,
    /// Base style objects; the data view's own objects win per property.
    pub objects: DataViewObjects,
}

impl RenderOptions {
    pub fn fast_text() -> Self {
        Self {
            layout: LayoutConfig {
                fast_text_metrics: true,
                ..LayoutConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.render.width = width;
        self.render.height = height;
        self
    }
}

impl From<RenderOptions> for Config {
    fn from(options: RenderOptions) -> Self {
        Config {
            objects: options.objects,
            layout: options.layout,
            render: options.render,
        }
    }
}

pub fn render_with_options(
    data_view: &DataView,
    options: RenderOptions,
) -> Result<String, RenderError> {
    let config = Config::from(options);
    render_rating(data_view, &config).map(|rendered| rendered.svg)
}
