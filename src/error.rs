use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("malformed data view: {0}")]
    InvalidDataView(String),
    #[error("failed to rasterize svg: {0}")]
    Rasterize(String),
}
