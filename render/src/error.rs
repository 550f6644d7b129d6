use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("png error: {0}")]
    Png(#[from] lodepng::Error),
    #[error("font error: {0}")]
    Font(String),
}
