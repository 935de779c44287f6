use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShowError>;

#[derive(Debug, Error)]
pub enum ShowError {
    /// The terminal could not be set up as a drawing surface.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    InvalidArgument(String),
}

impl ShowError {
    pub fn surface(context: &str, err: impl std::fmt::Display) -> Self {
        ShowError::SurfaceUnavailable(format!("{context}: {err}"))
    }
}
