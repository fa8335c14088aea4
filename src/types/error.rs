use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid scene: {0}")]
    InvalidScene(String),
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
    #[error("non-finite input: {0}")]
    NonFinite(String),
}
