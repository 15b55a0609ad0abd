use thiserror::Error;

pub type Result<T> = std::result::Result<T, TensorFileError>;

#[derive(Error, Debug)]
pub enum TensorFileError {
    // Format errors
    #[error("Cannot process tensors beyond 4-D, got rank {rank}")]
    Rank { rank: usize },

    #[error("Unsupported element type: {0}")]
    UnsupportedType(String),

    #[error("Stream truncated while reading {context}: expected {expected} bytes")]
    TruncatedStream { expected: usize, context: &'static str },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Container holds no tensors")]
    EmptyContainer,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    // IO and system errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to replace target file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
