use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonlSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error (line {line}): {message}")]
    Json { line: usize, message: String },
    #[error("payload error (line {line}): {message}")]
    Payload { line: usize, message: String },
}
