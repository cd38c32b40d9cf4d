use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PdfStructError {
    #[error("document not found: {path}")]
    NotFound { path: PathBuf },

    #[error("invalid or corrupted document: {0}")]
    InvalidDocument(String),

    #[error("document yielded no usable text: {0}")]
    NoUsableText(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("mutool not found. Install mupdf-tools: brew install mupdf-tools (macOS) or apt install mupdf-tools (Linux)")]
    MutoolNotFound,

    #[error("mutool failed with exit code {code}: {stderr}")]
    MutoolFailed { code: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
