use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output would overwrite input {}; pass --output", .0.display())]
    OutputIsInput(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
