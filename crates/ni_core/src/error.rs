use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Analysis backend error: {0}")]
    Backend(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// A recoverable error leaves the analysis result usable; only the
    /// narration audio is missing.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Synthesis(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
