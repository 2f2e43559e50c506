use thiserror::Error;

pub type LingoResult<T> = Result<T, LingoError>;

#[derive(Error, Debug)]
pub enum LingoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("No locale configured for sheet '{0}'")]
    UnmatchedSheet(String),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LingoError {
    /// Errors that abort the whole run no matter where they surface.
    ///
    /// Everything else is fatal only outside a per-locale boundary; the
    /// pipelines catch those and record them in the locale's outcome.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LingoError::Config(_))
    }

    /// Short class name used in log fields and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            LingoError::Config(_) => "config",
            LingoError::Load(_) => "load",
            LingoError::Write(_) => "write",
            LingoError::UnmatchedSheet(_) => "unmatched-sheet",
            LingoError::Excel(_) => "excel",
            LingoError::Io(_) => "io",
            LingoError::Yaml(_) => "yaml",
            LingoError::Json(_) => "json",
        }
    }
}
