use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported Layout: '{0}' is not a registered layout identifier")]
    UnsupportedLayout(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type CfResult<T> = Result<T, CapForgeError>;
