use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Session is terminated; restart to issue commands")]
    SessionTerminated,

    #[error("Invalid session state: {0}")]
    InvalidSession(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HealthError>;
