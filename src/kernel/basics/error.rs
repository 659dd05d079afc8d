use std::fmt;

use crate::kernel::services::ports::{ConfigError, HostError};

pub type Result<T> = std::result::Result<T, BasicsError>;

#[derive(Debug)]
pub enum BasicsError {
    Config(ConfigError),
    Host(HostError),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for BasicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicsError::Config(e) => write!(f, "invalid config: {}", e),
            BasicsError::Host(e) => write!(f, "host error: {}", e),
            BasicsError::Io(e) => write!(f, "io error: {}", e),
            BasicsError::Json(e) => write!(f, "settings file is not valid json: {}", e),
        }
    }
}

impl std::error::Error for BasicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BasicsError::Config(e) => Some(e),
            BasicsError::Host(e) => Some(e),
            BasicsError::Io(e) => Some(e),
            BasicsError::Json(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BasicsError {
    fn from(e: ConfigError) -> Self {
        BasicsError::Config(e)
    }
}

impl From<HostError> for BasicsError {
    fn from(e: HostError) -> Self {
        BasicsError::Host(e)
    }
}

impl From<std::io::Error> for BasicsError {
    fn from(e: std::io::Error) -> Self {
        BasicsError::Io(e)
    }
}

impl From<serde_json::Error> for BasicsError {
    fn from(e: serde_json::Error) -> Self {
        BasicsError::Json(e)
    }
}
