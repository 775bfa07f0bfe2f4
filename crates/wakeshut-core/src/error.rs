//! Error types for Wakeshut

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WakeshutError>;

#[derive(Error, Debug)]
pub enum WakeshutError {
    #[error("{0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("SSH error: {0}")]
    Connection(String),

    #[error("{message}")]
    RemoteCommand { status: i64, message: String },

    #[error("Invalid input: {0}")]
    MalformedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for WakeshutError {
    fn from(e: serde_json::Error) -> Self {
        WakeshutError::Serialization(e.to_string())
    }
}

impl From<config::ConfigError> for WakeshutError {
    fn from(e: config::ConfigError) -> Self {
        WakeshutError::Config(e.to_string())
    }
}

impl From<russh::Error> for WakeshutError {
    fn from(e: russh::Error) -> Self {
        WakeshutError::Connection(e.to_string())
    }
}
