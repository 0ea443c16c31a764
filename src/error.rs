use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single backend call.
///
/// The UI collapses every variant into one "failed" state; the detail only
/// reaches the trace log and the headless CLI.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ClientError {
    /// Short description suitable for a single log line
    pub fn summary(&self) -> String {
        match self {
            ClientError::Transport(e) if e.is_timeout() => "request timed out".to_string(),
            ClientError::Transport(e) if e.is_connect() => format!("connection failed: {}", e),
            other => other.to_string(),
        }
    }
}
