use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Writing tone requested from the generation workflow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Technical,
    Marketing,
    Summary,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Technical => "technical",
            Tone::Marketing => "marketing",
            Tone::Summary => "summary",
        }
    }

    pub fn next(&self) -> Tone {
        match self {
            Tone::Technical => Tone::Marketing,
            Tone::Marketing => Tone::Summary,
            Tone::Summary => Tone::Technical,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technical" => Ok(Tone::Technical),
            "marketing" => Ok(Tone::Marketing),
            "summary" => Ok(Tone::Summary),
            other => anyhow::bail!(
                "unknown tone '{}' (expected technical, marketing or summary)",
                other
            ),
        }
    }
}

/// Body of `POST /api/v1/generate`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub tone: Tone,
}

impl GenerateRequest {
    pub fn new(topic: impl Into<String>, tone: Tone) -> Self {
        GenerateRequest {
            topic: topic.into(),
            tone,
        }
    }
}

/// Result of the generation workflow, rendered verbatim
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub final_document: String,
    pub revisions: u64,
    pub final_critique: String,
    /// Number of knowledge base chunks the writer cited
    pub used_context: u64,
}

/// Body of `GET /health`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub environment: String,
    pub service: String,
}

/// Status of the generation workflow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Success => "success",
            RequestStatus::Error => "error",
        }
    }
}

/// Status of the knowledge base upload
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Done,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "idle",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Done => "done",
        }
    }
}

/// A line in the user-facing system log
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        LogEntry {
            message: message.into(),
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_wire_format() {
        let req = GenerateRequest::new("HMP155 Power Requirements", Tone::Technical);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"topic": "HMP155 Power Requirements", "tone": "technical"})
        );
    }

    #[test]
    fn test_parse_generate_response() {
        let body = r#"{"final_document":"...","revisions":2,"final_critique":"Looks good.","used_context":5}"#;
        let resp: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.revisions, 2);
        assert_eq!(resp.used_context, 5);
        assert_eq!(resp.final_critique, "Looks good.");
    }

    #[test]
    fn test_counts_beyond_u32_decode() {
        let body = r#"{"final_document":"","revisions":4294967296,"final_critique":"","used_context":5000000000}"#;
        let resp: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.revisions, 4_294_967_296);
        assert_eq!(resp.used_context, 5_000_000_000);
    }

    #[test]
    fn test_negative_revisions_rejected() {
        let body = r#"{"final_document":"","revisions":-1,"final_critique":"","used_context":0}"#;
        assert!(serde_json::from_str::<GenerateResponse>(body).is_err());
    }

    #[test]
    fn test_tone_cycle_and_parse() {
        assert_eq!(Tone::Technical.next(), Tone::Marketing);
        assert_eq!(Tone::Summary.next(), Tone::Technical);
        assert_eq!("Marketing".parse::<Tone>().unwrap(), Tone::Marketing);
        assert!("casual".parse::<Tone>().is_err());
    }

    #[test]
    fn test_log_entry_display_has_timestamp_prefix() {
        let entry = LogEntry::new("Searching Knowledge Base...");
        let line = entry.to_string();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] Searching Knowledge Base..."));
    }
}
