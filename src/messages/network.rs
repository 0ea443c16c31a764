//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use crate::models::{GenerateRequest, GenerateResponse, HealthStatus};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run the generation workflow
    Generate { id: u64, request: GenerateRequest },
    /// Upload a file into the knowledge base
    IngestFile { id: u64, path: PathBuf },
    /// Ping the backend
    CheckHealth { id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Generated {
        id: u64,
        response: GenerateResponse,
    },
    /// `message` is a one-line error summary for the trace log
    GenerateFailed {
        id: u64,
        message: String,
    },
    Ingested {
        id: u64,
        filename: String,
    },
    IngestFailed {
        id: u64,
        filename: String,
        message: String,
    },
    Health {
        id: u64,
        status: HealthStatus,
    },
    HealthFailed {
        id: u64,
        message: String,
    },
}
