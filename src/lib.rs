//! # DocuForge TUI
//!
//! A terminal client for the DocuForge technical documentation engine.
//!
//! ## Features
//! - Submit a topic to the multi-agent generation workflow
//! - Upload PDFs into the backend knowledge base
//! - View the final document, revision count, citations and editor critique
//! - Headless `generate` / `ingest` / `health` commands
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine, upload revert timer)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod headless;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Settings;
pub use error::ClientError;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{GenerateRequest, GenerateResponse, HealthStatus, RequestStatus, Tone, UploadStatus};
pub use network::{ApiClient, NetworkActor};
