//! Application constants
//!
//! Centralized location for endpoint paths and configuration defaults.

use std::time::Duration;

/// Backend address used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Generation workflow endpoint
pub const GENERATE_PATH: &str = "/api/v1/generate";

/// Knowledge base file ingestion endpoint
pub const INGEST_FILE_PATH: &str = "/api/v1/ingest/file";

/// Backend liveness endpoint
pub const HEALTH_PATH: &str = "/health";

/// Multipart field name the ingestion endpoint reads the upload from
pub const INGEST_FIELD_NAME: &str = "file";

/// How long a finished upload stays in `Done` before reverting to `Idle`
pub const UPLOAD_REVERT_DELAY: Duration = Duration::from_secs(3);

/// Directory under the user's home holding the config file
pub const CONFIG_DIR_NAME: &str = ".docuforge";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Trace log file name
pub const LOG_FILE_NAME: &str = "docuforge.log";

/// Application name
pub const APP_NAME: &str = "DocuForge";

/// Subtitle shown under the application name
pub const APP_TAGLINE: &str = "Autonomous Technical Documentation Engine";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
