//! App state - pure data structure with no I/O logic

use std::path::PathBuf;

use crate::config::Settings;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{GenerateResponse, LogEntry, RequestStatus, Tone, UploadStatus};
use crate::network::client::display_name;

/// Follow-up work the actor must schedule after a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Return the upload status to idle once the revert delay elapses
    UploadRevert { upload_id: u64 },
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Request form
    pub topic: String,
    pub cursor_position: usize,
    pub tone: Tone,
    pub api_url: String,

    // Generation workflow
    pub status: RequestStatus,
    pub result: Option<GenerateResponse>,
    pub logs: Vec<LogEntry>,
    pub pending_generate_id: Option<u64>,

    // Knowledge base upload
    pub upload_status: UploadStatus,
    pub upload_path_input: String,
    pub selected_file: Option<PathBuf>,
    pub pending_upload_id: Option<u64>,
    /// Id of the most recent upload, kept after completion so a stale revert can be told apart
    pub current_upload_id: Option<u64>,

    pub pending_health_id: Option<u64>,
    pub next_request_id: u64,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub log_scroll_back: u16,
    pub document_scroll: u16,

    // Popups
    pub show_help: bool,
    pub show_upload_input: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        AppState {
            topic: String::new(),
            cursor_position: 0,
            tone: settings.tone,
            api_url: settings.api_url.clone(),
            status: RequestStatus::Idle,
            result: None,
            logs: Vec::new(),
            pending_generate_id: None,
            upload_status: UploadStatus::Idle,
            upload_path_input: String::new(),
            selected_file: None,
            pending_upload_id: None,
            current_upload_id: None,
            pending_health_id: None,
            next_request_id: 1,
            active_panel: Panel::Topic,
            input_mode: InputMode::Normal,
            log_scroll_back: 0,
            document_scroll: 0,
            show_help: false,
            show_upload_input: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Append a timestamped line to the system log
    pub fn push_log(&mut self, message: impl Into<String>) {
        self.logs.push(LogEntry::new(message));
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            topic: self.topic.clone(),
            cursor_position: self.cursor_position,
            tone: self.tone,
            api_url: self.api_url.clone(),
            status: self.status,
            result: self.result.clone(),
            logs: self.logs.clone(),
            upload_status: self.upload_status,
            upload_path_input: self.upload_path_input.clone(),
            selected_file: self.selected_file.as_deref().map(display_name),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            log_scroll_back: self.log_scroll_back,
            document_scroll: self.document_scroll,
            show_help: self.show_help,
            show_upload_input: self.show_upload_input,
        }
    }
}
