//! Render state - snapshot sent from App layer to UI for rendering

use crate::constants::DEFAULT_API_URL;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{GenerateResponse, LogEntry, RequestStatus, Tone, UploadStatus};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Request form
    pub topic: String,
    pub cursor_position: usize,
    pub tone: Tone,
    pub api_url: String,

    // Workflow
    pub status: RequestStatus,
    pub result: Option<GenerateResponse>,
    pub logs: Vec<LogEntry>,

    // Upload
    pub upload_status: UploadStatus,
    pub upload_path_input: String,
    pub selected_file: Option<String>,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub log_scroll_back: u16,
    pub document_scroll: u16,

    // Popups
    pub show_help: bool,
    pub show_upload_input: bool,
}

impl RenderState {
    /// Generate is offered only with a topic and no workflow in flight
    pub fn can_generate(&self) -> bool {
        self.status != RequestStatus::Loading && !self.topic.is_empty()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            topic: String::new(),
            cursor_position: 0,
            tone: Tone::default(),
            api_url: String::from(DEFAULT_API_URL),
            status: RequestStatus::Idle,
            result: None,
            logs: Vec::new(),
            upload_status: UploadStatus::Idle,
            upload_path_input: String::new(),
            selected_file: None,
            active_panel: Panel::Topic,
            input_mode: InputMode::Normal,
            log_scroll_back: 0,
            document_scroll: 0,
            show_help: false,
            show_upload_input: false,
        }
    }
}
