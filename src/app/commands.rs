//! Command handlers - business logic for processing UI events and responses

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::state::{AppState, Timer};
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{GenerateRequest, RequestStatus, UploadStatus};
use crate::network::client::display_name;

pub const LOG_STARTING_PREFIX: &str = "Starting workflow for:";
pub const LOG_SEARCHING: &str = "Searching Knowledge Base...";
pub const LOG_GENERATE_FAILED: &str = "Error: Failed to contact agents.";
pub const LOG_HEALTH_FAILED: &str = "Health check failed";

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    /// Logs scroll back from the newest entry; the document scrolls down from the top
    pub fn scroll_up(&mut self) {
        match self.active_panel {
            Panel::Logs => {
                self.log_scroll_back = self.log_scroll_back.saturating_add(1).min(self.max_log_scroll_back())
            }
            Panel::Document => self.document_scroll = self.document_scroll.saturating_sub(1),
            Panel::Topic => {}
        }
    }

    pub fn scroll_down(&mut self) {
        match self.active_panel {
            Panel::Logs => self.log_scroll_back = self.log_scroll_back.saturating_sub(1),
            Panel::Document => {
                self.document_scroll = self.document_scroll.saturating_add(1).min(self.max_document_scroll())
            }
            Panel::Topic => {}
        }
    }

    fn max_log_scroll_back(&self) -> u16 {
        last_line_index(self.logs.len())
    }

    fn max_document_scroll(&self) -> u16 {
        self.result
            .as_ref()
            .map_or(0, |result| last_line_index(result.final_document.lines().count()))
    }

    // ========================
    // Topic editing
    // ========================

    pub fn start_editing(&mut self) {
        self.active_panel = Panel::Topic;
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.topic.len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.topic[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.topic.len() {
            self.cursor_position = self.topic[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.topic.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.topic.len() {
            self.topic.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev_pos = self.topic[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.topic.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Generation workflow
    // ========================

    pub fn cycle_tone(&mut self) {
        if self.status != RequestStatus::Loading {
            self.tone = self.tone.next();
        }
    }

    /// Start the generation workflow for the current topic.
    ///
    /// Returns `None` when the topic is empty or a workflow is already running;
    /// state is left untouched in that case.
    pub fn submit_generate(&mut self) -> Option<NetworkCommand> {
        if self.status == RequestStatus::Loading || self.topic.is_empty() {
            return None;
        }

        self.status = RequestStatus::Loading;
        self.result = None;
        self.logs.clear();
        self.log_scroll_back = 0;
        self.document_scroll = 0;

        self.push_log(format!("{} \"{}\"", LOG_STARTING_PREFIX, self.topic));
        self.push_log(LOG_SEARCHING);

        let id = self.next_id();
        self.pending_generate_id = Some(id);

        Some(NetworkCommand::Generate {
            id,
            request: GenerateRequest::new(self.topic.clone(), self.tone),
        })
    }

    pub fn check_health(&mut self) -> Option<NetworkCommand> {
        if self.pending_health_id.is_some() {
            return None;
        }
        let id = self.next_id();
        self.pending_health_id = Some(id);
        Some(NetworkCommand::CheckHealth { id })
    }

    // ========================
    // Knowledge base upload
    // ========================

    pub fn open_upload_input(&mut self) {
        if self.upload_status != UploadStatus::Uploading {
            self.input_mode = InputMode::Normal;
            self.show_upload_input = true;
        }
    }

    pub fn upload_path_char(&mut self, c: char) {
        self.upload_path_input.push(c);
    }

    pub fn upload_path_backspace(&mut self) {
        self.upload_path_input.pop();
    }

    pub fn cancel_upload_input(&mut self) {
        self.show_upload_input = false;
        self.upload_path_input.clear();
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
    }

    /// Take the path typed into the upload prompt and start the upload
    pub fn confirm_upload_input(&mut self) -> Option<NetworkCommand> {
        let raw = self.upload_path_input.trim();
        if raw.is_empty() {
            return None;
        }
        let path = expand_home(raw);
        self.show_upload_input = false;
        self.upload_path_input.clear();
        self.select_file(path);
        self.submit_ingest()
    }

    /// Upload the selected file.
    ///
    /// Returns `None` when no file is selected or an upload is in flight.
    pub fn submit_ingest(&mut self) -> Option<NetworkCommand> {
        if self.upload_status == UploadStatus::Uploading {
            return None;
        }
        let path = self.selected_file.clone()?;

        self.upload_status = UploadStatus::Uploading;
        let id = self.next_id();
        self.pending_upload_id = Some(id);
        self.current_upload_id = Some(id);
        self.push_log(format!("Uploading {}...", display_name(&path)));

        Some(NetworkCommand::IngestFile { id, path })
    }

    /// Revert a finished upload to idle; ignored unless `upload_id` is the latest upload
    pub fn revert_upload(&mut self, upload_id: u64) -> bool {
        if self.upload_status == UploadStatus::Done && self.current_upload_id == Some(upload_id) {
            self.upload_status = UploadStatus::Idle;
            true
        } else {
            false
        }
    }

    pub fn upload_path_autocomplete(&mut self) {
        let input = expand_home(&self.upload_path_input)
            .to_string_lossy()
            .to_string();
        let path = PathBuf::from(&input);

        if path.is_dir() && !input.ends_with('/') {
            self.upload_path_input = format!("{}/", input);
            return;
        }

        let (parent, prefix) = if input.ends_with('/') {
            (PathBuf::from(&input), String::new())
        } else if let Some(parent) = path.parent() {
            let prefix = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let parent = if parent.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                parent.to_path_buf()
            };
            (parent, prefix)
        } else {
            return;
        };

        let Ok(entries) = fs::read_dir(&parent) else {
            return;
        };
        let mut matches: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.starts_with(&prefix) && !name.starts_with('.'))
            .collect();
        matches.sort();

        if matches.len() == 1 {
            let completed = parent.join(&matches[0]);
            self.upload_path_input = if completed.is_dir() {
                format!("{}/", completed.to_string_lossy())
            } else {
                completed.to_string_lossy().to_string()
            };
        } else if let Some(common) = common_prefix(&matches) {
            if common.len() > prefix.len() {
                self.upload_path_input = parent.join(&common).to_string_lossy().to_string();
            }
        }
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response. Responses for anything other than the
    /// pending call of their kind are dropped.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<Timer> {
        match response {
            NetworkResponse::Generated { id, response } => {
                if self.pending_generate_id != Some(id) {
                    return None;
                }
                self.pending_generate_id = None;
                self.push_log(format!(
                    "Generation Complete! Revisions: {}",
                    response.revisions
                ));
                self.result = Some(response);
                self.status = RequestStatus::Success;
                None
            }
            NetworkResponse::GenerateFailed { id, message } => {
                if self.pending_generate_id != Some(id) {
                    return None;
                }
                tracing::warn!(id, %message, "Generation failed");
                self.pending_generate_id = None;
                self.push_log(LOG_GENERATE_FAILED);
                self.status = RequestStatus::Error;
                None
            }
            NetworkResponse::Ingested { id, filename } => {
                if self.pending_upload_id != Some(id) {
                    return None;
                }
                self.pending_upload_id = None;
                self.push_log(format!("Ingestion complete: {}", filename));
                self.upload_status = UploadStatus::Done;
                Some(Timer::UploadRevert { upload_id: id })
            }
            NetworkResponse::IngestFailed { id, filename, message } => {
                if self.pending_upload_id != Some(id) {
                    return None;
                }
                tracing::warn!(id, %filename, %message, "Ingestion failed");
                self.pending_upload_id = None;
                self.push_log(format!("Upload failed: {}", filename));
                self.upload_status = UploadStatus::Idle;
                None
            }
            NetworkResponse::Health { id, status } => {
                if self.pending_health_id != Some(id) {
                    return None;
                }
                self.pending_health_id = None;
                self.push_log(format!(
                    "Backend {} ({}, {})",
                    status.status, status.service, status.environment
                ));
                None
            }
            NetworkResponse::HealthFailed { id, message } => {
                if self.pending_health_id != Some(id) {
                    return None;
                }
                tracing::warn!(id, %message, "Health check failed");
                self.pending_health_id = None;
                self.push_log(LOG_HEALTH_FAILED);
                None
            }
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

fn last_line_index(count: usize) -> u16 {
    u16::try_from(count.saturating_sub(1)).unwrap_or(u16::MAX)
}

/// Expand a leading `~` to the home directory
fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    Path::new(input).to_path_buf()
}

/// Find common prefix among strings
fn common_prefix(strings: &[String]) -> Option<String> {
    let first = strings.first()?;
    let mut prefix_len = first.len();

    for s in &strings[1..] {
        prefix_len = first
            .char_indices()
            .zip(s.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, a), _)| i + a.len_utf8())
            .unwrap_or(0)
            .min(prefix_len);
    }

    (prefix_len > 0).then(|| first[..prefix_len].to_string())
}
