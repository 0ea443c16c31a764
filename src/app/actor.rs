//! App actor - message loop processing UI events, network responses and timers

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::state::{AppState, Timer};
use crate::constants::UPLOAD_REVERT_DELAY;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    timer_tx: mpsc::UnboundedSender<Timer>,
    timer_rx: mpsc::UnboundedReceiver<Timer>,
    /// Pending upload revert; aborted when a new upload starts
    revert_task: Option<JoinHandle<()>>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        AppActor {
            state,
            network_tx,
            render_tx,
            timer_tx,
            timer_rx,
            revert_task: None,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    // A closed UI channel means the terminal loop is gone
                    let quit = event.map_or(true, |event| self.handle_ui_event(event));
                    if quit {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                }
                Some(response) = net_rx.recv() => {
                    if let Some(timer) = self.state.handle_response(response) {
                        self.schedule(timer);
                    }
                }
                Some(timer) = self.timer_rx.recv() => {
                    match timer {
                        Timer::UploadRevert { upload_id } => {
                            if self.state.revert_upload(upload_id) {
                                tracing::debug!(upload_id, "Upload status reverted to idle");
                            }
                        }
                    }
                }
            }
            let _ = self.render_tx.send(self.state.to_render_state());
        }

        self.cancel_upload_revert();
    }

    /// Handle a UI event, returns true if should quit
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Topic editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Newline => self.state.enter_char('\n'),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Generation workflow
            UiEvent::Generate => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                if let Some(cmd) = self.state.submit_generate() {
                    self.send(cmd);
                }
            }
            UiEvent::CycleTone => self.state.cycle_tone(),
            UiEvent::CheckHealth => {
                if let Some(cmd) = self.state.check_health() {
                    self.send(cmd);
                }
            }

            // Upload
            UiEvent::OpenUploadInput => self.state.open_upload_input(),
            UiEvent::UploadPathChar(c) => self.state.upload_path_char(c),
            UiEvent::UploadPathBackspace => self.state.upload_path_backspace(),
            UiEvent::UploadPathAutocomplete => self.state.upload_path_autocomplete(),
            UiEvent::CancelUploadInput => self.state.cancel_upload_input(),
            UiEvent::SubmitUpload => {
                if let Some(cmd) = self.state.confirm_upload_input() {
                    self.cancel_upload_revert();
                    self.send(cmd);
                }
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    fn send(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::error!("Network actor is gone, command dropped");
        }
    }

    fn schedule(&mut self, timer: Timer) {
        match timer {
            Timer::UploadRevert { .. } => {
                self.cancel_upload_revert();
                let timer_tx = self.timer_tx.clone();
                self.revert_task = Some(tokio::spawn(async move {
                    tokio::time::sleep(UPLOAD_REVERT_DELAY).await;
                    let _ = timer_tx.send(timer);
                }));
            }
        }
    }

    fn cancel_upload_revert(&mut self) {
        if let Some(task) = self.revert_task.take() {
            task.abort();
        }
    }
}
