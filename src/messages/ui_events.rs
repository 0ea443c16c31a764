//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Topic editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Newline,
    Backspace,
    CursorLeft,
    CursorRight,

    // Generation workflow
    Generate,
    CycleTone,
    CheckHealth,

    // Knowledge base upload
    OpenUploadInput,
    UploadPathChar(char),
    UploadPathBackspace,
    UploadPathAutocomplete,
    SubmitUpload,
    CancelUploadInput,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focused panel (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Topic,
    Logs,
    Document,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Topic => Panel::Logs,
            Panel::Logs => Panel::Document,
            Panel::Document => Panel::Topic,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Topic => Panel::Document,
            Panel::Logs => Panel::Topic,
            Panel::Document => Panel::Logs,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    show_upload_input: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if show_upload_input {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelUploadInput),
            KeyCode::Enter => Some(UiEvent::SubmitUpload),
            KeyCode::Tab => Some(UiEvent::UploadPathAutocomplete),
            KeyCode::Backspace => Some(UiEvent::UploadPathBackspace),
            KeyCode::Char(c) => Some(UiEvent::UploadPathChar(c)),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') | KeyCode::Enter if active_panel == Panel::Topic => {
                Some(UiEvent::StartEditing)
            }
            KeyCode::Char('g') | KeyCode::Char('s') => Some(UiEvent::Generate),
            KeyCode::Char('t') => Some(UiEvent::CycleTone),
            KeyCode::Char('u') => Some(UiEvent::OpenUploadInput),
            KeyCode::Char('h') => Some(UiEvent::CheckHealth),
            KeyCode::Up | KeyCode::Char('k') if active_panel != Panel::Topic => {
                Some(UiEvent::ScrollUp)
            }
            KeyCode::Down | KeyCode::Char('j') if active_panel != Panel::Topic => {
                Some(UiEvent::ScrollDown)
            }
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => Some(UiEvent::Newline),
            KeyCode::Enter => Some(UiEvent::Generate),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(key, Panel::Topic, InputMode::Editing, false, true),
            Some(UiEvent::Quit)
        );
    }

    #[test]
    fn test_editing_captures_letters() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), Panel::Topic, InputMode::Editing, false, false);
        assert_eq!(event, Some(UiEvent::CharInput('q')));
    }

    #[test]
    fn test_enter_while_editing_generates() {
        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Topic, InputMode::Editing, false, false);
        assert_eq!(event, Some(UiEvent::Generate));

        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        let event = key_to_ui_event(alt_enter, Panel::Topic, InputMode::Editing, false, false);
        assert_eq!(event, Some(UiEvent::Newline));
    }

    #[test]
    fn test_upload_prompt_takes_precedence() {
        let event = key_to_ui_event(press(KeyCode::Char('g')), Panel::Topic, InputMode::Normal, false, true);
        assert_eq!(event, Some(UiEvent::UploadPathChar('g')));
        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Topic, InputMode::Normal, false, true);
        assert_eq!(event, Some(UiEvent::SubmitUpload));
    }

    #[test]
    fn test_scroll_only_outside_topic() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Down), Panel::Topic, InputMode::Normal, false, false),
            None
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Down), Panel::Logs, InputMode::Normal, false, false),
            Some(UiEvent::ScrollDown)
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char('g'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, Panel::Topic, InputMode::Normal, false, false), None);
    }
}
