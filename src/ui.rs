use ratatui::{prelude::*, widgets::*};

use crate::models::{LogEntry, RequestStatus, Tone, UploadStatus};

/// Workflow status color
pub fn status_color(status: RequestStatus) -> Color {
    match status {
        RequestStatus::Idle => Color::DarkGray,
        RequestStatus::Loading => Color::Cyan,
        RequestStatus::Success => Color::Green,
        RequestStatus::Error => Color::Red,
    }
}

/// Label and color for the upload control
pub fn upload_badge(status: UploadStatus) -> (&'static str, Color) {
    match status {
        UploadStatus::Idle => ("Upload PDF (u)", Color::Gray),
        UploadStatus::Uploading => ("Uploading...", Color::Yellow),
        UploadStatus::Done => ("Ingested!", Color::Green),
    }
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Technical => Color::Cyan,
        Tone::Marketing => Color::Magenta,
        Tone::Summary => Color::Blue,
    }
}

/// Failure lines stand out from the rest of the system log
pub fn log_line(entry: &LogEntry) -> Line<'static> {
    let lower = entry.message.to_ascii_lowercase();
    let color = if lower.contains("error") || lower.contains("failed") {
        Color::Red
    } else {
        Color::Green
    };
    Line::from(Span::styled(entry.to_string(), Style::default().fg(color)))
}

/// Small bordered card showing a number with a caption beneath it
pub fn stat_card<'a>(value: u64, caption: &'a str, accent: Color) -> Paragraph<'a> {
    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(accent).bold(),
        )),
        Line::from(Span::styled(caption, Style::default().fg(Color::DarkGray))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// First visible line of a tail-anchored pane: `scroll_back` lines above the
/// window that ends on the newest line
pub fn tail_scroll_top(total_lines: usize, viewport_height: u16, scroll_back: u16) -> u16 {
    let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
    total
        .saturating_sub(viewport_height)
        .saturating_sub(scroll_back)
}

/// Terminal cursor position for a byte offset into multi-line text drawn
/// inside a bordered block at `area`
pub fn cursor_in_text(text: &str, byte_pos: usize, area: Rect) -> Position {
    let before = &text[..byte_pos.min(text.len())];
    let row = before.matches('\n').count() as u16;
    let col = before
        .rsplit('\n')
        .next()
        .map(|line| line.chars().count())
        .unwrap_or(0) as u16;

    let max_x = area.x + area.width.saturating_sub(2);
    let max_y = area.y + area.height.saturating_sub(2);
    Position::new(
        (area.x + 1 + col).min(max_x),
        (area.y + 1 + row).min(max_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_lines_are_red() {
        let line = log_line(&LogEntry::new("Error: Failed to contact agents."));
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
        let line = log_line(&LogEntry::new("Generation Complete! Revisions: 2"));
        assert_eq!(line.spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn test_tail_scroll_follows_newest_line() {
        // 12 lines in an 8-row pane: pinned to the tail shows lines 4..12
        assert_eq!(tail_scroll_top(12, 8, 0), 4);
        assert_eq!(tail_scroll_top(12, 8, 3), 1);
        assert_eq!(tail_scroll_top(12, 8, 11), 0);
        // Short logs start at the top
        assert_eq!(tail_scroll_top(3, 8, 0), 0);
    }

    #[test]
    fn test_cursor_tracks_lines() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(cursor_in_text("abc", 3, area), Position::new(4, 1));
        assert_eq!(cursor_in_text("ab\ncd", 4, area), Position::new(2, 2));
    }

    #[test]
    fn test_cursor_clamped_to_block() {
        let area = Rect::new(0, 0, 5, 3);
        assert_eq!(cursor_in_text("abcdefgh", 8, area), Position::new(3, 1));
    }
}
