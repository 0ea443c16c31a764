//! DocuForge - actor-based terminal client for the documentation engine
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use docuforge_tui::app::{AppActor, AppState};
use docuforge_tui::config::Settings;
use docuforge_tui::constants::{APP_NAME, APP_TAGLINE, APP_VERSION, LOG_FILE_NAME};
use docuforge_tui::headless;
use docuforge_tui::messages::ui_events::key_to_ui_event;
use docuforge_tui::messages::{InputMode, NetworkCommand, NetworkResponse, Panel, RenderState, UiEvent};
use docuforge_tui::models::{RequestStatus, Tone};
use docuforge_tui::network::{ApiClient, NetworkActor};
use docuforge_tui::ui::{
    centered_rect, cursor_in_text, log_line, stat_card, status_color, tail_scroll_top, tone_color,
    upload_badge,
};

#[derive(Parser, Debug)]
#[command(name = "docuforge", version, about = APP_TAGLINE)]
struct Cli {
    /// Backend address (overrides config file and DOCUFORGE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Writing tone: technical, marketing or summary
    #[arg(long, global = true)]
    tone: Option<Tone>,
    /// Config file (default: ~/.docuforge/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the generation workflow for a topic and print the result
    Generate { topic: String },
    /// Upload a document into the knowledge base
    Ingest { path: PathBuf },
    /// Check that the backend is reachable
    Health,
}

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(url) = cli.api_url {
        settings.api_url = url;
    }
    if let Some(tone) = cli.tone {
        settings.tone = tone;
    }

    let client = ApiClient::new(&settings);

    match cli.command {
        Some(command) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(io::stderr)
                .init();
            let mut stdout = io::stdout();
            match command {
                Command::Generate { topic } => {
                    headless::generate(&client, &topic, settings.tone, &mut stdout).await
                }
                Command::Ingest { path } => headless::ingest(&client, &path, &mut stdout).await,
                Command::Health => headless::health(&client, &mut stdout).await,
            }
        }
        None => run_tui(settings, client).await,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn run_tui(settings: Settings, client: ApiClient) -> anyhow::Result<()> {
    // The terminal belongs to ratatui, so trace logs go to a file
    let file_appender = tracing_appender::rolling::never(&settings.log_dir, LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(api_url = %client.base_url(), tone = %settings.tone, "Starting {} {}", APP_NAME, APP_VERSION);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    let app_actor = AppActor::new(AppState::new(&settings), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down {}", APP_NAME);
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.show_upload_input,
                ) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[1]);

    draw_controls(f, state, columns[0]);
    draw_output(f, state, columns[1]);
    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }

    if state.show_upload_input {
        draw_upload_input_popup(f, state, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::LightBlue).bold()),
        Span::styled(APP_TAGLINE, Style::default().fg(Color::Gray)),
    ]);
    let backend = Line::from(vec![
        Span::styled(" backend ", Style::default().fg(Color::DarkGray)),
        Span::raw(state.api_url.as_str()),
        Span::styled("  tone ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.tone.as_str(), Style::default().fg(tone_color(state.tone)).bold()),
    ]);

    let header = Paragraph::new(vec![title, backend])
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn focus_style(state: &RenderState, panel: Panel) -> Style {
    if state.active_panel != panel {
        Style::default()
    } else if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn draw_controls(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Topic
            Constraint::Length(3), // Generate + upload buttons
            Constraint::Min(5),    // System logs
        ])
        .split(area);

    // Topic
    let topic_block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Topic))
        .title(" Topic / Query ");
    let topic = if state.topic.is_empty() && state.input_mode == InputMode::Normal {
        Paragraph::new(Span::styled(
            "e.g. How do I install the HMP155 sensor?",
            Style::default().fg(Color::DarkGray).italic(),
        ))
    } else {
        Paragraph::new(state.topic.as_str())
    };
    f.render_widget(topic.block(topic_block).wrap(Wrap { trim: false }), chunks[0]);

    if state.active_panel == Panel::Topic && state.input_mode == InputMode::Editing {
        f.set_cursor_position(cursor_in_text(&state.topic, state.cursor_position, chunks[0]));
    }

    // Buttons
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let (generate_label, generate_style) = if state.status == RequestStatus::Loading {
        (" Generating... ", Style::default().fg(Color::Cyan))
    } else if state.can_generate() {
        (" Generate Draft (g) ", Style::default().fg(Color::Black).bg(Color::Cyan).bold())
    } else {
        (" Generate Draft (g) ", Style::default().fg(Color::DarkGray))
    };
    f.render_widget(
        Paragraph::new(Span::styled(generate_label, generate_style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        buttons[0],
    );

    let (upload_label, upload_color) = upload_badge(state.upload_status);
    let upload_title = state
        .selected_file
        .as_deref()
        .map(|name| format!(" {} ", name))
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(Span::styled(upload_label, Style::default().fg(upload_color)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(upload_title)),
        buttons[1],
    );

    // System logs
    let logs_block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Logs))
        .title(" System Logs ");
    let lines: Vec<Line> = if state.logs.is_empty() {
        vec![Line::from(Span::styled(
            "Ready...",
            Style::default().fg(Color::DarkGray).italic(),
        ))]
    } else {
        state.logs.iter().map(log_line).collect()
    };
    let top = tail_scroll_top(
        lines.len(),
        chunks[2].height.saturating_sub(2),
        state.log_scroll_back,
    );
    let logs = Paragraph::new(lines)
        .block(logs_block)
        .wrap(Wrap { trim: false })
        .scroll((top, 0));
    f.render_widget(logs, chunks[2]);
}

fn draw_output(f: &mut Frame, state: &RenderState, area: Rect) {
    match (&state.status, &state.result) {
        (RequestStatus::Success, Some(result)) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4), // Stats
                    Constraint::Min(5),    // Document
                    Constraint::Length(4), // Critique
                ])
                .split(area);

            let stats = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[0]);
            f.render_widget(stat_card(result.revisions, "Revisions Made", Color::Green), stats[0]);
            f.render_widget(stat_card(result.used_context, "Sources Cited", Color::Yellow), stats[1]);

            let document = Paragraph::new(result.final_document.as_str())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(focus_style(state, Panel::Document))
                        .title(" Draft Output "),
                )
                .wrap(Wrap { trim: false })
                .scroll((state.document_scroll, 0));
            f.render_widget(document, chunks[1]);

            let critique = Paragraph::new(Span::styled(
                format!("\"{}\"", result.final_critique),
                Style::default().fg(Color::Gray).italic(),
            ))
            .block(Block::default().borders(Borders::ALL).title(" Final Editor's Note "))
            .wrap(Wrap { trim: true });
            f.render_widget(critique, chunks[2]);
        }
        (status, _) => {
            let message = match status {
                RequestStatus::Loading => "Agents are drafting, reviewing and revising...",
                RequestStatus::Error => "The generation workflow failed. See System Logs.",
                _ => "Enter a topic to start the multi-agent workflow.",
            };
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(message, Style::default().fg(status_color(*status)))),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            f.render_widget(placeholder, area);
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hint = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Enter:generate | Alt+Enter:newline | arrows:move "
    } else {
        " Tab:panel | e:edit | g:generate | t:tone | u:upload | h:health | ?:help | q:quit "
    };
    let bar = Line::from(vec![
        Span::styled(
            format!(" {} ", state.status.as_str()),
            Style::default().fg(Color::Black).bg(status_color(state.status)),
        ),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(bar), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 DOCUFORGE - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Scroll logs / document

 REQUEST
   e / Enter          Edit topic
   g / s              Generate draft
   t                  Cycle tone (technical/marketing/summary)
   h                  Check backend health

 EDITING
   Enter              Generate draft
   Alt+Enter          New line
   Esc                Stop editing

 KNOWLEDGE BASE
   u                  Upload a PDF (Tab completes paths)

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_upload_input_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Upload to Knowledge Base (Enter to upload, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    let content = if state.upload_path_input.is_empty() {
        "Enter a file path...\n\nExample: ~/manuals/HMP155.pdf"
    } else {
        state.upload_path_input.as_str()
    };

    let input = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);
}
