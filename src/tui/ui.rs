//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::tui::app::{App, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Dialog backdrop
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_status_bar(frame, chunks[2], app);

    if app.dialog.is_open() {
        widgets::render_explore(frame, &app.dialog, app.scroll_offset);
    }

    if app.view == View::Help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled("Image Library", Theme::title()),
        Span::styled(" Explorer", Theme::text_secondary()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    frame.render_widget(title, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("[d]", Theme::shortcut_key()),
        Span::styled(" Download ", Theme::shortcut_desc()),
        Span::styled("[Esc]", Theme::shortcut_key()),
        Span::styled(" Close ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    if let Some(path) = &app.last_saved {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} Saved {}", Icons::COMPLETE, path.display()),
            Theme::success(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay
fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, area);

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        Line::from(vec![
            Span::styled("d / Enter    ", Theme::shortcut_key()),
            Span::styled("Download image", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("↑/↓          ", Theme::shortcut_key()),
            Span::styled("Scroll metadata", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Esc / q      ", Theme::shortcut_key()),
            Span::styled("Close dialog", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+Q       ", Theme::shortcut_key()),
            Span::styled("Quit application", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("F1 / ?       ", Theme::shortcut_key()),
            Span::styled("Toggle this help", Theme::text()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press Esc to close", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::models::ImageMetadata;
    use crate::storage::testing::MockStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app(document: Option<ImageMetadata>) -> App {
        let gateway = Arc::new(MockStore::new().gateway(StorageConfig::default()));
        App::new(gateway, document, ".".into())
    }

    fn document() -> ImageMetadata {
        serde_json::from_value(serde_json::json!({
            "imageID": "img-1",
            "imageGcsURI": "gs://library/img-1",
            "imageFormat": "PNG",
            "imageLabel": "",
            "imageContexts": ["social", "web"]
        }))
        .unwrap()
    }

    #[test]
    fn test_renders_visible_fields_and_button() {
        let screen = screen(&app(Some(document())));

        assert!(screen.contains("Explore image metadata"));
        assert!(screen.contains("Format: PNG"));
        assert!(screen.contains("In which context(s) will it be used: Social media, Website"));
        assert!(!screen.contains("Name:"));
        assert!(!screen.contains("Storage URI"));
        assert!(screen.contains("Download"));
    }

    #[test]
    fn test_preparing_label_is_shown() {
        let mut app = app(Some(document()));
        app.dialog.begin_download();

        assert!(screen(&app).contains("Preparing download..."));
    }

    #[test]
    fn test_no_button_without_document() {
        let screen = screen(&app(None));

        assert!(screen.contains("Explore image metadata"));
        assert!(!screen.contains("Download ⤓"));
    }
}
