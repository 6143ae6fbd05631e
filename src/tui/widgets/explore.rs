//! Explore Widget
//!
//! Modal listing the image's metadata with a download button.

use crate::tui::dialog::{DownloadStatus, ExploreDialog, DIALOG_TITLE};
use crate::tui::theme::{Icons, Theme};
use crate::tui::ui::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the explore modal
pub fn render_explore(frame: &mut Frame, dialog: &ExploreDialog, scroll_offset: u16) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", DIALOG_TITLE), Theme::title()))
        .title(
            Title::from(Span::styled(format!(" [Esc] {} ", Icons::CLOSE), Theme::shortcut_desc()))
                .alignment(Alignment::Right),
        )
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(3),    // Metadata rows
            Constraint::Length(3), // Download button
        ])
        .split(inner);

    render_rows(frame, chunks[0], dialog, scroll_offset);
    if dialog.document().is_some() {
        render_button(frame, chunks[1], dialog.status());
    }
}

/// Render one `Label: value` line per visible field
fn render_rows(frame: &mut Frame, area: Rect, dialog: &ExploreDialog, scroll_offset: u16) {
    let lines: Vec<Line> = dialog
        .rows()
        .into_iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(format!("{} ", Icons::ARROW), Theme::title()),
                Span::styled(format!("{}: ", row.label), Theme::heading()),
                Span::styled(row.value, Theme::text_secondary()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset, 0));
    frame.render_widget(paragraph, area);
}

/// Render the download button
fn render_button(frame: &mut Frame, area: Rect, status: DownloadStatus) {
    let (style, border) = match status {
        DownloadStatus::Idle => (Theme::button(), Theme::border_focused()),
        DownloadStatus::Preparing => (Theme::button_disabled(), Theme::border()),
    };

    let label = format!(" {} {} ", status.label(), Icons::DOWNLOAD);
    let width = (label.chars().count() as u16 + 2).min(area.width);
    let button_area = Rect { width, ..area };

    let button = Paragraph::new(Line::from(Span::styled(label, style))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(button, button_area);
}
