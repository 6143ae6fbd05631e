//! Terminal User Interface Module
//!
//! Explore dialog for a single library image, built with Ratatui.
//!
//! ```text
//! ┌──────────────────────── Image Library Explorer ───────────────────────┐
//! │      ┌ Explore image metadata ──────────────────── [Esc] ✕ ┐          │
//! │      │ ▸ Format: PNG                                        │          │
//! │      │ ▸ Aspect ratio: 16:9                                 │          │
//! │      │ ▸ In which context(s) will it be used: Social media  │          │
//! │      │ ┌────────────┐                                       │          │
//! │      │ │ Download ⤓ │                                       │          │
//! │      └─┴────────────┴───────────────────────────────────────┘          │
//! │ [d] Download [Esc] Close [F1] Help                                    │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod dialog;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, View};
pub use dialog::{DownloadStatus, ExploreDialog};
pub use event::{AppAction, EventHandler};

use crate::models::ImageMetadata;
use crate::storage::StorageGateway;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the explore dialog for `document`
pub async fn run(
    gateway: Arc<StorageGateway>,
    document: ImageMetadata,
    download_dir: PathBuf,
) -> anyhow::Result<()> {
    info!("Exploring image {}", document.image_id);

    let mut terminal = init_terminal()?;
    let mut app = App::new(gateway, Some(document), download_dir);
    let mut events = EventHandler::new(std::time::Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Apply finished downloads
        app.poll_events();

        // Ticks arrive every 100ms, so this wait also paces redraws
        match events.next().await {
            Some(AppAction::ForceQuit) | None => break,
            Some(action) => app.handle_action(action).await,
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
