//! Event Handling
//!
//! Handles keyboard and timer events for the TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Force quit without confirmation
    ForceQuit,
    /// Ask the caller to close the explore dialog
    Close,
    /// Start downloading the explored image
    Download,
    /// Toggle help view
    ToggleHelp,
    /// Scroll metadata up one line
    ScrollUp,
    /// Scroll metadata down one line
    ScrollDown,
    /// Timer tick for redraws
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Wait for the next action
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }
}

/// Map a crossterm event to an app action
fn map_event(event: Event) -> Option<AppAction> {
    match event {
        Event::Key(key) => map_key_event(key),
        _ => None,
    }
}

/// Map a key event to an app action
pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),

        (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc | KeyCode::Char('q') => Some(AppAction::Close),
            KeyCode::Enter | KeyCode::Char('d') => Some(AppAction::Download),
            KeyCode::F(1) | KeyCode::Char('?') => Some(AppAction::ToggleHelp),
            KeyCode::Up | KeyCode::Char('k') => Some(AppAction::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppAction::ScrollDown),
            _ => None,
        },

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_download_keys() {
        assert_eq!(map_key_event(key(KeyCode::Enter)), Some(AppAction::Download));
        assert_eq!(map_key_event(key(KeyCode::Char('d'))), Some(AppAction::Download));
    }

    #[test]
    fn test_close_and_quit_keys() {
        assert_eq!(map_key_event(key(KeyCode::Esc)), Some(AppAction::Close));
        assert_eq!(map_key_event(key(KeyCode::Char('q'))), Some(AppAction::Close));
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppAction::ForceQuit)
        );
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(AppAction::Quit)
        );
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        assert_eq!(map_key_event(key(KeyCode::Char('z'))), None);
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::ALT)),
            None
        );
    }
}
