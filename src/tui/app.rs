//! Application State
//!
//! Owns the explore dialog and runs downloads in the background.

use crate::models::ImageMetadata;
use crate::storage::StorageGateway;
use crate::tui::dialog::{DownloadRequest, ExploreDialog};
use crate::tui::event::AppAction;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Explore,
    Help,
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A download settled; carries the saved file path on success
    DownloadFinished(anyhow::Result<PathBuf>),
}

/// Main application state
pub struct App {
    // UI State
    pub view: View,
    pub should_quit: bool,
    pub scroll_offset: u16,

    pub dialog: ExploreDialog,
    pub last_saved: Option<PathBuf>,

    gateway: Arc<StorageGateway>,
    download_dir: PathBuf,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create an application exploring `document`, saving downloads to `download_dir`
    pub fn new(
        gateway: Arc<StorageGateway>,
        document: Option<ImageMetadata>,
        download_dir: PathBuf,
    ) -> Self {
        let (tx, rx) = mpsc::channel(100);

        Self {
            view: View::Explore,
            should_quit: false,
            scroll_offset: 0,
            dialog: ExploreDialog::new(true, document),
            last_saved: None,
            gateway,
            download_dir,
            event_rx: rx,
            event_tx: tx,
        }
    }

    /// Poll for async events
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next background event and apply it
    pub async fn wait_for_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Handle an async event
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DownloadFinished(result) => {
                self.dialog.finish_download();
                match result {
                    Ok(path) => {
                        info!("Image saved to {}", path.display());
                        self.last_saved = Some(path);
                    }
                    Err(e) => error!("Download failed: {:#}", e),
                }
            }
        }
    }

    /// Handle a user action
    pub async fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Close => {
                if self.view == View::Help {
                    self.view = View::Explore;
                } else {
                    self.close_dialog();
                }
            }
            AppAction::ToggleHelp => {
                self.view = match self.view {
                    View::Help => View::Explore,
                    View::Explore => View::Help,
                };
            }
            AppAction::Download => {
                if self.view == View::Explore {
                    self.start_download();
                }
            }
            AppAction::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            AppAction::ScrollDown => {
                let max = self.dialog.rows().len().saturating_sub(1) as u16;
                self.scroll_offset = (self.scroll_offset + 1).min(max);
            }
            AppAction::Tick => {}
        }
    }

    /// The dialog asked to close. This app shows nothing else, so it exits.
    fn close_dialog(&mut self) {
        self.dialog.set_open(false);
        self.should_quit = true;
    }

    fn start_download(&mut self) {
        let Some(request) = self.dialog.begin_download() else {
            return;
        };
        info!("Preparing download of {}", request.uri);

        let gateway = self.gateway.clone();
        let download_dir = self.download_dir.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = download_and_save(&gateway, &request, &download_dir).await;
            if tx.send(AppEvent::DownloadFinished(result)).await.is_err() {
                error!("Download finished after the UI went away");
            }
        });
    }
}

/// Fetch the image through the gateway and write it into `dir`.
pub async fn download_and_save(
    gateway: &StorageGateway,
    request: &DownloadRequest,
    dir: &Path,
) -> anyhow::Result<PathBuf> {
    let file_name = local_file_name(&request.file_name)?;
    let downloaded = gateway.download_object(&request.uri).await?;
    let bytes = downloaded.decode()?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;

    Ok(path)
}

/// Last path component of `name`; saves never leave the download directory.
fn local_file_name(name: &str) -> anyhow::Result<&OsStr> {
    Path::new(name)
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid download file name: {:?}", name))
}
