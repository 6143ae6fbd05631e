//! Explore Dialog State
//!
//! Modal view over one image's metadata with a single download action.
//! At most one download is in flight per dialog: activation is ignored while
//! a download is being prepared. Opening and closing are left to the owner.

use crate::metadata::{explore_rows, ExploreRow};
use crate::models::ImageMetadata;

pub const DIALOG_TITLE: &str = "Explore image metadata";

/// Download button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadStatus {
    #[default]
    Idle,
    Preparing,
}

impl DownloadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DownloadStatus::Idle => "Download",
            DownloadStatus::Preparing => "Preparing download...",
        }
    }
}

/// What to fetch and the file name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub uri: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExploreDialog {
    open: bool,
    document: Option<ImageMetadata>,
    status: DownloadStatus,
}

impl ExploreDialog {
    pub fn new(open: bool, document: Option<ImageMetadata>) -> Self {
        Self {
            open,
            document,
            status: DownloadStatus::Idle,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn document(&self) -> Option<&ImageMetadata> {
        self.document.as_ref()
    }

    pub fn set_document(&mut self, document: Option<ImageMetadata>) {
        self.document = document;
    }

    pub fn status(&self) -> DownloadStatus {
        self.status
    }

    /// Whether the download button is enabled.
    pub fn can_download(&self) -> bool {
        self.document.is_some() && self.status == DownloadStatus::Idle
    }

    pub fn rows(&self) -> Vec<ExploreRow> {
        self.document.as_ref().map(explore_rows).unwrap_or_default()
    }

    /// Switch to "Preparing download..." and hand back what to fetch.
    /// Returns `None` when there is no document or a download is running.
    pub fn begin_download(&mut self) -> Option<DownloadRequest> {
        if !self.can_download() {
            return None;
        }
        let document = self.document.as_ref()?;
        let request = DownloadRequest {
            uri: document.image_gcs_uri.clone(),
            file_name: document.download_file_name(),
        };
        self.status = DownloadStatus::Preparing;
        Some(request)
    }

    /// Reset the button once the download settled, whatever the outcome.
    pub fn finish_download(&mut self) {
        self.status = DownloadStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn document() -> ImageMetadata {
        ImageMetadata {
            image_id: "img-9".to_string(),
            image_gcs_uri: "gs://library/img-9".to_string(),
            image_format: "PNG".to_string(),
            fields: BTreeMap::new(),
        }
    }

    #[test]
    fn test_begin_download_switches_label() {
        let mut dialog = ExploreDialog::new(true, Some(document()));
        assert_eq!(dialog.status().label(), "Download");

        let request = dialog.begin_download().unwrap();
        assert_eq!(request.uri, "gs://library/img-9");
        assert_eq!(request.file_name, "img-9.png");
        assert_eq!(dialog.status().label(), "Preparing download...");
        assert!(!dialog.can_download());
    }

    #[test]
    fn test_second_activation_is_ignored_while_preparing() {
        let mut dialog = ExploreDialog::new(true, Some(document()));
        assert!(dialog.begin_download().is_some());
        assert!(dialog.begin_download().is_none());

        dialog.finish_download();
        assert_eq!(dialog.status(), DownloadStatus::Idle);
        assert!(dialog.begin_download().is_some());
    }

    #[test]
    fn test_no_document_means_no_download() {
        let mut dialog = ExploreDialog::new(true, None);
        assert!(!dialog.can_download());
        assert!(dialog.begin_download().is_none());
        assert!(dialog.rows().is_empty());
        assert_eq!(dialog.status(), DownloadStatus::Idle);
    }
}
