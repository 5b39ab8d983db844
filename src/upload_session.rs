use crate::retrieval::{RetrievalError, UploadedImage};
use std::path::PathBuf;
use tracing::{error, info};

pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload images. Please try again.";

/// Files picked for upload and the captions of the last finished upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSession {
    selected: Vec<PathBuf>,
    uploaded: Vec<UploadedImage>,
    is_uploading: bool,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[PathBuf] {
        &self.selected
    }

    pub fn uploaded(&self) -> &[UploadedImage] {
        &self.uploaded
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    /// Replace the picked files; ignored while an upload is running
    pub fn select(&mut self, files: Vec<PathBuf>) {
        if self.is_uploading {
            return;
        }
        self.selected = files;
        self.uploaded.clear();
    }

    /// Mark the upload as running and hand out the files to send.
    ///
    /// Returns `None` when nothing is selected or an upload is already running.
    pub fn begin(&mut self) -> Option<Vec<PathBuf>> {
        if self.is_uploading || self.selected.is_empty() {
            return None;
        }
        self.is_uploading = true;
        Some(self.selected.clone())
    }

    /// Record the backend's answer; returns the message to alert on failure
    pub fn finish(
        &mut self,
        result: Result<Vec<UploadedImage>, RetrievalError>,
    ) -> Option<&'static str> {
        self.is_uploading = false;
        match result {
            Ok(images) => {
                info!("Backend captioned {} uploaded images", images.len());
                self.uploaded = images;
                self.selected.clear();
                None
            }
            Err(e) => {
                error!("Upload error: {}", e);
                Some(UPLOAD_FAILED_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn files() -> Vec<PathBuf> {
        vec![PathBuf::from("beach.jpg"), PathBuf::from("cat.png")]
    }

    #[test]
    fn test_nothing_selected_does_not_start() {
        let mut session = UploadSession::new();
        assert_eq!(session.begin(), None);
        assert!(!session.is_uploading());
    }

    #[test]
    fn test_second_begin_is_refused_while_running() {
        let mut session = UploadSession::new();
        session.select(files());

        assert_eq!(session.begin(), Some(files()));
        assert!(session.is_uploading());
        assert_eq!(session.begin(), None);

        session.select(vec![PathBuf::from("other.jpg")]);
        assert_eq!(session.selected(), files().as_slice());
    }

    #[test]
    fn test_success_keeps_captions_and_clears_selection() {
        let mut session = UploadSession::new();
        session.select(files());
        session.begin().unwrap();

        let captions = vec![UploadedImage {
            file_name: "beach.jpg".into(),
            captions: "sand".into(),
        }];
        assert_eq!(session.finish(Ok(captions.clone())), None);
        assert!(!session.is_uploading());
        assert!(session.selected().is_empty());
        assert_eq!(session.uploaded(), captions.as_slice());
    }

    #[test]
    fn test_failure_keeps_selection_for_another_try() {
        let mut session = UploadSession::new();
        session.select(files());
        session.begin().unwrap();

        let message = session.finish(Err(RetrievalError::Status(StatusCode::BAD_GATEWAY)));
        assert_eq!(message, Some(UPLOAD_FAILED_MESSAGE));
        assert!(!session.is_uploading());
        assert_eq!(session.begin(), Some(files()));
    }
}
