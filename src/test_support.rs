// Test support utilities for both unit and integration tests

use crate::retrieval::models::{descriptors_from_response, uploaded_images_from_response};
use crate::retrieval::{ImageDescriptor, RetrievalBackend, RetrievalError, UploadedImage};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

/// A canned backend reply
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// A 200 response with this JSON body
    Json(Value),
    /// A failed request
    Failure(StatusCode),
}

/// Scripted retrieval backend
///
/// Replies are consumed in order; an exhausted script answers with a 503.
/// Every call is recorded so tests can assert on what was sent.
pub struct ScriptedBackend {
    base_url: String,
    replies: Mutex<VecDeque<ScriptedReply>>,
    searches: Mutex<Vec<String>>,
    uploads: Mutex<Vec<Vec<PathBuf>>>,
    alive: bool,
}

impl ScriptedBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            replies: Mutex::new(VecDeque::new()),
            searches: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            alive: true,
        }
    }

    /// Backend whose health check fails
    pub fn offline(base_url: &str) -> Self {
        Self {
            alive: false,
            ..Self::new(base_url)
        }
    }

    pub fn push_json(&self, body: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Json(body));
        self
    }

    pub fn push_failure(&self, status: StatusCode) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Failure(status));
        self
    }

    /// Phrases received by `search_images`, in call order
    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<Vec<PathBuf>> {
        self.uploads.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Result<Value, RetrievalError> {
        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Json(body)) => Ok(body),
            Some(ScriptedReply::Failure(status)) => Err(RetrievalError::Status(status)),
            None => Err(RetrievalError::Status(StatusCode::SERVICE_UNAVAILABLE)),
        }
    }
}

#[async_trait::async_trait]
impl RetrievalBackend for ScriptedBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn search_images(&self, phrase: &str) -> Result<Vec<ImageDescriptor>, RetrievalError> {
        self.searches.lock().unwrap().push(phrase.to_string());
        let body = self.next_reply()?;
        Ok(descriptors_from_response(&self.base_url, &body))
    }

    async fn upload_images(&self, files: &[PathBuf]) -> Result<Vec<UploadedImage>, RetrievalError> {
        self.uploads.lock().unwrap().push(files.to_vec());
        let body = self.next_reply()?;
        Ok(uploaded_images_from_response(&body))
    }

    async fn ping(&self) -> Result<(), RetrievalError> {
        if self.alive {
            Ok(())
        } else {
            Err(RetrievalError::Unhealthy("offline".to_string()))
        }
    }
}
