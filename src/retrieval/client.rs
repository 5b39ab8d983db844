use crate::config::Config;
use crate::retrieval::models::{
    descriptors_from_response, uploaded_images_from_response, HealthResponse, ImageDescriptor,
    SearchRequest, UploadedImage,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const SEARCH_PATH: &str = "search-endpoint";
const UPLOAD_PATH: &str = "upload-image";
const UPLOAD_FIELD: &str = "files";
const ALIVE_MESSAGE: &str = "alive";

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),
    #[error("Backend responded with status {0}")]
    Status(StatusCode),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Backend is not healthy: {0}")]
    Unhealthy(String),
}

/// Operations the UI needs from the retrieval service (allows scripting for tests)
#[async_trait::async_trait]
pub trait RetrievalBackend: Send + Sync {
    /// Root URL images are served from
    fn base_url(&self) -> &str;

    /// Run a text search and return normalized descriptors, in backend order
    async fn search_images(&self, phrase: &str) -> Result<Vec<ImageDescriptor>, RetrievalError>;

    /// Submit local images for captioning and indexing
    async fn upload_images(&self, files: &[PathBuf]) -> Result<Vec<UploadedImage>, RetrievalError>;

    /// Succeeds when the backend answers its health check
    async fn ping(&self) -> Result<(), RetrievalError>;
}

/// reqwest-backed client for the retrieval service
#[derive(Clone)]
pub struct HttpRetrievalClient {
    client: Client,
    base_url: String,
}

impl HttpRetrievalClient {
    pub fn new(config: &Config) -> Result<Self, RetrievalError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.backend_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl RetrievalBackend for HttpRetrievalClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn search_images(&self, phrase: &str) -> Result<Vec<ImageDescriptor>, RetrievalError> {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(RetrievalError::InvalidInput(
                "search phrase cannot be empty".to_string(),
            ));
        }

        let url = self.endpoint(SEARCH_PATH);
        debug!("Searching '{}' via {}", phrase, url);

        let response = self
            .client
            .post(&url)
            .json(&SearchRequest {
                search_phrase: phrase,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RetrievalError::Status(response.status()));
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        let images = descriptors_from_response(&self.base_url, &body);
        info!("Search '{}' returned {} images", phrase, images.len());

        Ok(images)
    }

    async fn upload_images(&self, files: &[PathBuf]) -> Result<Vec<UploadedImage>, RetrievalError> {
        if files.is_empty() {
            return Err(RetrievalError::InvalidInput(
                "no files selected for upload".to_string(),
            ));
        }

        let mut form = Form::new();
        for path in files {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    RetrievalError::InvalidInput(format!("not a file: {}", path.display()))
                })?;

            debug!("Attaching {} ({} bytes)", file_name, bytes.len());
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(image_mime_type(path))?;
            form = form.part(UPLOAD_FIELD, part);
        }

        let url = self.endpoint(UPLOAD_PATH);
        info!("Uploading {} images to {}", files.len(), url);

        let response = self.client.post(&url).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(RetrievalError::Status(response.status()));
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        Ok(uploaded_images_from_response(&body))
    }

    async fn ping(&self) -> Result<(), RetrievalError> {
        let response = self.client.get(self.endpoint("")).send().await?;
        if !response.status().is_success() {
            return Err(RetrievalError::Status(response.status()));
        }

        let health: HealthResponse = serde_json::from_str(&response.text().await?)?;
        if health.message == ALIVE_MESSAGE {
            Ok(())
        } else {
            warn!("Unexpected health message: {}", health.message);
            Err(RetrievalError::Unhealthy(health.message))
        }
    }
}

/// MIME type sent for an upload part, guessed from the extension
pub fn image_mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let config = Config::with_backend_url("http://127.0.0.1:9000/").unwrap();
        let client = HttpRetrievalClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(
            client.endpoint(SEARCH_PATH),
            "http://127.0.0.1:9000/search-endpoint"
        );
    }

    #[tokio::test]
    async fn test_blank_phrase_is_rejected_without_a_request() {
        let client = HttpRetrievalClient::new(&Config::default()).unwrap();
        let err = client.search_images("   ").await.unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let client = HttpRetrievalClient::new(&Config::default()).unwrap();
        let err = client.upload_images(&[]).await.unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidInput(_)));
    }

    #[test]
    fn test_mime_type_guessing() {
        assert_eq!(image_mime_type(Path::new("a/B.JPG")), "image/jpeg");
        assert_eq!(image_mime_type(Path::new("x.webp")), "image/webp");
        assert_eq!(image_mime_type(Path::new("notes")), "application/octet-stream");
    }
}
