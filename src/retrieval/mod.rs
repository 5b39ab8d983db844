pub mod client;
pub mod models;

pub use client::{HttpRetrievalClient, RetrievalBackend, RetrievalError};
pub use models::{ImageDescriptor, ImageSource, UploadedImage};
