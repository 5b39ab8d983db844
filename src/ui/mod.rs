pub mod app;
pub mod components;
pub mod context;

pub use app::*;
pub use components::*;
pub use context::{use_retrieval_backend, AppServices};

// Re-export constants from app module
pub use app::MAIN_CSS;
