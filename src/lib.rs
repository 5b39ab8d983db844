// Library exports for integration tests and reusable components

// Internal modules needed for compilation (hidden from docs)
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod ui;

// Re-export the launch context at crate root for easier access
pub use ui::AppServices;

pub mod alert;
pub mod retrieval;
pub mod search_session;
pub mod upload_session;

// Test support (unit tests and the test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;
