pub mod fake_backend;

pub use fake_backend::{spawn_fake_backend, unreachable_backend_url, FakeBackend, FakeReply};

/// Initialize tracing for tests with proper test output handling
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
