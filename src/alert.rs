use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};
use tracing::debug;

const ALERT_TITLE: &str = "Image Retriever";

/// Show a modal error dialog and wait until the user dismisses it
pub async fn show_error(message: &str) {
    debug!("Showing alert: {}", message);
    AsyncMessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(ALERT_TITLE)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}
