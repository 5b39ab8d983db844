use crate::ui::{use_retrieval_backend, Route};
use dioxus::prelude::*;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Checking,
    Online,
    Offline,
}

impl BackendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Checking => "Checking backend...",
            BackendStatus::Online => "Backend online",
            BackendStatus::Offline => "Backend offline",
        }
    }

    fn class(&self) -> &'static str {
        match self {
            BackendStatus::Checking => "backend-status",
            BackendStatus::Online => "backend-status online",
            BackendStatus::Offline => "backend-status offline",
        }
    }
}

/// Shared navbar component.
#[component]
pub fn Navbar() -> Element {
    let backend = use_retrieval_backend();
    let backend_url = backend.base_url().to_string();
    let mut status = use_signal(|| BackendStatus::Checking);

    // Probe the backend once on mount
    use_effect(move || {
        let backend = backend.clone();
        spawn(async move {
            match backend.ping().await {
                Ok(()) => {
                    debug!("Backend at {} is alive", backend.base_url());
                    status.set(BackendStatus::Online);
                }
                Err(e) => {
                    warn!("Backend at {} unreachable: {}", backend.base_url(), e);
                    status.set(BackendStatus::Offline);
                }
            }
        });
    });

    let current = status();

    rsx! {
        nav { class: "navbar",
            Link { to: Route::SearchPanel {}, class: "navbar__link", "Search" }
            Link { to: Route::UploadPanel {}, class: "navbar__link", "Upload" }
            span { class: current.class(), title: "{backend_url}", {current.label()} }
        }

        Outlet::<Route> {}
    }
}
