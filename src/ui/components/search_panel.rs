use crate::alert;
use crate::search_session::{SearchDisplay, SearchOutcome, SearchSession};
use crate::ui::components::ImageGrid;
use crate::ui::use_retrieval_backend;
use dioxus::core::Task;
use dioxus::prelude::*;
use tracing::debug;

/// Search page: text input, loading indicator and result grid
#[component]
pub fn SearchPanel() -> Element {
    let session = use_signal(SearchSession::new);

    rsx! {
        SearchArea { session }
    }
}

/// Form and result area driven by an existing session
#[component]
pub fn SearchArea(session: Signal<SearchSession>) -> Element {
    let backend = use_retrieval_backend();
    let mut in_flight = use_signal(|| None::<Task>);

    let mut submit_search = move || {
        let Some(submission) = session.write().begin() else {
            return;
        };

        // Only the newest submission may run
        if let Some(previous) = in_flight.write().take() {
            previous.cancel();
        }

        let backend = backend.clone();
        let task = spawn(async move {
            let result = backend.search_images(&submission.phrase).await;
            let outcome = session.write().finish(submission.seq, result);
            if outcome.settles_current() {
                // Released before the alert blocks, so Cancel cannot reach this task
                in_flight.set(None);
            }
            if let SearchOutcome::Failed { message } = outcome {
                alert::show_error(message).await;
            }
        });
        in_flight.set(Some(task));
    };

    let mut cancel_search = move || {
        if let Some(task) = in_flight.write().take() {
            task.cancel();
        }
        if session.write().cancel() {
            debug!("In-flight search abandoned by user");
        }
    };

    let query = session.read().query().to_string();
    let loading = session.read().is_loading();
    let input_locked = session.read().input_disabled();
    let display = session.read().display();
    let results = session.read().results().to_vec();

    let result_area = match display {
        SearchDisplay::Loading => rsx! {
            div { class: "loading",
                div { class: "spinner" }
                p { class: "loading__text", "Loading results..." }
            }
        },
        SearchDisplay::Results => rsx! {
            ImageGrid { images: results }
        },
        SearchDisplay::NoResults => rsx! {
            ImageGrid {}
        },
        SearchDisplay::Idle => rsx! {},
    };

    rsx! {
        div { class: "search-panel",
            form {
                class: "search-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_search();
                },
                input {
                    class: "search-input",
                    placeholder: "Search images...",
                    value: "{query}",
                    disabled: input_locked,
                    oninput: move |evt| session.write().set_query(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "search-button",
                    disabled: input_locked,
                    if loading {
                        "Searching..."
                    } else {
                        "Search"
                    }
                }
                if loading {
                    button {
                        r#type: "button",
                        class: "cancel-button",
                        onclick: move |_| cancel_search(),
                        "Cancel"
                    }
                }
            }

            {result_area}
        }
    }
}
