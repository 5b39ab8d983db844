use crate::alert;
use crate::ui::use_retrieval_backend;
use crate::upload_session::UploadSession;
use dioxus::prelude::*;
use rfd::AsyncFileDialog;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// Upload page: pick local images and send them to the backend for indexing
#[component]
pub fn UploadPanel() -> Element {
    let backend = use_retrieval_backend();
    let mut upload = use_signal(UploadSession::new);

    let mut choose_files = move || {
        spawn(async move {
            let picked = AsyncFileDialog::new()
                .set_title("Choose images to index")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_files()
                .await;

            if let Some(handles) = picked {
                upload
                    .write()
                    .select(handles.iter().map(|h| h.path().to_path_buf()).collect());
            }
        });
    };

    let mut upload_files = move || {
        // Flips the busy flag before the task exists, so repeated clicks are refused
        let Some(files) = upload.write().begin() else {
            return;
        };

        let backend = backend.clone();
        spawn(async move {
            let result = backend.upload_images(&files).await;
            let failure = upload.write().finish(result);
            if let Some(message) = failure {
                alert::show_error(message).await;
            }
        });
    };

    let uploading = upload.read().is_uploading();
    let nothing_selected = upload.read().selected().is_empty();

    rsx! {
        div { class: "upload-panel",
            div { class: "upload-actions",
                button {
                    r#type: "button",
                    class: "secondary-button",
                    disabled: uploading,
                    onclick: move |_| choose_files(),
                    "Choose images"
                }
                button {
                    r#type: "button",
                    class: "search-button",
                    disabled: uploading || nothing_selected,
                    onclick: move |_| upload_files(),
                    if uploading {
                        "Uploading..."
                    } else {
                        "Upload"
                    }
                }
            }

            if !nothing_selected {
                ul { class: "file-list",
                    for path in upload.read().selected().iter() {
                        li { key: "{path.display()}", "{path.display()}" }
                    }
                }
            }

            if uploading {
                div { class: "loading",
                    div { class: "spinner" }
                    p { class: "loading__text", "Captioning and indexing..." }
                }
            }

            if !upload.read().uploaded().is_empty() {
                ul { class: "caption-list",
                    for image in upload.read().uploaded().iter() {
                        li { key: "{image.file_name}",
                            span { class: "caption-list__file", "{image.file_name}" }
                            span { class: "caption-list__text", "{image.captions}" }
                        }
                    }
                }
            }
        }
    }
}
