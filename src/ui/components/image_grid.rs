use crate::retrieval::ImageDescriptor;
use dioxus::prelude::*;

pub const NO_IMAGES_MESSAGE: &str = "No images found. Try searching something else.";

/// Responsive card grid for a list of images.
///
/// Renders the empty-state message instead of an empty grid when there is
/// nothing to show.
#[component]
pub fn ImageGrid(images: Option<Vec<ImageDescriptor>>) -> Element {
    let images = images.unwrap_or_default();

    if images.is_empty() {
        return rsx! {
            p { class: "empty-state", "{NO_IMAGES_MESSAGE}" }
        };
    }

    rsx! {
        div { class: "image-grid",
            for (index, image) in images.into_iter().enumerate() {
                ImageCard { key: "{index}", image }
            }
        }
    }
}

/// Single image with its caption
#[component]
pub fn ImageCard(image: ImageDescriptor) -> Element {
    let mut hovered = use_signal(|| false);

    rsx! {
        div {
            class: if hovered() { "image-card hovered" } else { "image-card" },
            onmouseenter: move |_| hovered.set(true),
            onmouseleave: move |_| hovered.set(false),
            img {
                class: "image-card__img",
                src: "{image.url}",
                alt: "{image.name}",
            }
            div { class: "image-card__caption", "{image.name}" }
        }
    }
}
