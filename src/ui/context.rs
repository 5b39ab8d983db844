use crate::retrieval::RetrievalBackend;
use dioxus::prelude::*;
use std::sync::Arc;

/// Services handed to the component tree at launch
#[derive(Clone)]
pub struct AppServices {
    pub backend: Arc<dyn RetrievalBackend>,
}

/// Hook to access the retrieval backend
pub fn use_retrieval_backend() -> Arc<dyn RetrievalBackend> {
    use_context::<AppServices>().backend
}
