//! Search lifecycle owned by the search panel, independent of the UI toolkit.
//!
//! Every submission gets a sequence number. Only the completion carrying the
//! latest number is applied; anything older was superseded or cancelled and
//! is dropped without touching state.

use crate::retrieval::{ImageDescriptor, RetrievalError};
use tracing::{debug, error, info};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch images. Please try again.";

/// A search that has been started and is waiting for the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSubmission {
    pub seq: u64,
    pub phrase: String,
}

/// What happened when a completion was handed back to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced the previous ones
    Applied { count: usize },
    /// The request failed; the message should be shown to the user once
    Failed { message: &'static str },
    /// A newer submission or a cancel happened first; nothing changed
    Superseded,
}

impl SearchOutcome {
    /// True when the completion belonged to the current submission, which no longer needs its task slot
    pub fn settles_current(&self) -> bool {
        !matches!(self, SearchOutcome::Superseded)
    }
}

/// What the result area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDisplay {
    Idle,
    Loading,
    Results,
    NoResults,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    query: String,
    results: Vec<ImageDescriptor>,
    is_loading: bool,
    latest_seq: u64,
    attempted: bool,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn results(&self) -> &[ImageDescriptor] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The search input is locked exactly while a request is outstanding
    pub fn input_disabled(&self) -> bool {
        self.is_loading
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Start a search for the current query.
    ///
    /// Returns `None` without changing anything when the trimmed query is empty.
    pub fn begin(&mut self) -> Option<SearchSubmission> {
        let phrase = self.query.trim();
        if phrase.is_empty() {
            return None;
        }
        let phrase = phrase.to_string();

        self.latest_seq += 1;
        self.is_loading = true;
        self.attempted = true;
        self.results.clear();

        debug!("Search #{} started for '{}'", self.latest_seq, phrase);
        Some(SearchSubmission {
            seq: self.latest_seq,
            phrase,
        })
    }

    /// Apply the completion of submission `seq`
    pub fn finish(
        &mut self,
        seq: u64,
        result: Result<Vec<ImageDescriptor>, RetrievalError>,
    ) -> SearchOutcome {
        if seq != self.latest_seq || !self.is_loading {
            debug!(
                "Dropping completion of search #{} (latest is #{})",
                seq, self.latest_seq
            );
            return SearchOutcome::Superseded;
        }

        self.is_loading = false;
        match result {
            Ok(images) => {
                info!("Search #{} finished with {} images", seq, images.len());
                let count = images.len();
                self.results = images;
                SearchOutcome::Applied { count }
            }
            Err(e) => {
                error!("Search error: {}", e);
                self.results.clear();
                SearchOutcome::Failed {
                    message: SEARCH_FAILED_MESSAGE,
                }
            }
        }
    }

    /// Abandon the in-flight search, if any. Its completion will be dropped.
    pub fn cancel(&mut self) -> bool {
        if !self.is_loading {
            return false;
        }

        info!("Search #{} cancelled", self.latest_seq);
        self.latest_seq += 1;
        self.is_loading = false;
        // A cancelled search never produced an answer to report on
        self.attempted = false;
        true
    }

    pub fn display(&self) -> SearchDisplay {
        if self.is_loading {
            SearchDisplay::Loading
        } else if !self.results.is_empty() {
            SearchDisplay::Results
        } else if self.attempted && !self.query.is_empty() {
            SearchDisplay::NoResults
        } else {
            SearchDisplay::Idle
        }
    }
}
