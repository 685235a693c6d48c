//! Debounced search box: keystrokes in, applied catalog pages out.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use bundlepick_search::{PageOutcome, PageRequest, PageResponse};

const KEY_BUFFER: usize = 32;
const RESPONSE_BUFFER: usize = 8;

/// What [`PickerSession::next_search_event`](crate::PickerSession::next_search_event)
/// did with the next pipeline event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Typed text settled and a page-1 fetch was started for it.
    Fetching(PageRequest),
    /// A fetch finished and was applied (or dropped as stale).
    Applied(PageOutcome),
}

/// Channels and debouncer task behind one search box.
///
/// Created by [`PickerSession::spawn_search_pipeline`](crate::PickerSession::spawn_search_pipeline).
/// Fetches are started and applied by the session, so request sequencing
/// stays on the session's thread.
pub struct SearchPipeline {
    keys: Option<mpsc::Sender<String>>,
    pub(crate) settled: mpsc::Receiver<String>,
    pub(crate) responses_tx: mpsc::Sender<PageResponse>,
    pub(crate) responses: mpsc::Receiver<PageResponse>,
    pub(crate) input_closed: bool,
    pub(crate) in_flight: usize,
    debouncer: JoinHandle<()>,
}

impl SearchPipeline {
    pub(crate) fn new(
        keys: mpsc::Sender<String>,
        settled: mpsc::Receiver<String>,
        debouncer: JoinHandle<()>,
    ) -> Self {
        let (responses_tx, responses) = mpsc::channel(RESPONSE_BUFFER);
        Self {
            keys: Some(keys),
            settled,
            responses_tx,
            responses,
            input_closed: false,
            in_flight: 0,
            debouncer,
        }
    }

    pub(crate) fn key_channel() -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
        mpsc::channel(KEY_BUFFER)
    }

    /// Feed the current search box text. Returns `false` once input is closed.
    pub async fn type_text(&self, text: impl Into<String>) -> bool {
        match &self.keys {
            Some(keys) => keys.send(text.into()).await.is_ok(),
            None => false,
        }
    }

    /// Stop accepting text. A value still waiting for its quiet period is
    /// flushed; events keep coming until every started fetch is applied.
    pub fn close_input(&mut self) {
        self.keys = None;
    }

    /// Fetches started but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.debouncer.abort();
    }
}
