//! Picker session: modal, search, selection and bundle in one place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use bundlepick_bundle::{BundleConfig, BundleList};
use bundlepick_catalog::{Product, SelectionStore};
use bundlepick_core::{DomainResult, ProductId, VariantId};
use bundlepick_search::{
    CatalogSource, PageOutcome, PageRequest, PageResponse, SearchConfig, SearchState,
    spawn_debouncer,
};

use crate::pipeline::{PipelineEvent, SearchPipeline};

/// State behind one bundle editor.
///
/// All mutation happens on the caller's thread. Fetches are either awaited in
/// place ([`search`](Self::search), [`load_more`](Self::load_more)) or spawned
/// with [`spawn_fetch`](Self::spawn_fetch) and applied later through
/// [`complete`](Self::complete), in which case stale responses are dropped.
pub struct PickerSession<S> {
    source: Arc<S>,
    store: SelectionStore,
    search: SearchState,
    bundle: BundleList,
    debounce: Duration,
    modal_open: bool,
    loaded: bool,
}

impl<S> PickerSession<S>
where
    S: CatalogSource + 'static,
{
    pub fn new(source: Arc<S>, search: &SearchConfig, bundle: BundleConfig) -> Self {
        Self {
            source,
            store: SelectionStore::new(),
            search: SearchState::new(search.page_size),
            bundle: BundleList::new(bundle),
            debounce: search.debounce,
            modal_open: false,
            loaded: false,
        }
    }

    // ── Modal ─────────────────────────────────────────────────────────

    /// Open the picker. The first opening loads page 1 of the unfiltered catalog.
    pub async fn open_modal(&mut self) -> Option<PageOutcome> {
        self.modal_open = true;
        if self.loaded || self.search.is_loading() {
            return None;
        }
        Some(self.search(String::new()).await)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Close the picker without touching the bundle.
    pub fn cancel(&mut self) {
        self.modal_open = false;
    }

    /// Commit the checked products into the bundle and close the picker.
    ///
    /// Returns the number of rows the bundle now holds. On error (bundle cap)
    /// the picker stays open and the bundle is unchanged.
    pub fn add_selected(&mut self) -> DomainResult<usize> {
        let selection = self.store.commit_selection();
        self.bundle.commit(selection)?;
        self.modal_open = false;
        tracing::info!(rows = self.bundle.len(), "selection added to bundle");
        Ok(self.bundle.len())
    }

    // ── Search ────────────────────────────────────────────────────────

    /// Load page 1 for `query` and apply it.
    pub async fn search(&mut self, query: impl Into<String>) -> PageOutcome {
        let request = self.begin_search(query);
        let result = self.source.search(&request.query).await;
        self.complete(PageResponse { request, result })
    }

    /// Load and append the next page, if one may be requested.
    pub async fn load_more(&mut self) -> Option<PageOutcome> {
        let request = self.begin_next_page()?;
        let result = self.source.search(&request.query).await;
        Some(self.complete(PageResponse { request, result }))
    }

    pub fn begin_search(&mut self, query: impl Into<String>) -> PageRequest {
        self.search.begin_search(query)
    }

    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        self.search.begin_next_page()
    }

    /// Run `request` on the tokio runtime and deliver the response to `tx`.
    pub fn spawn_fetch(&self, request: PageRequest, tx: mpsc::Sender<PageResponse>) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source.search(&request.query).await;
            if tx.send(PageResponse { request, result }).await.is_err() {
                tracing::debug!("page response dropped: session receiver closed");
            }
        })
    }

    /// Apply a finished fetch.
    pub fn complete(&mut self, response: PageResponse) -> PageOutcome {
        let outcome = self
            .search
            .complete(&response.request, response.result, &mut self.store);
        if matches!(outcome, PageOutcome::Replaced { .. }) {
            self.loaded = true;
        }
        outcome
    }

    /// Start the debouncer for a search box, using the configured quiet period.
    pub fn spawn_search_pipeline(&self) -> SearchPipeline {
        let (keys, keys_rx) = SearchPipeline::key_channel();
        let (settled, debouncer) = spawn_debouncer(self.debounce, keys_rx);
        SearchPipeline::new(keys, settled, debouncer)
    }

    /// Wait for the next pipeline event and act on it.
    ///
    /// Settled text begins a new search and spawns its fetch; a finished fetch
    /// is applied through [`complete`](Self::complete). Returns `None` once
    /// input is closed and no fetch is outstanding.
    pub async fn next_search_event(&mut self, pipeline: &mut SearchPipeline) -> Option<PipelineEvent> {
        loop {
            tokio::select! {
                settled = pipeline.settled.recv(), if !pipeline.input_closed => match settled {
                    Some(query) => {
                        let request = self.begin_search(query);
                        self.spawn_fetch(request.clone(), pipeline.responses_tx.clone());
                        pipeline.in_flight += 1;
                        return Some(PipelineEvent::Fetching(request));
                    }
                    None => pipeline.input_closed = true,
                },
                response = pipeline.responses.recv(), if pipeline.in_flight > 0 => {
                    pipeline.in_flight -= 1;
                    let response = response?;
                    return Some(PipelineEvent::Applied(self.complete(response)));
                }
                else => return None,
            }
        }
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    // ── Selection ─────────────────────────────────────────────────────

    pub fn toggle_product(&mut self, product_id: ProductId) -> bool {
        self.store.toggle_product(product_id)
    }

    pub fn toggle_variant(&mut self, product_id: ProductId, variant_id: VariantId) -> bool {
        self.store.toggle_variant(product_id, variant_id)
    }

    pub fn products(&self) -> &[Product] {
        self.store.products()
    }

    pub fn product_count(&self) -> usize {
        self.store.product_count()
    }

    pub fn selection_summary(&self) -> String {
        self.store.selection_summary()
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    // ── Bundle ────────────────────────────────────────────────────────

    pub fn bundle(&self) -> &BundleList {
        &self.bundle
    }

    /// Reorder, remove, placeholder and discount actions on the main list.
    pub fn bundle_mut(&mut self) -> &mut BundleList {
        &mut self.bundle
    }
}
