//! Request bookkeeping for catalog pages.
//!
//! Every request gets a monotonically increasing sequence number. Only the
//! response to the most recently issued request is applied, so a slow page-1
//! response for an old query can never overwrite the results of a newer one.

use bundlepick_catalog::{Product, SelectionStore};

use crate::error::SearchError;
use crate::source::PageQuery;

/// A page request handed to the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub query: PageQuery,
}

/// A finished fetch, ready to be applied on the event thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub request: PageRequest,
    pub result: Result<Vec<Product>, SearchError>,
}

/// What applying a response did to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page 1 replaced the catalog.
    Replaced { count: usize, has_more: bool },
    /// A further page was appended.
    Appended { count: usize, has_more: bool },
    /// The fetch failed; the catalog is unchanged.
    Failed,
    /// A newer request superseded this one; the response was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    page_size: u32,
    query: String,
    page: u32,
    has_more: bool,
    loading: bool,
    latest_seq: u64,
    last_error: Option<String>,
}

impl SearchState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            query: String::new(),
            page: 0,
            has_more: false,
            loading: false,
            latest_seq: 0,
            last_error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Last page applied to the catalog (0 before the first load).
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a new search. Always page 1; supersedes anything in flight.
    pub fn begin_search(&mut self, query: impl Into<String>) -> PageRequest {
        self.query = query.into();
        self.has_more = false;
        self.issue(1)
    }

    /// Request the page after the last applied one.
    ///
    /// Returns `None` while another request is outstanding or when the last
    /// page came back short.
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        if self.loading {
            tracing::debug!(page = self.page, "next page rejected: request in flight");
            return None;
        }
        if !self.has_more {
            tracing::debug!(page = self.page, "next page rejected: no more results");
            return None;
        }
        Some(self.issue(self.page + 1))
    }

    /// Apply a finished fetch to `store`.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<Vec<Product>, SearchError>,
        store: &mut SelectionStore,
    ) -> PageOutcome {
        if request.seq != self.latest_seq {
            tracing::warn!(
                seq = request.seq,
                latest = self.latest_seq,
                search = %request.query.search,
                "dropping stale catalog response"
            );
            return PageOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(products) => {
                let count = products.len();
                let has_more = count == self.page_size as usize;
                self.has_more = has_more;
                self.page = request.query.page;
                self.last_error = None;

                if request.query.page <= 1 {
                    store.replace(products);
                    PageOutcome::Replaced { count, has_more }
                } else {
                    store.append(products);
                    PageOutcome::Appended { count, has_more }
                }
            }
            Err(err) => {
                tracing::error!(
                    search = %request.query.search,
                    page = request.query.page,
                    "error fetching products: {err}"
                );
                self.has_more = false;
                self.last_error = Some(err.to_string());
                PageOutcome::Failed
            }
        }
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.latest_seq += 1;
        self.loading = true;
        PageRequest {
            seq: self.latest_seq,
            query: PageQuery {
                search: self.query.clone(),
                page,
                limit: self.page_size,
            },
        }
    }
}
