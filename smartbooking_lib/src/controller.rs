//! Generic list view controller: pagination, sorting and filtering state for
//! one remote list, with a stale-response guard.
//!
//! Every fetch is tagged with a sequence number taken under the state lock at
//! issue time. A response is applied only if its number is still the latest
//! issued, so a slow early page can never overwrite a faster later one. The
//! lock is never held across an await.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use smartbooking_api::types::{ListResult, RecordId};
use smartbooking_api::{Error, ListQuery, SortDirection};

use crate::notify::{Notification, Notifier};
use crate::resource::{Record, ResourceAccess};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What happened to the response of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was current and replaced the displayed page.
    Applied,
    /// The fetch failed; the previous page is still displayed.
    Failed,
    /// A newer query was issued before this response arrived; it was dropped.
    Discarded,
}

/// Everything the renderer draws for one list.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub query: ListQuery,
    pub result: ListResult<T>,
    pub loading: bool,
    pub status: LoadStatus,
    pub selection: BTreeSet<RecordId>,
    /// Message of the most recent failed fetch, cleared on the next success.
    pub last_error: Option<String>,
    /// Sequence number of the latest issued fetch.
    issued: u64,
}

impl<T> ListState<T> {
    fn new(query: ListQuery) -> Self {
        Self {
            query,
            result: ListResult::default(),
            loading: false,
            status: LoadStatus::Idle,
            selection: BTreeSet::new(),
            last_error: None,
            issued: 0,
        }
    }
}

/// Owns the list state for one resource screen.
pub struct ListController<R: ResourceAccess> {
    resource: Arc<R>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ListState<R::Item>>,
}

impl<R: ResourceAccess> ListController<R> {
    pub fn new(resource: Arc<R>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_query(resource, notifier, ListQuery::default())
    }

    /// Starts from a specific query instead of the first page of ten.
    pub fn with_query(resource: Arc<R>, notifier: Arc<dyn Notifier>, query: ListQuery) -> Self {
        Self {
            resource,
            notifier,
            state: Mutex::new(ListState::new(query)),
        }
    }

    pub fn resource(&self) -> &Arc<R> {
        &self.resource
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    fn lock(&self) -> MutexGuard<'_, ListState<R::Item>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Moves to another page or page size, then fetches.
    pub async fn set_page(&self, offset: u64, limit: u64) -> LoadOutcome {
        self.change_query(|q| *q = q.clone().with_page(offset, limit))
            .await
    }

    pub async fn set_sort(&self, field: &str, direction: SortDirection) -> LoadOutcome {
        self.change_query(|q| *q = q.clone().with_sort(field, direction))
            .await
    }

    /// Changes the filter text, returns to the first page, then fetches.
    pub async fn set_filter(&self, text: &str) -> LoadOutcome {
        self.change_query(|q| *q = q.clone().with_filter(text)).await
    }

    /// Re-issues the current query. Pagination and selection are kept.
    pub async fn reload(&self) -> LoadOutcome {
        self.load().await
    }

    async fn change_query<F>(&self, update: F) -> LoadOutcome
    where
        F: FnOnce(&mut ListQuery),
    {
        {
            let mut state = self.lock();
            update(&mut state.query);
            state.selection.clear();
        }
        self.load().await
    }

    async fn load(&self) -> LoadOutcome {
        let (seq, query) = {
            let mut state = self.lock();
            state.issued += 1;
            state.loading = true;
            state.status = LoadStatus::Loading;
            (state.issued, state.query.clone())
        };

        let result = self.resource.fetch_list(&query).await;
        self.apply(seq, &query, result)
    }

    fn apply(
        &self,
        seq: u64,
        query: &ListQuery,
        result: Result<ListResult<R::Item>, Error>,
    ) -> LoadOutcome {
        let failure = {
            let mut state = self.lock();
            if seq != state.issued {
                tracing::debug!(
                    "Discarding stale {} list response #{} (latest #{})",
                    self.resource.label(),
                    seq,
                    state.issued
                );
                return LoadOutcome::Discarded;
            }
            state.loading = false;
            match result {
                Ok(page) => {
                    tracing::debug!(
                        "Loaded {} {} records of {} ({})",
                        page.items.len(),
                        self.resource.label(),
                        page.total_count,
                        query.order_by().unwrap_or_default()
                    );
                    state.result = page;
                    state.status = LoadStatus::Loaded;
                    state.last_error = None;
                    None
                }
                Err(e) => {
                    state.status = LoadStatus::Failed;
                    state.last_error = Some(e.to_string());
                    Some(e)
                }
            }
        };

        match failure {
            None => LoadOutcome::Applied,
            Some(e) => {
                tracing::warn!("Failed to load {} list: {}", self.resource.label(), e);
                self.notifier.notify(Notification::error(format!(
                    "Failed to load {}s",
                    self.resource.label().to_lowercase()
                )));
                LoadOutcome::Failed
            }
        }
    }

    /// Flips selection of one record. Returns whether it is now selected.
    pub fn toggle_selection(&self, id: RecordId) -> bool {
        let mut state = self.lock();
        if state.selection.remove(&id) {
            false
        } else {
            state.selection.insert(id);
            true
        }
    }

    /// Selects every record on the displayed page.
    pub fn select_all(&self) {
        let mut state = self.lock();
        let ids = state.result.items.iter().map(Record::id).collect();
        state.selection = ids;
    }

    pub fn clear_selection(&self) {
        self.lock().selection.clear();
    }

    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.lock().selection.iter().copied().collect()
    }

    /// Clone of the whole state, for rendering.
    pub fn snapshot(&self) -> ListState<R::Item> {
        self.lock().clone()
    }

    pub fn items(&self) -> Vec<R::Item> {
        self.lock().result.items.clone()
    }

    pub fn total_count(&self) -> u64 {
        self.lock().result.total_count
    }

    pub fn query(&self) -> ListQuery {
        self.lock().query.clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.lock().status
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }
}
