use async_trait::async_trait;
use leptos::*;
use std::{cell::Cell, collections::HashSet, rc::Rc};

use crate::{
    api::ApiError,
    state::notify::Notifier,
    utils::{
        lifetime::Lifetime,
        search::{ListItem, SearchQuery},
    },
};

pub const PAGE_SIZE: usize = 20;

#[async_trait(?Send)]
pub trait PageSource<T> {
    async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<T>, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: true,
            loading: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Already loading, or nothing left to fetch.
    Skipped,
    Loaded { received: usize },
    /// A reload started while this fetch was in flight; its result was dropped.
    Superseded,
    /// The owning view went away before the response arrived.
    Cancelled,
    Failed(ApiError),
}

/// Page cursor, has-more flag and loading flag for one backend listing.
pub struct ListController<T: ListItem> {
    state: RwSignal<ListState<T>>,
    generation: Rc<Cell<u64>>,
    source: Rc<dyn PageSource<T>>,
    lifetime: Lifetime,
}

impl<T: ListItem> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            generation: Rc::clone(&self.generation),
            source: Rc::clone(&self.source),
            lifetime: self.lifetime.clone(),
        }
    }
}

impl<T: ListItem> ListController<T> {
    pub fn new(source: Rc<dyn PageSource<T>>, lifetime: Lifetime) -> Self {
        Self {
            state: create_rw_signal(ListState::default()),
            generation: Rc::new(Cell::new(0)),
            source,
            lifetime,
        }
    }

    pub fn state(&self) -> RwSignal<ListState<T>> {
        self.state
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.state.get_untracked()
    }

    /// Fetches the next page, or page 1 when `force` is set. Forced loads
    /// replace the list and reset the cursor; normal loads append and
    /// advance it.
    pub async fn load(&self, force: bool) -> LoadOutcome {
        let (loading, has_more, cursor) = self
            .state
            .with_untracked(|s| (s.loading, s.has_more, s.page));
        if loading || (!force && !has_more) {
            return LoadOutcome::Skipped;
        }

        let generation = self.generation.get();
        let page = if force { 1 } else { cursor };
        self.state.update(|s| s.loading = true);
        log::debug!("loading page {} (force: {})", page, force);

        let result = self.source.fetch_page(page, PAGE_SIZE).await;

        if self.lifetime.is_cancelled() {
            log::debug!("view gone, dropping page {}", page);
            return LoadOutcome::Cancelled;
        }
        if self.generation.get() != generation {
            log::debug!("discarding superseded page {}", page);
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(batch) => {
                let received = batch.len();
                self.state.update(|s| {
                    if force {
                        s.items = batch;
                        s.page = 1;
                        s.has_more = received >= PAGE_SIZE;
                    } else {
                        merge_unique(&mut s.items, batch);
                        if received < PAGE_SIZE {
                            s.has_more = false;
                        }
                        s.page += 1;
                    }
                    s.loading = false;
                });
                LoadOutcome::Loaded { received }
            }
            Err(err) => {
                self.state.update(|s| s.loading = false);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Drops everything and refetches page 1. Any fetch still in flight is
    /// superseded.
    pub async fn reload(&self) -> LoadOutcome {
        self.generation.set(self.generation.get() + 1);
        self.state.update(|s| {
            s.items.clear();
            s.page = 1;
            s.has_more = true;
            s.loading = false;
        });
        self.load(true).await
    }

    /// Local filter over everything loaded so far. Tracks the list signal.
    pub fn search(&self, query: &SearchQuery) -> Vec<T> {
        self.state.with(|s| query.apply(&s.items))
    }

    /// `load` that reports a failure through `notifier`.
    pub async fn load_or_notify(&self, force: bool, notifier: &Notifier) -> bool {
        match self.load(force).await {
            LoadOutcome::Loaded { .. } => true,
            LoadOutcome::Failed(err) => {
                notifier.error(format!("Failed to load: {}", err.error));
                false
            }
            _ => false,
        }
    }

    /// Reports a mutation outcome, then resynchronises with the backend.
    pub async fn finish_mutation<R>(
        &self,
        result: Result<R, ApiError>,
        notifier: &Notifier,
        success_message: &str,
    ) -> bool {
        let ok = match result {
            Ok(_) => {
                notifier.success(success_message);
                true
            }
            Err(err) => {
                notifier.error(err.error);
                false
            }
        };
        if self.lifetime.is_alive() {
            self.load_or_notify_reload(notifier).await;
        }
        ok
    }

    async fn load_or_notify_reload(&self, notifier: &Notifier) {
        if let LoadOutcome::Failed(err) = self.reload().await {
            notifier.error(format!("Failed to load: {}", err.error));
        }
    }
}

fn merge_unique<T: ListItem>(items: &mut Vec<T>, batch: Vec<T>) {
    let mut seen: HashSet<String> = items.iter().map(|i| i.key().to_string()).collect();
    items.extend(
        batch
            .into_iter()
            .filter(|item| seen.insert(item.key().to_string())),
    );
}
