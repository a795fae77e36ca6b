//! Recipe store: cached paginated recipe list with server-side search and
//! optimistic mutations.

use std::rc::Rc;

use api_host::{ApiError, Clock, ListQuery, Recipe, RecipeApi, RecipeDraft, RecipePatch};
use leptos::*;

use crate::collection::{CollectionState, PageCursor, StoreConfig};

/// Cloneable handle to the recipe collection state and its operations.
///
/// All clones share the same underlying signals; selector methods return the
/// same `Memo` on every call, so consumers subscribe to stable,
/// equality-suppressed slices.
#[derive(Clone)]
pub struct RecipeStore {
    api: Rc<dyn RecipeApi>,
    clock: Rc<dyn Clock>,
    config: StoreConfig,
    state: RwSignal<CollectionState<Recipe>>,
    search_term: RwSignal<String>,
    recipes: Memo<Vec<Recipe>>,
    is_loading: Memo<bool>,
    is_loading_more: Memo<bool>,
    is_refreshing: Memo<bool>,
    has_more: Memo<bool>,
    total: Memo<u64>,
    cursor: Memo<PageCursor>,
}

// Releases the load-more flag on every exit path, including unwinding.
struct LoadMoreGuard {
    state: RwSignal<CollectionState<Recipe>>,
}

impl Drop for LoadMoreGuard {
    fn drop(&mut self) {
        self.state.try_update(|s| s.flags.is_loading_more = false);
    }
}

impl RecipeStore {
    /// Builds a store over the given API service and clock.
    pub fn new(api: Rc<dyn RecipeApi>, clock: Rc<dyn Clock>, config: StoreConfig) -> Self {
        let state = create_rw_signal(CollectionState::default());
        let search_term = create_rw_signal(String::new());
        let recipes = create_memo(move |_| state.with(|s| s.items.clone()));
        let is_loading = create_memo(move |_| state.with(|s| s.flags.is_loading));
        let is_loading_more = create_memo(move |_| state.with(|s| s.flags.is_loading_more));
        let is_refreshing = create_memo(move |_| state.with(|s| s.flags.is_refreshing));
        let has_more = create_memo(move |_| state.with(|s| s.cursor.has_more));
        let total = create_memo(move |_| state.with(|s| s.cursor.total));
        let cursor = create_memo(move |_| state.with(|s| s.cursor));

        Self {
            api,
            clock,
            config,
            state,
            search_term,
            recipes,
            is_loading,
            is_loading_more,
            is_refreshing,
            has_more,
            total,
            cursor,
        }
    }

    // State writes go through here so completions that land after the owning
    // scope is disposed degrade to no-ops instead of panicking.
    fn apply(&self, mutate: impl FnOnce(&mut CollectionState<Recipe>)) {
        self.state.try_update(mutate);
    }

    /// Cached recipes, in display order.
    pub fn recipes(&self) -> Memo<Vec<Recipe>> {
        self.recipes
    }

    /// Cold-load flag (nothing cached yet).
    pub fn is_loading(&self) -> Memo<bool> {
        self.is_loading
    }

    /// Further-page flag.
    pub fn is_loading_more(&self) -> Memo<bool> {
        self.is_loading_more
    }

    /// Silent background-refresh flag.
    pub fn is_refreshing(&self) -> Memo<bool> {
        self.is_refreshing
    }

    /// Whether the server reported further pages.
    pub fn has_more(&self) -> Memo<bool> {
        self.has_more
    }

    /// Server-reported total across all pages.
    pub fn total(&self) -> Memo<u64> {
        self.total
    }

    /// Full pagination cursor slice.
    pub fn cursor(&self) -> Memo<PageCursor> {
        self.cursor
    }

    /// Current search term.
    pub fn search_term(&self) -> ReadSignal<String> {
        self.search_term.read_only()
    }

    /// Whether a non-forced fetch would hit the network.
    pub fn should_refetch(&self) -> bool {
        !self
            .state
            .with_untracked(|s| s.is_fresh(self.clock.now_ms(), self.config.cache_ttl_ms))
    }

    /// Cached recipes while the cache is fresh, `None` once stale.
    pub fn cached_recipes(&self) -> Option<Vec<Recipe>> {
        if self.should_refetch() {
            None
        } else {
            Some(self.state.with_untracked(|s| s.items.clone()))
        }
    }

    /// Prepends a server-confirmed recipe (create flow).
    pub fn insert_local(&self, recipe: Recipe) {
        self.apply(|s| s.add_item(recipe));
    }

    /// Applies a local edit to the recipe with `id`; no-op when absent.
    pub fn update_local(&self, id: &str, edit: impl FnOnce(&mut Recipe)) {
        self.apply(|s| {
            s.update_item(id, edit);
        });
    }

    /// Removes the recipe with `id` locally; no-op when absent.
    pub fn remove_local(&self, id: &str) {
        self.apply(|s| {
            s.remove_item(id);
        });
    }

    /// Reset-fetches the first page.
    ///
    /// Without `force`, a fresh non-empty cache with no active search term is
    /// served as-is and no request is issued. An active search term always
    /// goes to the server.
    ///
    /// # Errors
    ///
    /// Propagates the API failure; cached items are left untouched and the
    /// loading flags are cleared.
    pub async fn fetch(&self, force: bool) -> Result<(), ApiError> {
        let search = self.search_term.get_untracked();
        let now = self.clock.now_ms();
        let (has_items, fresh) = self
            .state
            .with_untracked(|s| (!s.items.is_empty(), s.is_fresh(now, self.config.cache_ttl_ms)));

        if !force && search.is_empty() && fresh && has_items {
            return Ok(());
        }

        self.apply(|s| {
            s.flags.is_loading = !has_items;
            s.flags.is_refreshing = has_items;
            s.cursor.current_page = 0;
        });

        let query = ListQuery::page(self.config.page_size, 0).with_search(&search);
        match self.api.list(&query).await {
            Ok(page) => {
                let now = self.clock.now_ms();
                self.apply(move |s| {
                    s.set_items(page.items, true, now);
                    s.set_cursor(PageCursor {
                        has_more: page.pagination.has_more,
                        current_page: 1,
                        total: page.pagination.total,
                    });
                });
                Ok(())
            }
            Err(err) => {
                self.apply(|s| {
                    s.flags.is_loading = false;
                    s.flags.is_refreshing = false;
                });
                Err(err)
            }
        }
    }

    /// Appends the next page.
    ///
    /// No-op while a load-more is in flight or once the server reported no
    /// further pages.
    ///
    /// # Errors
    ///
    /// Propagates the API failure; the load-more flag is released on every
    /// exit path.
    pub async fn load_more(&self) -> Result<(), ApiError> {
        let offset = {
            let (busy, cursor) = self
                .state
                .with_untracked(|s| (s.flags.is_loading_more, s.cursor));
            if busy || !cursor.has_more {
                return Ok(());
            }
            cursor.current_page * self.config.page_size
        };

        // Taken before the first await so an overlapping call bails out above.
        self.apply(|s| s.flags.is_loading_more = true);
        let _guard = LoadMoreGuard { state: self.state };

        let search = self.search_term.get_untracked();
        let query = ListQuery::page(self.config.page_size, offset).with_search(&search);
        let page = self.api.list(&query).await?;

        let now = self.clock.now_ms();
        self.apply(move |s| {
            s.set_items(page.items, false, now);
            let next_page = s.cursor.current_page + 1;
            s.set_cursor(PageCursor {
                has_more: page.pagination.has_more,
                current_page: next_page,
                total: page.pagination.total,
            });
        });
        Ok(())
    }

    /// Stores the search term and immediately reset-fetches against it,
    /// bypassing the freshness gate.
    ///
    /// # Errors
    ///
    /// Propagates the fetch failure.
    pub async fn set_search_term(&self, term: impl Into<String>) -> Result<(), ApiError> {
        self.search_term.set(term.into());
        self.fetch(true).await
    }

    /// Saves a recipe and prepends the server-assigned record.
    ///
    /// No optimistic insert: the server fills the id and defaults.
    ///
    /// # Errors
    ///
    /// Propagates the API failure without mutating local state.
    pub async fn save(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        let recipe = self.api.create(draft).await?;
        self.apply({
            let recipe = recipe.clone();
            move |s| s.add_item(recipe)
        });
        Ok(recipe)
    }

    /// Updates a recipe and replaces the matching local record with the
    /// stored one.
    ///
    /// # Errors
    ///
    /// Propagates the API failure without mutating local state.
    pub async fn update(&self, id: &str, patch: &RecipePatch) -> Result<Recipe, ApiError> {
        let updated = self.api.update(id, patch).await?;
        let key = updated.id.clone();
        self.apply({
            let entity = updated.clone();
            move |s| {
                s.update_item(&key, move |slot| *slot = entity);
            }
        });
        Ok(updated)
    }

    /// Deletes a recipe optimistically.
    ///
    /// The record disappears (and `total` drops by one, floored at zero)
    /// before the request is issued; on failure the snapshot is restored
    /// atomically.
    ///
    /// # Errors
    ///
    /// Propagates the API failure after rolling back, carrying the server
    /// status for diagnostics.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let (items, total) = self
            .state
            .with_untracked(|s| (s.items.clone(), s.cursor.total));

        self.apply(|s| {
            s.remove_item(id);
            s.cursor.total = s.cursor.total.saturating_sub(1);
        });

        match self.api.delete(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.apply(move |s| {
                    s.items = items;
                    s.cursor.total = total;
                });
                Err(err)
            }
        }
    }
}
