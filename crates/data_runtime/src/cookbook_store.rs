//! Cookbook store: cached paginated cookbook list with create and optimistic
//! delete.
//!
//! Structurally the recipe store's sibling, minus server-side search.

use std::rc::Rc;

use api_host::{ApiError, Clock, Cookbook, CookbookApi, CookbookPatch, ListQuery, NewCookbook};
use leptos::*;

use crate::collection::{CollectionState, PageCursor, StoreConfig};

/// Cloneable handle to the cookbook collection state and its operations.
#[derive(Clone)]
pub struct CookbookStore {
    api: Rc<dyn CookbookApi>,
    clock: Rc<dyn Clock>,
    config: StoreConfig,
    state: RwSignal<CollectionState<Cookbook>>,
    cookbooks: Memo<Vec<Cookbook>>,
    is_loading: Memo<bool>,
    is_loading_more: Memo<bool>,
    is_refreshing: Memo<bool>,
    has_more: Memo<bool>,
    total: Memo<u64>,
    cursor: Memo<PageCursor>,
}

// Releases the load-more flag on every exit path, including unwinding.
struct LoadMoreGuard {
    state: RwSignal<CollectionState<Cookbook>>,
}

impl Drop for LoadMoreGuard {
    fn drop(&mut self) {
        self.state.try_update(|s| s.flags.is_loading_more = false);
    }
}

impl CookbookStore {
    /// Builds a store over the given API service and clock.
    pub fn new(api: Rc<dyn CookbookApi>, clock: Rc<dyn Clock>, config: StoreConfig) -> Self {
        let state = create_rw_signal(CollectionState::default());
        let cookbooks = create_memo(move |_| state.with(|s| s.items.clone()));
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
            cookbooks,
            is_loading,
            is_loading_more,
            is_refreshing,
            has_more,
            total,
            cursor,
        }
    }

    fn apply(&self, mutate: impl FnOnce(&mut CollectionState<Cookbook>)) {
        self.state.try_update(mutate);
    }

    /// Cached cookbooks, in display order.
    pub fn cookbooks(&self) -> Memo<Vec<Cookbook>> {
        self.cookbooks
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

    /// Whether a non-forced fetch would hit the network.
    pub fn should_refetch(&self) -> bool {
        !self
            .state
            .with_untracked(|s| s.is_fresh(self.clock.now_ms(), self.config.cache_ttl_ms))
    }

    /// Cached cookbooks while the cache is fresh, `None` once stale.
    pub fn cached_cookbooks(&self) -> Option<Vec<Cookbook>> {
        if self.should_refetch() {
            None
        } else {
            Some(self.state.with_untracked(|s| s.items.clone()))
        }
    }

    /// Prepends a server-confirmed cookbook.
    pub fn insert_local(&self, cookbook: Cookbook) {
        self.apply(|s| s.add_item(cookbook));
    }

    /// Applies a local edit to the cookbook with `id`; no-op when absent.
    pub fn update_local(&self, id: &str, edit: impl FnOnce(&mut Cookbook)) {
        self.apply(|s| {
            s.update_item(id, edit);
        });
    }

    /// Removes the cookbook with `id` locally; no-op when absent.
    pub fn remove_local(&self, id: &str) {
        self.apply(|s| {
            s.remove_item(id);
        });
    }

    /// Reset-fetches the first page; a fresh non-empty cache is served as-is
    /// unless `force` is set.
    ///
    /// # Errors
    ///
    /// Propagates the API failure; cached items are left untouched and the
    /// loading flags are cleared.
    pub async fn fetch(&self, force: bool) -> Result<(), ApiError> {
        let now = self.clock.now_ms();
        let (has_items, fresh) = self
            .state
            .with_untracked(|s| (!s.items.is_empty(), s.is_fresh(now, self.config.cache_ttl_ms)));

        if !force && fresh && has_items {
            return Ok(());
        }

        self.apply(|s| {
            s.flags.is_loading = !has_items;
            s.flags.is_refreshing = has_items;
            s.cursor.current_page = 0;
        });

        let query = ListQuery::page(self.config.page_size, 0);
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

    /// Appends the next page; no-op while one is in flight or after the
    /// server reported no further pages.
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

        let query = ListQuery::page(self.config.page_size, offset);
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

    /// Creates a cookbook and prepends the server-assigned record.
    ///
    /// No optimistic insert: the server fills the id, author, and cover
    /// defaults.
    ///
    /// # Errors
    ///
    /// Propagates the API failure without mutating local state.
    pub async fn create(&self, draft: &NewCookbook) -> Result<Cookbook, ApiError> {
        let cookbook = self.api.create(draft).await?;
        self.apply({
            let cookbook = cookbook.clone();
            move |s| s.add_item(cookbook)
        });
        Ok(cookbook)
    }

    /// Updates a cookbook and replaces the matching local record with the
    /// stored one.
    ///
    /// # Errors
    ///
    /// Propagates the API failure without mutating local state.
    pub async fn update(&self, id: &str, patch: &CookbookPatch) -> Result<Cookbook, ApiError> {
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

    /// Deletes a cookbook optimistically; on failure the item snapshot is
    /// restored.
    ///
    /// # Errors
    ///
    /// Propagates the API failure after rolling back.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let items = self.state.with_untracked(|s| s.items.clone());

        self.apply(|s| {
            s.remove_item(id);
        });

        match self.api.delete(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.apply(move |s| {
                    s.items = items;
                });
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use api_host::ManualClock;

    use super::*;
    use crate::test_support::{cookbook, cookbook_page, status, ScriptedCookbookApi};

    fn store_with(api: &Rc<ScriptedCookbookApi>, clock: &ManualClock) -> CookbookStore {
        CookbookStore::new(
            api.clone(),
            Rc::new(clock.clone()),
            StoreConfig::default(),
        )
    }

    fn ids(store: &CookbookStore) -> Vec<String> {
        store
            .cookbooks()
            .get_untracked()
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    fn load_first_page(
        store: &CookbookStore,
        api: &ScriptedCookbookApi,
        page: api_host::Page<Cookbook>,
    ) {
        api.expect_list(Ok(page));
        block_on(store.fetch(false)).expect("initial fetch");
    }

    #[test]
    fn cold_fetch_loads_first_page_and_cursor() {
        let runtime = create_runtime();
        let api = Rc::new(ScriptedCookbookApi::default());
        let clock = ManualClock::new(1_000);
        let store = store_with(&api, &clock);

        api.expect_list(Ok(cookbook_page(&["c1", "c2"], true, 20)));
        block_on(store.fetch(false)).expect("fetch");

        assert_eq!(ids(&store), vec!["c1", "c2"]);
        assert_eq!(
            store.cursor().get_untracked(),
            PageCursor {
                has_more: true,
                current_page: 1,
                total: 20
            }
        );
        assert_eq!(api.list_calls.borrow()[0], ListQuery::page(12, 0));

        runtime.dispose();
    }

    #[test]
    fn fresh_cache_skips_and_expired_cache_refetches() {
        let runtime = create_runtime();
        let api = Rc::new(ScriptedCookbookApi::default());
        let clock = ManualClock::new(1_000);
        let store = store_with(&api, &clock);
        load_first_page(&store, &api, cookbook_page(&["c1"], false, 1));

        clock.advance(1_000);
        block_on(store.fetch(false)).expect("cache hit");
        assert_eq!(api.list_call_count(), 1);

        clock.advance(300_000);
        api.expect_list(Ok(cookbook_page(&["c2"], false, 1)));
        block_on(store.fetch(false)).expect("refetch");
        assert_eq!(api.list_call_count(), 2);
        assert_eq!(ids(&store), vec!["c2"]);

        runtime.dispose();
    }

    #[test]
    fn load_more_appends_and_dedupes() {
        let runtime = create_runtime();
        let api = Rc::new(ScriptedCookbookApi::default());
        let clock = ManualClock::new(1_000);
        let store = store_with(&api, &clock);
        load_first_page(&store, &api, cookbook_page(&["c1", "c2"], true, 3));

        api.expect_list(Ok(cookbook_page(&["c2", "c3"], false, 3)));
        block_on(store.load_more()).expect("load more");

        assert_eq!(ids(&store), vec!["c1", "c2", "c3"]);
        assert_eq!(api.list_calls.borrow()[1].offset, 12);
        assert!(!store.has_more().get_untracked());

        // Exhausted: further calls stay local.
        block_on(store.load_more()).expect("no-op");
        assert_eq!(api.list_call_count(), 2);

        runtime.dispose();
    }

    #[test]
    fn create_prepends_the_server_record() {
        let runtime = create_runtime();
        let api = Rc::new(ScriptedCookbookApi::default());
        let clock = ManualClock::new(1_000);
        let store = store_with(&api, &clock);
        load_first_page(&store, &api, cookbook_page(&["c1"], false, 1));

        let mut created = cookbook("c-new");
        created.author = "Anonymous Chef".to_string();
        api.expect_create(Ok(created));

        let returned = block_on(store.create(&NewCookbook {
            title: "Weeknights".to_string(),
            ..NewCookbook::default()
        }))
        .expect("create");

        assert_eq!(returned.id, "c-new");
        assert_eq!(ids(&store), vec!["c-new", "c1"]);

        runtime.dispose();
    }

    #[test]
    fn create_failure_leaves_state_untouched() {
        let runtime = create_runtime();
        let api = Rc::new(ScriptedCookbookApi::default());
        let clock = ManualClock::new(1_000);
        let store = store_with(&api, &clock);
        load_first_page(&store, &api, cookbook_page(&["c1"], false, 1));

        api.expect_create(Err(status(400, "title is required")));
        let err = block_on(store.create(&NewCookbook::default())).expect_err("create should fail");

        assert_eq!(err.status_code(), Some(400));
        assert_eq!(ids(&store), vec!["c1"]);

        runtime.dispose();
    }

    #[test]
    fn update_replaces_the_matching_record() {
        let runtime = create_runtime();
        let api = Rc::new(ScriptedCookbookApi::default());
        let clock = ManualClock::new(1_000);
        let store = store_with(&api, &clock);
        load_first_page(&store, &api, cookbook_page(&["c1"], false, 1));

        let mut stored = cookbook("c1");
        stored.cover_color = "#2F4F4F".to_string();
        api.expect_update(Ok(stored));

        block_on(store.update(
            "c1",
            &CookbookPatch {
                title: "Cookbook c1".to_string(),
                cover_color: Some("#2F4F4F".to_string()),
                ..CookbookPatch::default()
            },
        ))
        .expect("update");

        assert_eq!(
            store.cookbooks().get_untracked()[0].cover_color,
            "#2F4F4F"
        );

        runtime.dispose();
    }

    #[test]
    fn delete_failure_restores_the_snapshot() {
        let runtime = create_runtime();
        let api = Rc::new(ScriptedCookbookApi::default());
        let clock = ManualClock::new(1_000);
        let store = store_with(&api, &clock);
        load_first_page(&store, &api, cookbook_page(&["c1", "c2"], false, 2));

        api.expect_delete(Err(status(500, "delete rejected")));
        let err = block_on(store.delete("c1")).expect_err("delete should fail");

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(ids(&store), vec!["c1", "c2"]);
        // Cookbook deletes never touch the reported total.
        assert_eq!(store.total().get_untracked(), 2);

        runtime.dispose();
    }

    #[test]
    fn delete_success_keeps_the_optimistic_state() {
        let runtime = create_runtime();
        let api = Rc::new(ScriptedCookbookApi::default());
        let clock = ManualClock::new(1_000);
        let store = store_with(&api, &clock);
        load_first_page(&store, &api, cookbook_page(&["c1", "c2"], false, 2));

        api.expect_delete(Ok(()));
        block_on(store.delete("c1")).expect("delete");

        assert_eq!(ids(&store), vec!["c2"]);
        assert_eq!(api.delete_calls.borrow().as_slice(), ["c1".to_string()]);

        runtime.dispose();
    }
}
