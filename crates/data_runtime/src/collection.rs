//! Pure list-state container and synchronous mutators shared by both stores.
//!
//! Everything here is plain data with no reactive wiring, so the transition
//! rules (dedupe-on-append, cursor overwrite, freshness) are tested directly.

use std::collections::HashSet;

use api_host::{Cookbook, Recipe};

/// Items requested per page, both resources.
pub const PAGE_SIZE: u32 = 12;

/// Maximum age of cached data before a non-forced fetch hits the network.
pub const CACHE_TTL_MS: u64 = 5 * 60 * 1000;

/// Construction-time store configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Items requested per page.
    pub page_size: u32,
    /// Cache time-to-live in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            cache_ttl_ms: CACHE_TTL_MS,
        }
    }
}

/// Records addressable by a stable string id.
pub trait Keyed {
    /// Stable identity used for dedupe and lookup.
    fn key(&self) -> &str;
}

impl Keyed for Recipe {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Cookbook {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Pagination cursor; `current_page * page_size` is the next fetch offset.
///
/// `has_more` comes from the last server response and is never inferred
/// locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Whether the server reported further pages.
    pub has_more: bool,
    /// Number of pages already loaded.
    pub current_page: u32,
    /// Server-reported total across all pages.
    pub total: u64,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            has_more: true,
            current_page: 0,
            total: 0,
        }
    }
}

/// Loading flags describing distinct UI states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    /// Cold load with nothing cached yet (skeleton state).
    pub is_loading: bool,
    /// A further page is being appended.
    pub is_loading_more: bool,
    /// Silent background refresh while stale items stay visible.
    pub is_refreshing: bool,
}

/// In-memory list state for one paginated collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    /// Cached items, unique by key, in server order.
    pub items: Vec<T>,
    /// Pagination cursor from the last server response.
    pub cursor: PageCursor,
    /// Current loading flags.
    pub flags: LoadingFlags,
    /// Unix-ms timestamp of the last completed fetch; `None` means never
    /// fetched.
    pub last_fetch_ms: Option<u64>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: PageCursor::default(),
            flags: LoadingFlags::default(),
            last_fetch_ms: None,
        }
    }
}

impl<T: Keyed> CollectionState<T> {
    /// Replaces (`reset`) or dedupe-appends the cached items.
    ///
    /// Append mode drops incoming items whose key is already cached, so
    /// overlapping pages (offsets shifted by concurrent inserts) never
    /// produce duplicates. Both modes stamp the fetch timestamp and clear
    /// every loading flag.
    pub fn set_items(&mut self, new_items: Vec<T>, reset: bool, now_ms: u64) {
        if reset {
            self.items = new_items;
        } else {
            let existing: HashSet<String> =
                self.items.iter().map(|i| i.key().to_string()).collect();
            self.items
                .extend(new_items.into_iter().filter(|i| !existing.contains(i.key())));
        }
        self.last_fetch_ms = Some(now_ms);
        self.flags = LoadingFlags::default();
    }

    /// Prepends a freshly created item (newest-first display order).
    ///
    /// No dedupe check; callers only add server-confirmed new records.
    pub fn add_item(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Applies `apply` to the record with key `id`; no-op when absent.
    pub fn update_item(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|i| i.key() == id) {
            Some(item) => {
                apply(item);
                true
            }
            None => false,
        }
    }

    /// Removes the record with key `id`; no-op when absent.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.key() != id);
        self.items.len() != before
    }

    /// Wholesale cursor overwrite — always trusts the latest server response.
    pub fn set_cursor(&mut self, cursor: PageCursor) {
        self.cursor = cursor;
    }

    /// Whether the cache is within its TTL at `now_ms`.
    pub fn is_fresh(&self, now_ms: u64, ttl_ms: u64) -> bool {
        match self.last_fetch_ms {
            Some(at) => now_ms.saturating_sub(at) <= ttl_ms,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {id}"),
            ..Recipe::default()
        }
    }

    fn ids(state: &CollectionState<Recipe>) -> Vec<&str> {
        state.items.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn append_dedupes_by_id_and_preserves_order() {
        let mut state = CollectionState::default();
        state.set_items(vec![recipe("1"), recipe("2")], true, 10);

        state.set_items(vec![recipe("2"), recipe("3")], false, 20);

        assert_eq!(ids(&state), vec!["1", "2", "3"]);
        assert_eq!(state.last_fetch_ms, Some(20));
    }

    #[test]
    fn reset_replaces_wholesale_and_clears_flags() {
        let mut state = CollectionState {
            items: vec![recipe("old")],
            flags: LoadingFlags {
                is_loading: true,
                is_loading_more: true,
                is_refreshing: true,
            },
            ..CollectionState::default()
        };

        state.set_items(vec![recipe("new")], true, 99);

        assert_eq!(ids(&state), vec!["new"]);
        assert_eq!(state.flags, LoadingFlags::default());
        assert_eq!(state.last_fetch_ms, Some(99));
    }

    #[test]
    fn append_also_stamps_timestamp_and_clears_flags() {
        let mut state = CollectionState::<Recipe>::default();
        state.flags.is_loading_more = true;

        state.set_items(vec![recipe("1")], false, 7);

        assert_eq!(state.flags, LoadingFlags::default());
        assert_eq!(state.last_fetch_ms, Some(7));
    }

    #[test]
    fn add_item_prepends() {
        let mut state = CollectionState::default();
        state.set_items(vec![recipe("1")], true, 0);

        state.add_item(recipe("2"));

        assert_eq!(ids(&state), vec!["2", "1"]);
    }

    #[test]
    fn update_and_remove_are_noops_for_missing_ids() {
        let mut state = CollectionState::default();
        state.set_items(vec![recipe("1")], true, 0);

        assert!(!state.update_item("nope", |r| r.title.clear()));
        assert!(!state.remove_item("nope"));
        assert_eq!(ids(&state), vec!["1"]);

        assert!(state.update_item("1", |r| r.title = "Renamed".to_string()));
        assert_eq!(state.items[0].title, "Renamed");
        assert!(state.remove_item("1"));
        assert!(state.items.is_empty());
    }

    #[test]
    fn freshness_boundary_is_inclusive() {
        let mut state = CollectionState::<Recipe>::default();
        assert!(!state.is_fresh(0, CACHE_TTL_MS));

        state.set_items(Vec::new(), true, 1_000);
        assert!(state.is_fresh(1_000 + CACHE_TTL_MS, CACHE_TTL_MS));
        assert!(!state.is_fresh(1_000 + CACHE_TTL_MS + 1, CACHE_TTL_MS));
    }

    #[test]
    fn initial_cursor_expects_a_first_page() {
        let cursor = PageCursor::default();
        assert!(cursor.has_more);
        assert_eq!(cursor.current_page, 0);
        assert_eq!(cursor.total, 0);
    }
}
