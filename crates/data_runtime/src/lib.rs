//! Client-side data runtime for the recipe/cookbook application.
//!
//! Two structurally identical stores cache paginated collections in memory
//! behind a TTL freshness gate, apply optimistic mutations with rollback, and
//! expose stable reactive slices to the UI. A coordination layer above them
//! prefetches on load and refreshes in the background on timer, reconnect,
//! visibility, and route-change events.

pub mod collection;
pub mod cookbook_store;
pub mod recipe_store;
pub mod refresh;
pub mod store_context;

pub use collection::{
    CollectionState, Keyed, LoadingFlags, PageCursor, StoreConfig, CACHE_TTL_MS, PAGE_SIZE,
};
pub use cookbook_store::CookbookStore;
pub use recipe_store::RecipeStore;
pub use refresh::{
    install_browser_triggers, RefreshCoordinator, REFRESH_INTERVAL, ROUTE_SETTLE_DELAY,
};
pub use store_context::{use_data_runtime, DataProvider, DataRuntimeContext};

#[cfg(test)]
pub(crate) mod test_support;
