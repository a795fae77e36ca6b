//! Provider and context wiring for the data runtime.
//!
//! This module owns store construction, the initial prefetch, and the
//! background-refresh trigger installation. UI composition stays with the
//! consuming application.

use api_host::ApiServices;
use leptos::*;

use crate::{
    collection::StoreConfig,
    cookbook_store::CookbookStore,
    recipe_store::RecipeStore,
    refresh::{self, RefreshCoordinator},
};

#[derive(Clone)]
/// Leptos context for reaching the recipe/cookbook stores and their refresh
/// coordination.
pub struct DataRuntimeContext {
    /// Recipe store handle.
    pub recipes: RecipeStore,
    /// Cookbook store handle.
    pub cookbooks: CookbookStore,
    /// Refresh coordination over both stores.
    pub refresh: RefreshCoordinator,
}

impl DataRuntimeContext {
    /// Builds both stores and their coordinator from an injected service
    /// bundle.
    pub fn new(services: &ApiServices, config: StoreConfig) -> Self {
        let recipes = RecipeStore::new(services.recipe_api(), services.clock(), config);
        let cookbooks = CookbookStore::new(services.cookbook_api(), services.clock(), config);
        let refresh = RefreshCoordinator::new(recipes.clone(), cookbooks.clone());
        Self {
            recipes,
            cookbooks,
            refresh,
        }
    }
}

#[component]
/// Provides [`DataRuntimeContext`] to descendant components, prefetches both
/// collections, and installs the background refresh triggers.
pub fn DataProvider(
    /// Injected service bundle; defaults to the browser fetch adapters.
    #[prop(optional)]
    api_services: Option<ApiServices>,
    children: Children,
) -> impl IntoView {
    let services = api_services.unwrap_or_else(api_host_web::browser_api_services);
    let context = DataRuntimeContext::new(&services, StoreConfig::default());
    provide_context(context.clone());

    let prefetch = context.refresh.clone();
    spawn_local(async move { prefetch.prefetch_all().await });
    refresh::install_browser_triggers(context.refresh.clone());

    children().into_view()
}

/// Returns the current [`DataRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DataProvider`].
pub fn use_data_runtime() -> DataRuntimeContext {
    use_context::<DataRuntimeContext>().expect("DataRuntimeContext not provided")
}
