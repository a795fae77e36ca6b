//! Prefetch and background-refresh coordination over both stores.
//!
//! The coordinator exposes explicit scheduler inputs (`handle_tick`,
//! `handle_online`, ...) so the refresh policy is testable with simulated
//! events; `install_browser_triggers` is the thin wiring that feeds those
//! inputs from real browser timers and events.

use std::time::Duration;

use leptos::*;
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{cookbook_store::CookbookStore, recipe_store::RecipeStore};

/// Period of the background refresh tick while the document is visible.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Delay after a route change before refreshing, so the new page settles.
pub const ROUTE_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Refresh coordination over the recipe and cookbook stores.
///
/// Failures are isolated per resource: one store's outage is logged and never
/// aborts the other store's refresh.
#[derive(Clone)]
pub struct RefreshCoordinator {
    recipes: RecipeStore,
    cookbooks: CookbookStore,
}

impl RefreshCoordinator {
    /// Builds a coordinator over both store handles.
    pub fn new(recipes: RecipeStore, cookbooks: CookbookStore) -> Self {
        Self { recipes, cookbooks }
    }

    /// Warms both caches on app load; freshness gates still apply.
    pub async fn prefetch_all(&self) {
        self.refresh_all(false).await;
    }

    /// Refreshes both stores concurrently, settling both regardless of
    /// individual failures.
    pub async fn refresh_all(&self, force: bool) {
        let (recipes, cookbooks) =
            futures::join!(self.recipes.fetch(force), self.cookbooks.fetch(force));
        if let Err(err) = recipes {
            logging::warn!("recipe refresh failed: {err}");
        }
        if let Err(err) = cookbooks {
            logging::warn!("cookbook refresh failed: {err}");
        }
    }

    /// Periodic timer input; refreshes only while the document is visible.
    pub async fn handle_tick(&self, visible: bool) {
        if visible {
            self.refresh_all(false).await;
        }
    }

    /// Network-reconnect input; forces a refresh past the freshness gates.
    pub async fn handle_online(&self) {
        logging::log!("network reconnected, refreshing data");
        self.refresh_all(true).await;
    }

    /// Visibility input; refreshes (unforced) when the tab becomes visible.
    pub async fn handle_visibility_change(&self, visible: bool) {
        if visible {
            self.refresh_all(false).await;
        }
    }

    /// Route-change input; unforced refresh once the new page has settled.
    pub async fn handle_route_change(&self) {
        self.refresh_all(false).await;
    }
}

fn document_visible() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| !d.hidden())
        .unwrap_or(false)
}

/// Installs the browser triggers feeding the coordinator.
///
/// Every timer and listener is removed when the current reactive owner is
/// cleaned up.
pub fn install_browser_triggers(coordinator: RefreshCoordinator) {
    {
        let coordinator = coordinator.clone();
        if let Ok(interval) = set_interval_with_handle(
            move || {
                let coordinator = coordinator.clone();
                let visible = document_visible();
                spawn_local(async move { coordinator.handle_tick(visible).await });
            },
            REFRESH_INTERVAL,
        ) {
            on_cleanup(move || interval.clear());
        }
    }

    {
        let coordinator = coordinator.clone();
        let online_listener = window_event_listener(ev::online, move |_| {
            let coordinator = coordinator.clone();
            spawn_local(async move { coordinator.handle_online().await });
        });
        on_cleanup(move || online_listener.remove());
    }

    {
        let coordinator = coordinator.clone();
        let popstate_listener = window_event_listener(ev::popstate, move |_| {
            let coordinator = coordinator.clone();
            set_timeout(
                move || {
                    spawn_local(async move { coordinator.handle_route_change().await });
                },
                ROUTE_SETTLE_DELAY,
            );
        });
        on_cleanup(move || popstate_listener.remove());
    }

    install_visibility_listener(coordinator);
}

// `visibilitychange` fires on the document, so this one is wired manually
// rather than through `window_event_listener`.
fn install_visibility_listener(coordinator: RefreshCoordinator) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let closure = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        let coordinator = coordinator.clone();
        let visible = document_visible();
        spawn_local(async move { coordinator.handle_visibility_change(visible).await });
    }));

    if document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())
        .is_err()
    {
        logging::warn!("visibilitychange listener install failed");
        return;
    }

    on_cleanup(move || {
        let _ = document
            .remove_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    });
}
