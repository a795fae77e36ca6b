//! Service bundle wiring API adapters and the clock into the data runtime.

use std::rc::Rc;

use crate::{
    api::{CookbookApi, NoopCookbookApi, NoopRecipeApi, RecipeApi},
    memory::{MemoryCookbookApi, MemoryRecipeApi},
    time::{Clock, SystemClock},
};

/// Bundle of API services and the clock consumed by the data stores.
///
/// Assembled once by the entry layer (browser adapters in production,
/// in-memory adapters for offline/dev runs) and injected through context.
#[derive(Clone)]
pub struct ApiServices {
    recipes: Rc<dyn RecipeApi>,
    cookbooks: Rc<dyn CookbookApi>,
    clock: Rc<dyn Clock>,
}

impl ApiServices {
    /// Composes a bundle from explicit adapters.
    pub fn new(
        recipes: Rc<dyn RecipeApi>,
        cookbooks: Rc<dyn CookbookApi>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            recipes,
            cookbooks,
            clock,
        }
    }

    /// Composes a bundle over the in-memory adapters and the wall clock.
    pub fn in_memory() -> Self {
        Self::new(
            Rc::new(MemoryRecipeApi::default()),
            Rc::new(MemoryCookbookApi::default()),
            Rc::new(SystemClock),
        )
    }

    /// Composes a bundle over the no-op adapters, for baseline tests.
    pub fn noop() -> Self {
        Self::new(
            Rc::new(NoopRecipeApi),
            Rc::new(NoopCookbookApi),
            Rc::new(SystemClock),
        )
    }

    /// Returns the configured recipe API service.
    pub fn recipe_api(&self) -> Rc<dyn RecipeApi> {
        self.recipes.clone()
    }

    /// Returns the configured cookbook API service.
    pub fn cookbook_api(&self) -> Rc<dyn CookbookApi> {
        self.cookbooks.clone()
    }

    /// Returns the configured clock service.
    pub fn clock(&self) -> Rc<dyn Clock> {
        self.clock.clone()
    }
}
