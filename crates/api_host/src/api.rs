//! Recipe and cookbook API service contracts and baseline adapters.

use std::{future::Future, pin::Pin};

use crate::{
    error::ApiError,
    models::{Cookbook, CookbookPatch, NewCookbook, Recipe, RecipeDraft, RecipePatch},
    page::{ListQuery, Page},
};

/// Object-safe boxed future used by API service trait methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Service for the recipe collection endpoints.
pub trait RecipeApi {
    /// Lists a page of recipes for `query`.
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Recipe>, ApiError>>;

    /// Saves a new recipe and returns the server-assigned record.
    fn create<'a>(&'a self, draft: &'a RecipeDraft) -> ApiFuture<'a, Result<Recipe, ApiError>>;

    /// Updates an existing recipe and returns the stored record.
    fn update<'a>(
        &'a self,
        id: &'a str,
        patch: &'a RecipePatch,
    ) -> ApiFuture<'a, Result<Recipe, ApiError>>;

    /// Deletes a recipe by id.
    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Result<(), ApiError>>;
}

/// Service for the cookbook collection endpoints.
pub trait CookbookApi {
    /// Lists a page of cookbooks for `query`.
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Cookbook>, ApiError>>;

    /// Creates a cookbook and returns the server-assigned record.
    fn create<'a>(&'a self, draft: &'a NewCookbook) -> ApiFuture<'a, Result<Cookbook, ApiError>>;

    /// Updates an existing cookbook and returns the stored record.
    fn update<'a>(
        &'a self,
        id: &'a str,
        patch: &'a CookbookPatch,
    ) -> ApiFuture<'a, Result<Cookbook, ApiError>>;

    /// Deletes a cookbook by id.
    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Result<(), ApiError>>;
}

fn unavailable(resource: &str, op: &str) -> ApiError {
    ApiError::Transport(format!("{resource} api unavailable: {op}"))
}

/// No-op recipe adapter for unsupported targets and baseline tests.
///
/// Lists decode to an empty page; mutations fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecipeApi;

impl RecipeApi for NoopRecipeApi {
    fn list<'a>(&'a self, _query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Recipe>, ApiError>> {
        Box::pin(async { Ok(Page::default()) })
    }

    fn create<'a>(&'a self, _draft: &'a RecipeDraft) -> ApiFuture<'a, Result<Recipe, ApiError>> {
        Box::pin(async { Err(unavailable("recipe", "create")) })
    }

    fn update<'a>(
        &'a self,
        _id: &'a str,
        _patch: &'a RecipePatch,
    ) -> ApiFuture<'a, Result<Recipe, ApiError>> {
        Box::pin(async { Err(unavailable("recipe", "update")) })
    }

    fn delete<'a>(&'a self, _id: &'a str) -> ApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async { Err(unavailable("recipe", "delete")) })
    }
}

/// No-op cookbook adapter for unsupported targets and baseline tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCookbookApi;

impl CookbookApi for NoopCookbookApi {
    fn list<'a>(
        &'a self,
        _query: &'a ListQuery,
    ) -> ApiFuture<'a, Result<Page<Cookbook>, ApiError>> {
        Box::pin(async { Ok(Page::default()) })
    }

    fn create<'a>(&'a self, _draft: &'a NewCookbook) -> ApiFuture<'a, Result<Cookbook, ApiError>> {
        Box::pin(async { Err(unavailable("cookbook", "create")) })
    }

    fn update<'a>(
        &'a self,
        _id: &'a str,
        _patch: &'a CookbookPatch,
    ) -> ApiFuture<'a, Result<Cookbook, ApiError>> {
        Box::pin(async { Err(unavailable("cookbook", "update")) })
    }

    fn delete<'a>(&'a self, _id: &'a str) -> ApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async { Err(unavailable("cookbook", "delete")) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn noop_recipe_api_lists_empty_and_rejects_mutations() {
        let api: &dyn RecipeApi = &NoopRecipeApi;

        let page = block_on(api.list(&ListQuery::page(12, 0))).expect("list");
        assert_eq!(page.items, Vec::<Recipe>::new());
        assert!(!page.pagination.has_more);

        assert!(block_on(api.delete("anything")).is_err());
        assert!(block_on(api.create(&RecipeDraft::default())).is_err());
    }
}
