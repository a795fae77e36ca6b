//! Fetch-backed adapter for the recipe endpoints.

use api_host::{
    ApiError, ApiFuture, ListQuery, Page, PageInfo, Recipe, RecipeApi, RecipeDraft, RecipePatch,
};
use serde::Deserialize;

use crate::fetch;

const BASE_URL: &str = "/api/recipes";

#[derive(Deserialize)]
struct RecipeListEnvelope {
    #[serde(default)]
    recipes: Vec<Recipe>,
    #[serde(default)]
    pagination: Option<WirePagination>,
}

// Absent pagination decodes to "no further pages", matching the stores'
// fallbacks for routes that omit the object.
#[derive(Debug, Default, Deserialize)]
struct WirePagination {
    #[serde(default)]
    total: u64,
    #[serde(default, rename = "hasMore")]
    has_more: bool,
}

#[derive(Deserialize)]
struct RecipeEnvelope {
    recipe: Recipe,
}

fn list_url(query: &ListQuery) -> String {
    let mut url = format!("{BASE_URL}?limit={}&offset={}", query.limit, query.offset);
    if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
        url.push_str("&search=");
        url.push_str(&fetch::encode_component(term));
    }
    url
}

fn encode_body<T: serde::Serialize>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::Transport(format!("encode request: {e}")))
}

/// Browser implementation of [`RecipeApi`] over the `/api/recipes` routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebRecipeApi;

impl RecipeApi for WebRecipeApi {
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Recipe>, ApiError>> {
        Box::pin(async move {
            let envelope: RecipeListEnvelope =
                fetch::request_json("GET", &list_url(query), None).await?;
            let pagination = envelope.pagination.unwrap_or_default();
            Ok(Page {
                items: envelope.recipes,
                pagination: PageInfo {
                    total: pagination.total,
                    has_more: pagination.has_more,
                },
            })
        })
    }

    fn create<'a>(&'a self, draft: &'a RecipeDraft) -> ApiFuture<'a, Result<Recipe, ApiError>> {
        Box::pin(async move {
            let body = encode_body(draft)?;
            let envelope: RecipeEnvelope = fetch::request_json("POST", BASE_URL, Some(body)).await?;
            Ok(envelope.recipe)
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        patch: &'a RecipePatch,
    ) -> ApiFuture<'a, Result<Recipe, ApiError>> {
        Box::pin(async move {
            let body = encode_body(patch)?;
            let envelope: RecipeEnvelope =
                fetch::request_json("PUT", &format!("{BASE_URL}/{id}"), Some(body)).await?;
            Ok(envelope.recipe)
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move { fetch::request_unit("DELETE", &format!("{BASE_URL}/{id}")).await })
    }
}
