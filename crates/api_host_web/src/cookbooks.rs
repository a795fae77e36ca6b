//! Fetch-backed adapter for the cookbook endpoints.

use api_host::{
    ApiError, ApiFuture, Cookbook, CookbookApi, CookbookPatch, ListQuery, NewCookbook, Page,
    PageInfo,
};
use serde::Deserialize;

use crate::fetch;

const BASE_URL: &str = "/api/cookbooks";

#[derive(Deserialize)]
struct CookbookListEnvelope {
    #[serde(default)]
    cookbooks: Vec<Cookbook>,
    #[serde(default)]
    pagination: Option<WirePagination>,
}

#[derive(Debug, Default, Deserialize)]
struct WirePagination {
    #[serde(default)]
    total: u64,
    #[serde(default, rename = "hasMore")]
    has_more: bool,
}

#[derive(Deserialize)]
struct CookbookEnvelope {
    cookbook: Cookbook,
}

fn list_url(query: &ListQuery) -> String {
    format!("{BASE_URL}?limit={}&offset={}", query.limit, query.offset)
}

fn encode_body<T: serde::Serialize>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::Transport(format!("encode request: {e}")))
}

/// Browser implementation of [`CookbookApi`] over the `/api/cookbooks`
/// routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCookbookApi;

impl CookbookApi for WebCookbookApi {
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Cookbook>, ApiError>> {
        Box::pin(async move {
            let envelope: CookbookListEnvelope =
                fetch::request_json("GET", &list_url(query), None).await?;
            let pagination = envelope.pagination.unwrap_or_default();
            Ok(Page {
                items: envelope.cookbooks,
                pagination: PageInfo {
                    total: pagination.total,
                    has_more: pagination.has_more,
                },
            })
        })
    }

    fn create<'a>(&'a self, draft: &'a NewCookbook) -> ApiFuture<'a, Result<Cookbook, ApiError>> {
        Box::pin(async move {
            let body = encode_body(draft)?;
            let envelope: CookbookEnvelope =
                fetch::request_json("POST", BASE_URL, Some(body)).await?;
            Ok(envelope.cookbook)
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        patch: &'a CookbookPatch,
    ) -> ApiFuture<'a, Result<Cookbook, ApiError>> {
        Box::pin(async move {
            let body = encode_body(patch)?;
            let envelope: CookbookEnvelope =
                fetch::request_json("PUT", &format!("{BASE_URL}/{id}"), Some(body)).await?;
            Ok(envelope.cookbook)
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move { fetch::request_unit("DELETE", &format!("{BASE_URL}/{id}")).await })
    }
}
