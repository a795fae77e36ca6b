//! Typed API contracts and shared models for the recipe/cookbook data layer.
//!
//! This crate is the API-first boundary between the client-side stores and the
//! HTTP backend. It exposes the entity records, page/query types, service
//! traits, and clock abstraction, while concrete browser adapters live in
//! `api_host_web` and the reactive stores live in `data_runtime`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod error;
pub mod host;
pub mod memory;
pub mod models;
pub mod page;
pub mod time;

pub use api::{ApiFuture, CookbookApi, NoopCookbookApi, NoopRecipeApi, RecipeApi};
pub use error::ApiError;
pub use host::ApiServices;
pub use memory::{MemoryCookbookApi, MemoryRecipeApi};
pub use models::{Cookbook, CookbookPatch, NewCookbook, Recipe, RecipeDraft, RecipePatch};
pub use page::{ListQuery, Page, PageInfo};
pub use time::{unix_time_ms_now, Clock, ManualClock, SystemClock};
