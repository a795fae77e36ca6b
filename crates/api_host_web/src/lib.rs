//! Browser adapters implementing the `api_host` service contracts over
//! `fetch`.
//!
//! The concrete WASM/JS interop lives in a cfg-split fetch bridge; on
//! non-WASM targets the adapters compile but every request reports a
//! transport error.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod cookbooks;
mod fetch;
mod recipes;

pub use cookbooks::WebCookbookApi;
pub use recipes::WebRecipeApi;

use std::rc::Rc;

use api_host::{ApiServices, SystemClock};

/// Composes the production [`ApiServices`] bundle over the browser adapters
/// and the wall clock.
pub fn browser_api_services() -> ApiServices {
    ApiServices::new(
        Rc::new(WebRecipeApi),
        Rc::new(WebCookbookApi),
        Rc::new(SystemClock),
    )
}
