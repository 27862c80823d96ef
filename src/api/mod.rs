//! REST API boundary: resource trait, wire types, and the HTTP client.

pub mod client;
pub mod types;

use serde::de::DeserializeOwned;

pub use client::ApiClient;
pub use types::{ApiMessage, ListQuery, Page, PageMeta, StatusChange};

/// A named server collection reachable under `{base_url}/{PATH}`.
///
/// Every entity the client caches implements this; the client methods are
/// generic over it so each resource gets list/detail/mutation calls without
/// per-resource endpoint code.
pub trait Resource: DeserializeOwned {
    /// URL path segment for the collection (e.g. `"employees"`).
    const PATH: &'static str;

    /// Human-readable singular label used in notices and errors.
    const LABEL: &'static str;
}
