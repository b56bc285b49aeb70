/// Catalog API client layer.
pub mod client;
pub mod errors;
#[cfg(test)]
pub mod mock;

pub use client::{CatalogApi, ClientSettings, HttpCatalogClient};
pub use errors::ApiError;
