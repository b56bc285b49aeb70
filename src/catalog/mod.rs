/// Catalog domain layer: identifier resolution and domain errors.
pub mod errors;
pub mod resolve;

pub use errors::CatalogError;
pub use resolve::{ReleaseScope, release_scope, resolve};
