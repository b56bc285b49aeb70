/// In-memory [`CatalogApi`] for command tests. Counts every call.
use std::cell::{Cell, RefCell};

use super::client::CatalogApi;
use super::errors::ApiError;
use crate::types::{Product, Release, ReleaseDependency, UserGroup};

#[derive(Default)]
pub struct MockCatalog {
    pub products: Vec<Product>,
    pub releases: Vec<Release>,
    pub dependencies: Vec<ReleaseDependency>,
    pub user_groups: Vec<UserGroup>,
    pub release_user_groups: Vec<UserGroup>,
    /// When set, every call fails with `ApiError::Status { status, .. }`.
    pub fail_with_status: Option<u16>,
    pub calls: Cell<usize>,
    /// `(product_id, release_id)` of the last dependency lookup.
    pub last_ids: Cell<Option<(u64, u64)>>,
    /// `(product_slug, release_id)` of the last per-release user group lookup.
    pub last_release_lookup: RefCell<Option<(String, u64)>>,
}

impl MockCatalog {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn hit(&self) -> Result<(), ApiError> {
        self.calls.set(self.calls.get() + 1);
        match self.fail_with_status {
            Some(status) => Err(ApiError::Status {
                status,
                message: "mock failure".to_owned(),
            }),
            None => Ok(()),
        }
    }
}

impl CatalogApi for MockCatalog {
    fn get_product(&self, slug: &str) -> Result<Product, ApiError> {
        self.hit()?;
        self.products
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                path: format!("/products/{slug}"),
            })
    }

    fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.hit()?;
        Ok(self.products.clone())
    }

    fn list_releases(&self, _product_slug: &str) -> Result<Vec<Release>, ApiError> {
        self.hit()?;
        Ok(self.releases.clone())
    }

    fn get_release_dependencies(
        &self,
        product_id: u64,
        release_id: u64,
    ) -> Result<Vec<ReleaseDependency>, ApiError> {
        self.hit()?;
        self.last_ids.set(Some((product_id, release_id)));
        Ok(self.dependencies.clone())
    }

    fn list_user_groups(&self) -> Result<Vec<UserGroup>, ApiError> {
        self.hit()?;
        Ok(self.user_groups.clone())
    }

    fn list_user_groups_for_release(
        &self,
        product_slug: &str,
        release_id: u64,
    ) -> Result<Vec<UserGroup>, ApiError> {
        self.hit()?;
        *self.last_release_lookup.borrow_mut() = Some((product_slug.to_owned(), release_id));
        Ok(self.release_user_groups.clone())
    }
}
