//! Contracts for the REST collaborators the core depends on but does not
//! implement: the customer API and the image API.
//!
//! Services and the form controller are generic over these traits, so tests
//! run against [`mock::InMemoryRepository`] while the application wires in
//! [`rest::RestRepository`].

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::image::{ImageInfo, NewImage, UploadedImage};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod mock;
pub mod rest;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 50;

/// Page selector for customer listings.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize) -> Self {
        Self {
            page,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1)
    }
}

/// One page of customers as returned by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListPage {
    pub items: Vec<Customer>,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
}

#[async_trait]
pub trait CustomerReader {
    /// Fails with [`errors::RepositoryError::NotFound`] for unknown ids;
    /// the service layer decides whether that is an error or an absence.
    async fn get_customer(&self, id: &str) -> RepositoryResult<Customer>;
    async fn list_customers(&self, pagination: Pagination) -> RepositoryResult<CustomerListPage>;
    async fn search_customers(&self, query: &str) -> RepositoryResult<Vec<Customer>>;
    async fn count_customers(&self) -> RepositoryResult<usize>;
}

#[async_trait]
pub trait CustomerWriter {
    async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    async fn update_customer(
        &self,
        id: &str,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    async fn delete_customer(&self, id: &str) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ImageStore {
    async fn upload_image(&self, image: &NewImage) -> RepositoryResult<UploadedImage>;
    async fn image_info(&self, filename: &str) -> RepositoryResult<ImageInfo>;
    async fn delete_image(&self, filename: &str) -> RepositoryResult<()>;
    /// URL under which a stored image is served.
    fn image_url(&self, filename: &str) -> String;
}
