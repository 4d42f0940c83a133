//! In-memory fake of the collaborator contracts, used by the test suites and
//! usable by downstream code for offline development.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::image::{ImageInfo, NewImage, UploadedImage};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerListPage, CustomerReader, CustomerWriter, ImageStore, Pagination,
};

/// Mutex-backed store standing in for the backend. Locks are never held
/// across an await point, and poisoned locks are recovered so a panicking
/// caller cannot wedge later operations.
#[derive(Default)]
pub struct InMemoryRepository {
    customers: Mutex<Vec<Customer>>,
    images: Mutex<Vec<UploadedImage>>,
    next_id: Mutex<u64>,
    write_calls: Mutex<usize>,
    fail_next: Mutex<Option<RepositoryError>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: Vec<Customer>) -> Self {
        let repo = Self::new();
        *repo.customers.lock().unwrap_or_else(PoisonError::into_inner) = customers;
        repo
    }

    /// Queues an error to be returned by the next write operation.
    pub fn fail_next_write(&self, err: RepositoryError) {
        *self.fail_next.lock().unwrap_or_else(PoisonError::into_inner) = Some(err);
    }

    /// Number of create/update/delete calls that reached the fake backend.
    pub fn write_calls(&self) -> usize {
        *self.write_calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.customers.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record_write(&self) -> RepositoryResult<()> {
        *self.write_calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        match self.fail_next.lock().unwrap_or_else(PoisonError::into_inner).take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn assign_id(&self) -> String {
        let mut next = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
        *next += 1;
        format!("customer_{next}")
    }
}

fn apply_updates(customer: &mut Customer, updates: &UpdateCustomer) {
    if let Some(name) = &updates.name {
        customer.name = name.clone();
    }
    if let Some(values) = &updates.emails {
        customer.emails = values.clone();
    }
    if let Some(values) = &updates.phone_numbers {
        customer.phone_numbers = values.clone();
    }
    if let Some(values) = &updates.whatsapp_numbers {
        customer.whatsapp_numbers = values.clone();
    }
    if let Some(values) = &updates.website_urls {
        customer.website_urls = values.clone();
    }
    if let Some(values) = &updates.facebook_urls {
        customer.facebook_urls = values.clone();
    }
    if let Some(values) = &updates.instagram_urls {
        customer.instagram_urls = values.clone();
    }
    if let Some(values) = &updates.youtube_urls {
        customer.youtube_urls = values.clone();
    }
    if let Some(values) = &updates.location_urls {
        customer.location_urls = values.clone();
    }
    if let Some(logo) = &updates.company_logo {
        customer.company_logo = logo.clone();
    }
    if let Some(description) = &updates.description {
        customer.description = description.clone();
    }
    customer.updated_at = Some(Utc::now());
}

#[async_trait]
impl CustomerReader for InMemoryRepository {
    async fn get_customer(&self, id: &str) -> RepositoryResult<Customer> {
        self.customers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_customers(&self, pagination: Pagination) -> RepositoryResult<CustomerListPage> {
        let customers = self.customers.lock().unwrap_or_else(PoisonError::into_inner);
        let total = customers.len();
        let per_page = pagination.per_page.max(1);
        let page = pagination.page.max(1);
        let items = customers
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();
        Ok(CustomerListPage {
            items,
            total,
            page,
            page_count: total.div_ceil(per_page),
        })
    }

    async fn search_customers(&self, query: &str) -> RepositoryResult<Vec<Customer>> {
        let needle = query.trim().to_lowercase();
        let customers = self.customers.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(customers
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.emails.iter().any(|e| e.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn count_customers(&self) -> RepositoryResult<usize> {
        Ok(self.customers.lock().unwrap_or_else(PoisonError::into_inner).len())
    }
}

#[async_trait]
impl CustomerWriter for InMemoryRepository {
    async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        self.record_write()?;
        let mut customers = self.customers.lock().unwrap_or_else(PoisonError::into_inner);
        if customers.iter().any(|c| c.name == new_customer.name) {
            return Err(RepositoryError::Conflict(
                "Resource already exists".to_string(),
            ));
        }
        let now = Utc::now();
        let customer = Customer {
            id: self.assign_id(),
            name: new_customer.name.clone(),
            emails: new_customer.emails.clone(),
            phone_numbers: new_customer.phone_numbers.clone(),
            whatsapp_numbers: new_customer.whatsapp_numbers.clone(),
            website_urls: new_customer.website_urls.clone(),
            facebook_urls: new_customer.facebook_urls.clone(),
            instagram_urls: new_customer.instagram_urls.clone(),
            youtube_urls: new_customer.youtube_urls.clone(),
            location_urls: new_customer.location_urls.clone(),
            company_logo: new_customer.company_logo.clone(),
            description: new_customer.description.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn update_customer(
        &self,
        id: &str,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        self.record_write()?;
        let mut customers = self.customers.lock().unwrap_or_else(PoisonError::into_inner);
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        apply_updates(customer, updates);
        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: &str) -> RepositoryResult<()> {
        self.record_write()?;
        let mut customers = self.customers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ImageStore for InMemoryRepository {
    async fn upload_image(&self, image: &NewImage) -> RepositoryResult<UploadedImage> {
        let uploaded = UploadedImage {
            filename: image.filename.clone(),
            original_name: Some(image.filename.clone()),
            size: image.size(),
            mime_type: image.mime_type.clone(),
            url: self.image_url(&image.filename),
        };
        self.images
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(uploaded.clone());
        Ok(uploaded)
    }

    async fn image_info(&self, filename: &str) -> RepositoryResult<ImageInfo> {
        let images = self.images.lock().unwrap_or_else(PoisonError::into_inner);
        let image = images
            .iter()
            .find(|i| i.filename == filename)
            .ok_or(RepositoryError::NotFound)?;
        Ok(ImageInfo {
            filename: image.filename.clone(),
            size: image.size,
            created: Some(Utc::now()),
            modified: Some(Utc::now()),
            url: image.url.clone(),
        })
    }

    async fn delete_image(&self, filename: &str) -> RepositoryResult<()> {
        let mut images = self.images.lock().unwrap_or_else(PoisonError::into_inner);
        let before = images.len();
        images.retain(|i| i.filename != filename);
        if images.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn image_url(&self, filename: &str) -> String {
        format!("/api/images/{filename}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poisoned_locks_are_recovered() {
        let repo = InMemoryRepository::with_customers(vec![Customer {
            id: "customer_1".to_string(),
            name: "Acme".to_string(),
            ..Customer::default()
        }]);

        // Poison the store by panicking while the lock is held.
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = repo.customers.lock().unwrap();
            panic!("poison");
        }));
        assert!(result.is_err());

        assert_eq!(repo.customers().len(), 1);
        assert_eq!(repo.customers()[0].name, "Acme");
    }
}
