//! In-memory customer list backing the table view.
//!
//! The list is fetched once when the view mounts and is only ever mutated
//! after the collaborator confirms the corresponding server-side operation;
//! there is no optimistic update.

use crate::domain::customer::Customer;
use crate::repository::{CustomerReader, CustomerWriter, Pagination};
use crate::services::customer as customer_service;
use crate::services::ServiceResult;

#[derive(Debug, Default)]
pub struct CustomerCollection {
    customers: Vec<Customer>,
    total: usize,
    page: usize,
    page_count: usize,
}

impl CustomerCollection {
    pub async fn load<R>(repo: &R, pagination: Pagination) -> ServiceResult<Self>
    where
        R: CustomerReader + ?Sized,
    {
        let page = customer_service::list_customers(repo, pagination).await?;
        Ok(Self {
            customers: page.items,
            total: page.total,
            page: page.page,
            page_count: page.page_count,
        })
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Inserts or replaces a server-confirmed record, matching on id.
    pub fn apply_saved(&mut self, customer: Customer) {
        match self.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => *existing = customer,
            None => {
                self.customers.push(customer);
                self.total += 1;
            }
        }
    }

    /// Deletes on the backend first, then drops the local entry. `Ok(false)`
    /// means the record was already gone server-side; the local entry is
    /// dropped either way.
    pub async fn remove<R>(&mut self, repo: &R, id: &str) -> ServiceResult<bool>
    where
        R: CustomerWriter + ?Sized,
    {
        let deleted = customer_service::delete_customer(repo, id).await?;
        let before = self.customers.len();
        self.customers.retain(|c| c.id != id);
        if self.customers.len() < before {
            self.total = self.total.saturating_sub(1);
        }
        Ok(deleted)
    }
}
