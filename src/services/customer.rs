//! Customer CRUD and search operations over the collaborator contracts.

use validator::Validate;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::repository::errors::RepositoryError;
use crate::repository::{CustomerListPage, CustomerReader, CustomerWriter, Pagination};
use crate::services::{ServiceError, ServiceResult};

/// Fetches one page of customers.
pub async fn list_customers<R>(repo: &R, pagination: Pagination) -> ServiceResult<CustomerListPage>
where
    R: CustomerReader + ?Sized,
{
    repo.list_customers(pagination).await.map_err(|err| {
        log::error!("Failed to fetch customers: {err}");
        ServiceError::from(err)
    })
}

/// Fetches a customer, mapping an unknown id to `None`.
pub async fn get_customer_by_id<R>(repo: &R, id: &str) -> ServiceResult<Option<Customer>>
where
    R: CustomerReader + ?Sized,
{
    match repo.get_customer(id).await {
        Ok(customer) => Ok(Some(customer)),
        Err(RepositoryError::NotFound) => Ok(None),
        Err(err) => {
            log::error!("Failed to fetch customer {id}: {err}");
            Err(err.into())
        }
    }
}

/// Validates the payload and creates the customer. The server response is
/// authoritative.
pub async fn create_customer<R>(repo: &R, new_customer: &NewCustomer) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    if let Err(err) = new_customer.validate() {
        log::error!("Rejected customer payload: {err}");
        return Err(ServiceError::Validation(err.to_string()));
    }
    repo.create_customer(new_customer).await.map_err(|err| {
        log::error!("Failed to create customer: {err}");
        ServiceError::from(err)
    })
}

/// Validates the partial payload and applies it to an existing customer.
pub async fn update_customer<R>(
    repo: &R,
    id: &str,
    updates: &UpdateCustomer,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    if let Err(err) = updates.validate() {
        log::error!("Rejected customer updates: {err}");
        return Err(ServiceError::Validation(err.to_string()));
    }
    repo.update_customer(id, updates).await.map_err(|err| {
        log::error!("Failed to update customer {id}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes a customer. `Ok(false)` means the record was already gone.
pub async fn delete_customer<R>(repo: &R, id: &str) -> ServiceResult<bool>
where
    R: CustomerWriter + ?Sized,
{
    match repo.delete_customer(id).await {
        Ok(()) => Ok(true),
        Err(RepositoryError::NotFound) => Ok(false),
        Err(err) => {
            log::error!("Failed to delete customer {id}: {err}");
            Err(err.into())
        }
    }
}

/// Runs a server-side search. A blank query returns no results without a
/// network call.
pub async fn search_customers<R>(repo: &R, query: &str) -> ServiceResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    repo.search_customers(query).await.map_err(|err| {
        log::error!("Failed to search customers: {err}");
        ServiceError::from(err)
    })
}

pub async fn count_customers<R>(repo: &R) -> ServiceResult<usize>
where
    R: CustomerReader + ?Sized,
{
    repo.count_customers().await.map_err(|err| {
        log::error!("Failed to count customers: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::InMemoryRepository;

    fn seeded_repo() -> InMemoryRepository {
        InMemoryRepository::with_customers(vec![Customer {
            id: "customer_1".to_string(),
            name: "Acme".to_string(),
            emails: vec!["sales@acme.com".to_string()],
            ..Customer::default()
        }])
    }

    #[tokio::test]
    async fn get_maps_not_found_to_none() {
        let repo = seeded_repo();
        assert!(
            get_customer_by_id(&repo, "customer_1")
                .await
                .expect("lookup")
                .is_some()
        );
        assert!(
            get_customer_by_id(&repo, "missing")
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_locally() {
        let repo = InMemoryRepository::new();
        let payload = NewCustomer {
            name: "A".to_string(),
            ..NewCustomer::default()
        };

        let result = create_customer(&repo, &payload).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(repo.write_calls(), 0);
    }

    #[tokio::test]
    async fn delete_reports_already_gone_as_false() {
        let repo = seeded_repo();
        assert!(delete_customer(&repo, "customer_1").await.expect("delete"));
        assert!(!delete_customer(&repo, "customer_1").await.expect("delete"));
    }

    #[tokio::test]
    async fn blank_search_skips_the_collaborator() {
        let repo = seeded_repo();
        let hits = search_customers(&repo, "   ").await.expect("search");
        assert!(hits.is_empty());

        let hits = search_customers(&repo, "acme").await.expect("search");
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn count_passes_through_the_collaborator() {
        let repo = InMemoryRepository::new();
        assert_eq!(count_customers(&repo).await.expect("count"), 0);

        let repo = seeded_repo();
        assert_eq!(count_customers(&repo).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let repo = seeded_repo();
        let updates = UpdateCustomer {
            name: Some("Acme Ltd".to_string()),
            ..UpdateCustomer::default()
        };

        let result = update_customer(&repo, "missing", &updates).await;

        assert_eq!(result, Err(ServiceError::NotFound));
    }
}
