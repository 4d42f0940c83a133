//! `reqwest`-backed implementation of the collaborator contracts.
//!
//! Every endpoint wraps its payload in a `{ success, message, data }`
//! envelope; error statuses are mapped to [`RepositoryError`] categories by
//! [`RepositoryError::from_status`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::image::{ImageInfo, NewImage, UploadedImage};
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerListPage, CustomerReader, CustomerWriter, ImageStore, Pagination,
};

#[derive(Deserialize)]
struct ApiResponse<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct CountData {
    count: usize,
}

/// REST client for the customer and image APIs.
#[derive(Clone)]
pub struct RestRepository {
    http: Client,
    base_url: String,
}

impl RestRepository {
    pub fn new(config: &ClientConfig) -> RepositoryResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| RepositoryError::Other(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Unwraps the response envelope or maps the error status.
    async fn read_payload<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
        let status = response.status();
        let body = response.bytes().await?;
        if status.is_success() {
            let envelope: ApiResponse<T> = serde_json::from_slice(&body)
                .map_err(|err| RepositoryError::Decode(err.to_string()))?;
            return Ok(envelope.data);
        }
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        Err(RepositoryError::from_status(status, message))
    }

    /// Like [`Self::read_payload`] for endpoints whose body carries no data.
    async fn read_empty(response: Response) -> RepositoryResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .and_then(|b| b.message);
        Err(RepositoryError::from_status(status, message))
    }

    /// Backend liveness probe.
    pub async fn health_check(&self) -> RepositoryResult<()> {
        let response = self.http.get(self.url("/health")).send().await?;
        Self::read_empty(response).await
    }
}

#[async_trait]
impl CustomerReader for RestRepository {
    async fn get_customer(&self, id: &str) -> RepositoryResult<Customer> {
        let url = self.url(&format!("/api/customers/{id}"));
        log::debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        Self::read_payload(response).await
    }

    async fn list_customers(&self, pagination: Pagination) -> RepositoryResult<CustomerListPage> {
        let url = self.url("/api/customers");
        log::debug!("GET {url} page={} limit={}", pagination.page, pagination.per_page);
        let response = self
            .http
            .get(url)
            .query(&[("page", pagination.page), ("limit", pagination.per_page)])
            .send()
            .await?;
        Self::read_payload(response).await
    }

    async fn search_customers(&self, query: &str) -> RepositoryResult<Vec<Customer>> {
        let url = self.url("/api/customers/search");
        log::debug!("GET {url} q={query}");
        let response = self.http.get(url).query(&[("q", query)]).send().await?;
        Self::read_payload(response).await
    }

    async fn count_customers(&self) -> RepositoryResult<usize> {
        let response = self
            .http
            .get(self.url("/api/customers/count"))
            .send()
            .await?;
        let data: CountData = Self::read_payload(response).await?;
        Ok(data.count)
    }
}

#[async_trait]
impl CustomerWriter for RestRepository {
    async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        let url = self.url("/api/customers");
        log::debug!("POST {url}");
        let response = self.http.post(url).json(new_customer).send().await?;
        Self::read_payload(response).await
    }

    async fn update_customer(
        &self,
        id: &str,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        let url = self.url(&format!("/api/customers/{id}"));
        log::debug!("PUT {url}");
        let response = self.http.put(url).json(updates).send().await?;
        Self::read_payload(response).await
    }

    async fn delete_customer(&self, id: &str) -> RepositoryResult<()> {
        let url = self.url(&format!("/api/customers/{id}"));
        log::debug!("DELETE {url}");
        let response = self.http.delete(url).send().await?;
        Self::read_empty(response).await
    }
}

#[async_trait]
impl ImageStore for RestRepository {
    async fn upload_image(&self, image: &NewImage) -> RepositoryResult<UploadedImage> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str(&image.mime_type)
            .map_err(|err| RepositoryError::BadRequest(err.to_string()))?;
        let form = Form::new().part("image", part);
        let url = self.url("/api/images/upload");
        log::debug!("POST {url} ({} bytes)", image.size());
        let response = self.http.post(url).multipart(form).send().await?;
        Self::read_payload(response).await
    }

    async fn image_info(&self, filename: &str) -> RepositoryResult<ImageInfo> {
        let response = self
            .http
            .get(self.url(&format!("/api/images/{filename}/info")))
            .send()
            .await?;
        Self::read_payload(response).await
    }

    async fn delete_image(&self, filename: &str) -> RepositoryResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/images/{filename}")))
            .send()
            .await?;
        Self::read_empty(response).await
    }

    fn image_url(&self, filename: &str) -> String {
        self.url(&format!("/api/images/{filename}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let config = ClientConfig {
            base_url: "http://localhost:5000/".to_string(),
            timeout_secs: 10,
        };
        let repo = RestRepository::new(&config).expect("build client");
        assert_eq!(repo.url("/health"), "http://localhost:5000/health");
        assert_eq!(
            repo.image_url("logo.png"),
            "http://localhost:5000/api/images/logo.png"
        );
    }
}
