//! HTTP client and the backend seam trait

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{ApiError, decode_error_body};
use super::types::{
    CancelTransferRequest, NewAccount, NewCustomer, NewTransaction, NewTransfer,
    ReverseTransactionRequest,
};
use crate::model::{
    Account, Customer, JournalBatch, Permission, Product, Role, Transaction, Transfer, User,
};

/// Header carrying the client-generated de-duplication token.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Backend operations consumed by the workflows.
///
/// Implemented by [`ApiClient`] over HTTP and by the in-memory mock backend
/// for tests, so the cascade and the action runner never care which side of
/// the wire they are on.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn health(&self) -> Result<(), ApiError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;
    async fn get_customer(&self, id: &str) -> Result<Customer, ApiError>;
    async fn create_customer(
        &self,
        req: &NewCustomer,
        idempotency_key: &str,
    ) -> Result<Customer, ApiError>;
    /// Accounts owned by one client. Unfiltered; status filtering is the
    /// caller's concern.
    async fn accounts_for_client(&self, client_id: &str) -> Result<Vec<Account>, ApiError>;
    async fn get_account(&self, id: &str) -> Result<Account, ApiError>;
    async fn create_account(
        &self,
        req: &NewAccount,
        idempotency_key: &str,
    ) -> Result<Account, ApiError>;

    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
    async fn list_roles(&self) -> Result<Vec<Role>, ApiError>;
    async fn list_permissions(&self) -> Result<Vec<Permission>, ApiError>;

    async fn get_transaction(&self, id: &str) -> Result<Transaction, ApiError>;
    async fn transactions_for_account(
        &self,
        account_id: &str,
    ) -> Result<Vec<Transaction>, ApiError>;
    async fn create_transaction(
        &self,
        req: &NewTransaction,
        idempotency_key: &str,
    ) -> Result<Transaction, ApiError>;
    async fn reverse_transaction(
        &self,
        id: &str,
        req: &ReverseTransactionRequest,
        idempotency_key: &str,
    ) -> Result<Transaction, ApiError>;

    async fn get_transfer(&self, id: &str) -> Result<Transfer, ApiError>;
    async fn create_transfer(
        &self,
        req: &NewTransfer,
        idempotency_key: &str,
    ) -> Result<Transfer, ApiError>;
    async fn cancel_transfer(
        &self,
        id: &str,
        req: &CancelTransferRequest,
        idempotency_key: &str,
    ) -> Result<Transfer, ApiError>;

    async fn get_batch(&self, id: &str) -> Result<JournalBatch, ApiError>;
    async fn post_batch(
        &self,
        id: &str,
        idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError>;
    async fn close_batch(
        &self,
        id: &str,
        idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError>;
    async fn recalculate_batch(
        &self,
        id: &str,
        idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError>;
}

/// REST client against a configured base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client. `base_url` must not end with a slash.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Parse a 2xx body as JSON; decode anything else into `ApiError::Http`.
    async fn read_response<R: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<R, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<R>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = decode_error_body(status.as_u16(), &body);
        debug!(status = status.as_u16(), %message, "backend rejected request");
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::read_response(response).await
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: Option<&str>,
    ) -> Result<R, ApiError> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_HEADER, key);
        }
        let response = request.send().await?;
        Self::read_response(response).await
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn health(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.get_json("/api/health").await?;
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get_json("/api/customers").await
    }

    async fn get_customer(&self, id: &str) -> Result<Customer, ApiError> {
        self.get_json(&format!("/api/customers/{}", id)).await
    }

    async fn create_customer(
        &self,
        req: &NewCustomer,
        idempotency_key: &str,
    ) -> Result<Customer, ApiError> {
        self.post_json("/api/customers", req, Some(idempotency_key))
            .await
    }

    async fn accounts_for_client(&self, client_id: &str) -> Result<Vec<Account>, ApiError> {
        self.get_json(&format!("/api/accounts?clientId={}", client_id))
            .await
    }

    async fn get_account(&self, id: &str) -> Result<Account, ApiError> {
        self.get_json(&format!("/api/accounts/{}", id)).await
    }

    async fn create_account(
        &self,
        req: &NewAccount,
        idempotency_key: &str,
    ) -> Result<Account, ApiError> {
        self.post_json("/api/accounts", req, Some(idempotency_key))
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/api/products").await
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/api/users").await
    }

    async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get_json("/api/roles").await
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, ApiError> {
        self.get_json("/api/permissions").await
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        self.get_json(&format!("/api/transactions/{}", id)).await
    }

    async fn transactions_for_account(
        &self,
        account_id: &str,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.get_json(&format!("/api/transactions?accountId={}", account_id))
            .await
    }

    async fn create_transaction(
        &self,
        req: &NewTransaction,
        idempotency_key: &str,
    ) -> Result<Transaction, ApiError> {
        self.post_json("/api/transactions", req, Some(idempotency_key))
            .await
    }

    async fn reverse_transaction(
        &self,
        id: &str,
        req: &ReverseTransactionRequest,
        idempotency_key: &str,
    ) -> Result<Transaction, ApiError> {
        self.post_json(
            &format!("/api/transactions/{}/reverse", id),
            req,
            Some(idempotency_key),
        )
        .await
    }

    async fn get_transfer(&self, id: &str) -> Result<Transfer, ApiError> {
        self.get_json(&format!("/api/transfers/{}", id)).await
    }

    async fn create_transfer(
        &self,
        req: &NewTransfer,
        idempotency_key: &str,
    ) -> Result<Transfer, ApiError> {
        self.post_json("/api/transfers", req, Some(idempotency_key))
            .await
    }

    async fn cancel_transfer(
        &self,
        id: &str,
        req: &CancelTransferRequest,
        idempotency_key: &str,
    ) -> Result<Transfer, ApiError> {
        self.post_json(
            &format!("/api/transfers/{}/cancel", id),
            req,
            Some(idempotency_key),
        )
        .await
    }

    async fn get_batch(&self, id: &str) -> Result<JournalBatch, ApiError> {
        self.get_json(&format!("/api/journal-batches/{}", id)).await
    }

    async fn post_batch(
        &self,
        id: &str,
        idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError> {
        self.post_json(
            &format!("/api/journal-batches/{}/post", id),
            &serde_json::json!({}),
            Some(idempotency_key),
        )
        .await
    }

    async fn close_batch(
        &self,
        id: &str,
        idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError> {
        self.post_json(
            &format!("/api/journal-batches/{}/close", id),
            &serde_json::json!({}),
            Some(idempotency_key),
        )
        .await
    }

    async fn recalculate_batch(
        &self,
        id: &str,
        idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError> {
        self.post_json(
            &format!("/api/journal-batches/{}/recalculate-totals", id),
            &serde_json::json!({}),
            Some(idempotency_key),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:8090/", 10).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8090");
        assert_eq!(client.url("/api/health"), "http://localhost:8090/api/health");
    }

    #[test]
    fn test_client_creation() {
        assert!(ApiClient::new("http://127.0.0.1:8090", 30).is_ok());
    }
}
