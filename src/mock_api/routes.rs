//! HTTP surface of the mock backend
//!
//! Thin axum wrappers over [`MockBank`] operations, so integration tests
//! exercise the real [`ApiClient`](crate::gateway::ApiClient) over the
//! wire, error-body decoding included.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::info;

use super::store::{MockBank, Rejection};
use crate::gateway::{CancelTransferRequest, NewAccount, NewCustomer, NewTransaction,
    NewTransfer, ReverseTransactionRequest, client::IDEMPOTENCY_HEADER};

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(serde_json::json!({ "message": self.message }));
        (status, body).into_response()
    }
}

fn idempotency_key(headers: &HeaderMap) -> String {
    headers
        .get(IDEMPOTENCY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Deserialize)]
struct AccountsQuery {
    #[serde(rename = "clientId")]
    client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransactionsQuery {
    #[serde(rename = "accountId")]
    account_id: Option<String>,
}

async fn health(State(bank): State<MockBank>) -> Result<Json<serde_json::Value>, Rejection> {
    Ok(Json(bank.op_health()?))
}

async fn list_customers(State(bank): State<MockBank>) -> Result<Response, Rejection> {
    Ok(Json(bank.op_list_customers()?).into_response())
}

async fn get_customer(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_get_customer(&id)?).into_response())
}

async fn create_customer(
    State(bank): State<MockBank>,
    Json(req): Json<NewCustomer>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_create_customer(&req)?).into_response())
}

async fn list_accounts(
    State(bank): State<MockBank>,
    Query(query): Query<AccountsQuery>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_list_accounts(query.client_id.as_deref())?).into_response())
}

async fn get_account(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_get_account(&id)?).into_response())
}

async fn create_account(
    State(bank): State<MockBank>,
    Json(req): Json<NewAccount>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_create_account(&req)?).into_response())
}

async fn list_products(State(bank): State<MockBank>) -> Result<Response, Rejection> {
    Ok(Json(bank.op_list_products()?).into_response())
}

async fn list_users(State(bank): State<MockBank>) -> Result<Response, Rejection> {
    Ok(Json(bank.op_list_users()?).into_response())
}

async fn list_roles(State(bank): State<MockBank>) -> Result<Response, Rejection> {
    Ok(Json(bank.op_list_roles()?).into_response())
}

async fn list_permissions(State(bank): State<MockBank>) -> Result<Response, Rejection> {
    Ok(Json(bank.op_list_permissions()?).into_response())
}

async fn list_transactions(
    State(bank): State<MockBank>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_list_transactions(query.account_id.as_deref())?).into_response())
}

async fn get_transaction(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_get_transaction(&id)?).into_response())
}

async fn create_transaction(
    State(bank): State<MockBank>,
    Json(req): Json<NewTransaction>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_create_transaction(&req)?).into_response())
}

async fn reverse_transaction(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
    Json(req): Json<ReverseTransactionRequest>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_reverse_transaction(&id, &req)?).into_response())
}

async fn get_transfer(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_get_transfer(&id)?).into_response())
}

async fn create_transfer(
    State(bank): State<MockBank>,
    headers: HeaderMap,
    Json(req): Json<NewTransfer>,
) -> Result<Response, Rejection> {
    let key = idempotency_key(&headers);
    Ok(Json(bank.op_create_transfer(&req, &key)?).into_response())
}

async fn cancel_transfer(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
    Json(req): Json<CancelTransferRequest>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_cancel_transfer(&id, &req)?).into_response())
}

async fn get_batch(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_get_batch(&id)?).into_response())
}

async fn post_batch(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_post_batch(&id)?).into_response())
}

async fn close_batch(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_close_batch(&id)?).into_response())
}

async fn recalculate_batch(
    State(bank): State<MockBank>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    Ok(Json(bank.op_recalculate_batch(&id)?).into_response())
}

/// Build the mock backend router.
pub fn router(bank: MockBank) -> axum::Router {
    axum::Router::new()
        .route("/api/health", get(health))
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/customers/{id}", get(get_customer))
        .route("/api/accounts", get(list_accounts).post(create_account))
        .route("/api/accounts/{id}", get(get_account))
        .route("/api/products", get(list_products))
        .route("/api/users", get(list_users))
        .route("/api/roles", get(list_roles))
        .route("/api/permissions", get(list_permissions))
        .route("/api/transactions", get(list_transactions).post(create_transaction))
        .route("/api/transactions/{id}", get(get_transaction))
        .route("/api/transactions/{id}/reverse", post(reverse_transaction))
        .route("/api/transfers", post(create_transfer))
        .route("/api/transfers/{id}", get(get_transfer))
        .route("/api/transfers/{id}/cancel", post(cancel_transfer))
        .route("/api/journal-batches/{id}", get(get_batch))
        .route("/api/journal-batches/{id}/post", post(post_batch))
        .route("/api/journal-batches/{id}/close", post(close_batch))
        .route(
            "/api/journal-batches/{id}/recalculate-totals",
            post(recalculate_batch),
        )
        .with_state(bank)
}

/// Bind the mock backend on an ephemeral local port.
///
/// Returns the bound address and the serve task handle; dropping the
/// handle does not stop the server, aborting it does.
pub async fn serve(bank: MockBank) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    info!(%addr, "mock backend listening");

    let app = router(bank);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "mock backend stopped");
        }
    });

    Ok((addr, handle))
}
