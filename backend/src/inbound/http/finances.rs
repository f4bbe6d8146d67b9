//! Finance HTTP handlers.
//!
//! ```text
//! GET  /api/finances
//! POST /api/finances/transaction
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, FinanceLedger, Transaction, TransactionKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Request body for recording a ledger transaction.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// `revenue` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Amount in cents; must be positive.
    pub amount_cents: Option<i64>,
    /// What the movement was for.
    pub description: Option<String>,
}

fn map_storage_error(err: crate::domain::ports::FinanceLedgerError) -> Error {
    Error::internal(format!("finance ledger unavailable: {err}"))
}

/// Current ledger totals.
#[utoipa::path(
    get,
    path = "/api/finances",
    responses(
        (status = 200, description = "Ledger totals", body = FinanceLedger),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["finances"],
    operation_id = "getFinances"
)]
#[get("")]
pub async fn get_finances(state: web::Data<HttpState>) -> ApiResult<web::Json<FinanceLedger>> {
    let ledger = state.finance.snapshot().await.map_err(map_storage_error)?;
    Ok(web::Json(ledger))
}

/// Record a revenue or expense movement.
#[utoipa::path(
    post,
    path = "/api/finances/transaction",
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Updated totals", body = FinanceLedger),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["finances"],
    operation_id = "recordTransaction"
)]
#[post("/transaction")]
pub async fn record_transaction(
    state: web::Data<HttpState>,
    payload: web::Json<TransactionRequest>,
) -> ApiResult<web::Json<FinanceLedger>> {
    let TransactionRequest {
        kind,
        amount_cents,
        description,
    } = payload.into_inner();

    let kind = match require(kind, FieldName::new("type"))?.as_str() {
        "revenue" => TransactionKind::Revenue,
        "expense" => TransactionKind::Expense,
        other => {
            return Err(Error::invalid_request(format!(
                "transaction type must be revenue or expense, got {other:?}"
            ))
            .with_details(json!({ "field": "type", "code": "invalid_transaction_type" })));
        }
    };
    let amount = require(amount_cents, FieldName::new("amountCents"))?;
    let transaction = Transaction::new(kind, amount, description.unwrap_or_default())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let ledger = state
        .finance
        .apply(transaction)
        .await
        .map_err(map_storage_error)?;
    Ok(web::Json(ledger))
}
