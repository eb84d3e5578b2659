use crate::error::AppError;
use crate::schemas::{CustomerRequest, OwnerTransactionsRequest, TransactionsResponse};
use crate::validation::{required, ValidatedJson};
use crate::AppState;
use axum::{extract::State, Json};

/// Renter transaction history
///
/// Charges paid by the customer and the refunds issued against them, newest first.
#[utoipa::path(
    post,
    path = "/transactions/renter",
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Transactions, newest first", body = TransactionsResponse),
        (status = 400, description = "Missing customerId")
    ),
    tag = "Transactions"
)]
pub async fn renter_transactions(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CustomerRequest>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let customer_id = required("customerId", payload.customer_id)?;
    let transactions = state.history.for_renter(&customer_id).await?;
    Ok(Json(TransactionsResponse { transactions }))
}

/// Owner transaction history
///
/// Transfers paid out to the connected account and their reversals, newest first.
#[utoipa::path(
    post,
    path = "/transactions/owner",
    request_body = OwnerTransactionsRequest,
    responses(
        (status = 200, description = "Transactions, newest first", body = TransactionsResponse),
        (status = 400, description = "Missing connectAccountId")
    ),
    tag = "Transactions"
)]
pub async fn owner_transactions(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OwnerTransactionsRequest>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let connect_account_id = required("connectAccountId", payload.connect_account_id)?;
    let transactions = state.history.for_owner(&connect_account_id).await?;
    Ok(Json(TransactionsResponse { transactions }))
}
