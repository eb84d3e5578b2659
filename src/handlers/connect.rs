use crate::error::AppError;
use crate::schemas::{
    AccountLinkRequest, AccountLinkResponse, CreateConnectAccountRequest,
    CreateConnectAccountResponse,
};
use crate::validation::{optional, required, ValidatedJson};
use crate::AppState;
use axum::{extract::State, Json};

pub async fn create_connect_account(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateConnectAccountRequest>,
) -> Result<Json<CreateConnectAccountResponse>, AppError> {
    let email = optional(payload.email);
    let account = state.platform.create_connect_account(email.as_deref()).await?;

    tracing::info!(account_id = %account.id, "Connected account created");
    Ok(Json(CreateConnectAccountResponse {
        account_id: account.id,
    }))
}

pub async fn create_account_link(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AccountLinkRequest>,
) -> Result<Json<AccountLinkResponse>, AppError> {
    let account_id = required("accountId", payload.account_id)?;
    let link = state.platform.create_account_link(&account_id).await?;
    Ok(Json(AccountLinkResponse { url: link.url }))
}
