use crate::error::AppError;
use crate::ports::NewCustomer;
use crate::schemas::{
    CreateCustomerRequest, CreateCustomerResponse, DeleteAccountsRequest, DeleteAccountsResponse,
    DetachPaymentMethodRequest, DetachPaymentMethodResponse, PaymentMethodsResponse,
};
use crate::validation::{optional, required, ValidatedJson};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCustomerRequest>,
) -> Result<Json<CreateCustomerResponse>, AppError> {
    let customer = state
        .platform
        .create_customer(&NewCustomer {
            email: optional(payload.email),
            name: optional(payload.name),
            user_id: optional(payload.user_id),
        })
        .await?;

    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok(Json(CreateCustomerResponse {
        customer_id: customer.id,
    }))
}

pub async fn list_payment_methods(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<PaymentMethodsResponse>, AppError> {
    let customer_id = required("customerId", Some(customer_id))?;
    let methods = state.platform.list_payment_methods(&customer_id).await?;
    Ok(Json(PaymentMethodsResponse { methods }))
}

pub async fn detach_payment_method(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DetachPaymentMethodRequest>,
) -> Result<Json<DetachPaymentMethodResponse>, AppError> {
    let payment_method_id = required("paymentMethodId", payload.payment_method_id)?;
    let method = state.platform.detach_payment_method(&payment_method_id).await?;

    Ok(Json(DetachPaymentMethodResponse {
        success: true,
        id: method.id,
    }))
}

/// Delete renter and/or owner records
///
/// Best effort: each deletion is attempted and reported on its own, and the call
/// answers 200 even when one of them fails.
#[utoipa::path(
    delete,
    path = "/stripe/delete-accounts",
    request_body = DeleteAccountsRequest,
    responses(
        (status = 200, description = "Per-account deletion results", body = DeleteAccountsResponse),
        (status = 400, description = "Neither customerId nor connectAccountId given")
    ),
    tag = "Accounts"
)]
pub async fn delete_accounts(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteAccountsRequest>,
) -> Result<Json<DeleteAccountsResponse>, AppError> {
    let customer_id = optional(payload.customer_id);
    let connect_account_id = optional(payload.connect_account_id);

    if customer_id.is_none() && connect_account_id.is_none() {
        return Err(AppError::Validation(
            "customerId or connectAccountId is required".to_string(),
        ));
    }

    let details = state
        .accounts
        .delete_accounts(customer_id.as_deref(), connect_account_id.as_deref())
        .await;

    Ok(Json(DeleteAccountsResponse {
        success: details.all_succeeded(),
        details,
    }))
}
