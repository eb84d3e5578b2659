use crate::error::AppError;
use crate::schemas::{
    CreatePaymentIntentRequest, CreatePaymentIntentResponse, CustomerRequest, EphemeralKeyResponse,
    RefundRequest, RefundResponse, SetupIntentResponse,
};
use crate::services::SettlementRequest;
use crate::validation::{required, ValidatedJson};
use crate::AppState;
use axum::{extract::State, Json};

/// Open a booking payment
///
/// Creates a payment intent whose funds are routed to the owner's connected account,
/// less the platform fee, under a freshly minted transfer group.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = CreatePaymentIntentResponse),
        (status = 400, description = "Missing amount, customerId or ownerConnectAccountId"),
        (status = 500, description = "Rejected by the payment platform")
    ),
    tag = "Settlements"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, AppError> {
    let request = SettlementRequest::try_from(payload)?;
    let handle = state.settlements.initiate(request).await?;

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: handle.client_secret,
        payment_intent_id: handle.payment_intent_id,
        transfer_group: handle.transfer_group.to_string(),
    }))
}

/// Refund a booking payment
///
/// Refunds the renter in full and reverses every transfer in the payment's transfer
/// group.
#[utoipa::path(
    post,
    path = "/refund",
    request_body = RefundRequest,
    responses(
        (status = 200, description = "Refund issued", body = RefundResponse),
        (status = 400, description = "Missing paymentIntentId"),
        (status = 500, description = "Refund failed, or refund succeeded but reversal failed")
    ),
    tag = "Settlements"
)]
pub async fn refund(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefundRequest>,
) -> Result<Json<RefundResponse>, AppError> {
    let payment_intent_id = required("paymentIntentId", payload.payment_intent_id)?;
    let outcome = state.settlements.reverse(&payment_intent_id).await?;

    Ok(Json(RefundResponse {
        success: true,
        refund_id: outcome.refund.id.clone(),
        refund_status: outcome.refund.status.clone(),
        transfer_reversed: outcome.transfer_reversed(),
        reversal_status: outcome.status(),
        transfer_group: outcome.transfer_group.as_ref().map(|g| g.to_string()),
        transfers_found: outcome.transfers_found,
        reversal: outcome.last_reversal().cloned(),
        reversals: outcome.reversals,
    }))
}

pub async fn create_setup_intent(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CustomerRequest>,
) -> Result<Json<SetupIntentResponse>, AppError> {
    let customer_id = required("customerId", payload.customer_id)?;
    let intent = state.platform.create_setup_intent(&customer_id).await?;

    Ok(Json(SetupIntentResponse {
        client_secret: intent.client_secret,
    }))
}

pub async fn create_ephemeral_key(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CustomerRequest>,
) -> Result<Json<EphemeralKeyResponse>, AppError> {
    let customer_id = required("customerId", payload.customer_id)?;
    let key = state.platform.create_ephemeral_key(&customer_id).await?;

    Ok(Json(EphemeralKeyResponse {
        ephemeral_key: key.secret,
    }))
}
