//! Turns loosely-typed request bodies into validated commands. Nothing here talks to
//! the payment platform: a request that fails validation never leaves the process.

use crate::error::AppError;
use crate::schemas::CreatePaymentIntentRequest;
use crate::services::settlement::SettlementRequest;
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::FromRequest,
    http::Request,
};
use serde::de::DeserializeOwned;

pub const DEFAULT_CURRENCY: &str = "myr";
pub const DEFAULT_DESCRIPTION: &str = "booking";

/// JSON body extractor whose failures are validation errors.
///
/// An empty body reads as `{}`, so a request without one is reported field by field
/// like any other incomplete request. Malformed JSON and values of the wrong type are
/// rejected with 400 before a handler runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, Body> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read request body: {}", e)))?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body)
            .map(ValidatedJson)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e)))
    }
}

/// Returns the trimmed value, or `None` when absent or blank.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    present(value).ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

pub fn optional(value: Option<String>) -> Option<String> {
    present(value)
}

impl TryFrom<CreatePaymentIntentRequest> for SettlementRequest {
    type Error = AppError;

    fn try_from(req: CreatePaymentIntentRequest) -> Result<Self, Self::Error> {
        let amount = req.amount.filter(|a| *a != 0);
        let customer_id = present(req.customer_id);
        let destination = present(req.owner_connect_account_id);

        let mut missing = Vec::new();
        if amount.is_none() {
            missing.push("amount");
        }
        if customer_id.is_none() {
            missing.push("customerId");
        }
        if destination.is_none() {
            missing.push("ownerConnectAccountId");
        }

        match (amount, customer_id, destination) {
            (Some(amount), Some(customer_id), Some(destination)) => {
                if amount < 0 {
                    return Err(AppError::Validation(
                        "amount must be a positive integer in minor currency units".to_string(),
                    ));
                }

                let platform_fee = req.platform_fee.unwrap_or(0);
                if platform_fee < 0 {
                    return Err(AppError::Validation(
                        "platformFee must not be negative".to_string(),
                    ));
                }

                Ok(SettlementRequest {
                    amount,
                    customer_id,
                    destination,
                    currency: present(req.currency)
                        .map(|c| c.to_lowercase())
                        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                    platform_fee,
                    description: present(req.description)
                        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
                })
            }
            _ => Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}
