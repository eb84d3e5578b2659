use crate::stripe::StripeError;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

/// Step of settlement reversal that failed after the refund went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversalStep {
    RetrievePayment,
    ListTransfers,
    ReverseTransfer,
}

impl ReversalStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RetrievePayment => "retrieve_payment",
            Self::ListTransfers => "list_transfers",
            Self::ReverseTransfer => "reverse_transfer",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    Upstream(String),
    /// The refund succeeded but unwinding its transfers did not. The refund is not
    /// rolled back.
    #[error("{message}")]
    PartialReversal {
        refund_id: String,
        refund_status: String,
        step: ReversalStep,
        reversed_transfers: Vec<String>,
        message: String,
    },
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<StripeError> for AppError {
    fn from(err: StripeError) -> Self {
        AppError::Upstream(err.upstream_message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Upstream(msg) | AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response(),
            AppError::PartialReversal {
                refund_id,
                refund_status,
                step,
                reversed_transfers,
                message,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": message,
                    "refundCompleted": true,
                    "refundId": refund_id,
                    "refundStatus": refund_status,
                    "failedStep": step.as_str(),
                    "reversedTransfers": reversed_transfers,
                })),
            )
                .into_response(),
        }
    }
}
