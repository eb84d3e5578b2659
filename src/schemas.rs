use crate::domain::TransactionEntry;
use crate::stripe::models::{PaymentMethod, TransferReversal};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request bodies keep every field optional so that missing values surface as
// validation errors rather than extractor rejections.

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerResponse {
    pub customer_id: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateConnectAccountRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnectAccountResponse {
    pub account_id: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountLinkRequest {
    pub account_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountLinkResponse {
    pub url: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    pub amount: Option<i64>,
    pub customer_id: Option<String>,
    pub owner_connect_account_id: Option<String>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub platform_fee: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: Option<String>,
    pub payment_intent_id: String,
    pub transfer_group: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub payment_intent_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReversalStatus {
    /// The payment carried no settlement group, so nothing was unwound.
    NoTransferGroup,
    NoTransfers,
    Reversed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub success: bool,
    pub refund_id: String,
    pub refund_status: Option<String>,
    pub transfer_reversed: bool,
    pub reversal_status: ReversalStatus,
    pub transfer_group: Option<String>,
    pub transfers_found: usize,
    /// Last reversal issued, if any.
    #[schema(value_type = Option<Object>)]
    pub reversal: Option<TransferReversal>,
    #[schema(value_type = Vec<Object>)]
    pub reversals: Vec<TransferReversal>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetupIntentResponse {
    pub client_secret: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EphemeralKeyResponse {
    pub ephemeral_key: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethodsResponse {
    #[schema(value_type = Vec<Object>)]
    pub methods: Vec<PaymentMethod>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetachPaymentMethodRequest {
    pub payment_method_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DetachPaymentMethodResponse {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub publishable_key: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerTransactionsRequest {
    pub connect_account_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionEntry>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountsRequest {
    pub customer_id: Option<String>,
    pub connect_account_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletionResult {
    pub id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<DeletionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_account: Option<DeletionResult>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAccountsResponse {
    pub success: bool,
    pub details: DeletionDetails,
}
