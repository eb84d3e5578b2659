//! The payment-platform boundary. Services and handlers depend on this trait
//! rather than on the HTTP client, so the platform can be swapped in tests.

use crate::domain::settlement::SettlementGroup;
use crate::stripe::models::{
    Account, AccountLink, Balance, Charge, Customer, Deleted, EphemeralKey, PaymentIntent,
    PaymentMethod, Refund, SetupIntent, Transfer, TransferReversal,
};
use crate::stripe::StripeError;
use async_trait::async_trait;

pub type PlatformResult<T> = Result<T, StripeError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub email: Option<String>,
    pub name: Option<String>,
    pub user_id: Option<String>,
}

/// A destination charge: the full amount is routed to `destination`, minus
/// `application_fee_amount`, which the platform keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationCharge {
    pub amount: i64,
    pub currency: String,
    pub customer: String,
    pub destination: String,
    pub application_fee_amount: i64,
    pub description: String,
    pub transfer_group: SettlementGroup,
}

#[async_trait]
pub trait PaymentPlatform: Send + Sync {
    async fn create_customer(&self, customer: &NewCustomer) -> PlatformResult<Customer>;
    async fn delete_customer(&self, customer_id: &str) -> PlatformResult<Deleted>;

    async fn create_connect_account(&self, email: Option<&str>) -> PlatformResult<Account>;
    async fn delete_connect_account(&self, account_id: &str) -> PlatformResult<Deleted>;
    async fn create_account_link(&self, account_id: &str) -> PlatformResult<AccountLink>;

    async fn create_payment_intent(&self, charge: &DestinationCharge) -> PlatformResult<PaymentIntent>;
    async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> PlatformResult<PaymentIntent>;
    async fn refund_payment_intent(&self, payment_intent_id: &str) -> PlatformResult<Refund>;

    async fn list_transfers_in_group(&self, group: &SettlementGroup) -> PlatformResult<Vec<Transfer>>;
    async fn list_transfers_to(&self, destination: &str) -> PlatformResult<Vec<Transfer>>;
    async fn reverse_transfer(&self, transfer_id: &str, amount: i64) -> PlatformResult<TransferReversal>;

    async fn create_setup_intent(&self, customer_id: &str) -> PlatformResult<SetupIntent>;
    async fn create_ephemeral_key(&self, customer_id: &str) -> PlatformResult<EphemeralKey>;
    async fn list_payment_methods(&self, customer_id: &str) -> PlatformResult<Vec<PaymentMethod>>;
    async fn detach_payment_method(&self, payment_method_id: &str) -> PlatformResult<PaymentMethod>;

    async fn list_charges(&self, customer_id: &str) -> PlatformResult<Vec<Charge>>;
    /// Every refund issued against one charge.
    async fn list_refunds(&self, charge_id: &str) -> PlatformResult<Vec<Refund>>;

    async fn retrieve_balance(&self) -> PlatformResult<Balance>;
}
