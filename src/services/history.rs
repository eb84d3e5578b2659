use crate::domain::transaction::{owner_history, renter_history, TransactionEntry};
use crate::error::AppError;
use crate::ports::PaymentPlatform;
use crate::stripe::models::Refund;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct HistoryService {
    platform: Arc<dyn PaymentPlatform>,
}

impl HistoryService {
    pub fn new(platform: Arc<dyn PaymentPlatform>) -> Self {
        Self { platform }
    }

    /// Charges paid by a renter plus refunds against them, newest first.
    pub async fn for_renter(&self, customer_id: &str) -> Result<Vec<TransactionEntry>, AppError> {
        let charges = self.platform.list_charges(customer_id).await?;

        // Only charges with something refunded can have refunds to fetch.
        let lookups = charges
            .iter()
            .filter(|c| c.refunded || c.amount_refunded > 0)
            .map(|c| self.platform.list_refunds(&c.id));
        let refunds: Vec<Refund> = try_join_all(lookups).await?.into_iter().flatten().collect();

        let entries = renter_history(customer_id, &charges, &refunds);
        debug!(
            customer_id,
            charges = charges.len(),
            refunds = refunds.len(),
            entries = entries.len(),
            "Built renter history"
        );
        Ok(entries)
    }

    /// Payouts received by an owner plus any reversals, newest first.
    pub async fn for_owner(&self, connect_account_id: &str) -> Result<Vec<TransactionEntry>, AppError> {
        let transfers = self.platform.list_transfers_to(connect_account_id).await?;

        let entries = owner_history(&transfers);
        debug!(
            connect_account_id,
            transfers = transfers.len(),
            entries = entries.len(),
            "Built owner history"
        );
        Ok(entries)
    }
}
