use crate::ports::PaymentPlatform;
use crate::schemas::{DeletionDetails, DeletionResult};
use crate::stripe::models::Deleted;
use crate::stripe::StripeError;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AccountService {
    platform: Arc<dyn PaymentPlatform>,
}

impl AccountService {
    pub fn new(platform: Arc<dyn PaymentPlatform>) -> Self {
        Self { platform }
    }

    /// Deletes the renter and/or owner records. Each deletion is attempted on its own;
    /// one failing does not stop or undo the other.
    pub async fn delete_accounts(
        &self,
        customer_id: Option<&str>,
        connect_account_id: Option<&str>,
    ) -> DeletionDetails {
        let mut details = DeletionDetails::default();

        if let Some(id) = customer_id {
            let result = self.platform.delete_customer(id).await;
            details.customer = Some(record("customer", id, result));
        }

        if let Some(id) = connect_account_id {
            let result = self.platform.delete_connect_account(id).await;
            details.connect_account = Some(record("connect account", id, result));
        }

        details
    }
}

impl DeletionDetails {
    pub fn all_succeeded(&self) -> bool {
        [&self.customer, &self.connect_account]
            .into_iter()
            .flatten()
            .all(|r| r.success)
    }
}

fn record(kind: &str, id: &str, result: Result<Deleted, StripeError>) -> DeletionResult {
    match result {
        Ok(deleted) => {
            info!(id, deleted = deleted.deleted, "Deleted {}", kind);
            DeletionResult {
                id: id.to_string(),
                success: true,
                error: None,
            }
        }
        Err(e) => {
            warn!(id, "Failed to delete {}: {}", kind, e);
            DeletionResult {
                id: id.to_string(),
                success: false,
                error: Some(e.upstream_message()),
            }
        }
    }
}
