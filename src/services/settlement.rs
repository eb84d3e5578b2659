use crate::domain::SettlementGroup;
use crate::error::{AppError, ReversalStep};
use crate::ports::{DestinationCharge, PaymentPlatform};
use crate::schemas::ReversalStatus;
use crate::stripe::models::{Refund, TransferReversal};
use crate::stripe::StripeError;
use std::sync::Arc;
use tracing::{error, info, warn};

/// A validated booking payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementRequest {
    pub amount: i64,
    pub customer_id: String,
    pub destination: String,
    pub currency: String,
    pub platform_fee: i64,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct SettlementHandle {
    pub client_secret: Option<String>,
    pub payment_intent_id: String,
    pub transfer_group: SettlementGroup,
}

#[derive(Debug, Clone)]
pub struct ReversalOutcome {
    pub refund: Refund,
    pub transfer_group: Option<SettlementGroup>,
    pub transfers_found: usize,
    /// One record per transfer, in the order the transfers were reversed.
    pub reversals: Vec<TransferReversal>,
}

impl ReversalOutcome {
    pub fn transfer_reversed(&self) -> bool {
        !self.reversals.is_empty()
    }

    pub fn status(&self) -> ReversalStatus {
        match (&self.transfer_group, self.reversals.is_empty()) {
            (None, _) => ReversalStatus::NoTransferGroup,
            (Some(_), true) => ReversalStatus::NoTransfers,
            (Some(_), false) => ReversalStatus::Reversed,
        }
    }

    pub fn last_reversal(&self) -> Option<&TransferReversal> {
        self.reversals.last()
    }
}

/// Opens destination charges and unwinds them on refund.
///
/// Holds no state of its own: the settlement group stored on the charge is the only
/// link between a payment and its transfers.
#[derive(Clone)]
pub struct SettlementService {
    platform: Arc<dyn PaymentPlatform>,
}

impl SettlementService {
    pub fn new(platform: Arc<dyn PaymentPlatform>) -> Self {
        Self { platform }
    }

    pub async fn initiate(&self, request: SettlementRequest) -> Result<SettlementHandle, AppError> {
        let transfer_group = SettlementGroup::mint();

        let charge = DestinationCharge {
            amount: request.amount,
            currency: request.currency,
            customer: request.customer_id,
            destination: request.destination,
            application_fee_amount: request.platform_fee,
            description: request.description,
            transfer_group: transfer_group.clone(),
        };

        let intent = self.platform.create_payment_intent(&charge).await.map_err(|e| {
            warn!(
                transfer_group = %transfer_group,
                destination = %charge.destination,
                "Payment intent rejected: {}",
                e
            );
            AppError::from(e)
        })?;

        info!(
            payment_intent_id = %intent.id,
            transfer_group = %transfer_group,
            amount = charge.amount,
            platform_fee = charge.application_fee_amount,
            "Settlement initiated"
        );

        Ok(SettlementHandle {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id,
            transfer_group,
        })
    }

    /// Refunds the payment in full, then reverses every transfer in its settlement
    /// group, one at a time.
    ///
    /// A failed refund aborts before anything else happens. Once the refund has gone
    /// through it is never undone: later failures come back as
    /// [`AppError::PartialReversal`] so the caller can reconcile out of band.
    pub async fn reverse(&self, payment_intent_id: &str) -> Result<ReversalOutcome, AppError> {
        let refund = self
            .platform
            .refund_payment_intent(payment_intent_id)
            .await
            .map_err(|e| {
                warn!(payment_intent_id, "Refund rejected: {}", e);
                AppError::from(e)
            })?;

        info!(
            payment_intent_id,
            refund_id = %refund.id,
            refund_status = refund.status.as_deref().unwrap_or("unknown"),
            "Refund created"
        );

        let intent = match self.platform.retrieve_payment_intent(payment_intent_id).await {
            Ok(intent) => intent,
            Err(e) => return Err(partial(&refund, ReversalStep::RetrievePayment, &[], e)),
        };

        let Some(group) = SettlementGroup::from_platform(intent.transfer_group) else {
            info!(payment_intent_id, "No settlement group on payment; skipping transfer reversal");
            return Ok(ReversalOutcome {
                refund,
                transfer_group: None,
                transfers_found: 0,
                reversals: Vec::new(),
            });
        };

        let transfers = match self.platform.list_transfers_in_group(&group).await {
            Ok(transfers) => transfers,
            Err(e) => return Err(partial(&refund, ReversalStep::ListTransfers, &[], e)),
        };

        let mut reversals: Vec<TransferReversal> = Vec::with_capacity(transfers.len());
        for transfer in &transfers {
            match self.platform.reverse_transfer(&transfer.id, transfer.amount).await {
                Ok(reversal) => {
                    info!(
                        transfer_group = %group,
                        transfer_id = %transfer.id,
                        reversal_id = %reversal.id,
                        amount = transfer.amount,
                        "Transfer reversed"
                    );
                    reversals.push(reversal);
                }
                Err(e) => {
                    let done: Vec<String> = reversals.iter().map(|r| r.transfer.clone()).collect();
                    return Err(partial(&refund, ReversalStep::ReverseTransfer, &done, e));
                }
            }
        }

        info!(
            payment_intent_id,
            transfer_group = %group,
            transfers_found = transfers.len(),
            "Settlement reversed"
        );

        Ok(ReversalOutcome {
            refund,
            transfer_group: Some(group),
            transfers_found: transfers.len(),
            reversals,
        })
    }
}

fn partial(refund: &Refund, step: ReversalStep, reversed: &[String], cause: StripeError) -> AppError {
    error!(
        refund_id = %refund.id,
        step = step.as_str(),
        reversed_transfers = reversed.len(),
        "Refund completed but transfer reversal failed: {}",
        cause
    );
    AppError::PartialReversal {
        refund_id: refund.id.clone(),
        refund_status: refund.status.clone().unwrap_or_default(),
        step,
        reversed_transfers: reversed.to_vec(),
        message: cause.upstream_message(),
    }
}
