//! Transaction-history entries.
//! A flat view over charges, refunds, transfers and reversals for display to renters
//! and owners.

use crate::stripe::models::{Charge, Refund, Transfer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Charge,
    Refund,
    Transfer,
    Reversal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: i64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub created: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    /// The charge a refund belongs to, or the transfer a reversal belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl From<&Charge> for TransactionEntry {
    fn from(charge: &Charge) -> Self {
        Self {
            id: charge.id.clone(),
            kind: TransactionKind::Charge,
            amount: charge.amount,
            currency: charge.currency.clone(),
            status: Some(charge.status.clone()),
            created: charge.created,
            description: charge.description.clone(),
            payment_intent_id: charge.payment_intent.clone(),
            source_id: None,
        }
    }
}

impl From<&Refund> for TransactionEntry {
    fn from(refund: &Refund) -> Self {
        Self {
            id: refund.id.clone(),
            kind: TransactionKind::Refund,
            amount: refund.amount,
            currency: refund.currency.clone(),
            status: refund.status.clone(),
            created: refund.created,
            description: refund.reason.clone(),
            payment_intent_id: refund.payment_intent.clone(),
            source_id: refund.charge.as_ref().map(|c| c.id().to_string()),
        }
    }
}

/// Charges of `customer_id` plus the refunds made against them, newest first.
///
/// A refund belongs to the customer when its expanded charge names that customer. If the
/// charge came back unexpanded, the refund is kept only when it points at one of the
/// customer's own charges.
pub fn renter_history(customer_id: &str, charges: &[Charge], refunds: &[Refund]) -> Vec<TransactionEntry> {
    let own_charges: HashSet<&str> = charges
        .iter()
        .filter(|c| c.customer.as_deref() == Some(customer_id))
        .map(|c| c.id.as_str())
        .collect();

    let mut entries: Vec<TransactionEntry> = charges
        .iter()
        .filter(|c| own_charges.contains(c.id.as_str()))
        .map(TransactionEntry::from)
        .collect();

    entries.extend(
        refunds
            .iter()
            .filter(|refund| match &refund.charge {
                Some(charge) => match charge.as_object() {
                    Some(obj) => obj.customer.as_deref() == Some(customer_id),
                    None => own_charges.contains(charge.id()),
                },
                None => false,
            })
            .map(TransactionEntry::from),
    );

    sort_newest_first(&mut entries);
    entries
}

/// Transfers paid out to a connected account plus their reversals, newest first.
pub fn owner_history(transfers: &[Transfer]) -> Vec<TransactionEntry> {
    let mut entries = Vec::new();

    for transfer in transfers {
        entries.push(TransactionEntry {
            id: transfer.id.clone(),
            kind: TransactionKind::Transfer,
            amount: transfer.amount,
            currency: transfer.currency.clone(),
            status: Some(if transfer.reversed { "reversed" } else { "paid" }.to_string()),
            created: transfer.created,
            description: transfer.description.clone(),
            payment_intent_id: None,
            source_id: transfer.source_transaction.clone(),
        });

        for reversal in &transfer.reversals.data {
            entries.push(TransactionEntry {
                id: reversal.id.clone(),
                kind: TransactionKind::Reversal,
                amount: reversal.amount,
                currency: reversal.currency.clone(),
                status: None,
                created: reversal.created,
                description: None,
                payment_intent_id: None,
                source_id: Some(reversal.transfer.clone()),
            });
        }
    }

    sort_newest_first(&mut entries);
    entries
}

pub fn sort_newest_first(entries: &mut [TransactionEntry]) {
    entries.sort_by(|a, b| b.created.cmp(&a.created));
}
