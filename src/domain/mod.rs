pub mod settlement;
pub mod transaction;

pub use settlement::SettlementGroup;
pub use transaction::{TransactionEntry, TransactionKind};
