pub mod accounts;
pub mod history;
pub mod settlement;

pub use accounts::AccountService;
pub use history::HistoryService;
pub use settlement::{ReversalOutcome, SettlementHandle, SettlementRequest, SettlementService};
