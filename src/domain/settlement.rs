//! Settlement-group correlation token.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const PREFIX: &str = "booking";

/// Links one charge to the transfer(s) it funds so they can be unwound together.
///
/// Minted once per payment request and stored on the charge as its transfer group.
/// The millisecond timestamp keeps tokens roughly sortable; the random suffix makes
/// them unique even when minted within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementGroup(String);

impl SettlementGroup {
    pub fn mint() -> Self {
        Self(format!(
            "{}_{}_{}",
            PREFIX,
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    /// Wraps a token read back from the platform. Blank tokens are treated as absent.
    pub fn from_platform(token: Option<String>) -> Option<Self> {
        token.filter(|t| !t.trim().is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettlementGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
