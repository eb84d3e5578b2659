use crate::ports::PaymentPlatform;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub dependencies: HashMap<String, DependencyStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DependencyStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DependencyStatus {
    fn healthy(latency: Duration) -> Self {
        Self {
            status: "healthy".to_string(),
            latency_ms: Some(latency.as_millis() as u64),
            error: None,
        }
    }

    fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            latency_ms: None,
            error: Some(error.into()),
        }
    }
}

#[async_trait]
pub trait DependencyChecker: Send + Sync {
    async fn check(&self) -> DependencyStatus;
    fn name(&self) -> &'static str;
}

/// Probes the payment platform with a balance lookup, which needs nothing but a
/// valid key.
pub struct PlatformChecker {
    platform: Arc<dyn PaymentPlatform>,
}

impl PlatformChecker {
    pub fn new(platform: Arc<dyn PaymentPlatform>) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl DependencyChecker for PlatformChecker {
    async fn check(&self) -> DependencyStatus {
        let start = Instant::now();
        match self.platform.retrieve_balance().await {
            Ok(_) => DependencyStatus::healthy(start.elapsed()),
            Err(e) => DependencyStatus::unhealthy(e.upstream_message()),
        }
    }

    fn name(&self) -> &'static str {
        "stripe"
    }
}

pub struct HealthChecker {
    checkers: Vec<Box<dyn DependencyChecker>>,
    start_time: Instant,
    check_timeout: Duration,
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
            start_time: Instant::now(),
            check_timeout: Duration::from_secs(5),
        }
    }

    pub fn add_checker(mut self, checker: Box<dyn DependencyChecker>) -> Self {
        self.checkers.push(checker);
        self
    }

    pub fn with_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }

    pub async fn check_all(&self) -> HealthResponse {
        let futures = self.checkers.iter().map(|checker| {
            let name = checker.name().to_string();
            let future = timeout(self.check_timeout, checker.check());
            async move {
                match future.await {
                    Ok(status) => (name, status),
                    Err(_) => (name, DependencyStatus::unhealthy("timeout")),
                }
            }
        });

        let results = futures::future::join_all(futures).await;
        let total = results.len();
        let healthy = results.iter().filter(|(_, s)| s.status == "healthy").count();

        let overall_status = if healthy == total {
            "healthy"
        } else if healthy > 0 {
            "degraded"
        } else {
            "unhealthy"
        };

        HealthResponse {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            dependencies: results.into_iter().collect(),
        }
    }
}
