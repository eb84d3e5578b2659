pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod ports;
pub mod schemas;
pub mod services;
pub mod stripe;
pub mod validation;

use crate::health::{HealthChecker, PlatformChecker};
use crate::ports::PaymentPlatform;
use crate::services::{AccountService, HistoryService, SettlementService};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// OpenAPI document for the settlement gateway
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::payments::create_payment_intent,
        handlers::payments::refund,
        handlers::transactions::renter_transactions,
        handlers::transactions::owner_transactions,
        handlers::customers::delete_accounts,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::DependencyStatus,
            schemas::CreatePaymentIntentRequest,
            schemas::CreatePaymentIntentResponse,
            schemas::RefundRequest,
            schemas::RefundResponse,
            schemas::ReversalStatus,
            schemas::CustomerRequest,
            schemas::OwnerTransactionsRequest,
            schemas::TransactionsResponse,
            schemas::DeleteAccountsRequest,
            schemas::DeleteAccountsResponse,
            schemas::DeletionDetails,
            schemas::DeletionResult,
            domain::TransactionEntry,
            domain::TransactionKind,
        )
    ),
    info(
        title = "Settlement Gateway API",
        description = "Booking payments routed to owner accounts, with refunds that unwind their transfers"
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Settlements", description = "Payment and refund flow"),
        (name = "Transactions", description = "Renter and owner history"),
        (name = "Accounts", description = "Account housekeeping"),
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<dyn PaymentPlatform>,
    pub settlements: SettlementService,
    pub history: HistoryService,
    pub accounts: AccountService,
    pub health_checker: Arc<HealthChecker>,
    pub publishable_key: String,
    pub allowed_origins: Option<Vec<String>>,
}

impl AppState {
    pub fn new(platform: Arc<dyn PaymentPlatform>, publishable_key: impl Into<String>) -> Self {
        let health_checker =
            HealthChecker::new().add_checker(Box::new(PlatformChecker::new(platform.clone())));

        Self {
            settlements: SettlementService::new(platform.clone()),
            history: HistoryService::new(platform.clone()),
            accounts: AccountService::new(platform.clone()),
            health_checker: Arc::new(health_checker),
            publishable_key: publishable_key.into(),
            allowed_origins: None,
            platform,
        }
    }

    pub fn with_allowed_origins(mut self, origins: Option<Vec<String>>) -> Self {
        self.allowed_origins = origins;
        self
    }
}

pub fn create_app(app_state: AppState) -> Router {
    let cors = middleware::cors::create_cors_layer(app_state.allowed_origins.clone());

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::config))
        .route("/api-docs/openapi.json", get(handlers::openapi_json))
        .route("/create-stripe-customer", post(handlers::customers::create_customer))
        .route("/create-connect-account", post(handlers::connect::create_connect_account))
        .route("/create-connect-account-link", post(handlers::connect::create_account_link))
        .route("/create-payment-intent", post(handlers::payments::create_payment_intent))
        .route("/refund", post(handlers::payments::refund))
        .route("/create-setup-intent", post(handlers::payments::create_setup_intent))
        .route("/create-ephemeral-key", post(handlers::payments::create_ephemeral_key))
        .route(
            "/list-payment-methods/:customer_id",
            get(handlers::customers::list_payment_methods),
        )
        .route("/detach-payment-method", post(handlers::customers::detach_payment_method))
        .route("/transactions/renter", post(handlers::transactions::renter_transactions))
        .route("/transactions/owner", post(handlers::transactions::owner_transactions))
        .route("/stripe/delete-accounts", delete(handlers::customers::delete_accounts))
        .layer(axum_middleware::from_fn(
            middleware::request_logger::request_logger_middleware,
        ))
        .layer(cors)
        .with_state(app_state)
}
