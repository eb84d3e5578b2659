use crate::config::Config;
use crate::domain::settlement::SettlementGroup;
use crate::ports::{DestinationCharge, NewCustomer, PaymentPlatform, PlatformResult};
use crate::stripe::models::*;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const PAGE_LIMIT: &str = "100";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(80);

#[derive(Error, Debug)]
pub enum StripeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Stripe API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
        code: Option<String>,
    },
    #[error("Invalid response from Stripe: {0}")]
    InvalidResponse(String),
    #[error("Invalid object id: {0:?}")]
    InvalidId(String),
}

impl StripeError {
    /// The message to relay to API callers. For API errors this is Stripe's own text.
    pub fn upstream_message(&self) -> String {
        match self {
            StripeError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

type Form = Vec<(&'static str, String)>;

/// HTTP client for the Stripe REST API.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    base_url: String,
    api_key: Arc<SecretString>,
    api_version: String,
    account_country: String,
    refresh_url: String,
    return_url: String,
}

impl StripeClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, StripeError> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        let api_key: String = api_key.into();

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: Arc::new(SecretString::new(api_key.into())),
            api_version: "2023-10-16".to_string(),
            account_country: "MY".to_string(),
            refresh_url: "http://localhost:3000/reauth".to_string(),
            return_url: "http://localhost:3000/return".to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, StripeError> {
        let client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.stripe_api_base.clone(),
            api_key: config.stripe_secret_key.clone(),
            api_version: config.stripe_api_version.clone(),
            account_country: config.connect_account_country.clone(),
            refresh_url: config.account_link_refresh_url.clone(),
            return_url: config.account_link_return_url.clone(),
        })
    }

    pub fn with_onboarding_urls(mut self, refresh_url: impl Into<String>, return_url: impl Into<String>) -> Self {
        self.refresh_url = refresh_url.into();
        self.return_url = return_url.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StripeError> {
        let response = request
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorBody>(&body).ok().map(|b| b.error);
            let (message, error_type, code) = match detail {
                Some(d) => (d.message, d.error_type, d.code),
                None => (None, None, None),
            };
            return Err(StripeError::Api {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| format!("Stripe returned HTTP {}", status)),
                error_type,
                code,
            });
        }

        serde_json::from_str(&body).map_err(|e| StripeError::InvalidResponse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, StripeError> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    /// Follows `has_more` with `starting_after` until the listing is exhausted.
    async fn list_all<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<T>, StripeError>
    where
        T: DeserializeOwned + HasId,
    {
        let mut items: Vec<T> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page: List<T> = {
                let mut params: Vec<(&str, &str)> = query.to_vec();
                params.push(("limit", PAGE_LIMIT));
                if let Some(after) = cursor.as_deref() {
                    params.push(("starting_after", after));
                }
                self.get(path, &params).await?
            };

            let last = page.data.last().map(|item| item.id().to_string());
            items.extend(page.data);

            match (page.has_more, last) {
                (true, Some(last)) => cursor = Some(last),
                _ => return Ok(items),
            }
        }
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, form: &Form) -> Result<T, StripeError> {
        self.send(self.client.post(self.url(path)).form(form)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, StripeError> {
        self.send(self.client.delete(self.url(path))).await
    }
}

/// Object ids are interpolated into URL paths, so anything beyond the id alphabet is
/// refused before a request is made.
fn object_id(id: &str) -> Result<&str, StripeError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(id)
    } else {
        Err(StripeError::InvalidId(id.to_string()))
    }
}

#[async_trait]
impl PaymentPlatform for StripeClient {
    async fn create_customer(&self, customer: &NewCustomer) -> PlatformResult<Customer> {
        let mut form = Form::new();
        if let Some(email) = &customer.email {
            form.push(("email", email.clone()));
        }
        if let Some(name) = &customer.name {
            form.push(("name", name.clone()));
        }
        if let Some(user_id) = &customer.user_id {
            form.push(("metadata[userId]", user_id.clone()));
        }
        self.post("/customers", &form).await
    }

    async fn delete_customer(&self, customer_id: &str) -> PlatformResult<Deleted> {
        self.delete(&format!("/customers/{}", object_id(customer_id)?)).await
    }

    async fn create_connect_account(&self, email: Option<&str>) -> PlatformResult<Account> {
        let mut form: Form = vec![
            ("type", "express".to_string()),
            ("country", self.account_country.clone()),
            ("capabilities[card_payments][requested]", "true".to_string()),
            ("capabilities[transfers][requested]", "true".to_string()),
        ];
        if let Some(email) = email {
            form.push(("email", email.to_string()));
        }
        self.post("/accounts", &form).await
    }

    async fn delete_connect_account(&self, account_id: &str) -> PlatformResult<Deleted> {
        self.delete(&format!("/accounts/{}", object_id(account_id)?)).await
    }

    async fn create_account_link(&self, account_id: &str) -> PlatformResult<AccountLink> {
        let form: Form = vec![
            ("account", object_id(account_id)?.to_string()),
            ("refresh_url", self.refresh_url.clone()),
            ("return_url", self.return_url.clone()),
            ("type", "account_onboarding".to_string()),
        ];
        self.post("/account_links", &form).await
    }

    async fn create_payment_intent(&self, charge: &DestinationCharge) -> PlatformResult<PaymentIntent> {
        let mut form: Form = vec![
            ("amount", charge.amount.to_string()),
            ("currency", charge.currency.clone()),
            ("customer", charge.customer.clone()),
            ("description", charge.description.clone()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
            ("transfer_data[destination]", charge.destination.clone()),
            ("transfer_group", charge.transfer_group.to_string()),
            ("metadata[transferGroup]", charge.transfer_group.to_string()),
        ];
        if charge.application_fee_amount > 0 {
            form.push(("application_fee_amount", charge.application_fee_amount.to_string()));
        }
        self.post("/payment_intents", &form).await
    }

    async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> PlatformResult<PaymentIntent> {
        self.get(&format!("/payment_intents/{}", object_id(payment_intent_id)?), &[])
            .await
    }

    async fn refund_payment_intent(&self, payment_intent_id: &str) -> PlatformResult<Refund> {
        let form: Form = vec![("payment_intent", object_id(payment_intent_id)?.to_string())];
        self.post("/refunds", &form).await
    }

    async fn list_transfers_in_group(&self, group: &SettlementGroup) -> PlatformResult<Vec<Transfer>> {
        self.list_all("/transfers", &[("transfer_group", group.as_str())])
            .await
    }

    async fn list_transfers_to(&self, destination: &str) -> PlatformResult<Vec<Transfer>> {
        self.list_all("/transfers", &[("destination", destination)]).await
    }

    async fn reverse_transfer(&self, transfer_id: &str, amount: i64) -> PlatformResult<TransferReversal> {
        let form: Form = vec![("amount", amount.to_string())];
        self.post(&format!("/transfers/{}/reversals", object_id(transfer_id)?), &form)
            .await
    }

    async fn create_setup_intent(&self, customer_id: &str) -> PlatformResult<SetupIntent> {
        let form: Form = vec![
            ("customer", customer_id.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];
        self.post("/setup_intents", &form).await
    }

    async fn create_ephemeral_key(&self, customer_id: &str) -> PlatformResult<EphemeralKey> {
        let form: Form = vec![("customer", customer_id.to_string())];
        let request = self
            .client
            .post(self.url("/ephemeral_keys"))
            .header("Stripe-Version", &self.api_version)
            .form(&form);
        self.send(request).await
    }

    async fn list_payment_methods(&self, customer_id: &str) -> PlatformResult<Vec<PaymentMethod>> {
        self.list_all("/payment_methods", &[("customer", customer_id), ("type", "card")])
            .await
    }

    async fn detach_payment_method(&self, payment_method_id: &str) -> PlatformResult<PaymentMethod> {
        self.post(
            &format!("/payment_methods/{}/detach", object_id(payment_method_id)?),
            &Form::new(),
        )
        .await
    }

    async fn list_charges(&self, customer_id: &str) -> PlatformResult<Vec<Charge>> {
        self.list_all("/charges", &[("customer", customer_id)]).await
    }

    async fn list_refunds(&self, charge_id: &str) -> PlatformResult<Vec<Refund>> {
        self.list_all("/refunds", &[("charge", charge_id)]).await
    }

    async fn retrieve_balance(&self) -> PlatformResult<Balance> {
        self.get("/balance", &[]).await
    }
}
