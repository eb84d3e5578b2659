#![allow(dead_code)]

use async_trait::async_trait;
use settlement_gateway::domain::SettlementGroup;
use settlement_gateway::ports::{DestinationCharge, NewCustomer, PaymentPlatform, PlatformResult};
use settlement_gateway::stripe::models::*;
use settlement_gateway::stripe::StripeError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateCustomer(NewCustomer),
    DeleteCustomer(String),
    CreateConnectAccount(Option<String>),
    DeleteConnectAccount(String),
    CreateAccountLink(String),
    CreatePaymentIntent(DestinationCharge),
    RetrievePaymentIntent(String),
    Refund(String),
    ListTransfersInGroup(String),
    ListTransfersTo(String),
    ReverseTransfer(String, i64),
    CreateSetupIntent(String),
    CreateEphemeralKey(String),
    ListPaymentMethods(String),
    DetachPaymentMethod(String),
    ListCharges(String),
    ListRefunds(String),
    RetrieveBalance,
}

/// In-memory payment platform that records every call it receives.
#[derive(Default)]
pub struct FakePlatform {
    calls: Mutex<Vec<Call>>,
    intents: Mutex<HashMap<String, Option<String>>>,
    transfers: Mutex<Vec<Transfer>>,
    charges: Mutex<Vec<Charge>>,
    refunds: Mutex<Vec<Refund>>,
    failing: Mutex<HashSet<String>>,
}

pub fn api_error(message: &str) -> StripeError {
    StripeError::Api {
        status: 400,
        message: message.to_string(),
        error_type: Some("invalid_request_error".to_string()),
        code: None,
    }
}

pub fn transfer(id: &str, group: &str, amount: i64) -> Transfer {
    Transfer {
        id: id.to_string(),
        amount,
        currency: "myr".to_string(),
        created: 1_700_000_000,
        destination: Some("acct_owner".to_string()),
        transfer_group: Some(group.to_string()),
        description: None,
        amount_reversed: 0,
        reversed: false,
        source_transaction: None,
        reversals: List::default(),
    }
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a payment intent and the transfer group stored on it.
    pub fn with_intent(self, id: &str, transfer_group: Option<&str>) -> Self {
        self.intents
            .lock()
            .unwrap()
            .insert(id.to_string(), transfer_group.map(str::to_string));
        self
    }

    pub fn with_transfer(self, transfer: Transfer) -> Self {
        self.transfers.lock().unwrap().push(transfer);
        self
    }

    pub fn with_charge(self, charge: Charge) -> Self {
        self.charges.lock().unwrap().push(charge);
        self
    }

    pub fn with_refund(self, refund: Refund) -> Self {
        self.refunds.lock().unwrap().push(refund);
        self
    }

    /// Makes an operation fail. Keys are operation names such as `"refund"`, or
    /// `"reverse:<transfer id>"` for a single transfer.
    pub fn failing(self, key: &str) -> Self {
        self.failing.lock().unwrap().insert(key.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reversal_calls(&self) -> Vec<(String, i64)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::ReverseTransfer(id, amount) => Some((id, amount)),
                _ => None,
            })
            .collect()
    }

    pub fn payment_intents_created(&self) -> Vec<DestinationCharge> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreatePaymentIntent(charge) => Some(charge),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, key: &str) -> PlatformResult<()> {
        if self.failing.lock().unwrap().contains(key) {
            Err(api_error(&format!("{} failed upstream", key)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PaymentPlatform for FakePlatform {
    async fn create_customer(&self, customer: &NewCustomer) -> PlatformResult<Customer> {
        self.record(Call::CreateCustomer(customer.clone()));
        self.check("create_customer")?;
        Ok(Customer {
            id: "cus_new".to_string(),
            email: customer.email.clone(),
            name: customer.name.clone(),
            metadata: HashMap::new(),
        })
    }

    async fn delete_customer(&self, customer_id: &str) -> PlatformResult<Deleted> {
        self.record(Call::DeleteCustomer(customer_id.to_string()));
        self.check("delete_customer")?;
        Ok(Deleted {
            id: customer_id.to_string(),
            deleted: true,
        })
    }

    async fn create_connect_account(&self, email: Option<&str>) -> PlatformResult<Account> {
        self.record(Call::CreateConnectAccount(email.map(str::to_string)));
        self.check("create_connect_account")?;
        Ok(Account {
            id: "acct_new".to_string(),
            email: email.map(str::to_string),
            charges_enabled: false,
            payouts_enabled: false,
        })
    }

    async fn delete_connect_account(&self, account_id: &str) -> PlatformResult<Deleted> {
        self.record(Call::DeleteConnectAccount(account_id.to_string()));
        self.check("delete_connect_account")?;
        Ok(Deleted {
            id: account_id.to_string(),
            deleted: true,
        })
    }

    async fn create_account_link(&self, account_id: &str) -> PlatformResult<AccountLink> {
        self.record(Call::CreateAccountLink(account_id.to_string()));
        self.check("create_account_link")?;
        Ok(AccountLink {
            url: format!("https://connect.stripe.com/setup/e/{}", account_id),
            expires_at: None,
        })
    }

    async fn create_payment_intent(&self, charge: &DestinationCharge) -> PlatformResult<PaymentIntent> {
        self.record(Call::CreatePaymentIntent(charge.clone()));
        self.check("create_payment_intent")?;

        let mut intents = self.intents.lock().unwrap();
        let id = format!("pi_{}", intents.len() + 1);
        intents.insert(id.clone(), Some(charge.transfer_group.to_string()));

        Ok(PaymentIntent {
            client_secret: Some(format!("{}_secret_abc", id)),
            id,
            amount: charge.amount,
            currency: charge.currency.clone(),
            status: "requires_payment_method".to_string(),
            customer: Some(charge.customer.clone()),
            transfer_group: Some(charge.transfer_group.to_string()),
            application_fee_amount: Some(charge.application_fee_amount),
            latest_charge: None,
        })
    }

    async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> PlatformResult<PaymentIntent> {
        self.record(Call::RetrievePaymentIntent(payment_intent_id.to_string()));
        self.check("retrieve_payment_intent")?;

        let intents = self.intents.lock().unwrap();
        let group = intents
            .get(payment_intent_id)
            .ok_or_else(|| api_error(&format!("No such payment_intent: '{}'", payment_intent_id)))?;

        Ok(PaymentIntent {
            id: payment_intent_id.to_string(),
            amount: 10_000,
            currency: "myr".to_string(),
            status: "succeeded".to_string(),
            client_secret: None,
            customer: None,
            transfer_group: group.clone(),
            application_fee_amount: None,
            latest_charge: None,
        })
    }

    async fn refund_payment_intent(&self, payment_intent_id: &str) -> PlatformResult<Refund> {
        self.record(Call::Refund(payment_intent_id.to_string()));
        self.check("refund")?;
        Ok(Refund {
            id: format!("re_{}", payment_intent_id),
            amount: 10_000,
            currency: "myr".to_string(),
            status: Some("succeeded".to_string()),
            created: 1_700_000_100,
            charge: Some(Expandable::Id("ch_1".to_string())),
            payment_intent: Some(payment_intent_id.to_string()),
            reason: None,
        })
    }

    async fn list_transfers_in_group(&self, group: &SettlementGroup) -> PlatformResult<Vec<Transfer>> {
        self.record(Call::ListTransfersInGroup(group.to_string()));
        self.check("list_transfers")?;
        Ok(self
            .transfers
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.transfer_group.as_deref() == Some(group.as_str()))
            .cloned()
            .collect())
    }

    async fn list_transfers_to(&self, destination: &str) -> PlatformResult<Vec<Transfer>> {
        self.record(Call::ListTransfersTo(destination.to_string()));
        self.check("list_transfers_to")?;
        Ok(self
            .transfers
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.destination.as_deref() == Some(destination))
            .cloned()
            .collect())
    }

    async fn reverse_transfer(&self, transfer_id: &str, amount: i64) -> PlatformResult<TransferReversal> {
        self.record(Call::ReverseTransfer(transfer_id.to_string(), amount));
        self.check(&format!("reverse:{}", transfer_id))?;
        Ok(TransferReversal {
            id: format!("trr_{}", transfer_id),
            amount,
            currency: "myr".to_string(),
            created: 1_700_000_200,
            transfer: transfer_id.to_string(),
        })
    }

    async fn create_setup_intent(&self, customer_id: &str) -> PlatformResult<SetupIntent> {
        self.record(Call::CreateSetupIntent(customer_id.to_string()));
        self.check("create_setup_intent")?;
        Ok(SetupIntent {
            id: "seti_1".to_string(),
            client_secret: Some("seti_1_secret_xyz".to_string()),
            status: Some("requires_payment_method".to_string()),
        })
    }

    async fn create_ephemeral_key(&self, customer_id: &str) -> PlatformResult<EphemeralKey> {
        self.record(Call::CreateEphemeralKey(customer_id.to_string()));
        self.check("create_ephemeral_key")?;
        Ok(EphemeralKey {
            id: "ephkey_1".to_string(),
            secret: "ek_test_secret".to_string(),
            expires: None,
        })
    }

    async fn list_payment_methods(&self, customer_id: &str) -> PlatformResult<Vec<PaymentMethod>> {
        self.record(Call::ListPaymentMethods(customer_id.to_string()));
        self.check("list_payment_methods")?;
        Ok(vec![PaymentMethod {
            id: "pm_1".to_string(),
            method_type: "card".to_string(),
            customer: Some(customer_id.to_string()),
            card: Some(Card {
                brand: "visa".to_string(),
                last4: "4242".to_string(),
                exp_month: 12,
                exp_year: 2030,
                funding: Some("credit".to_string()),
            }),
            created: Some(1_700_000_000),
        }])
    }

    async fn detach_payment_method(&self, payment_method_id: &str) -> PlatformResult<PaymentMethod> {
        self.record(Call::DetachPaymentMethod(payment_method_id.to_string()));
        self.check("detach_payment_method")?;
        Ok(PaymentMethod {
            id: payment_method_id.to_string(),
            method_type: "card".to_string(),
            customer: None,
            card: None,
            created: None,
        })
    }

    async fn list_charges(&self, customer_id: &str) -> PlatformResult<Vec<Charge>> {
        self.record(Call::ListCharges(customer_id.to_string()));
        self.check("list_charges")?;
        Ok(self
            .charges
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.customer.as_deref() == Some(customer_id))
            .cloned()
            .collect())
    }

    async fn list_refunds(&self, charge_id: &str) -> PlatformResult<Vec<Refund>> {
        self.record(Call::ListRefunds(charge_id.to_string()));
        self.check("list_refunds")?;
        Ok(self
            .refunds
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.charge.as_ref().map(|c| c.id()) == Some(charge_id))
            .cloned()
            .collect())
    }

    async fn retrieve_balance(&self) -> PlatformResult<Balance> {
        self.record(Call::RetrieveBalance);
        self.check("balance")?;
        Ok(Balance { livemode: false })
    }
}
