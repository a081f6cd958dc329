//! Transaction endpoints (executing actions)

use ostkit_auth::Params;
use rust_decimal::Decimal;
use tracing::instrument;

use super::resource_path;
use crate::client::OstKitClient;
use crate::error::RestResult;
use crate::extract::decode;
use crate::types::{ListOptions, Transaction};
use crate::validation::{
    validate_commission_percent, validate_id, validate_list_options, validate_positive,
    ValidationError,
};

const TRANSACTIONS: &str = "/transactions";

/// An action to execute between two parties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub from_user_id: String,
    pub to_user_id: String,
    pub action_id: String,
    /// Only for actions with an arbitrary amount
    pub amount: Option<Decimal>,
    /// Only for actions with an arbitrary commission
    pub commission_percent: Option<Decimal>,
}

impl NewTransaction {
    pub fn new(
        from_user_id: impl Into<String>,
        to_user_id: impl Into<String>,
        action_id: impl Into<String>,
    ) -> Self {
        Self {
            from_user_id: from_user_id.into(),
            to_user_id: to_user_id.into(),
            action_id: action_id.into(),
            amount: None,
            commission_percent: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_commission(mut self, percent: Decimal) -> Self {
        self.commission_percent = Some(percent);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(&self.from_user_id)?;
        validate_id(&self.to_user_id)?;
        validate_id(&self.action_id)?;
        if let Some(amount) = self.amount {
            validate_positive(amount)?;
        }
        if let Some(percent) = self.commission_percent {
            validate_commission_percent(percent)?;
        }
        Ok(())
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with("from_user_id", &self.from_user_id)
            .with("to_user_id", &self.to_user_id)
            .with("action_id", &self.action_id)
            .with_opt("amount", self.amount)
            .with_opt("commission_percent", self.commission_percent)
    }
}

/// Transaction endpoints
pub struct TransactionEndpoints<'a> {
    client: &'a mut OstKitClient,
}

impl<'a> TransactionEndpoints<'a> {
    pub fn new(client: &'a mut OstKitClient) -> Self {
        Self { client }
    }

    /// Execute an action
    #[instrument(skip(self))]
    pub fn execute(&mut self, transaction: &NewTransaction) -> RestResult<Transaction> {
        transaction.validate()?;
        let payload = self.client.post(TRANSACTIONS, transaction.to_params(), true)?;
        decode(payload)
    }

    /// Get a single transaction
    #[instrument(skip(self))]
    pub fn get(&mut self, id: &str) -> RestResult<Transaction> {
        let path = resource_path(TRANSACTIONS, id)?;
        let payload = self.client.get(&path, Params::new(), false, true)?;
        decode(payload)
    }

    /// List transactions
    #[instrument(skip(self))]
    pub fn list(&mut self, options: &ListOptions, fetch_all: bool) -> RestResult<Vec<Transaction>> {
        validate_list_options(options)?;
        let payload = self.client.get(TRANSACTIONS, options.to_params(), fetch_all, true)?;
        decode(payload)
    }
}
