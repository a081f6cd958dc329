//! Action endpoints
//!
//! An action names a kind of value exchange (`user_to_user`,
//! `company_to_user`, `user_to_company`) with either a fixed or an
//! arbitrary amount.

use ostkit_auth::Params;
use rust_decimal::Decimal;
use tracing::instrument;

use super::resource_path;
use crate::client::OstKitClient;
use crate::error::RestResult;
use crate::extract::decode;
use crate::types::{Action, ActionKind, Currency, ListOptions};
use crate::validation::{
    validate_amount, validate_commission, validate_list_options, validate_name, ValidationError,
};

const ACTIONS: &str = "/actions";

/// Fields of a new action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAction {
    pub name: String,
    pub kind: ActionKind,
    pub currency: Currency,
    pub arbitrary_amount: bool,
    /// Required unless `arbitrary_amount`
    pub amount: Option<Decimal>,
    pub arbitrary_commission: Option<bool>,
    /// Only for `user_to_user` actions
    pub commission_percent: Option<Decimal>,
}

impl NewAction {
    /// Fixed-amount action; set the amount with [`NewAction::with_amount`]
    pub fn new(name: impl Into<String>, kind: ActionKind, currency: Currency) -> Self {
        Self {
            name: name.into(),
            kind,
            currency,
            arbitrary_amount: false,
            amount: None,
            arbitrary_commission: None,
            commission_percent: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Let the amount be chosen when the action is executed
    pub fn with_arbitrary_amount(mut self) -> Self {
        self.arbitrary_amount = true;
        self.amount = None;
        self
    }

    pub fn with_commission(mut self, percent: Decimal) -> Self {
        self.commission_percent = Some(percent);
        self.arbitrary_commission = Some(false);
        self
    }

    /// Let the commission be chosen when the action is executed
    pub fn with_arbitrary_commission(mut self) -> Self {
        self.arbitrary_commission = Some(true);
        self.commission_percent = None;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;

        match (self.arbitrary_amount, self.amount) {
            (true, Some(_)) => return Err(ValidationError::UnexpectedAmount),
            (false, None) => return Err(ValidationError::MissingAmount),
            (false, Some(amount)) => validate_amount(amount, self.currency)?,
            (true, None) => {}
        }

        if self.arbitrary_commission == Some(true) && self.kind != ActionKind::UserToUser {
            return Err(ValidationError::CommissionNotAllowed(self.kind));
        }
        if let Some(percent) = self.commission_percent {
            validate_commission(self.kind, percent)?;
        }
        Ok(())
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with("name", &self.name)
            .with("kind", self.kind.as_str())
            .with("currency", self.currency.as_str())
            .with("arbitrary_amount", self.arbitrary_amount)
            .with_opt("amount", self.amount)
            .with_opt("arbitrary_commission", self.arbitrary_commission)
            .with_opt("commission_percent", self.commission_percent)
    }
}

/// Changes to an existing action; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionUpdate {
    pub name: Option<String>,
    pub kind: Option<ActionKind>,
    pub currency: Option<Currency>,
    pub arbitrary_amount: Option<bool>,
    pub amount: Option<Decimal>,
    pub arbitrary_commission: Option<bool>,
    pub commission_percent: Option<Decimal>,
}

impl ActionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kind(mut self, kind: ActionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self.arbitrary_amount = Some(false);
        self
    }

    pub fn with_arbitrary_amount(mut self) -> Self {
        self.arbitrary_amount = Some(true);
        self.amount = None;
        self
    }

    pub fn with_commission(mut self, percent: Decimal) -> Self {
        self.commission_percent = Some(percent);
        self.arbitrary_commission = Some(false);
        self
    }

    /// Validate the fields that are set
    ///
    /// Without a currency the amount is checked against the BT range; without
    /// a kind the commission is only range-checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(amount) = self.amount {
            if self.arbitrary_amount == Some(true) {
                return Err(ValidationError::UnexpectedAmount);
            }
            validate_amount(amount, self.currency.unwrap_or(Currency::Bt))?;
        }
        if let Some(percent) = self.commission_percent {
            validate_commission(self.kind.unwrap_or(ActionKind::UserToUser), percent)?;
        }
        Ok(())
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with_opt("name", self.name.as_deref())
            .with_opt("kind", self.kind.map(|k| k.as_str()))
            .with_opt("currency", self.currency.map(|c| c.as_str()))
            .with_opt("arbitrary_amount", self.arbitrary_amount)
            .with_opt("amount", self.amount)
            .with_opt("arbitrary_commission", self.arbitrary_commission)
            .with_opt("commission_percent", self.commission_percent)
    }
}

/// Action endpoints
pub struct ActionEndpoints<'a> {
    client: &'a mut OstKitClient,
}

impl<'a> ActionEndpoints<'a> {
    pub fn new(client: &'a mut OstKitClient) -> Self {
        Self { client }
    }

    /// Create an action
    #[instrument(skip(self))]
    pub fn create(&mut self, action: &NewAction) -> RestResult<Action> {
        action.validate()?;
        let payload = self.client.post(ACTIONS, action.to_params(), true)?;
        decode(payload)
    }

    /// Update an action
    #[instrument(skip(self))]
    pub fn update(&mut self, id: &str, update: &ActionUpdate) -> RestResult<Action> {
        let path = resource_path(ACTIONS, id)?;
        update.validate()?;
        let payload = self.client.post(&path, update.to_params(), true)?;
        decode(payload)
    }

    /// Get a single action
    #[instrument(skip(self))]
    pub fn get(&mut self, id: &str) -> RestResult<Action> {
        let path = resource_path(ACTIONS, id)?;
        let payload = self.client.get(&path, Params::new(), false, true)?;
        decode(payload)
    }

    /// List actions
    #[instrument(skip(self))]
    pub fn list(&mut self, options: &ListOptions, fetch_all: bool) -> RestResult<Vec<Action>> {
        validate_list_options(options)?;
        let payload = self.client.get(ACTIONS, options.to_params(), fetch_all, true)?;
        decode(payload)
    }
}
