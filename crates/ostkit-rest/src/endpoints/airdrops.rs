//! Airdrop endpoints

use ostkit_auth::Params;
use rust_decimal::Decimal;
use tracing::instrument;

use super::resource_path;
use crate::client::OstKitClient;
use crate::error::RestResult;
use crate::extract::decode;
use crate::types::{Airdrop, AirdropStatus, ListOptions};
use crate::validation::{validate_id, validate_list_options, validate_positive, ValidationError};

const AIRDROPS: &str = "/airdrops";

/// An airdrop of branded tokens to a set of users
///
/// Without filters every user receives `amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAirdrop {
    pub amount: Decimal,
    /// Restrict to users that have (or have not) been airdropped before
    pub airdropped: Option<bool>,
    /// Restrict to these users
    pub user_ids: Vec<String>,
}

impl NewAirdrop {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            airdropped: None,
            user_ids: Vec::new(),
        }
    }

    pub fn airdropped(mut self, airdropped: bool) -> Self {
        self.airdropped = Some(airdropped);
        self
    }

    pub fn with_user_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.user_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_positive(self.amount)?;
        for id in &self.user_ids {
            validate_id(id)?;
        }
        Ok(())
    }

    /// `user_ids` is sent as one comma-separated field
    pub fn to_params(&self) -> Params {
        let user_ids = (!self.user_ids.is_empty()).then(|| self.user_ids.join(","));
        Params::new()
            .with("amount", self.amount)
            .with_opt("airdropped", self.airdropped)
            .with_opt("user_ids", user_ids)
    }
}

/// Airdrop endpoints
pub struct AirdropEndpoints<'a> {
    client: &'a mut OstKitClient,
}

impl<'a> AirdropEndpoints<'a> {
    pub fn new(client: &'a mut OstKitClient) -> Self {
        Self { client }
    }

    /// Start an airdrop
    ///
    /// Returns as soon as the airdrop is queued; poll [`AirdropEndpoints::get`]
    /// for progress.
    #[instrument(skip(self))]
    pub fn execute(&mut self, airdrop: &NewAirdrop) -> RestResult<Airdrop> {
        airdrop.validate()?;
        let payload = self.client.post(AIRDROPS, airdrop.to_params(), true)?;
        decode(payload)
    }

    /// Get the status of an airdrop
    #[instrument(skip(self))]
    pub fn get(&mut self, id: &str) -> RestResult<Airdrop> {
        let path = resource_path(AIRDROPS, id)?;
        let payload = self.client.get(&path, Params::new(), false, true)?;
        decode(payload)
    }

    /// List airdrops
    #[instrument(skip(self))]
    pub fn list(&mut self, options: &ListOptions, fetch_all: bool) -> RestResult<Vec<Airdrop>> {
        validate_list_options(options)?;
        let payload = self.client.get(AIRDROPS, options.to_params(), fetch_all, true)?;
        decode(payload)
    }

    /// List airdrops in one state
    #[instrument(skip(self))]
    pub fn list_by_status(
        &mut self,
        status: AirdropStatus,
        options: &ListOptions,
        fetch_all: bool,
    ) -> RestResult<Vec<Airdrop>> {
        validate_list_options(options)?;
        let params = options.to_params().with("current_status", status.as_str());
        let payload = self.client.get(AIRDROPS, params, fetch_all, true)?;
        decode(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ostkit_auth::ParamValue;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_must_be_positive() {
        assert!(NewAirdrop::new(dec!(10)).validate().is_ok());
        assert_eq!(
            NewAirdrop::new(dec!(0)).validate(),
            Err(ValidationError::NonPositiveAmount(dec!(0)))
        );
    }

    #[test]
    fn test_user_ids_validated_and_joined() {
        let ids = [
            "f5f9b061-b784-4ecd-b599-bc263860f539",
            "a2b4c6d8-1234-4abc-8def-0123456789ab",
        ];
        let airdrop = NewAirdrop::new(dec!(1)).airdropped(false).with_user_ids(ids);
        assert!(airdrop.validate().is_ok());

        let params = airdrop.to_params();
        assert_eq!(params.get("user_ids"), Some(&ParamValue::Str(ids.join(","))));
        assert_eq!(params.get("airdropped"), Some(&ParamValue::Bool(false)));

        assert!(NewAirdrop::new(dec!(1)).with_user_ids(["bogus"]).validate().is_err());
    }

    #[test]
    fn test_minimal_params() {
        let params = NewAirdrop::new(dec!(5)).to_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("amount"), Some(&ParamValue::Decimal(dec!(5))));
    }
}
