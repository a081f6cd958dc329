//! Balance and ledger endpoints

use ostkit_auth::Params;
use tracing::{debug, instrument};

use super::resource_path;
use super::token::TokenEndpoints;
use crate::client::OstKitClient;
use crate::error::{RestError, RestResult};
use crate::extract::decode;
use crate::types::{Balance, CombinedBalance, ListOptions, Transaction};
use crate::validation::{validate_id, validate_list_options};

const BALANCES: &str = "/balances";
const LEDGER: &str = "/ledger";

/// Balance endpoints
pub struct BalanceEndpoints<'a> {
    client: &'a mut OstKitClient,
}

impl<'a> BalanceEndpoints<'a> {
    pub fn new(client: &'a mut OstKitClient) -> Self {
        Self { client }
    }

    /// Get a user's token balance
    #[instrument(skip(self))]
    pub fn get(&mut self, user_id: &str) -> RestResult<Balance> {
        let path = resource_path(BALANCES, user_id)?;
        let payload = self.client.get(&path, Params::new(), false, true)?;
        decode(payload)
    }

    /// Get a user's balance with its OST and USD counter-values
    ///
    /// The available balance is divided by the token's conversion factor to
    /// get OST, then multiplied by the OST/USD price point.
    #[instrument(skip(self))]
    pub fn combined(&mut self, user_id: &str) -> RestResult<CombinedBalance> {
        validate_id(user_id)?;
        let balance = self.get(user_id)?;
        let (token, price_points) = TokenEndpoints::new(self.client).get_with_price_points()?;

        let ost_value = balance
            .available_balance
            .checked_div(token.conversion_factor)
            .ok_or_else(|| {
                RestError::shape(format!(
                    "cannot convert with conversion factor {}",
                    token.conversion_factor
                ))
            })?;
        let usd_value = price_points
            .get("USD")
            .and_then(|price| ost_value.checked_mul(*price));

        debug!(%ost_value, ?usd_value, "Combined balance");
        Ok(CombinedBalance {
            balance,
            ost_value,
            usd_value,
        })
    }
}

/// Ledger endpoints
pub struct LedgerEndpoints<'a> {
    client: &'a mut OstKitClient,
}

impl<'a> LedgerEndpoints<'a> {
    pub fn new(client: &'a mut OstKitClient) -> Self {
        Self { client }
    }

    /// Get the transactions a user took part in
    #[instrument(skip(self))]
    pub fn get(
        &mut self,
        user_id: &str,
        options: &ListOptions,
        fetch_all: bool,
    ) -> RestResult<Vec<Transaction>> {
        let path = resource_path(LEDGER, user_id)?;
        validate_list_options(options)?;
        let payload = self.client.get(&path, options.to_params(), fetch_all, true)?;
        decode(payload)
    }
}
