//! OST Prime transfer endpoints

use ostkit_auth::Params;
use tracing::instrument;

use super::resource_path;
use crate::client::OstKitClient;
use crate::error::RestResult;
use crate::extract::decode;
use crate::types::{ListOptions, Transfer};
use crate::validation::{validate_address, validate_list_options, validate_wei};

const TRANSFERS: &str = "/transfers";

/// Transfer endpoints
pub struct TransferEndpoints<'a> {
    client: &'a mut OstKitClient,
}

impl<'a> TransferEndpoints<'a> {
    pub fn new(client: &'a mut OstKitClient) -> Self {
        Self { client }
    }

    /// Transfer OST Prime to an external address
    ///
    /// # Arguments
    /// * `to_address` - Recipient, `0x` followed by 40 hex digits
    /// * `amount_wei` - Whole number of Wei, at most 10^20
    #[instrument(skip(self))]
    pub fn execute(&mut self, to_address: &str, amount_wei: &str) -> RestResult<Transfer> {
        validate_address(to_address)?;
        let amount = validate_wei(amount_wei)?;
        let params = Params::new()
            .with("to_address", to_address)
            .with("amount", amount.to_string());
        let payload = self.client.post(TRANSFERS, params, true)?;
        decode(payload)
    }

    /// Get a single transfer
    #[instrument(skip(self))]
    pub fn get(&mut self, id: &str) -> RestResult<Transfer> {
        let path = resource_path(TRANSFERS, id)?;
        let payload = self.client.get(&path, Params::new(), false, true)?;
        decode(payload)
    }

    /// List transfers
    #[instrument(skip(self))]
    pub fn list(&mut self, options: &ListOptions, fetch_all: bool) -> RestResult<Vec<Transfer>> {
        validate_list_options(options)?;
        let payload = self.client.get(TRANSFERS, options.to_params(), fetch_all, true)?;
        decode(payload)
    }
}
