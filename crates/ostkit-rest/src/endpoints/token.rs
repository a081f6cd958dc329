//! Branded token endpoints

use std::collections::BTreeMap;

use ostkit_auth::Params;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use crate::client::OstKitClient;
use crate::error::{RestError, RestResult};
use crate::extract::decode;
use crate::types::Token;

const TOKEN: &str = "/token";

/// OST price in each quote currency, keyed by currency code (e.g. `"USD"`)
pub type PricePoints = BTreeMap<String, Decimal>;

/// Token endpoints
pub struct TokenEndpoints<'a> {
    client: &'a mut OstKitClient,
}

impl<'a> TokenEndpoints<'a> {
    pub fn new(client: &'a mut OstKitClient) -> Self {
        Self { client }
    }

    /// Get the branded token's details
    #[instrument(skip(self))]
    pub fn get(&mut self) -> RestResult<Token> {
        let payload = self.client.get(TOKEN, Params::new(), false, true)?;
        decode(payload)
    }

    /// Get the current OST price points
    #[instrument(skip(self))]
    pub fn ost_price_points(&mut self) -> RestResult<PricePoints> {
        let (_, price_points) = self.get_with_price_points()?;
        Ok(price_points)
    }

    /// Get the token and the OST price points from one response
    #[instrument(skip(self))]
    pub fn get_with_price_points(&mut self) -> RestResult<(Token, PricePoints)> {
        let mut data = self.client.get(TOKEN, Params::new(), false, false)?;
        let token = take(&mut data, "/token")?;
        let price_points = take(&mut data, "/price_points/OST")?;
        Ok((decode(token)?, decode(price_points)?))
    }
}

fn take(data: &mut Value, pointer: &str) -> RestResult<Value> {
    data.pointer_mut(pointer)
        .map(Value::take)
        .ok_or_else(|| RestError::shape(format!("token response has no {}", pointer)))
}
