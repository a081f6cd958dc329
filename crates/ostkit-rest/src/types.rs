//! Types for OST KIT API requests and responses

use std::fmt;
use std::str::FromStr;

use ostkit_auth::Params;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::validation::ValidationError;

// ============================================================================
// Request Enums
// ============================================================================

/// Kind of an action (who pays whom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    UserToUser,
    CompanyToUser,
    UserToCompany,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserToUser => "user_to_user",
            Self::CompanyToUser => "company_to_user",
            Self::UserToCompany => "user_to_company",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user_to_user" => Ok(Self::UserToUser),
            "company_to_user" => Ok(Self::CompanyToUser),
            "user_to_company" => Ok(Self::UserToCompany),
            other => Err(ValidationError::InvalidKind(other.to_string())),
        }
    }
}

/// Currency an action amount is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Currency {
    /// Fiat value, converted at execution time
    #[serde(rename = "USD")]
    Usd,
    /// Branded token
    #[serde(rename = "BT")]
    Bt,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Bt => "BT",
        }
    }

    /// Inclusive amount bounds accepted for this currency
    pub fn amount_range(&self) -> (Decimal, Decimal) {
        match self {
            Self::Usd => (Decimal::new(1, 2), Decimal::ONE_HUNDRED),
            Self::Bt => (Decimal::new(1, 5), Decimal::ONE_HUNDRED),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::Usd),
            "BT" => Ok(Self::Bt),
            other => Err(ValidationError::InvalidCurrency(other.to_string())),
        }
    }
}

/// Sort direction for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Sort field for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Created,
    Name,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Name => "name",
        }
    }
}

/// Airdrop progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirdropStatus {
    Incomplete,
    Processing,
    Complete,
    Failed,
}

impl AirdropStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Processing => "processing",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

// ============================================================================
// List Options
// ============================================================================

/// Paging, ordering and id filters shared by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page to start from (1-based)
    pub page_no: Option<u32>,
    /// Page size (1-100)
    pub limit: Option<u32>,
    /// Sort field
    pub order_by: Option<OrderBy>,
    /// Sort direction
    pub order: Option<SortOrder>,
    /// Restrict to these ids
    pub ids: Vec<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page_no: u32) -> Self {
        self.page_no = Some(page_no);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Convert to request parameters
    pub fn to_params(&self) -> Params {
        let ids = (!self.ids.is_empty()).then(|| self.ids.join(","));
        Params::new()
            .with_opt("page_no", self.page_no)
            .with_opt("limit", self.limit)
            .with_opt("order_by", self.order_by.map(|o| o.as_str()))
            .with_opt("order", self.order.map(|o| o.as_str()))
            .with_opt("id", ids)
    }
}

// ============================================================================
// Response Models
// ============================================================================

/// Accept ids sent either as strings or as numbers
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

/// An economy user
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    /// `[chain id, address]` pairs
    #[serde(default)]
    pub addresses: Vec<Vec<String>>,
    #[serde(default)]
    pub airdropped_tokens: Option<Decimal>,
    #[serde(default)]
    pub token_balance: Option<Decimal>,
}

/// A configured action
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Action {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub kind: ActionKind,
    pub currency: Currency,
    #[serde(default)]
    pub arbitrary_amount: bool,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub arbitrary_commission: bool,
    #[serde(default)]
    pub commission_percent: Option<Decimal>,
}

/// An executed action
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub from_user_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub to_user_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub action_id: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub commission_amount: Option<Decimal>,
    #[serde(default)]
    pub airdropped_amount: Option<Decimal>,
    #[serde(default)]
    pub transaction_fee: Option<Decimal>,
    #[serde(default)]
    pub gas_price: Option<Decimal>,
    #[serde(default)]
    pub gas_used: Option<Decimal>,
    #[serde(default)]
    pub block_number: Option<u64>,
}

/// Block explorer root for transaction links
pub const VIEW_BASE_URL: &str = "https://view.ost.com/chain-id";

impl Transaction {
    /// Explorer link on chain `chain_id`, once the transaction has a hash
    pub fn view_url(&self, chain_id: u64) -> Option<String> {
        self.transaction_hash
            .as_deref()
            .map(|hash| format!("{}/{}/transaction/{}", VIEW_BASE_URL, chain_id, hash))
    }
}

/// An airdrop request and its progress
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Airdrop {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub current_status: AirdropStatus,
    #[serde(default)]
    pub steps_complete: Vec<String>,
}

/// An OST Prime transfer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transfer {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub from_address: Option<String>,
    pub to_address: String,
    /// Amount in Wei
    pub amount: Decimal,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub gas_price: Option<Decimal>,
    #[serde(default)]
    pub gas_used: Option<Decimal>,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

/// Token balance of a user
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Balance {
    pub available_balance: Decimal,
    pub airdropped_balance: Decimal,
    pub token_balance: Decimal,
}

/// Branded token details
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Token {
    pub company_uuid: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub symbol_icon: Option<String>,
    /// Branded tokens per OST
    pub conversion_factor: Decimal,
    #[serde(default)]
    pub token_erc20_address: Option<String>,
    #[serde(default)]
    pub simple_stake_contract_address: Option<String>,
    #[serde(default)]
    pub total_supply: Option<Decimal>,
    /// `[chain id, balance]` pairs
    #[serde(default)]
    pub ost_utility_balance: Vec<Vec<String>>,
}

/// User balance with OST and USD counter-values
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedBalance {
    pub balance: Balance,
    /// Available balance converted to OST
    pub ost_value: Decimal,
    /// OST value converted to USD, if a USD price point was published
    pub usd_value: Option<Decimal>,
}
