//! Client-side input validation
//!
//! Every check here runs before a request is signed, so a rejected input
//! never reaches the network.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::types::{ActionKind, Currency, ListOptions};

/// Largest page size the API serves
pub const MAX_PAGE_SIZE: u32 = 100;

/// Largest OST Prime transfer, in Wei (100 OST)
pub const MAX_TRANSFER_WEI: u128 = 100_000_000_000_000_000_000;

const NAME_RULE: &str = "Name must be a minimum of 3 characters, a maximum of 20 characters, \
and can contain only letters, numbers, and spaces, along with other common sense limitations.";

/// Validation errors, raised before any I/O
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("ID is mandatory.")]
    MissingId,

    #[error("ID '{0}' is not a valid UUID.")]
    InvalidId(String),

    #[error("Name is mandatory.")]
    MissingName,

    #[error("{}", NAME_RULE)]
    InvalidName(String),

    #[error("Invalid action kind: {0}")]
    InvalidKind(String),

    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    #[error("Amount is mandatory unless the amount is arbitrary.")]
    MissingAmount,

    #[error("Amount must be omitted when the amount is arbitrary.")]
    UnexpectedAmount,

    #[error("Amount {amount} {currency} is out of range [{min}, {max}].")]
    AmountOutOfRange {
        amount: Decimal,
        currency: Currency,
        min: Decimal,
        max: Decimal,
    },

    #[error("Amount must be greater than zero, got {0}.")]
    NonPositiveAmount(Decimal),

    #[error("Commission percent {0} is out of range [0, 100].")]
    CommissionOutOfRange(Decimal),

    #[error("Commission is only allowed for user_to_user actions, not {0}.")]
    CommissionNotAllowed(ActionKind),

    #[error("'{0}' is not a valid Ethereum address.")]
    InvalidAddress(String),

    #[error("Transfer amount '{0}' must be a whole number of Wei between 1 and 10^20.")]
    InvalidWeiAmount(String),

    #[error("Page number must be at least 1.")]
    InvalidPageNo,

    #[error("Limit {0} is out of range [1, {max}].", max = MAX_PAGE_SIZE)]
    InvalidLimit(u32),
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9 ]{3,20}$").expect("name pattern is valid"))
}

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid"))
}

/// Validate an entity id and return it parsed
///
/// Only the hyphenated RFC 4122 form is accepted, because the id is embedded
/// verbatim in the request path.
pub fn validate_id(id: &str) -> Result<Uuid, ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::MissingId);
    }
    if id.len() != 36 {
        return Err(ValidationError::InvalidId(id.to_string()));
    }
    Uuid::parse_str(id).map_err(|_| ValidationError::InvalidId(id.to_string()))
}

/// Validate a user or action name
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !name_pattern().is_match(name) || name.trim().is_empty() {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Validate an action amount against its currency's inclusive range
pub fn validate_amount(amount: Decimal, currency: Currency) -> Result<(), ValidationError> {
    let (min, max) = currency.amount_range();
    if amount < min || amount > max {
        return Err(ValidationError::AmountOutOfRange {
            amount,
            currency,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate a commission percentage for an action kind
pub fn validate_commission(kind: ActionKind, percent: Decimal) -> Result<(), ValidationError> {
    if kind != ActionKind::UserToUser {
        return Err(ValidationError::CommissionNotAllowed(kind));
    }
    validate_commission_percent(percent)
}

/// Validate a commission percentage on its own (0-100 inclusive)
pub fn validate_commission_percent(percent: Decimal) -> Result<(), ValidationError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::CommissionOutOfRange(percent));
    }
    Ok(())
}

/// Validate that an amount is strictly positive
pub fn validate_positive(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Validate an Ethereum address (`0x` + 40 hex digits)
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if !address_pattern().is_match(address) {
        return Err(ValidationError::InvalidAddress(address.to_string()));
    }
    Ok(())
}

/// Validate a transfer amount in Wei and return it parsed
pub fn validate_wei(amount: &str) -> Result<u128, ValidationError> {
    match amount.parse::<u128>() {
        Ok(wei) if wei > 0 && wei <= MAX_TRANSFER_WEI => Ok(wei),
        _ => Err(ValidationError::InvalidWeiAmount(amount.to_string())),
    }
}

/// Validate paging options and any id filters
pub fn validate_list_options(options: &ListOptions) -> Result<(), ValidationError> {
    if options.page_no == Some(0) {
        return Err(ValidationError::InvalidPageNo);
    }
    if let Some(limit) = options.limit {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidLimit(limit));
        }
    }
    for id in &options.ids {
        validate_id(id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_uuid() {
        let id = "f5f9b061-b784-4ecd-b599-bc263860f539";
        assert_eq!(validate_id(id).unwrap().to_string(), id);
    }

    #[test]
    fn test_missing_id() {
        assert_eq!(validate_id(""), Err(ValidationError::MissingId));
        assert_eq!(ValidationError::MissingId.to_string(), "ID is mandatory.");
    }

    #[test]
    fn test_malformed_uuid() {
        let err = validate_id("12f9b061-b784-4ecd-b599-bc263860f53_").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ID '12f9b061-b784-4ecd-b599-bc263860f53_' is not a valid UUID."
        );
    }

    #[test]
    fn test_non_hyphenated_uuid_rejected() {
        assert!(validate_id("f5f9b061b7844ecdb599bc263860f539").is_err());
        assert!(validate_id("{f5f9b061-b784-4ecd-b599-bc263860f539}").is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Freddy").is_ok());
        assert!(validate_name("Alice Smith 2").is_ok());
        assert_eq!(validate_name(""), Err(ValidationError::MissingName));
        assert!(validate_name("01").is_err());
        assert!(validate_name("012345678901234567890").is_err());
        assert!(validate_name("012345678901234567_/").is_err());
        assert!(validate_name("    ").is_err());
    }

    #[test]
    fn test_name_error_message() {
        let err = validate_name("01").unwrap_err();
        assert!(err.to_string().starts_with("Name must be a minimum of 3 characters"));
    }

    #[test]
    fn test_bt_amount_lower_bound_inclusive() {
        assert!(validate_amount(dec!(0.00001), Currency::Bt).is_ok());
        assert!(matches!(
            validate_amount(dec!(0.000009), Currency::Bt),
            Err(ValidationError::AmountOutOfRange { .. })
        ));
        assert!(validate_amount(dec!(100), Currency::Bt).is_ok());
        assert!(validate_amount(dec!(100.00001), Currency::Bt).is_err());
    }

    #[test]
    fn test_usd_amount_range() {
        assert!(validate_amount(dec!(0.01), Currency::Usd).is_ok());
        assert!(validate_amount(dec!(0.009), Currency::Usd).is_err());
    }

    #[test]
    fn test_commission_rules() {
        assert!(validate_commission(ActionKind::UserToUser, dec!(0)).is_ok());
        assert!(validate_commission(ActionKind::UserToUser, dec!(100)).is_ok());
        assert!(validate_commission(ActionKind::UserToUser, dec!(100.1)).is_err());
        assert_eq!(
            validate_commission(ActionKind::CompanyToUser, dec!(1)),
            Err(ValidationError::CommissionNotAllowed(ActionKind::CompanyToUser))
        );
    }

    #[test]
    fn test_address_rules() {
        assert!(validate_address("0x9352880A2A4c05c41eC1962980Bb1a0bA4176182").is_ok());
        assert!(validate_address("9352880A2A4c05c41eC1962980Bb1a0bA4176182").is_err());
        assert!(validate_address("0x9352880A2A4c05c41eC1962980Bb1a0bA417618").is_err());
    }

    #[test]
    fn test_wei_rules() {
        assert_eq!(validate_wei("1"), Ok(1));
        assert_eq!(validate_wei("100000000000000000000"), Ok(MAX_TRANSFER_WEI));
        assert!(validate_wei("0").is_err());
        assert!(validate_wei("100000000000000000001").is_err());
        assert!(validate_wei("1.5").is_err());
    }

    #[test]
    fn test_list_options_rules() {
        assert!(validate_list_options(&ListOptions::new()).is_ok());
        assert_eq!(
            validate_list_options(&ListOptions::new().with_page(0)),
            Err(ValidationError::InvalidPageNo)
        );
        assert_eq!(
            validate_list_options(&ListOptions::new().with_limit(101)),
            Err(ValidationError::InvalidLimit(101))
        );
        assert!(validate_list_options(&ListOptions::new().with_ids(["nope"])).is_err());
    }
}
