//! API endpoint implementations
//!
//! Each resource borrows the client mutably for the duration of a call.
//! Inputs are validated before anything is signed or sent.

pub mod actions;
pub mod airdrops;
pub mod balances;
pub mod token;
pub mod transactions;
pub mod transfers;
pub mod users;

pub use actions::{ActionEndpoints, ActionUpdate, NewAction};
pub use airdrops::{AirdropEndpoints, NewAirdrop};
pub use balances::{BalanceEndpoints, LedgerEndpoints};
pub use token::{PricePoints, TokenEndpoints};
pub use transactions::{NewTransaction, TransactionEndpoints};
pub use transfers::TransferEndpoints;
pub use users::UserEndpoints;

use crate::validation::{validate_id, ValidationError};

/// `collection/id` once `id` is known to be a UUID
fn resource_path(collection: &str, id: &str) -> Result<String, ValidationError> {
    validate_id(id)?;
    Ok(format!("{}/{}", collection, id))
}
