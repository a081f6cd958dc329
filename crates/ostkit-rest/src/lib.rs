//! REST API client for the OST KIT token economy API
//!
//! This crate turns typed calls into signed HTTP requests, unwraps the
//! vendor's `{success, data, err}` envelope and keeps a per-client cache of
//! the entities it has seen.
//!
//! # Features
//!
//! - **Users**: Create, rename, get and list economy users
//! - **Actions**: Configure value exchanges between users and the company
//! - **Transactions**: Execute actions and browse their history
//! - **Airdrops**: Distribute branded tokens to users
//! - **Transfers**: Move OST Prime to external addresses
//! - **Token, balances and ledger**: Read-only economy state
//!
//! # Authentication
//!
//! Every request carries `api_key`, `request_timestamp` and a hex
//! HMAC-SHA256 `signature` over the sorted query string. See
//! [`ostkit_auth`] for the canonical form.
//!
//! # Example
//!
//! ```no_run
//! use ostkit_rest::{ActionKind, Credentials, Currency, ListOptions, NewAction, OstKitClient};
//! use rust_decimal::Decimal;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = OstKitClient::new(Credentials::from_env()?)?;
//!
//!     let like = NewAction::new("Like", ActionKind::UserToUser, Currency::Bt)
//!         .with_amount(Decimal::new(5, 1));
//!     let action = client.actions().create(&like)?;
//!     println!("Created action {}", action.id);
//!
//!     // Walk every page of users
//!     let users = client.users().list(&ListOptions::new(), true)?;
//!     println!("{} users", users.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Pagination
//!
//! List operations take a `fetch_all` flag. When set, the client follows
//! `meta.next_page_payload` until it stops advancing, using the largest page
//! size, and returns the merged result. Any failing page fails the whole call.

pub mod cache;
pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export main types
pub use cache::{CacheCategory, ResponseCache};
pub use client::{ClientConfig, OstKitClient, DEFAULT_BASE_URL, DEFAULT_NETWORK_ID};
pub use error::{RestError, RestResult};
pub use ostkit_auth::{Credentials, ParamValue, Params};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};
pub use validation::ValidationError;

// Re-export endpoint-specific types
pub use endpoints::{ActionUpdate, NewAction, NewAirdrop, NewTransaction, PricePoints};
pub use types::{
    // Requests
    ActionKind, AirdropStatus, Currency, ListOptions, OrderBy, SortOrder,
    // Responses
    Action, Airdrop, Balance, CombinedBalance, Token, Transaction, Transfer, User,
};
