//! Credentials and request signing for the OST KIT REST API
//!
//! Every OST KIT request carries `api_key`, `request_timestamp` and a
//! `signature`: the hex HMAC-SHA256 of the canonical `path?query` string,
//! keyed with the API secret.
//!
//! # Example
//!
//! ```no_run
//! use ostkit_auth::{Credentials, Params, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     // Sign a listing request
//!     let params = Params::new().with("page_no", 1i64);
//!     let signed = RequestSigner::new(&creds).sign_get("/users", &params);
//!     println!("GET {}", signed.path_and_query);
//!
//!     Ok(())
//! }
//! ```

pub mod canonical;
mod credentials;
mod error;
mod signer;

pub use canonical::{canonical_get_query, canonical_post_query, form_encode, ParamValue, Params};
pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use signer::{RequestSigner, SignedForm, SignedQuery};
