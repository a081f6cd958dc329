//! User endpoints

use ostkit_auth::Params;
use tracing::instrument;

use super::resource_path;
use crate::client::OstKitClient;
use crate::error::RestResult;
use crate::extract::decode;
use crate::types::{ListOptions, User};
use crate::validation::{validate_list_options, validate_name};

const USERS: &str = "/users";

/// Economy user endpoints
pub struct UserEndpoints<'a> {
    client: &'a mut OstKitClient,
}

impl<'a> UserEndpoints<'a> {
    pub fn new(client: &'a mut OstKitClient) -> Self {
        Self { client }
    }

    /// Create a user
    ///
    /// # Arguments
    /// * `name` - 3 to 20 letters, digits or spaces
    #[instrument(skip(self))]
    pub fn create(&mut self, name: &str) -> RestResult<User> {
        validate_name(name)?;
        let payload = self.client.post(USERS, Params::new().with("name", name), true)?;
        decode(payload)
    }

    /// Rename a user
    #[instrument(skip(self))]
    pub fn update(&mut self, id: &str, name: &str) -> RestResult<User> {
        let path = resource_path(USERS, id)?;
        validate_name(name)?;
        let payload = self.client.post(&path, Params::new().with("name", name), true)?;
        decode(payload)
    }

    /// Get a single user
    #[instrument(skip(self))]
    pub fn get(&mut self, id: &str) -> RestResult<User> {
        let path = resource_path(USERS, id)?;
        let payload = self.client.get(&path, Params::new(), false, true)?;
        decode(payload)
    }

    /// List users
    ///
    /// # Arguments
    /// * `options` - Paging, ordering and id filters
    /// * `fetch_all` - Follow the page cursor and merge every page
    #[instrument(skip(self))]
    pub fn list(&mut self, options: &ListOptions, fetch_all: bool) -> RestResult<Vec<User>> {
        validate_list_options(options)?;
        let payload = self.client.get(USERS, options.to_params(), fetch_all, true)?;
        decode(payload)
    }

    /// List users that have (or have not) received an airdrop
    #[instrument(skip(self))]
    pub fn list_airdropped(
        &mut self,
        airdropped: bool,
        options: &ListOptions,
        fetch_all: bool,
    ) -> RestResult<Vec<User>> {
        validate_list_options(options)?;
        let params = options.to_params().with("airdropped", airdropped);
        let payload = self.client.get(USERS, params, fetch_all, true)?;
        decode(payload)
    }
}
