//! Main REST client implementation

use std::env;
use std::fmt;
use std::time::Duration;

use ostkit_auth::{Credentials, Params, RequestSigner};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::endpoints::{
    ActionEndpoints, AirdropEndpoints, BalanceEndpoints, LedgerEndpoints, TokenEndpoints,
    TransactionEndpoints, TransferEndpoints, UserEndpoints,
};
use crate::envelope::{parse_response, ResponseContext};
use crate::error::{RestError, RestResult};
use crate::extract::extract_result;
use crate::pagination::{Paginator, DEFAULT_MAX_PAGES};
use crate::transport::{HttpRequest, HttpTransport, Transport};
use crate::types::Transaction;

/// Sandbox API base URL
pub const DEFAULT_BASE_URL: &str = "https://sandboxapi.ost.com/v1";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// OST utility chain
pub const DEFAULT_NETWORK_ID: u64 = 1409;

const DEFAULT_USER_AGENT: &str = concat!("ostkit-rest/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "OST_KIT_BASE_URL";

/// Environment variable enabling request/response logging
pub const DEBUG_ENV: &str = "OST_KIT_DEBUG";

/// OST KIT REST API client
///
/// Owns the credentials, the transport and the response cache. Every
/// operation takes `&mut self` because extracted results are written to the
/// cache.
///
/// # Example
///
/// ```no_run
/// use ostkit_rest::{Credentials, ListOptions, OstKitClient};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let creds = Credentials::from_env()?;
///     let mut client = OstKitClient::new(creds)?;
///
///     let user = client.users().create("Alice")?;
///     let everyone = client.users().list(&ListOptions::new(), true)?;
///     println!("{} is one of {} users", user.name, everyone.len());
///
///     Ok(())
/// }
/// ```
pub struct OstKitClient {
    credentials: Credentials,
    config: ClientConfig,
    transport: Box<dyn Transport>,
    cache: ResponseCache,
}

impl OstKitClient {
    /// Create a client against the sandbox with default settings
    pub fn new(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> RestResult<Self> {
        let transport = HttpTransport::new(config.timeout(), config.user_agent())
            .map_err(|e| RestError::Configuration(e.to_string()))?;
        Ok(Self::with_transport(credentials, config, transport))
    }

    /// Create a client that sends requests through `transport`
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Self {
        info!(base_url = %config.base_url, "Created OST KIT REST client");

        Self {
            credentials,
            config,
            transport: Box::new(transport),
            cache: ResponseCache::new(),
        }
    }

    /// Create a client from `OST_KIT_*` environment variables
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(Credentials::from_env()?, ClientConfig::from_env())
    }

    /// Entities seen in responses so far
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Explorer link for `transaction` on the configured chain
    pub fn transaction_view_url(&self, transaction: &Transaction) -> Option<String> {
        transaction.view_url(self.config.network_id)
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn users(&mut self) -> UserEndpoints<'_> {
        UserEndpoints::new(self)
    }

    pub fn actions(&mut self) -> ActionEndpoints<'_> {
        ActionEndpoints::new(self)
    }

    pub fn transactions(&mut self) -> TransactionEndpoints<'_> {
        TransactionEndpoints::new(self)
    }

    pub fn airdrops(&mut self) -> AirdropEndpoints<'_> {
        AirdropEndpoints::new(self)
    }

    /// OST Prime transfers
    pub fn transfers(&mut self) -> TransferEndpoints<'_> {
        TransferEndpoints::new(self)
    }

    pub fn token(&mut self) -> TokenEndpoints<'_> {
        TokenEndpoints::new(self)
    }

    pub fn balances(&mut self) -> BalanceEndpoints<'_> {
        BalanceEndpoints::new(self)
    }

    pub fn ledger(&mut self) -> LedgerEndpoints<'_> {
        LedgerEndpoints::new(self)
    }

    // ========================================================================
    // Request engine
    // ========================================================================

    /// Signed GET
    ///
    /// With `fetch_all`, every page is requested and merged before
    /// extraction. With `extract`, the payload named by `result_type` is
    /// returned and cached; otherwise the whole `data` object is returned.
    pub fn get(
        &mut self,
        endpoint: &str,
        params: Params,
        fetch_all: bool,
        extract: bool,
    ) -> RestResult<Value> {
        let data = if fetch_all {
            Paginator::new(self.config.max_pages)
                .fetch_all(params, |page| self.get_page(endpoint, page))?
        } else {
            self.get_page(endpoint, &params)?
        };
        extract_result(data, extract, &mut self.cache)
    }

    /// Signed form POST
    pub fn post(&mut self, endpoint: &str, params: Params, extract: bool) -> RestResult<Value> {
        let form = RequestSigner::new(&self.credentials).sign_post(endpoint, &params)?;
        let url = self.endpoint_url(endpoint);
        let data = self.dispatch(HttpRequest::post_form(url.clone(), form.body), &url)?;
        extract_result(data, extract, &mut self.cache)
    }

    fn get_page(&self, endpoint: &str, params: &Params) -> RestResult<Value> {
        let signed = RequestSigner::new(&self.credentials).sign_get(endpoint, params);
        let url = format!("{}{}", self.config.base_url, signed.path_and_query);
        self.dispatch(HttpRequest::get(url), &self.endpoint_url(endpoint))
    }

    fn dispatch(&self, request: HttpRequest, endpoint_url: &str) -> RestResult<Value> {
        if self.config.debug {
            debug!(
                method = %request.method,
                url = %request.url,
                body = request.body.as_deref().unwrap_or(""),
                "Sending request"
            );
        } else {
            debug!(method = %request.method, url = endpoint_url, "Sending request");
        }

        let response = self
            .transport
            .execute(&request)
            .map_err(|source| RestError::Transport {
                url: endpoint_url.to_string(),
                source,
            })?;

        if self.config.debug {
            debug!(
                status = response.status,
                body = %String::from_utf8_lossy(&response.body),
                "Received response"
            );
        }

        let ctx = ResponseContext {
            method: request.method,
            url: &request.url,
            endpoint_url,
        };
        match parse_response(&response, ctx) {
            Err(RestError::Api { message, code, url }) => {
                warn!(endpoint = endpoint_url, %message, "API request unsuccessful");
                Err(RestError::Api { message, code, url })
            }
            other => other,
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }
}

impl fmt::Debug for OstKitClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OstKitClient")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Log full request URLs, bodies and raw responses
    pub debug: bool,
    /// Fetch-all gives up after this many pages
    pub max_pages: usize,
    /// Chain ID used for explorer links
    pub network_id: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            debug: false,
            max_pages: DEFAULT_MAX_PAGES,
            network_id: DEFAULT_NETWORK_ID,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `OST_KIT_BASE_URL` and `OST_KIT_DEBUG`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config = config.with_base_url(base_url.trim());
            }
        }
        if let Ok(flag) = env::var(DEBUG_ENV) {
            config.debug = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        config
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Toggle request/response logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the fetch-all page cap
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the chain used for explorer links
    pub fn with_network_id(mut self, network_id: u64) -> Self {
        self.network_id = network_id;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
