//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes served by the OST KIT v1 sandbox.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use ostkit_rest::{
    ClientConfig, Credentials, HttpRequest, HttpResponse, OstKitClient, Transport, TransportError,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const BASE_URL: &str = "https://api.test/v1";
pub const API_KEY: &str = "6078017455d8be7d9f07";
pub const API_SECRET: &str = "f5a1b2c3d4e5f60718293a4b5c6d7e8f";

pub const ALICE_ID: &str = "f5f9b061-b784-4ecd-b599-bc263860f539";
pub const BOB_ID: &str = "a2b4c6d8-1234-4abc-8def-0123456789ab";
pub const CAROL_ID: &str = "c0ffee00-aaaa-4bbb-9ccc-dddddddddddd";
pub const ACTION_ID: &str = "0b4a5f6e-7c8d-4e9f-a0b1-c2d3e4f5a6b7";
pub const AIRDROP_ID: &str = "d5f2c1a8-61b4-4b0c-9a7e-3f2e1d0c9b8a";
pub const TRANSFER_ID: &str = "e4b5a6c7-d8e9-4f01-a2b3-c4d5e6f70819";

pub const ADDRESS: &str = "0x9352880A2A4c05c41eC1962980Bb1a0bA4176182";

// =============================================================================
// Mock transport
// =============================================================================

enum Scripted {
    Response(HttpResponse),
    ConnectionFailed,
}

#[derive(Default)]
struct MockState {
    script: VecDeque<Scripted>,
    requests: Vec<HttpRequest>,
}

/// Recording transport that replays scripted responses in order
///
/// Clones share state, so a test keeps one handle while the client owns
/// another. Once the script runs out every call fails to connect.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response
    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.state
            .lock()
            .script
            .push_back(Scripted::Response(HttpResponse::new(status, body)));
        self
    }

    /// Queue a 200 response carrying a successful envelope around `data`
    pub fn respond_ok(&self, data: Value) -> &Self {
        self.respond(200, success(data).to_string())
    }

    /// Queue a failed envelope
    pub fn respond_err(&self, status: u16, msg: &str) -> &Self {
        self.respond(status, failure(msg).to_string())
    }

    /// Queue a connection failure
    pub fn fail(&self) -> &Self {
        self.state.lock().script.push_back(Scripted::ConnectionFailed);
        self
    }

    /// Every request executed so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// The most recent request
    pub fn last_request(&self) -> HttpRequest {
        self.state
            .lock()
            .requests
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());
        match state.script.pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::ConnectionFailed) | None => Err(TransportError::ConnectionFailed(
                "no scripted response".to_string(),
            )),
        }
    }
}

// =============================================================================
// Client setup
// =============================================================================

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET).unwrap()
}

pub fn config() -> ClientConfig {
    ClientConfig::new().with_base_url(BASE_URL)
}

/// Client wired to `mock`
pub fn client(mock: &MockTransport) -> OstKitClient {
    client_with(mock, config())
}

pub fn client_with(mock: &MockTransport, config: ClientConfig) -> OstKitClient {
    init_tracing();
    OstKitClient::with_transport(credentials(), config, mock.clone())
}

/// Route `tracing` output through the test harness (`RUST_LOG` to enable)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Request inspection
// =============================================================================

/// Path and query of a request URL, relative to the base URL
pub fn relative(url: &str) -> &str {
    url.strip_prefix(BASE_URL).expect("URL outside base URL")
}

/// Decoded query parameters of a GET URL, in order
pub fn query_pairs(url: &str) -> Vec<(String, String)> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
    serde_urlencoded::from_str(query).unwrap()
}

/// Decoded fields of a POST body, in order
pub fn form_pairs(request: &HttpRequest) -> Vec<(String, String)> {
    serde_urlencoded::from_str(request.body.as_deref().unwrap_or("")).unwrap()
}

pub fn lookup(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

// =============================================================================
// Envelope fixtures
// =============================================================================

pub fn success(data: Value) -> Value {
    json!({"success": true, "data": data})
}

pub fn failure(msg: &str) -> Value {
    json!({
        "success": false,
        "err": {
            "code": "companyRestFulApi(s_a_g_1:rJndQJkYG)",
            "msg": msg,
            "error_data": {}
        }
    })
}

/// `data` for a single entity
pub fn single(result_type: &str, payload: Value) -> Value {
    let mut data = serde_json::Map::new();
    data.insert("result_type".to_string(), json!(result_type));
    data.insert(result_type.to_string(), payload);
    Value::Object(data)
}

/// `data` for one page of a list
pub fn page(result_type: &str, items: Vec<Value>, next_page_no: Option<i64>) -> Value {
    let next_page_payload = match next_page_no {
        Some(page_no) => json!({"order_by": "created", "order": "desc", "limit": 10, "page_no": page_no}),
        None => json!({}),
    };
    let mut data = serde_json::Map::new();
    data.insert("result_type".to_string(), json!(result_type));
    data.insert(result_type.to_string(), Value::Array(items));
    data.insert(
        "meta".to_string(),
        json!({"next_page_payload": next_page_payload, "total_no": 3}),
    );
    Value::Object(data)
}

pub fn user(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "addresses": [["1409", ADDRESS]],
        "name": name,
        "airdropped_tokens": "0",
        "token_balance": "0"
    })
}

pub fn action(id: &str, name: &str, amount: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "kind": "user_to_user",
        "currency": "BT",
        "arbitrary_amount": false,
        "amount": amount,
        "arbitrary_commission": false,
        "commission_percent": null
    })
}

pub fn transaction(id: &str) -> Value {
    json!({
        "id": id,
        "from_user_id": ALICE_ID,
        "to_user_id": BOB_ID,
        "transaction_hash": null,
        "action_id": ACTION_ID,
        "timestamp": 1_526_000_000_000u64,
        "status": "processing",
        "gas_price": "5000000000",
        "gas_used": null,
        "transaction_fee": null,
        "block_number": null,
        "amount": "1.5",
        "commission_amount": null
    })
}

pub fn balance(available: &str) -> Value {
    json!({
        "available_balance": available,
        "airdropped_balance": "0",
        "token_balance": available
    })
}

/// `data` of GET /token, with the token and OST price points
pub fn token_data(conversion_factor: &str, ost_usd: &str) -> Value {
    json!({
        "result_type": "token",
        "token": {
            "company_uuid": "0e5e1c4b-1a8d-4e3f-8b2a-9c4d5e6f7a8b",
            "name": "Sample Token",
            "symbol": "SMT",
            "symbol_icon": "token_icon_4",
            "conversion_factor": conversion_factor,
            "token_erc20_address": "0x5cCA1B6A8Ea3e8D1D7Ef5bF3DE2A5b3d08E5a0D1",
            "simple_stake_contract_address": "0x2E5bA0D4E3C5fF2B1dEe3f6A7b8C9d0E1F2a3B4c",
            "total_supply": "100000",
            "ost_utility_balance": [["1409", "20.000000"]]
        },
        "price_points": {
            "OST": {"USD": ost_usd}
        }
    })
}
