//! Response envelope parsing
//!
//! Every OST KIT response is wrapped as
//! `{ "success": bool, "data": {...}, "err": { "msg": "..." } }`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{RestError, RestResult};
use crate::transport::{HttpMethod, HttpResponse, TransportError};

/// Standard OST KIT response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Anything other than `true`, including a missing flag, is a failure
    #[serde(default, deserialize_with = "literal_true")]
    pub success: bool,
    /// Result data (present if successful)
    #[serde(default)]
    pub data: Option<Value>,
    /// Error details (present if unsuccessful)
    #[serde(default)]
    pub err: Option<ApiErrorBody>,
}

/// The `err` object of a failed response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Sent as a string or a number
    #[serde(default, deserialize_with = "opt_code")]
    pub code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    /// Per-parameter error details
    #[serde(default)]
    pub error_data: Option<Value>,
}

fn literal_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn opt_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Ok(Some(other.to_string())),
    }
}

/// Where a response came from, for diagnostics
#[derive(Debug, Clone, Copy)]
pub struct ResponseContext<'a> {
    pub method: HttpMethod,
    /// Full URL as requested
    pub url: &'a str,
    /// URL without the query string
    pub endpoint_url: &'a str,
}

impl Envelope {
    /// Decode an envelope from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Unwrap `data`, turning `success: false` into [`RestError::Api`]
    ///
    /// GET failures carry the offending URL; POST failures only the message.
    pub fn into_data(self, ctx: ResponseContext<'_>) -> RestResult<Value> {
        if !self.success {
            let err = self.err.unwrap_or_default();
            return Err(RestError::Api {
                message: err.msg.unwrap_or_else(|| "request unsuccessful".to_string()),
                code: err.code,
                url: match ctx.method {
                    HttpMethod::Get => Some(ctx.url.to_string()),
                    HttpMethod::Post => None,
                },
            });
        }

        self.data
            .ok_or_else(|| RestError::shape("successful response has no data"))
    }
}

/// Parse a raw response into the envelope's `data`
///
/// An empty body is a transport failure and is never decoded. A body that is
/// not JSON is a transport failure when the status was not 2xx, and a
/// malformed response otherwise.
pub fn parse_response(response: &HttpResponse, ctx: ResponseContext<'_>) -> RestResult<Value> {
    if response.body.is_empty() {
        return Err(RestError::Transport {
            url: ctx.endpoint_url.to_string(),
            source: TransportError::EmptyResponse {
                status: response.status,
            },
        });
    }

    let envelope = match Envelope::from_slice(&response.body) {
        Ok(envelope) => envelope,
        Err(_) if !response.is_success() => {
            return Err(RestError::Transport {
                url: ctx.endpoint_url.to_string(),
                source: TransportError::Status {
                    status: response.status,
                },
            })
        }
        Err(e) => {
            return Err(RestError::MalformedResponse {
                url: ctx.endpoint_url.to_string(),
                reason: e.to_string(),
            })
        }
    };

    envelope.into_data(ctx)
}
