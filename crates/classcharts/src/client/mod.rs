//! Talking to the ClassCharts parent API.
//!
//! [`Transport`] is the seam between the report code and the network:
//! [`HttpTransport`] is the real implementation, tests script their own.
//! [`Session`] owns the credentials and the short-lived session token.

mod http;
mod session;

pub use http::HttpTransport;
pub use session::{LoginOutcome, Session, REFRESH_INTERVAL};

use crate::error::Result;
use crate::models::de;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Performs one request and returns the parsed JSON body.
///
/// Implementations report connection failures and non-2xx statuses as
/// [`ClassChartsError::Transport`](crate::error::ClassChartsError::Transport);
/// the body-level `success` flag is left for the caller to judge.
pub trait Transport {
    /// `GET url` with the session token in the `Authorization` header.
    fn get(&self, url: &Url, token: &str) -> Result<Value>;

    /// `POST url` with a form-encoded body, authorized when `token` is set.
    fn post_form(&self, url: &Url, form: &[(&str, String)], token: Option<&str>) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url, token: &str) -> Result<Value> {
        (**self).get(url, token)
    }

    fn post_form(&self, url: &Url, form: &[(&str, String)], token: Option<&str>) -> Result<Value> {
        (**self).post_form(url, form, token)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &Url, token: &str) -> Result<Value> {
        (**self).get(url, token)
    }

    fn post_form(&self, url: &Url, form: &[(&str, String)], token: Option<&str>) -> Result<Value> {
        (**self).post_form(url, form, token)
    }
}

/// The envelope every endpoint wraps its payload in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiResponse {
    /// `1`/`0` on most endpoints, occasionally a real boolean
    #[serde(deserialize_with = "de::flag")]
    pub success: bool,
    pub data: Value,
    pub meta: Value,
    #[serde(deserialize_with = "de::opt_string")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Returns true when `data` holds nothing worth printing.
    pub fn data_is_empty(&self) -> bool {
        match &self.data {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The error text, or a generic fallback when the API sent none.
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "request was not successful".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success_forms() {
        let numeric: ApiResponse =
            serde_json::from_value(json!({"success": 1, "data": [], "meta": {}})).unwrap();
        let boolean: ApiResponse =
            serde_json::from_value(json!({"success": true, "data": [1]})).unwrap();
        let failed: ApiResponse =
            serde_json::from_value(json!({"success": 0, "error": "Invalid session"})).unwrap();

        assert!(numeric.success);
        assert!(numeric.data_is_empty());
        assert!(boolean.success);
        assert!(!boolean.data_is_empty());
        assert!(!failed.success);
        assert_eq!(failed.error_message(), "Invalid session");
    }
}
