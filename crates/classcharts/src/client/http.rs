//! Blocking HTTP transport built on `reqwest`.

use super::Transport;
use crate::error::{ClassChartsError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends requests one at a time over a pooled blocking client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeouts.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("classcharts/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClassChartsError::Transport {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    fn send(&self, request: RequestBuilder, url: &Url) -> Result<Value> {
        let response = request.send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(url = %url.path(), status = %status, "Request failed");
            return Err(ClassChartsError::Transport {
                message: format!(
                    "{} returned status {}: {}",
                    url.path(),
                    status,
                    body.chars().take(200).collect::<String>()
                ),
            });
        }

        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| ClassChartsError::Transport {
            message: format!("{} returned a body that is not JSON: {}", url.path(), e),
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url, token: &str) -> Result<Value> {
        debug!(url = %url.path(), "GET");
        let request = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Basic {token}"));
        self.send(request, url)
    }

    fn post_form(&self, url: &Url, form: &[(&str, String)], token: Option<&str>) -> Result<Value> {
        debug!(url = %url.path(), "POST");
        let mut request = self.client.post(url.clone()).form(form);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Basic {token}"));
        }
        self.send(request, url)
    }
}
