//! Login, token refresh and authorized reads.

use super::{ApiResponse, Transport};
use crate::config::Config;
use crate::error::{ClassChartsError, Result};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// How long a session id stays usable before it must be pinged.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(180);

const LOGIN_PATH: &str = "login";
const PING_PATH: &str = "ping";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session_id: String,
    /// Display name of the parent account
    pub name: Option<String>,
}

struct Token {
    session_id: String,
    issued_at: Instant,
}

/// An authenticated conversation with the API.
///
/// The token is replaced in place by [`Session::authenticate`] and
/// [`Session::refresh`]; reads refresh it first once it is older than the
/// refresh interval.
pub struct Session<T: Transport> {
    config: Config,
    transport: T,
    token: Option<Token>,
    refresh_interval: Duration,
}

impl<T: Transport> Session<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self {
            config,
            transport,
            token: None,
            refresh_interval: REFRESH_INTERVAL,
        }
    }

    /// Overrides how old a token may get before reads refresh it.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The current session id, if logged in.
    pub fn session_id(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.session_id.as_str())
    }

    /// Logs in with the configured email and password.
    ///
    /// # Returns
    /// * `Ok(LoginOutcome)` - the new session id and the account's name
    /// * `Err(ClassChartsError::Auth)` - the API answered but refused the login
    /// * `Err(ClassChartsError::Transport)` - the request itself failed
    pub fn authenticate(&mut self) -> Result<LoginOutcome> {
        let url = self.config.api_url.join(LOGIN_PATH)?;
        info!(email = %self.config.email, "Logging in");

        let form = [
            ("email", self.config.email.clone()),
            ("password", self.config.password.clone()),
        ];
        let response: ApiResponse =
            serde_json::from_value(self.transport.post_form(&url, &form, None)?)?;

        if !response.success {
            return Err(ClassChartsError::Auth {
                message: response.error_message(),
            });
        }

        let session_id = session_id_from(&response)?;
        let name = response
            .data
            .get("name")
            .and_then(|n| n.as_str())
            .map(str::to_string);

        info!(session = %redact(&session_id), "Logged in");
        self.token = Some(Token {
            session_id: session_id.clone(),
            issued_at: Instant::now(),
        });

        Ok(LoginOutcome { session_id, name })
    }

    /// Exchanges the current session id for a fresh one via `/ping`.
    pub fn refresh(&mut self) -> Result<String> {
        let current = self
            .session_id()
            .ok_or_else(|| ClassChartsError::Auth {
                message: "not logged in".to_string(),
            })?
            .to_string();

        let url = self.config.api_url.join(PING_PATH)?;
        let form = [("include_data", "true".to_string())];
        let response: ApiResponse =
            serde_json::from_value(self.transport.post_form(&url, &form, Some(&current))?)?;

        if !response.success {
            return Err(ClassChartsError::Auth {
                message: response.error_message(),
            });
        }

        let session_id = session_id_from(&response)?;
        debug!(session = %redact(&session_id), "Session refreshed");
        self.token = Some(Token {
            session_id: session_id.clone(),
            issued_at: Instant::now(),
        });

        Ok(session_id)
    }

    /// Refreshes the token if it has outlived the refresh interval.
    pub fn ensure_fresh(&mut self) -> Result<()> {
        match &self.token {
            None => Err(ClassChartsError::Auth {
                message: "not logged in".to_string(),
            }),
            Some(token) if token.issued_at.elapsed() >= self.refresh_interval => {
                self.refresh().map(|_| ())
            }
            Some(_) => Ok(()),
        }
    }

    /// Reads `<resource>[/<student_id>]` with the given query parameters.
    ///
    /// A response whose `success` flag is false becomes
    /// [`ClassChartsError::Api`] even though the HTTP exchange succeeded.
    pub fn get(
        &mut self,
        resource: &str,
        student_id: Option<u64>,
        query: &[(&str, String)],
    ) -> Result<ApiResponse> {
        self.ensure_fresh()?;

        let url = self.resource_url(resource, student_id, query)?;
        debug!(resource, student_id = ?student_id, query = ?url.query(), "Fetching");

        let token = self.session_id().unwrap_or_default();
        let response: ApiResponse = serde_json::from_value(self.transport.get(&url, token)?)?;

        if !response.success {
            return Err(ClassChartsError::Api {
                endpoint: resource.to_string(),
                message: response.error_message(),
            });
        }

        Ok(response)
    }

    fn resource_url(
        &self,
        resource: &str,
        student_id: Option<u64>,
        query: &[(&str, String)],
    ) -> Result<Url> {
        let path = match student_id {
            Some(id) => format!("{resource}/{id}"),
            None => resource.to_string(),
        };
        let mut url = self.config.api_url.join(&path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

fn session_id_from(response: &ApiResponse) -> Result<String> {
    response
        .meta
        .get("session_id")
        .and_then(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ClassChartsError::data_shape("response carried no meta.session_id"))
}

/// First few characters of a token, for logs.
fn redact(token: &str) -> String {
    format!("{}...", token.chars().take(6).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_keeps_prefix_only() {
        assert_eq!(redact("abcdefghijkl"), "abcdef...");
        assert_eq!(redact("abc"), "abc...");
    }
}
