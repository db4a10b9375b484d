//! Account and endpoint configuration, sourced from the environment.

use crate::error::{ClassChartsError, Result};
use std::env;
use url::Url;

/// Public endpoint of the parent API.
pub const DEFAULT_API_URL: &str = "https://www.classcharts.com/apiv2parent";

/// Connection settings handed to a [`Session`](crate::client::Session).
#[derive(Clone)]
pub struct Config {
    pub api_url: Url,
    pub email: String,
    pub password: String,
}

impl Config {
    /// Builds a configuration from explicit values.
    pub fn new(api_url: &str, email: &str, password: &str) -> Result<Self> {
        let mut api_url = Url::parse(api_url).map_err(|e| ClassChartsError::Config {
            message: format!("api_url `{api_url}` is not a valid URL: {e}"),
        })?;

        // Url::join replaces the last segment unless the path ends in a slash
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        if email.trim().is_empty() {
            return Err(ClassChartsError::Config {
                message: "no account email configured (set `email`)".to_string(),
            });
        }
        if password.is_empty() {
            return Err(ClassChartsError::Config {
                message: "no account password configured (set `password`)".to_string(),
            });
        }

        Ok(Self {
            api_url,
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    }

    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// # Variables
    /// * `api_url` / `CLASSCHARTS_API_URL` - API root (defaults to [`DEFAULT_API_URL`])
    /// * `email` / `CLASSCHARTS_EMAIL` - account email
    /// * `password` / `CLASSCHARTS_PASSWORD` - account password
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = lookup(&["api_url", "CLASSCHARTS_API_URL"])
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let email = lookup(&["email", "CLASSCHARTS_EMAIL"]).unwrap_or_default();
        let password = lookup(&["password", "CLASSCHARTS_PASSWORD"]).unwrap_or_default();

        Self::new(&api_url, &email, &password)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url.as_str())
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Returns the first non-empty variable among `names`.
fn lookup(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
