use crate::Result;
use crate::config::Config;
use crate::error::MonitorError;
use serde_json::Value;
use url::Url;

const LOG_TARGET: &str = "    status";

/// Relative path of the status document on the admin endpoint.
const STATUS_PATH: &str = "amps.json";

/// HTTP client for one AMPS admin endpoint.
#[derive(Debug)]
pub struct StatusClient {
    client: reqwest::Client,
    endpoint: Url,
    username: String,
    password: Option<String>,
}

impl StatusClient {
    /// Build a client for the endpoint described by `config`, with the
    /// already-resolved basic-auth password.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::ConfigInvalid`] if the configured host and
    /// port do not form a valid URL.
    pub fn new(config: &Config, password: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("amps-monitor")
            .build()
            .expect("unable to create HTTP client");

        let endpoint = Url::parse(&config.base_url())
            .and_then(|base| base.join(STATUS_PATH))
            .map_err(|e| MonitorError::ConfigInvalid(format!("'{}' is not a valid endpoint: {e}", config.base_url())))?;

        Ok(Self {
            client,
            endpoint,
            username: config.username.clone(),
            password,
        })
    }

    /// Fetch and parse the status document.
    ///
    /// Returns `Ok(None)` when the endpoint answered but the body is not
    /// valid JSON; the poll then simply carries no data. Network failures,
    /// non-success statuses, and empty bodies are fatal to the cycle.
    pub async fn fetch_document(&self) -> Result<Option<Value>> {
        let url = self.endpoint.as_str();

        log::info!(target: LOG_TARGET, "Querying '{url}'");

        let mut request = self.client.get(self.endpoint.clone());
        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, self.password.as_deref());
        }

        let response = request.send().await.map_err(|source| MonitorError::Fetch {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::FetchStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| MonitorError::Fetch {
            url: url.to_string(),
            source,
        })?;

        if body.trim().is_empty() {
            return Err(MonitorError::EmptyBody { url: url.to_string() });
        }

        log::debug!(target: LOG_TARGET, "Received {} bytes from '{url}'", body.len());

        match serde_json::from_str(&body) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Response from '{url}' is not JSON, treating the poll as empty: {e}");
                Ok(None)
            }
        }
    }
}
