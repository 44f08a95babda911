//! Live adapter for the `BreachLookup` port using the Have I Been Pwned v3 API.

use reqwest::{Client, StatusCode, Url};

use super::status_error;
use crate::error::PortError;
use crate::model::BreachRecord;
use crate::ports::{BreachLookup, PortFuture};

const HIBP_API_URL: &str = "https://haveibeenpwned.com/api/v3";
const USER_AGENT: &str = concat!("breachscan/", env!("CARGO_PKG_VERSION"));

/// Live breach lookup against Have I Been Pwned.
pub struct LiveBreachLookup {
    client: Client,
    base_url: String,
}

impl LiveBreachLookup {
    /// Creates a lookup client for the public API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(HIBP_API_URL)
    }

    /// Creates a lookup client for another deployment of the API.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self { client: Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Builds `<base>/breachedaccount/<email>` with the email path-encoded.
    fn account_url(&self, email: &str) -> Result<Url, PortError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| PortError::Network(format!("invalid breach API url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| PortError::Network(format!("breach API url {} cannot take a path", self.base_url)))?
            .push("breachedaccount")
            .push(email);
        url.query_pairs_mut().append_pair("truncateResponse", "false");
        Ok(url)
    }
}

impl Default for LiveBreachLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl BreachLookup for LiveBreachLookup {
    fn check_breaches(&self, email: &str, api_key: &str) -> PortFuture<'_, Vec<BreachRecord>> {
        let url = self.account_url(email);
        let api_key = api_key.to_string();

        Box::pin(async move {
            let url = url?;
            let response = self
                .client
                .get(url)
                .header("hibp-api-key", &api_key)
                .header(reqwest::header::USER_AGENT, USER_AGENT)
                .send()
                .await
                .map_err(|e| PortError::Network(format!("breach API request failed: {e}")))?;

            let status = response.status();
            // The account appears in no breach.
            if status == StatusCode::NOT_FOUND {
                return Ok(Vec::new());
            }
            let body = response
                .text()
                .await
                .map_err(|e| PortError::Network(format!("failed to read breach API response: {e}")))?;
            if !status.is_success() {
                return Err(status_error(status, &body, "breach API"));
            }
            serde_json::from_str(&body)
                .map_err(|e| PortError::Malformed(format!("failed to parse breach API response: {e}")))
        })
    }
}
