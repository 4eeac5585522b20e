use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Url;
use serde_json::Value;

use crate::domain::gw2::errors::Gw2Error;
use crate::domain::gw2::models::UpstreamRequest;
use crate::domain::gw2::ports::Gw2Client;

/// HTTP client for the game-data API.
///
/// Requests are built relative to `base_url`; the caller's API key travels as
/// the `access_token` query parameter.
#[derive(Debug, Clone)]
pub struct ReqwestGw2Client {
    client: Client,
    base_url: Url,
}

impl ReqwestGw2Client {
    /// Create a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// * `Configuration` - Base URL cannot be parsed or cannot carry a path,
    ///   or the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Gw2Error> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Gw2Error::Configuration(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Gw2Error::Configuration(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Gw2Error::Configuration(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn url_for(&self, request: &UpstreamRequest) -> Result<Url, Gw2Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Gw2Error::Configuration(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(request.segments());

        if !request.query_pairs().is_empty() || request.key().is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query_pairs() {
                pairs.append_pair(key, value);
            }
            if let Some(key) = request.key() {
                pairs.append_pair("access_token", key.expose());
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl Gw2Client for ReqwestGw2Client {
    async fn get_json(&self, request: &UpstreamRequest) -> Result<Value, Gw2Error> {
        let path = request.path();
        let url = self.url_for(request)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Gw2Error::Timeout { path: path.clone() }
            } else {
                Gw2Error::Transport {
                    path: path.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Gw2Error::UpstreamStatus {
                status: status.as_u16(),
                path,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Gw2Error::InvalidBody {
                path,
                message: e.to_string(),
            })
    }
}
