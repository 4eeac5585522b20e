use async_trait::async_trait;
use serde_json::Value;

use crate::domain::gw2::errors::Gw2Error;
use crate::domain::gw2::models::UpstreamRequest;

/// Transport to the upstream game-data API.
#[async_trait]
pub trait Gw2Client: Send + Sync + 'static {
    /// Issue a GET and decode the JSON body.
    ///
    /// # Errors
    /// * `Transport` / `Timeout` - Request could not be completed
    /// * `UpstreamStatus` - Non-success status code
    /// * `InvalidBody` - Body is not JSON
    async fn get_json(&self, request: &UpstreamRequest) -> Result<Value, Gw2Error>;
}

#[async_trait]
pub trait Gw2ServicePort: Send + Sync + 'static {
    /// Forward a request upstream and return its JSON body verbatim.
    async fn fetch(&self, request: UpstreamRequest) -> Result<Value, Gw2Error>;
}
