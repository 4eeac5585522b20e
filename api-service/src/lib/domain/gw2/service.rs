use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::gw2::errors::Gw2Error;
use crate::domain::gw2::models::UpstreamRequest;
use crate::domain::gw2::ports::Gw2Client;
use crate::domain::gw2::ports::Gw2ServicePort;

pub struct Gw2Service<C>
where
    C: Gw2Client,
{
    client: Arc<C>,
}

impl<C> Gw2Service<C>
where
    C: Gw2Client,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C> Gw2ServicePort for Gw2Service<C>
where
    C: Gw2Client,
{
    async fn fetch(&self, request: UpstreamRequest) -> Result<Value, Gw2Error> {
        let path = request.path();
        tracing::debug!(
            path = %path,
            keyed = request.key().is_some(),
            "Forwarding game-data request"
        );

        self.client.get_json(&request).await.inspect_err(|e| {
            tracing::error!(path = %path, error = %e, "Game-data request failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;
    use serde_json::json;

    use super::*;
    use crate::domain::gw2::models::ApiKey;

    mock! {
        pub TestGw2Client {}

        #[async_trait]
        impl Gw2Client for TestGw2Client {
            async fn get_json(&self, request: &UpstreamRequest) -> Result<Value, Gw2Error>;
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_body_verbatim() {
        let mut client = MockTestGw2Client::new();
        client
            .expect_get_json()
            .withf(|request| request.path() == "build")
            .times(1)
            .returning(|_| Ok(json!({ "id": 115267 })));

        let service = Gw2Service::new(Arc::new(client));
        let body = service.fetch(UpstreamRequest::new("build")).await.unwrap();

        assert_eq!(body, json!({ "id": 115267 }));
    }

    #[tokio::test]
    async fn test_fetch_passes_api_key_through() {
        let mut client = MockTestGw2Client::new();
        client
            .expect_get_json()
            .withf(|request| request.key().map(ApiKey::expose) == Some("KEY"))
            .times(1)
            .returning(|_| Ok(json!({ "name": "Account.1234" })));

        let service = Gw2Service::new(Arc::new(client));
        let request =
            UpstreamRequest::new("account").api_key(ApiKey::new("KEY".to_string()).unwrap());

        assert!(service.fetch(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_propagates_upstream_failure() {
        let mut client = MockTestGw2Client::new();
        client.expect_get_json().times(1).returning(|request| {
            Err(Gw2Error::UpstreamStatus {
                status: 503,
                path: request.path(),
            })
        });

        let service = Gw2Service::new(Arc::new(client));
        let result = service.fetch(UpstreamRequest::new("worlds")).await;

        assert!(matches!(
            result,
            Err(Gw2Error::UpstreamStatus { status: 503, .. })
        ));
    }
}
