//! Native HTTP client implementation using reqwest

use reqwest::{Client, StatusCode};
use shared::api::{
    endpoints, ApiClientConfig, ApiError, DeleteSessionResponse, LogoutSessionResponse,
    SessionsApi, SessionsResponse,
};
use shared::{Session, SessionId};

/// Native API client using reqwest
pub struct NativeApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl NativeApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> anyhow::Result<Self> {
        let config = if let Some(t) = token {
            ApiClientConfig::new(base_url).with_token(t)
        } else {
            ApiClientConfig::new(base_url)
        };

        Ok(Self {
            client: Client::builder().cookie_store(true).build()?,
            config,
        })
    }

    fn add_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.config.auth_token {
            req.header("Authorization", format!("Bearer {}", token))
        } else {
            req
        }
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self
            .add_auth(req)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "sessions API response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth("Unauthorized".to_string()));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound("Resource not found".to_string()));
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl SessionsApi for NativeApiClient {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let url = self.config.url(endpoints::SESSIONS);
        let body: SessionsResponse = self.send(self.client.get(&url)).await?;
        Ok(body.sessions)
    }

    async fn delete_session(&self, id: &SessionId) -> Result<u64, ApiError> {
        let url = self.config.url(&endpoints::session(id.as_str()));
        let body: DeleteSessionResponse = self.send(self.client.delete(&url)).await?;
        Ok(body.deleted)
    }

    async fn logout_session(&self, id: &SessionId) -> Result<bool, ApiError> {
        let url = self.config.url(&endpoints::session_logout(id.as_str()));
        let body: LogoutSessionResponse = self.send(self.client.post(&url)).await?;
        Ok(body.success)
    }
}
