//! Browser HTTP client implementation using gloo-net

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::api::{
    endpoints, ApiClientConfig, ApiError, DeleteSessionResponse, LogoutSessionResponse,
    SessionsApi, SessionsResponse,
};
use shared::{Session, SessionId};

use crate::utils;

/// Sessions API client for the page's own origin; auth rides on cookies
#[derive(Debug, Clone)]
pub struct WebApiClient {
    config: ApiClientConfig,
}

impl Default for WebApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WebApiClient {
    pub fn new() -> Self {
        Self {
            config: ApiClientConfig::new(utils::get_base_url()),
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        match response.status() {
            401 => return Err(ApiError::Auth("Unauthorized".to_string())),
            404 => return Err(ApiError::NotFound("Resource not found".to_string())),
            _ => {}
        }

        if !response.ok() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Server { status, message });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl SessionsApi for WebApiClient {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let url = self.config.url(endpoints::SESSIONS);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body: SessionsResponse = Self::handle_response(response).await?;
        Ok(body.sessions)
    }

    async fn delete_session(&self, id: &SessionId) -> Result<u64, ApiError> {
        let url = self.config.url(&endpoints::session(id.as_str()));
        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body: DeleteSessionResponse = Self::handle_response(response).await?;
        Ok(body.deleted)
    }

    async fn logout_session(&self, id: &SessionId) -> Result<bool, ApiError> {
        let url = self.config.url(&endpoints::session_logout(id.as_str()));
        let response = Request::post(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body: LogoutSessionResponse = Self::handle_response(response).await?;
        Ok(body.success)
    }
}
