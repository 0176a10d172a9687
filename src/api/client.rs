//! Resource-scoped HTTP client
//!
//! One `ResourceClient` per backend resource: it pins the base URL and the
//! resource name and exposes the verb set the services forward to. Every
//! request carries `Authorization: Bearer <token>` with whatever access
//! token the session store currently holds; an absent or expired token is
//! not repaired here, the request simply fails with whatever the server
//! answers. No retry and no request timeout are configured, matching the
//! behavior the dashboard expects (a hung request stays loading until the
//! user gives up).

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ApiError;
use crate::session::SessionStore;

/// HTTP client fixed to one resource under the API base URL
#[derive(Debug, Clone)]
pub struct ResourceClient {
    client: Client,
    base_url: String,
    resource: String,
    session: SessionStore,
}

impl ResourceClient {
    /// Create a client for `base_url + resource`.
    pub fn new(base_url: &str, resource: &str, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
            resource: resource.to_string(),
            session,
        }
    }

    /// Full URL for a relative path: `{base}{resource}/{relative}`.
    fn url(&self, relative: &str) -> String {
        format!("{}{}/{}", self.base_url, self.resource, relative)
    }

    /// Attach the bearer token currently stored for this session. With no
    /// session the request goes out unauthenticated and the server decides.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(ApiError::from_transport)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Status { status, message })
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, relative: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.client.get(self.url(relative)));
        let response = self.send(request).await?;
        response.json().await.map_err(ApiError::Request)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        relative: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.client.post(self.url(relative)).json(body));
        let response = self.send(request).await?;
        response.json().await.map_err(ApiError::Request)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        relative: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.client.put(self.url(relative)).json(body));
        let response = self.send(request).await?;
        response.json().await.map_err(ApiError::Request)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        relative: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.client.patch(self.url(relative)).json(body));
        let response = self.send(request).await?;
        response.json().await.map_err(ApiError::Request)
    }

    pub async fn delete(&self, relative: &str) -> Result<(), ApiError> {
        let request = self.authorize(self.client.delete(self.url(relative)));
        self.send(request).await?;
        Ok(())
    }

    /// Download variant: returns the raw body bytes.
    pub async fn get_file(&self, relative: &str) -> Result<Vec<u8>, ApiError> {
        let request = self.authorize(self.client.get(self.url(relative)));
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(ApiError::Request)?;
        Ok(bytes.to_vec())
    }
}
