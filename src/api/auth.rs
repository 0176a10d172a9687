//! Authentication service
//!
//! `POST {base}login` with the user's credentials. This is the one call
//! that goes out unauthenticated. The returned tokens are opaque; the
//! client stores and forwards them without inspecting them.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::ApiError;

/// Credentials the login form collects
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Token pair issued by the API, wire casing preserved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "Token")]
    pub token: String,

    #[serde(rename = "RefreshToken")]
    pub refresh_token: String,
}

/// Service for the login endpoint
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Client,
    base_url: String,
}

impl AuthService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Exchange credentials for a token pair.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(format!("{}login", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if response.status().is_success() {
            response.json().await.map_err(ApiError::Request)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Status { status, message })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_shape() {
        let body = LoginRequest {
            login: "voce@exemplo.com".into(),
            password: "secret".into(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["login"], "voce@exemplo.com");
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn test_login_response_wire_casing() {
        let json = r#"{"Token": "abc", "RefreshToken": "def"}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.refresh_token, "def");
    }
}
