//! OAuth2 authorization code flow for TickTick.
//!
//! The caller sends the user to [`OAuthConfig::authorization_url`], receives
//! the `code` on its redirect URI, and trades it for an access token with
//! [`OAuthConfig::exchange_code`]. Tokens are not stored or refreshed
//! automatically.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::Error;

/// Authorization endpoint.
pub const AUTH_URL: &str = "https://ticktick.com/oauth/authorize";
/// Token endpoint.
pub const TOKEN_URL: &str = "https://ticktick.com/oauth/token";

/// Response of the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for [`TickTickClient::new`](crate::TickTickClient::new).
    pub access_token: String,

    /// Usually `bearer`.
    #[serde(default)]
    pub token_type: String,

    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Space-delimited granted scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// OAuth2 client registration.
#[derive(Clone)]
pub struct OAuthConfig {
    /// Client ID issued when registering the app.
    pub client_id: String,
    /// Client secret issued alongside the ID. Never logged.
    pub client_secret: String,
    /// Where the service redirects with the authorization `code`; must match
    /// the registered URI.
    pub redirect_uri: String,
    /// Space-delimited permissions, e.g. `tasks:read tasks:write`.
    pub scope: String,
    auth_url: String,
    token_url: String,
    http: reqwest::Client,
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl OAuthConfig {
    /// Create a configuration against the TickTick OAuth endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: scope.into(),
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Point the flow at different endpoints (primarily for testing).
    #[doc(hidden)]
    pub fn with_endpoints(mut self, auth_url: &str, token_url: &str) -> Self {
        self.auth_url = auth_url.to_string();
        self.token_url = token_url.to_string();
        self
    }

    /// Build the URL the user visits to grant access.
    ///
    /// `state` is echoed back on the redirect and should be checked by the
    /// caller.
    pub fn authorization_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", self.scope.as_str()),
            ("state", state),
        ];

        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&params)
            .finish();
        format!("{}?{}", self.auth_url, query)
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] if the token endpoint cannot be reached, [`Error::Token`]
    /// if it answers with a non-200 status or an unexpected body.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("scope", self.scope.as_str()),
        ];

        self.request_token("authorization_code", &form).await
    }

    /// Obtain a new access token using a refresh token.
    ///
    /// # Errors
    ///
    /// Same as [`OAuthConfig::exchange_code`].
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, Error> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        self.request_token("refresh_token", &form).await
    }

    /// POST `params` plus `grant_type` to the token endpoint.
    async fn request_token(
        &self,
        grant_type: &str,
        params: &[(&str, &str)],
    ) -> Result<TokenResponse, Error> {
        tracing::debug!(grant_type, "requesting token");

        let mut form = Vec::with_capacity(params.len() + 1);
        form.push(("grant_type", grant_type));
        form.extend_from_slice(params);

        let response = self.http.post(&self.token_url).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            tracing::warn!(grant_type, status = status.as_u16(), "token request failed");
            return Err(TokenError::new(format!(
                "token request failed with status {}: {}",
                status.as_u16(),
                body
            ))
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            TokenError::new(format!("failed to parse token response: {}", e)).into()
        })
    }
}
