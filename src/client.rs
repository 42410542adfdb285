//! HTTP client for the TickTick Open API.

use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::projects::ProjectsService;
use crate::tasks::TasksService;
use crate::Error;

const BASE_URL: &str = "https://api.ticktick.com/open/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for interacting with the TickTick API.
///
/// The access token is fixed for the lifetime of the client; obtain a new
/// client after refreshing it. Cloning is cheap and clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct TickTickClient {
    http: reqwest::Client,
    base_url: String,
    authorization: HeaderValue,
}

impl TickTickClient {
    /// Create a new client with the given access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if the token cannot be sent in a header,
    /// or [`Error::Http`] if the HTTP client cannot be initialized.
    pub fn new(access_token: &str) -> Result<Self, Error> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|_| Error::InvalidToken)?;
        authorization.set_sensitive(true);

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            authorization,
        })
    }

    /// Replace the underlying HTTP client, e.g. to change timeouts or proxies.
    ///
    /// The replacement's own settings apply as given: the 30 second timeout
    /// set by [`TickTickClient::new`] is not carried over. The bearer token is
    /// still sent on every request.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set a custom base URL (primarily for testing).
    #[doc(hidden)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Project operations.
    pub fn projects(&self) -> ProjectsService<'_> {
        ProjectsService::new(self)
    }

    /// Task operations.
    pub fn tasks(&self) -> TasksService<'_> {
        TasksService::new(self)
    }

    /// Send an authenticated request and return the raw response body.
    ///
    /// The `path` is relative to the base URL (e.g. "/project"). A body, if
    /// given, is sent as JSON. Any status outside 2xx is returned as
    /// [`Error::Api`] carrying the unparsed response body.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>, Error>
    where
        B: Serialize + ?Sized,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(Error::Serialize)?;

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.authorization.clone());
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        tracing::debug!(%method, path, "sending request");

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(%method, path, status = status.as_u16(), "received response");

        if !status.is_success() {
            let message = String::from_utf8_lossy(&bytes).into_owned();
            tracing::warn!(%method, path, status = status.as_u16(), "request failed");
            return Err(ApiError::new(status.as_u16(), message).into());
        }

        Ok(bytes.to_vec())
    }

    /// Make a GET request and deserialize the response.
    pub async fn get<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let body = self.request::<()>(Method::GET, path, None).await?;
        decode(&body)
    }

    /// Make a POST request with a JSON body and deserialize the response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.request(Method::POST, path, Some(body)).await?;
        decode(&body)
    }

    /// Make a POST request without a body and return the raw response.
    pub async fn post_without_body(&self, path: &str) -> Result<Vec<u8>, Error> {
        self.request::<()>(Method::POST, path, None).await
    }

    /// Make a DELETE request. Any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.request::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Deserialize a successful response body.
pub(crate) fn decode<T>(body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(Error::Parse)
}
