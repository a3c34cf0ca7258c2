//! Cycle API client.
//!
//! Low-level dispatcher that handles authentication, query encoding and
//! JSON:API (de)serialization. Resource-specific operations are implemented
//! via traits on resource types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{CycleError, Result};
use crate::jsonapi::{ErrorDetail, ErrorDocument};
use crate::query::QueryParams;
use crate::response::ApiResponse;

const DEFAULT_API_URL: &str = "https://api.cycle.io/v1";
const USER_AGENT: &str = concat!("cycleapi/", env!("CARGO_PKG_VERSION"));
const TEAM_HEADER: &str = "X-Team-ID";

/// Request dispatcher for the Cycle API.
///
/// Each verb is generic over the expected response document and returns an
/// [`ApiResponse`]: `Success` for 2xx responses, `Failure` with the
/// backend's error list otherwise. Network failures are returned as
/// `Err(CycleError::HttpError)`; nothing is retried.
///
/// The dispatcher never caches. Resource modules consult
/// [`ResponseCache`](crate::ResponseCache) themselves.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use cycleapi::CycleClient;
///
/// # async fn example() -> cycleapi::Result<()> {
/// // Create from environment variables
/// let client = CycleClient::from_env()?;
///
/// // Or configure manually
/// let client = CycleClient::new("your-api-key", "https://api.cycle.io/v1")?
///     .with_team("team-id");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CycleClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    team: Option<String>,
}

impl std::fmt::Debug for CycleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleClient")
            .field("base_url", &self.base_url.as_str())
            .field("team", &self.team)
            .finish_non_exhaustive()
    }
}

impl CycleClient {
    /// Create a client from environment variables.
    ///
    /// Uses `CYCLE_API_KEY` for authentication, optionally `CYCLE_API_URL`
    /// for the base URL (defaults to `https://api.cycle.io/v1`) and
    /// `CYCLE_TEAM_ID` for the team scope.
    ///
    /// # Errors
    ///
    /// Returns an error if `CYCLE_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("CYCLE_API_KEY").map_err(|_| {
            CycleError::ConfigMissing("CYCLE_API_KEY environment variable not set".to_string())
        })?;

        let base_url = env::var("CYCLE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let client = Self::new(&token, &base_url)?;
        Ok(match env::var("CYCLE_TEAM_ID") {
            Ok(team) if !team.is_empty() => client.with_team(team),
            _ => client,
        })
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(CycleError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
            team: None,
        })
    }

    /// Scope every request to a team.
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// The team scope, if any. Also used as the cache scope.
    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self, query))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<T>> {
        self.dispatch(Method::GET, endpoint, None::<&()>, query).await
    }

    /// Make a POST request with a JSON body.
    #[tracing::instrument(skip(self, body, query))]
    pub async fn post<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.dispatch(Method::POST, endpoint, Some(body), query).await
    }

    /// Make a PATCH request with a JSON body.
    #[tracing::instrument(skip(self, body, query))]
    pub async fn patch<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.dispatch(Method::PATCH, endpoint, Some(body), query).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self, query))]
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<T>> {
        self.dispatch(Method::DELETE, endpoint, None::<&()>, query).await
    }

    /// Resolve an endpoint against the base URL and attach the query.
    fn endpoint_url(&self, endpoint: &str, query: Option<&QueryParams>) -> Result<Url> {
        let mut url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.set_query(Some(&query.to_query_string()));
        }
        Ok(url)
    }

    async fn dispatch<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint, query)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url).bearer_auth(&self.token);
        if let Some(team) = &self.team {
            request = request.header(TEAM_HEADER, team);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(CycleError::HttpError)?;
        Self::read_response(response).await
    }

    /// Parse a response into a success document or an error list.
    async fn read_response<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>> {
        let status = response.status();
        let body = response.text().await.map_err(CycleError::HttpError)?;

        if status.is_success() {
            // 204 and other empty bodies parse as `null`
            let document = if body.trim().is_empty() {
                serde_json::from_value(Value::Null)?
            } else {
                serde_json::from_str(&body)?
            };
            return Ok(ApiResponse::Success { document });
        }

        let errors = Self::extract_errors(status, &body);
        tracing::debug!(
            status = status.as_u16(),
            errors = errors.len(),
            "request failed"
        );
        Ok(ApiResponse::Failure { errors })
    }

    /// Error details from a failed response.
    ///
    /// Falls back to a single error describing the status when the body is
    /// not an error document, so a failure is never empty.
    fn extract_errors(status: StatusCode, body: &str) -> Vec<ErrorDetail> {
        match serde_json::from_str::<ErrorDocument>(body) {
            Ok(document) if !document.errors.is_empty() => document.errors,
            _ => vec![ErrorDetail::from_status(status, body)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = CycleClient::new("test-token", "https://api.cycle.io/v1").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("CycleClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = CycleClient::new("token", "https://api.cycle.io/v1").unwrap();
        let client2 = CycleClient::new("token", "https://api.cycle.io/v1/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = CycleClient::new("token", "https://api.cycle.io/v1").unwrap();
        let query = QueryParams::new().set("b", "2").set("a", "1");

        let url = client.endpoint_url("/containers/c1/tasks", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "https://api.cycle.io/v1/containers/c1/tasks?a=1&b=2");

        let url = client.endpoint_url("containers", Some(&QueryParams::new())).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_extract_errors_falls_back_to_status() {
        let errors = CycleClient::extract_errors(StatusCode::SERVICE_UNAVAILABLE, "upstream down");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].status_code(), Some(503));
        assert_eq!(errors[0].detail.as_deref(), Some("upstream down"));

        let errors = CycleClient::extract_errors(StatusCode::BAD_REQUEST, r#"{"errors":[]}"#);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_with_team() {
        let client = CycleClient::new("token", "https://api.cycle.io/v1")
            .unwrap()
            .with_team("t1");
        assert_eq!(client.team(), Some("t1"));
    }
}
