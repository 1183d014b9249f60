//! HTTP transport for the order service's single endpoint.
//!
//! Transport failures never surface as Rust errors to callers. They are
//! turned into error records of the same shape the service uses so that the
//! validators treat them like any other error response.

mod arguments;

pub use {arguments::Arguments, reqwest::StatusCode};
use {
    model::{ErrorResponse, Request},
    order_validation::is_error_response,
    reqwest::Client,
    serde::Serialize,
    serde_json::Value,
    std::time::Duration,
    url::Url,
};

const USER_AGENT: &str = "mos-conformance/0.1.0";

pub const ORDERS_ENDPOINT: &str = "/api/orders";

/// Error code of the record returned when a response body is not JSON.
pub const INVALID_JSON_FORMAT: &str = "INVALID_JSON_FORMAT";
/// Error code of the record returned when no response could be obtained.
pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to the order service failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to read the order service response: {0}")]
    ReadBody(#[source] reqwest::Error),
}

/// A decoded response. `status` is `None` for synthesized transport errors.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: Option<StatusCode>,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        is_error_response(&self.body)
    }

    fn synthesized(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: ErrorResponse::new(error_code, message).to_json(),
        }
    }
}

pub struct OrdersApi {
    url: Url,
    client: Client,
}

impl OrdersApi {
    /// base_url: protocol and host of the service, optionally followed by a
    /// path prefix. example: `http://localhost:8080`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BuildError> {
        let url = Url::parse(&format!(
            "{}{ORDERS_ENDPOINT}",
            base_url.trim_end_matches('/')
        ))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { url, client })
    }

    pub fn from_arguments(args: &Arguments) -> Result<Self, BuildError> {
        Self::new(&args.base_url, args.http_timeout)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends a request in the envelope its operation requires.
    pub async fn send(&self, request: &Request) -> ApiResponse {
        tracing::debug!(method = request.method(), "sending request");
        self.post_orders(&request.envelope()).await
    }

    /// Posts an arbitrary JSON payload. Used directly for deliberately
    /// malformed requests.
    pub async fn post_orders<T>(&self, payload: &T) -> ApiResponse
    where
        T: Serialize + ?Sized,
    {
        match self.try_post(payload).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(?err, url = %self.url, "order service unreachable");
                ApiResponse::synthesized(TRANSPORT_ERROR, err.to_string())
            }
        }
    }

    async fn try_post<T>(&self, payload: &T) -> Result<ApiResponse, TransportError>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(TransportError::Request)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(TransportError::ReadBody)?;
        tracing::debug!(%status, len = bytes.len(), "received response");

        match serde_json::from_slice(&bytes) {
            Ok(body) => Ok(ApiResponse {
                status: Some(status),
                body,
            }),
            Err(err) => {
                tracing::debug!(?err, "response is not valid JSON");
                Ok(ApiResponse {
                    status: Some(status),
                    ..ApiResponse::synthesized(INVALID_JSON_FORMAT, "Response is not valid JSON.")
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn api(base_url: &str) -> OrdersApi {
        OrdersApi::new(base_url, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        assert_eq!(
            api("http://localhost:8080").url().as_str(),
            "http://localhost:8080/api/orders"
        );
        assert_eq!(
            api("http://localhost:8080///").url().as_str(),
            "http://localhost:8080/api/orders"
        );
    }

    #[test]
    fn path_prefix_is_kept() {
        assert_eq!(
            api("https://example.com/mos/").url().as_str(),
            "https://example.com/mos/api/orders"
        );
    }

    #[test]
    fn invalid_base_url() {
        assert!(matches!(
            OrdersApi::new("not a url", Duration::from_secs(1)),
            Err(BuildError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn synthesized_records_are_errors() {
        let response = ApiResponse::synthesized(TRANSPORT_ERROR, "connection refused");
        assert!(response.is_error());
        assert_eq!(response.status, None);
        assert_eq!(
            response.body,
            json!({"errorCode": "TRANSPORT_ERROR", "message": "connection refused"})
        );
    }
}
