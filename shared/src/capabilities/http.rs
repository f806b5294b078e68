use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

pub const MAX_URL_LENGTH: usize = 8192;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const MAX_TIMEOUT_MS: u64 = 300_000;
pub const MAX_HEADER_NAME_LENGTH: usize = 256;
pub const MAX_HEADER_VALUE_LENGTH: usize = 8192;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeaders {
    headers: Vec<(String, String)>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), HttpError> {
        let name = name.into();
        let value = value.into();

        if name.is_empty() || name.len() > MAX_HEADER_NAME_LENGTH {
            return Err(HttpError::InvalidHeader {
                name,
                reason: format!("name must be 1..={MAX_HEADER_NAME_LENGTH} bytes"),
            });
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(HttpError::InvalidHeader {
                name,
                reason: "name contains invalid characters".to_string(),
            });
        }
        if value.len() > MAX_HEADER_VALUE_LENGTH || value.contains(['\r', '\n']) {
            return Err(HttpError::InvalidHeader {
                name,
                reason: "value is too long or contains line breaks".to_string(),
            });
        }

        self.headers.push((name, value));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// A request the shell should perform. The core only ever reads.
///
/// `url` is either root-relative (`/api/...`, resolved by the shell against
/// the page origin) or an absolute `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: HttpHeaders,
    timeout_ms: u64,
    request_id: String,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Result<Self, HttpError> {
        let url = url.into();
        validate_url(&url)?;

        let mut headers = HttpHeaders::new();
        headers.insert("Accept", "application/json")?;

        Ok(Self {
            method: HttpMethod::Get,
            url,
            headers,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            request_id: Uuid::new_v4().to_string(),
        })
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, HttpError> {
        if timeout_ms == 0 || timeout_ms > MAX_TIMEOUT_MS {
            return Err(HttpError::InvalidRequest {
                reason: format!("timeout must be 1..={MAX_TIMEOUT_MS}ms, got {timeout_ms}ms"),
            });
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Operation for HttpRequest {
    type Output = HttpResult;
}

fn validate_url(url: &str) -> Result<(), HttpError> {
    if url.trim().is_empty() {
        return Err(HttpError::InvalidUrl {
            url: String::new(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(HttpError::InvalidUrl {
            url: truncate_url(url),
            reason: format!("URL exceeds maximum length of {MAX_URL_LENGTH} bytes"),
        });
    }

    if url.starts_with('/') {
        if url.starts_with("//") {
            return Err(HttpError::InvalidUrl {
                url: truncate_url(url),
                reason: "scheme-relative URLs are not allowed".to_string(),
            });
        }
        return Ok(());
    }

    let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl {
        url: truncate_url(url),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(()),
        "http" | "https" => Err(HttpError::InvalidUrl {
            url: truncate_url(url),
            reason: "URL must have a host".to_string(),
        }),
        scheme => Err(HttpError::InvalidUrl {
            url: truncate_url(url),
            reason: format!("invalid scheme '{scheme}', only 'http' and 'https' are allowed"),
        }),
    }
}

fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(100) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}

/// Failures the shell reports when no HTTP response was obtained at all.
/// A response with an error status is still an `Ok(HttpResponse)`.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum HttpError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("connection failed: {message}")]
    Connection { message: String, request_id: String },

    #[error("timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64, request_id: String },
}

impl HttpError {
    pub fn request_id(&self) -> Option<&str> {
        match self {
            HttpError::Connection { request_id, .. } | HttpError::Timeout { request_id, .. } => {
                Some(request_id)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    status: u16,
    headers: HttpHeaders,
    body: Vec<u8>,
    request_id: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>, request_id: impl Into<String>) -> Self {
        Self {
            status,
            headers: HttpHeaders::new(),
            body,
            request_id: request_id.into(),
        }
    }

    #[cfg(test)]
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, HttpError> {
        self.headers.insert(name, value)?;
        Ok(self)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

pub type HttpResult = Result<HttpResponse, HttpError>;

/// Read-only HTTP capability. The shell executes each [`HttpRequest`] and
/// answers with an [`HttpResult`].
#[derive(Capability)]
pub struct Http<Ev> {
    context: CapabilityContext<HttpRequest, Ev>,
}

impl<Ev> Http<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<HttpRequest, Ev>) -> Self {
        Self { context }
    }

    pub fn send<F>(&self, request: HttpRequest, make_event: F)
    where
        F: FnOnce(HttpResult) -> Ev + Send + 'static,
    {
        tracing::debug!(
            method = request.method().as_str(),
            url = request.url(),
            request_id = request.request_id(),
            "http request"
        );

        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(request).await;
            ctx.update_app(make_event(result));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation_empty() {
        assert!(matches!(
            HttpRequest::get(""),
            Err(HttpError::InvalidUrl { .. })
        ));
        assert!(HttpRequest::get("   ").is_err());
    }

    #[test]
    fn test_url_validation_relative_path() {
        let request = HttpRequest::get("/api/attractions?page=0").unwrap();
        assert_eq!(request.url(), "/api/attractions?page=0");
        assert_eq!(request.method(), HttpMethod::Get);
        assert_eq!(request.headers().get("accept"), Some("application/json"));
    }

    #[test]
    fn test_url_validation_scheme_relative_rejected() {
        assert!(HttpRequest::get("//evil.example.com/api").is_err());
    }

    #[test]
    fn test_url_validation_invalid_scheme() {
        assert!(HttpRequest::get("ftp://example.com/api").is_err());
        assert!(HttpRequest::get("javascript:alert(1)").is_err());
        assert!(HttpRequest::get("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_url_validation_absolute() {
        assert!(HttpRequest::get("https://trip.example.com/api/categories").is_ok());
        assert!(HttpRequest::get("http://localhost:8000/api/categories").is_ok());
    }

    #[test]
    fn test_url_validation_too_long() {
        let long_url = format!("/api/attractions?keyword={}", "a".repeat(MAX_URL_LENGTH));
        let result = HttpRequest::get(long_url);
        assert!(matches!(result, Err(HttpError::InvalidUrl { .. })));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = HttpRequest::get("/api/mrts").unwrap();
        let b = HttpRequest::get("/api/mrts").unwrap();
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn test_timeout_bounds() {
        let request = HttpRequest::get("/api/mrts").unwrap();
        assert_eq!(request.timeout_ms(), DEFAULT_TIMEOUT_MS);
        assert!(request.clone().with_timeout_ms(0).is_err());
        assert!(request.clone().with_timeout_ms(MAX_TIMEOUT_MS + 1).is_err());
        assert_eq!(request.with_timeout_ms(5_000).unwrap().timeout_ms(), 5_000);
    }

    #[test]
    fn test_header_injection_rejected() {
        let mut headers = HttpHeaders::new();
        assert!(headers.insert("X-Trace", "a\r\nSet-Cookie: x").is_err());
        assert!(headers.insert("Bad Header", "v").is_err());
        assert!(headers.insert("X-Trace", "abc").is_ok());
        assert_eq!(headers.get("x-trace"), Some("abc"));
    }

    #[test]
    fn test_response_status_classes() {
        assert!(HttpResponse::new(200, Vec::new(), "r1").is_success());
        assert!(HttpResponse::new(204, Vec::new(), "r1").is_success());
        assert!(!HttpResponse::new(400, Vec::new(), "r1").is_success());
        assert!(!HttpResponse::new(500, Vec::new(), "r1").is_success());
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, Vec::new(), "r1")
            .with_header("Content-Type", "application/json")
            .unwrap();
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_error_request_id() {
        let error = HttpError::Timeout {
            timeout_ms: 30_000,
            request_id: "r7".into(),
        };
        assert_eq!(error.request_id(), Some("r7"));
        assert_eq!(error.to_string(), "timeout after 30000ms");

        let error = HttpError::InvalidRequest {
            reason: "nope".into(),
        };
        assert_eq!(error.request_id(), None);
    }
}
