//! Request-scoped context fields.

use crate::field::Field;

/// Field key for the requesting host (hostname / IP).
pub const KEY_REQUEST_HOST: &str = "request_host";
/// Field key for the requested endpoint path (`/v1/endpoint`).
pub const KEY_ENDPOINT: &str = "endpoint";
/// Field key for the request method (GET / POST / ...).
pub const KEY_REQUEST_METHOD: &str = "request_method";

/// Ambient metadata for one request's lifetime: host, endpoint path and
/// method. Immutable once derived; each `with_*` call consumes the scope
/// and returns a new one. Empty strings normalize to absent so emitted
/// records never carry empty context values.
///
/// A scope is created fresh per request and never shared across
/// requests. Unrelated request-scoped values belong in the request's
/// typed extensions, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestScope {
    host: Option<String>,
    endpoint: Option<String>,
    method: Option<String>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = non_empty(host.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = non_empty(endpoint.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = non_empty(method.into());
        self
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// The present context fields in the fixed order host, endpoint,
    /// method. Absent values are skipped entirely. Every emit call
    /// appends these after its call-site fields.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::with_capacity(3);
        if let Some(host) = &self.host {
            fields.push(Field::str(KEY_REQUEST_HOST, host.clone()));
        }
        if let Some(endpoint) = &self.endpoint {
            fields.push(Field::str(KEY_ENDPOINT, endpoint.clone()));
        }
        if let Some(method) = &self.method {
            fields.push(Field::str(KEY_REQUEST_METHOD, method.clone()));
        }
        fields
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
