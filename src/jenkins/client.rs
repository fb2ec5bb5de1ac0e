use crate::job_error::TransportError;

#[derive(Debug, Clone, Copy)]
pub enum RequestBody<'a> {
    Empty,
    /// `application/x-www-form-urlencoded` pairs.
    Form(&'a [(String, String)]),
    /// Raw xml sent as `application/xml`.
    Xml(&'a str),
}

impl RequestBody<'_> {
    pub fn describe(&self) -> String {
        match self {
            RequestBody::Empty => "no body".to_string(),
            RequestBody::Form(pairs) => format!("{} form field(s)", pairs.len()),
            RequestBody::Xml(xml) => format!("{} bytes of xml", xml.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    Redirection,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn class(&self) -> ResponseClass {
        match self.status {
            200..=299 => ResponseClass::Success,
            300..=399 => ResponseClass::Redirection,
            _ => ResponseClass::Other,
        }
    }

    /// The server took the request: a success or a redirect.
    pub fn is_accepted(&self) -> bool {
        matches!(
            self.class(),
            ResponseClass::Success | ResponseClass::Redirection
        )
    }
}

/// # Jenkins Transport
///
/// Sends one request to the server and hands back the status and body.
/// Redirects must not be followed, callers classify them.
#[async_trait::async_trait]
pub trait JenkinsTransport: Send + Sync {
    async fn request(
        &self,
        method: &str,
        endpoint: &str,
        body: RequestBody<'_>,
    ) -> Result<RawResponse, TransportError>;
}

#[async_trait::async_trait]
impl<T: JenkinsTransport + ?Sized> JenkinsTransport for std::sync::Arc<T> {
    async fn request(
        &self,
        method: &str,
        endpoint: &str,
        body: RequestBody<'_>,
    ) -> Result<RawResponse, TransportError> {
        (**self).request(method, endpoint, body).await
    }
}
