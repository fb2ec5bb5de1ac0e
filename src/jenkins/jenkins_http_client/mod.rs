use crate::constant::log::*;
use crate::default_config::USER_AGENT;
use crate::jenkins::client::{JenkinsTransport, RawResponse, RequestBody};
use crate::jenkins::jenkins_endpoint::get_crumb::GetCrumb;
use crate::jenkins::jenkins_endpoint::Endpoint;
use crate::jenkins::jenkins_model::crumb::Crumb;
use crate::job_error::{JobError, TransportError};
use base64::Engine;
use formatx::formatx;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT as UA};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use std::str::FromStr;

/// Asynchronous Jenkins HTTP client.
pub struct JenkinsHttpClient {
    url: String,
    credentials: Option<(String, String)>,
    client: Client,
    crumb: Option<Crumb>,
}

impl JenkinsHttpClient {
    /// Creates a new asynchronous Jenkins HTTP client.
    ///
    /// # Arguments
    ///
    /// * `url` - Base URL of the Jenkins server.
    /// * `credentials` - Username and API token (or password) for basic authentication.
    pub fn new(url: &str, credentials: Option<(String, String)>) -> Result<Self, TransportError> {
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            credentials,
            client: Client::builder()
                .cookie_store(true)
                .redirect(Policy::none())
                .build()?,
            crumb: None,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch a CSRF crumb and send it with every later request.
    pub async fn attach_crumb(&mut self) -> Result<(), JobError> {
        let response = self
            .request(GetCrumb.method(), &GetCrumb.endpoint(), RequestBody::Empty)
            .await?;

        if !response.is_accepted() {
            return Err(JobError::Crumb(format!("HTTP {}", response.status)));
        }

        let crumb = serde_json::from_str::<Crumb>(&response.body)
            .map_err(|e| JobError::Crumb(e.to_string()))?;
        self.crumb = Some(crumb);
        Ok(())
    }

    fn auth_header(&self) -> Option<String> {
        self.credentials.as_ref().map(|(username, token)| {
            format!(
                "Basic {}",
                base64::prelude::BASE64_STANDARD.encode(format!("{}:{}", username, token).as_bytes())
            )
        })
    }
}

#[async_trait::async_trait]
impl JenkinsTransport for JenkinsHttpClient {
    /// Sends an asynchronous HTTP request to the Jenkins server.
    async fn request(
        &self,
        method: &str,
        endpoint: &str,
        body: RequestBody<'_>,
    ) -> Result<RawResponse, TransportError> {
        let url = format!("{}/{}", self.url, endpoint);
        let method =
            Method::from_str(method).map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        if method == Method::GET {
            tracing::debug!("{}", formatx!(REQUEST_GET, &url).unwrap_or_default());
        } else {
            tracing::debug!(
                "{}",
                formatx!(REQUEST_POST, &url, body.describe()).unwrap_or_default()
            );
        }

        let mut req = self.client.request(method, url).header(UA, USER_AGENT);

        if let Some(auth) = self.auth_header() {
            req = req.header(AUTHORIZATION, auth);
        }

        if let Some(ref crumb) = self.crumb {
            req = req.header(
                HeaderName::from_str(&crumb.crumb_request_field)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?,
                HeaderValue::from_str(&crumb.crumb)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?,
            );
        }

        req = match body {
            RequestBody::Empty => req,
            RequestBody::Form(pairs) => req.form(pairs),
            RequestBody::Xml(xml) => req
                .header(CONTENT_TYPE, "application/xml")
                .body(xml.to_string()),
        };

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(RawResponse { status, body })
    }
}
