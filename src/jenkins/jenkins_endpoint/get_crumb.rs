use crate::jenkins::jenkins_endpoint::Endpoint;

/// Endpoint for get crumb for authentic.
pub struct GetCrumb;

impl Endpoint for GetCrumb {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for retrieving a crumb.
    fn endpoint(&self) -> String {
        "crumbIssuer/api/json".to_string()
    }
}
