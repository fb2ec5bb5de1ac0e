use crate::jenkins::jenkins_endpoint::Endpoint;

/// Every job of the server with its color token.
pub struct JobsListing;

impl Endpoint for JobsListing {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "api/xml".to_string()
    }
}
