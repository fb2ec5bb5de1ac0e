use crate::jenkins::jenkins_endpoint::Endpoint;

/// Items waiting in the build queue.
pub struct BuildQueue;

impl Endpoint for BuildQueue {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "queue/api/xml".to_string()
    }
}
