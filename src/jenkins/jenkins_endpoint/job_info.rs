use crate::jenkins::jenkins_endpoint::{job_path, Endpoint};

/// Endpoint for the status document of a Jenkins job.
pub struct JobInfo {
    /// Name of the Jenkins job.
    pub job_name: String,
}

impl Endpoint for JobInfo {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for retrieving job information.
    fn endpoint(&self) -> String {
        format!("{}/api/xml", job_path(&self.job_name))
    }
}
