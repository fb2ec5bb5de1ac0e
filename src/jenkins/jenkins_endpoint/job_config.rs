use crate::jenkins::jenkins_endpoint::{job_path, Endpoint};

/// Endpoint for get config.xml about Jenkins job.
pub struct JobConfig {
    /// Name of the Jenkins job.
    pub job_name: String,
}

impl Endpoint for JobConfig {
    /// HTTP method used (GET).
    fn method(&self) -> &str {
        "GET"
    }

    /// API path for get job config.
    fn endpoint(&self) -> String {
        format!("{}/config.xml", job_path(&self.job_name))
    }
}

/// Endpoint for replacing config.xml of a Jenkins job.
pub struct UpdateJobConfig {
    pub job_name: String,
}

impl Endpoint for UpdateJobConfig {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        format!("{}/config.xml", job_path(&self.job_name))
    }
}
