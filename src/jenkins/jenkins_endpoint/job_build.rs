use crate::jenkins::jenkins_endpoint::{job_path, Endpoint};

/// Trigger a build of a job without parameters.
pub struct TriggerBuild {
    pub job_name: String,
}

impl Endpoint for TriggerBuild {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        format!("{}/build", job_path(&self.job_name))
    }
}

/// Trigger a build of a parameterized job.
pub struct TriggerBuildWithParameters {
    pub job_name: String,
}

impl Endpoint for TriggerBuildWithParameters {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        format!("{}/buildWithParameters", job_path(&self.job_name))
    }
}
