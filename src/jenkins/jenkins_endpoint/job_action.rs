use crate::jenkins::jenkins_endpoint::{job_path, Endpoint};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobActionKind {
    Enable,
    Disable,
    Delete,
    WipeOutWorkspace,
}

impl JobActionKind {
    fn path_segment(&self) -> &'static str {
        match self {
            JobActionKind::Enable => "enable",
            JobActionKind::Disable => "disable",
            JobActionKind::Delete => "doDelete",
            JobActionKind::WipeOutWorkspace => "doWipeOutWorkspace",
        }
    }
}

impl Display for JobActionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JobActionKind::Enable => write!(f, "Enable"),
            JobActionKind::Disable => write!(f, "Disable"),
            JobActionKind::Delete => write!(f, "Delete"),
            JobActionKind::WipeOutWorkspace => write!(f, "Wipe out workspace"),
        }
    }
}

/// A state changing action without payload on a job.
pub struct JobAction {
    pub job_name: String,
    pub kind: JobActionKind,
}

impl Endpoint for JobAction {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", job_path(&self.job_name), self.kind.path_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_endpoints() {
        let endpoint = |kind| {
            JobAction {
                job_name: "nightly".to_string(),
                kind,
            }
            .endpoint()
        };

        assert_eq!(endpoint(JobActionKind::Enable), "job/nightly/enable");
        assert_eq!(endpoint(JobActionKind::Disable), "job/nightly/disable");
        assert_eq!(endpoint(JobActionKind::Delete), "job/nightly/doDelete");
        assert_eq!(
            endpoint(JobActionKind::WipeOutWorkspace),
            "job/nightly/doWipeOutWorkspace"
        );
    }
}
