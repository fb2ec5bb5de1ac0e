use crate::jenkins::jenkins_endpoint::Endpoint;

/// Server side duplication of a job. Sent with the form fields
/// `name`, `mode=copy` and `from`.
pub struct CopyJob {
    pub from: String,
    pub name: String,
}

impl CopyJob {
    pub fn form(&self) -> Vec<(String, String)> {
        vec![
            ("name".to_string(), self.name.clone()),
            ("mode".to_string(), "copy".to_string()),
            ("from".to_string(), self.from.clone()),
        ]
    }
}

impl Endpoint for CopyJob {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        "createItem".to_string()
    }
}
