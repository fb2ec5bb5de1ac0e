use crate::constant::log::*;
use crate::jenkins::jenkins_model::job_config::ConfigField;
use thiserror::Error;

pub type JobResult<T> = Result<T, JobError>;

/// Network or HTTP level failure. Aborts the operation in progress.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("GET {endpoint} answered HTTP {status}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Error, Debug)]
pub enum XmlError {
    #[error(transparent)]
    Parse(#[from] quick_xml::Error),

    #[error(transparent)]
    Deserialize(#[from] quick_xml::DeError),

    #[error(transparent)]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{msg}", msg = ERR_XML_NO_ROOT)]
    NoRoot,

    #[error("Element <{0}> is never closed.")]
    Unclosed(String),

    #[error("Node {0} does not exist in the loaded document.")]
    MissingNode(String),
}

#[derive(Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Xml(#[from] XmlError),

    /// The server explicitly refused a state changing request.
    #[error("{message}")]
    Api { message: String },

    /// The edited node does not exist in the loaded config.xml.
    #[error("Cannot edit {field}: the loaded config.xml has no such node.")]
    InvalidEdit { field: ConfigField },

    #[error("Failed to get crumb. {0}")]
    Crumb(String),

    #[error("{0}")]
    Config(String),
}

impl From<quick_xml::Error> for JobError {
    fn from(value: quick_xml::Error) -> Self {
        JobError::Xml(value.into())
    }
}

impl From<quick_xml::DeError> for JobError {
    fn from(value: quick_xml::DeError) -> Self {
        JobError::Xml(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_edit_message() {
        let err = JobError::InvalidEdit {
            field: ConfigField::RepositoryUrl,
        };
        assert_eq!(
            err.to_string(),
            "Cannot edit repository_url: the loaded config.xml has no such node."
        );
    }

    #[test]
    fn test_missing_node_message() {
        let err = XmlError::MissingNode("project/description".to_string());
        assert_eq!(
            err.to_string(),
            "Node project/description does not exist in the loaded document."
        );
    }
}
