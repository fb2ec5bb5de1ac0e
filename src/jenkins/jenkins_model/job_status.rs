use crate::constant::log::*;
use crate::default_config::STRING_PARAMETER_TYPE;
use crate::jenkins::jenkins_model::xml_document::{XmlDocument, XmlElement};
use crate::job_error::XmlError;
use formatx::formatx;
use serde::Serialize;
use std::fmt::{Display, Formatter};

const FREE_STYLE_ROOT: &str = "freeStyleProject";
const MAVEN_MODULE_SET_ROOT: &str = "mavenModuleSet";

/// Parameter definitions live under `action` on older servers and under
/// `property` on newer ones. Only the first path with any definition is read.
const PARAMETER_DEFINITION_PATHS: [[&str; 2]; 2] = [
    ["action", "parameterDefinition"],
    ["property", "parameterDefinition"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    FreeStyle,
    MavenModuleSet,
    #[default]
    Unknown,
}

impl ProjectKind {
    fn from_root(name: &str) -> Self {
        match name {
            FREE_STYLE_ROOT => ProjectKind::FreeStyle,
            MAVEN_MODULE_SET_ROOT => ProjectKind::MavenModuleSet,
            _ => ProjectKind::Unknown,
        }
    }
}

impl Display for ProjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectKind::FreeStyle => write!(f, "freestyle"),
            ProjectKind::MavenModuleSet => write!(f, "maven-module-set"),
            ProjectKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// # Job Status
///
/// Read-only fields of `job/<name>/api/xml`. Every field stays `None` when
/// its node is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobStatus {
    pub kind: ProjectKind,
    pub color: Option<String>,
    pub last_build: Option<u32>,
    pub last_completed_build: Option<u32>,
    pub last_failed_build: Option<u32>,
    pub last_stable_build: Option<u32>,
    pub last_successful_build: Option<u32>,
    pub last_unsuccessful_build: Option<u32>,
    pub next_build_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringParameter {
    pub name: String,
    pub description: Option<String>,
    pub param_type: String,
    /// Default value declared on the server, empty when none is declared.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingType,
    BadText(String),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingName => write!(f, "no <name> child"),
            SkipReason::MissingType => write!(f, "no <type> child"),
            SkipReason::BadText(e) => write!(f, "unreadable text: {}", e),
        }
    }
}

/// A parameter definition that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedParameter {
    /// Position among the parameter definitions of the document.
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterExtraction {
    pub parameters: Vec<StringParameter>,
    pub skipped: Vec<SkippedParameter>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusProjection {
    pub status: JobStatus,
    pub parameters: ParameterExtraction,
}

impl StatusProjection {
    pub fn parse(job_name: &str, content: &str) -> Result<Self, XmlError> {
        let doc = XmlDocument::parse(content)?;
        let root = doc.root().ok_or(XmlError::NoRoot)?;
        let kind = ProjectKind::from_root(root.name());

        let status = match kind {
            ProjectKind::FreeStyle => JobStatus {
                kind,
                color: root.find(&["color"]).map(text_or_empty).transpose()?,
                last_build: build_number(root, &["lastBuild", "number"])?,
                last_completed_build: build_number(root, &["lastCompletedBuild", "number"])?,
                last_failed_build: build_number(root, &["lastFailedBuild", "number"])?,
                last_stable_build: build_number(root, &["lastStableBuild", "number"])?,
                last_successful_build: build_number(root, &["lastSuccessfulBuild", "number"])?,
                last_unsuccessful_build: build_number(root, &["lastUnsuccessfulBuild", "number"])?,
                next_build_number: build_number(root, &["nextBuildNumber"])?,
            },
            ProjectKind::MavenModuleSet => JobStatus {
                kind,
                last_build: build_number(root, &["lastBuild", "number"])?,
                ..JobStatus::default()
            },
            ProjectKind::Unknown => JobStatus::default(),
        };

        let parameters = match kind {
            ProjectKind::Unknown => ParameterExtraction::default(),
            _ => extract_string_parameters(job_name, root),
        };

        Ok(Self { status, parameters })
    }
}

fn text_or_empty(element: &XmlElement) -> Result<String, XmlError> {
    Ok(element.text()?.unwrap_or_default())
}

fn build_number(root: &XmlElement, path: &[&str]) -> Result<Option<u32>, XmlError> {
    let Some(element) = root.find(path) else {
        return Ok(None);
    };

    let text = text_or_empty(element)?;
    match text.trim().parse::<u32>() {
        Ok(number) => Ok(Some(number)),
        Err(_) => {
            tracing::warn!(path = %path.join("/"), text = %text, "ignore non numeric build number");
            Ok(None)
        }
    }
}

/// # extract string parameters
///
/// Decode every `parameterDefinition` by its named children and keep the
/// string kind. A definition that can not be decoded is reported in
/// `skipped` and does not abort the others.
pub fn extract_string_parameters(job_name: &str, root: &XmlElement) -> ParameterExtraction {
    let mut extraction = ParameterExtraction::default();

    let definitions = PARAMETER_DEFINITION_PATHS
        .iter()
        .map(|path| root.find_all(path))
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    for (index, definition) in definitions.into_iter().enumerate() {
        match decode_parameter(definition) {
            Ok(param) if param.param_type == STRING_PARAMETER_TYPE => {
                extraction.parameters.push(param)
            }
            Ok(_) => {}
            Err(reason) => {
                tracing::warn!(
                    "{}",
                    formatx!(ERR_MALFORMED_PARAMETER, index, job_name, &reason)
                        .unwrap_or_default()
                );
                extraction.skipped.push(SkippedParameter { index, reason });
            }
        }
    }

    extraction
}

fn decode_parameter(definition: &XmlElement) -> Result<StringParameter, SkipReason> {
    let text = |path: &[&str]| -> Result<Option<String>, SkipReason> {
        match definition.find(path) {
            Some(e) => e
                .text()
                .map(|t| Some(t.unwrap_or_default()))
                .map_err(|e| SkipReason::BadText(e.to_string())),
            None => Ok(None),
        }
    };

    let name = text(&["name"][..])?.ok_or(SkipReason::MissingName)?;
    let param_type = text(&["type"][..])?.ok_or(SkipReason::MissingType)?;
    let description = text(&["description"][..])?;
    let value = text(&["defaultParameterValue", "value"][..])?.unwrap_or_default();

    Ok(StringParameter {
        name,
        description,
        param_type,
        value,
    })
}
