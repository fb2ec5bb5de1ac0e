use crate::default_config::SVN_MODULE_LOCATION;
use crate::jenkins::jenkins_model::xml_document::XmlDocument;
use crate::job_error::{JobError, JobResult, XmlError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

// Paths below are relative to the document element, so `project` and
// `maven2-moduleset` configs share them.
const REMOTE_PATH: [&str; 4] = ["scm", "locations", SVN_MODULE_LOCATION, "remote"];
const LOCATION_PATH: [&str; 3] = ["scm", "locations", SVN_MODULE_LOCATION];
const LOCATIONS_PATH: [&str; 2] = ["scm", "locations"];
const BROWSER_LOCATION_PATH: [&str; 3] = ["scm", "browser", "location"];
const DESCRIPTION_PATH: [&str; 1] = ["description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    RepositoryUrl,
    RepositoryUrls,
    RepositoryBrowserLocation,
    Description,
}

impl Display for ConfigField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigField::RepositoryUrl => write!(f, "repository_url"),
            ConfigField::RepositoryUrls => write!(f, "repository_urls"),
            ConfigField::RepositoryBrowserLocation => write!(f, "repository_browser_location"),
            ConfigField::Description => write!(f, "description"),
        }
    }
}

/// # Config Projection
///
/// The subset of `config.xml` a job exposes for reading and writing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigProjection {
    /// Remote of the first Subversion module location, if there is one.
    pub repository_url: Option<String>,
    pub repository_urls: Vec<String>,
    pub repository_browser_location: Option<String>,
    /// `Some("")` when the node exists without text.
    pub description: Option<String>,
}

impl ConfigProjection {
    pub fn parse(doc: &XmlDocument) -> Result<Self, XmlError> {
        let root = doc.root().ok_or(XmlError::NoRoot)?;

        let text_at = |path: &[&str]| -> Result<Option<String>, XmlError> {
            match root.find(path) {
                Some(e) => Ok(Some(e.text()?.unwrap_or_default())),
                None => Ok(None),
            }
        };

        let mut repository_urls = Vec::new();
        if root.find(&LOCATIONS_PATH).is_some() {
            for location in root.find_all(&LOCATION_PATH) {
                if let Some(remote) = location.child("remote") {
                    repository_urls.push(remote.text()?.unwrap_or_default());
                }
            }
        }

        Ok(Self {
            repository_url: text_at(&REMOTE_PATH[..])?,
            repository_urls,
            repository_browser_location: text_at(&BROWSER_LOCATION_PATH[..])?,
            description: text_at(&DESCRIPTION_PATH[..])?,
        })
    }
}

/// One targeted change of a `config.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEdit {
    RepositoryUrl(String),
    /// Assigned to the module locations in order. Locations without a value
    /// keep theirs, values without a location are dropped.
    RepositoryUrls(Vec<String>),
    RepositoryBrowserLocation(String),
    Description(String),
}

impl ConfigEdit {
    pub fn field(&self) -> ConfigField {
        match self {
            ConfigEdit::RepositoryUrl(_) => ConfigField::RepositoryUrl,
            ConfigEdit::RepositoryUrls(_) => ConfigField::RepositoryUrls,
            ConfigEdit::RepositoryBrowserLocation(_) => ConfigField::RepositoryBrowserLocation,
            ConfigEdit::Description(_) => ConfigField::Description,
        }
    }
}

/// # apply config edit
///
/// Rewrite the node behind `edit` in place and serialize the whole document.
/// Nothing is changed when the node does not exist.
pub fn apply_config_edit(doc: &mut XmlDocument, edit: &ConfigEdit) -> JobResult<String> {
    let root_name = doc.root().ok_or(XmlError::NoRoot)?.name().to_string();
    let rooted = |rest: &[&'static str]| rooted_path(&root_name, rest);

    let invalid = |e: XmlError| match e {
        XmlError::MissingNode(_) => JobError::InvalidEdit { field: edit.field() },
        other => other.into(),
    };

    match edit {
        ConfigEdit::RepositoryUrl(url) => doc
            .set_text(&rooted(&REMOTE_PATH[..]), url)
            .map_err(invalid)?,
        ConfigEdit::RepositoryBrowserLocation(location) => doc
            .set_text(&rooted(&BROWSER_LOCATION_PATH[..]), location)
            .map_err(invalid)?,
        ConfigEdit::Description(description) => doc
            .set_text(&rooted(&DESCRIPTION_PATH[..]), description)
            .map_err(invalid)?,
        ConfigEdit::RepositoryUrls(urls) => {
            let location_path = rooted(&LOCATION_PATH[..]);

            let assigned = doc.find_all(&location_path).into_iter().take(urls.len());
            if assigned.into_iter().any(|location| location.child("remote").is_none()) {
                return Err(JobError::InvalidEdit { field: edit.field() });
            }

            for (location, url) in doc.find_all_mut(&location_path).into_iter().zip(urls) {
                if let Some(remote) = location.find_mut(&["remote"]) {
                    remote.set_text(url);
                }
            }
        }
    }

    Ok(doc.to_xml_string())
}

fn rooted_path<'a>(root: &'a str, rest: &[&'a str]) -> Vec<&'a str> {
    let mut path = Vec::with_capacity(rest.len() + 1);
    path.push(root);
    path.extend_from_slice(rest);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_LOCATION: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<project>
  <description/>
  <scm class="hudson.scm.SubversionSCM">
    <locations>
      <hudson.scm.SubversionSCM_-ModuleLocation>
        <remote>https://svn.example.com/trunk</remote>
      </hudson.scm.SubversionSCM_-ModuleLocation>
    </locations>
    <browser class="hudson.scm.browsers.ViewSVN">
      <location>https://viewsvn.example.com/</location>
    </browser>
  </scm>
</project>"#;

    const MULTI_LOCATION: &str = r#"<project>
  <scm class="hudson.scm.SubversionSCM">
    <locations>
      <hudson.scm.SubversionSCM_-ModuleLocation><remote>svn://a</remote></hudson.scm.SubversionSCM_-ModuleLocation>
      <hudson.scm.SubversionSCM_-ModuleLocation><remote>svn://b</remote></hudson.scm.SubversionSCM_-ModuleLocation>
      <hudson.scm.SubversionSCM_-ModuleLocation><remote>svn://c</remote></hudson.scm.SubversionSCM_-ModuleLocation>
    </locations>
  </scm>
</project>"#;

    const NO_SCM: &str = r#"<project><description>plain</description><scm class="hudson.scm.NullSCM"/></project>"#;

    #[test]
    fn test_parse_single_location() {
        let doc = XmlDocument::parse(SINGLE_LOCATION).unwrap();
        let config = ConfigProjection::parse(&doc).unwrap();

        assert_eq!(
            config.repository_url.as_deref(),
            Some("https://svn.example.com/trunk")
        );
        assert_eq!(config.repository_urls, vec!["https://svn.example.com/trunk"]);
        assert_eq!(
            config.repository_browser_location.as_deref(),
            Some("https://viewsvn.example.com/")
        );
        assert_eq!(config.description.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_without_scm() {
        let doc = XmlDocument::parse(NO_SCM).unwrap();
        let config = ConfigProjection::parse(&doc).unwrap();

        assert_eq!(config.repository_url, None);
        assert!(config.repository_urls.is_empty());
        assert_eq!(config.repository_browser_location, None);
        assert_eq!(config.description.as_deref(), Some("plain"));
    }

    #[test]
    fn test_parse_maven_root() {
        let doc = XmlDocument::parse(
            "<maven2-moduleset><description>maven job</description></maven2-moduleset>",
        )
        .unwrap();
        let config = ConfigProjection::parse(&doc).unwrap();
        assert_eq!(config.description.as_deref(), Some("maven job"));
    }

    #[test]
    fn test_edit_description_keeps_the_rest() {
        let mut doc = XmlDocument::parse(SINGLE_LOCATION).unwrap();
        let xml =
            apply_config_edit(&mut doc, &ConfigEdit::Description("nightly".to_string())).unwrap();

        assert_eq!(
            xml,
            SINGLE_LOCATION.replace("<description/>", "<description>nightly</description>")
        );
    }

    #[test]
    fn test_edit_repository_url() {
        let mut doc = XmlDocument::parse(SINGLE_LOCATION).unwrap();
        let xml = apply_config_edit(
            &mut doc,
            &ConfigEdit::RepositoryUrl("https://svn.example.com/branches/b1".to_string()),
        )
        .unwrap();

        assert_eq!(
            xml,
            SINGLE_LOCATION.replace(
                "https://svn.example.com/trunk",
                "https://svn.example.com/branches/b1"
            )
        );
    }

    #[test]
    fn test_edit_missing_node_is_invalid() {
        let mut doc = XmlDocument::parse(NO_SCM).unwrap();

        for edit in [
            ConfigEdit::RepositoryUrl("svn://x".to_string()),
            ConfigEdit::RepositoryBrowserLocation("http://x".to_string()),
        ] {
            let result = apply_config_edit(&mut doc, &edit);
            assert!(
                matches!(result, Err(JobError::InvalidEdit { field }) if field == edit.field())
            );
        }
        assert_eq!(doc.to_xml_string(), NO_SCM);
    }

    #[test]
    fn test_edit_repository_urls_shorter_list() {
        let mut doc = XmlDocument::parse(MULTI_LOCATION).unwrap();
        apply_config_edit(
            &mut doc,
            &ConfigEdit::RepositoryUrls(vec!["svn://x".to_string()]),
        )
        .unwrap();

        let config = ConfigProjection::parse(&doc).unwrap();
        assert_eq!(config.repository_urls, vec!["svn://x", "svn://b", "svn://c"]);
    }

    #[test]
    fn test_edit_repository_urls_longer_list() {
        let mut doc = XmlDocument::parse(MULTI_LOCATION).unwrap();
        let urls: Vec<String> = ["svn://1", "svn://2", "svn://3", "svn://4", "svn://5"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        apply_config_edit(&mut doc, &ConfigEdit::RepositoryUrls(urls)).unwrap();

        let config = ConfigProjection::parse(&doc).unwrap();
        assert_eq!(config.repository_urls, vec!["svn://1", "svn://2", "svn://3"]);
    }

    #[test]
    fn test_edit_repository_urls_location_without_remote() {
        let content = r#"<project><scm><locations><hudson.scm.SubversionSCM_-ModuleLocation><local>.</local></hudson.scm.SubversionSCM_-ModuleLocation></locations></scm></project>"#;
        let mut doc = XmlDocument::parse(content).unwrap();
        let result = apply_config_edit(
            &mut doc,
            &ConfigEdit::RepositoryUrls(vec!["svn://x".to_string()]),
        );
        assert!(matches!(result, Err(JobError::InvalidEdit { .. })));
        assert_eq!(doc.to_xml_string(), content);
    }
}
