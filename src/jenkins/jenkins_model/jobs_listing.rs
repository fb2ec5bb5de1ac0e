use crate::default_config::ACTIVITY_MARKER;
use crate::job_error::XmlError;
use serde::{Deserialize, Serialize};

/// # Jobs Listing
///
/// Top level `api/xml` of the server: every job with its color token.
#[derive(Debug, Deserialize, Default)]
pub struct JobsListing {
    #[serde(rename = "job", default)]
    pub jobs: Vec<ListedJob>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ListedJob {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl ListedJob {
    /// A build is running when the color token carries the activity marker,
    /// like `blue_anime`.
    pub fn is_active(&self) -> bool {
        self.color
            .as_deref()
            .is_some_and(|color| color.contains(ACTIVITY_MARKER))
    }
}

impl JobsListing {
    pub fn parse(content: &str) -> Result<Self, XmlError> {
        Ok(quick_xml::de::from_str::<JobsListing>(content)?)
    }

    pub fn names(&self) -> Vec<String> {
        self.jobs.iter().map(|job| job.name.clone()).collect()
    }

    pub fn active_names(&self) -> Vec<String> {
        self.jobs
            .iter()
            .filter(|job| job.is_active())
            .map(|job| job.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<hudson _class="hudson.model.Hudson">
  <assignedLabel><name>built-in</name></assignedLabel>
  <mode>NORMAL</mode>
  <nodeDescription>the master Jenkins node</nodeDescription>
  <job _class="hudson.model.FreeStyleProject">
    <name>nightly</name>
    <url>http://ci.example.com/job/nightly/</url>
    <color>blue_anime</color>
  </job>
  <job _class="hudson.model.FreeStyleProject">
    <name>release</name>
    <url>http://ci.example.com/job/release/</url>
    <color>red</color>
  </job>
  <job _class="com.cloudbees.hudson.plugins.folder.Folder">
    <name>tools</name>
    <url>http://ci.example.com/job/tools/</url>
  </job>
  <quietingDown>false</quietingDown>
</hudson>"#;

    #[test]
    fn test_parse_listing() {
        let listing = JobsListing::parse(LISTING).unwrap();
        assert_eq!(listing.names(), vec!["nightly", "release", "tools"]);
        assert_eq!(listing.active_names(), vec!["nightly"]);
    }

    #[test]
    fn test_listing_without_marker() {
        let listing = JobsListing::parse(&LISTING.replace("blue_anime", "blue")).unwrap();
        assert!(listing.active_names().is_empty());
    }

    #[test]
    fn test_empty_listing() {
        let listing = JobsListing::parse("<hudson/>").unwrap();
        assert!(listing.jobs.is_empty());
    }
}
