use crate::job_error::XmlError;
use serde::Deserialize;

/// # Build Queue
///
/// `queue/api/xml`: jobs waiting for an executor.
#[derive(Debug, Deserialize, Default)]
pub struct BuildQueue {
    #[serde(rename = "item", default)]
    pub items: Vec<QueueItem>,
}

#[derive(Debug, Deserialize)]
pub struct QueueItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub task: Option<QueueTask>,
}

#[derive(Debug, Deserialize)]
pub struct QueueTask {
    #[serde(default)]
    pub name: Option<String>,
}

impl BuildQueue {
    pub fn parse(content: &str) -> Result<Self, XmlError> {
        Ok(quick_xml::de::from_str::<BuildQueue>(content)?)
    }

    /// Names of the queued jobs, in queue order.
    pub fn job_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.task.as_ref().and_then(|task| task.name.clone()))
            .collect()
    }

    pub fn contains(&self, job_name: &str) -> bool {
        self.items
            .iter()
            .filter_map(|item| item.task.as_ref().and_then(|task| task.name.as_deref()))
            .any(|name| name == job_name)
    }
}
