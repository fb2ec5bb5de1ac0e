use crate::constant::log::*;
use crate::default_config::{CONFIG_FILE_NAME, WAIT_POLL_INTERVAL};
use crate::jenkins::build::ParameterRouting;
use crate::jenkins::job::JobOptions;
use crate::job_error::{JobError, JobResult};
use dirs::home_dir;
use formatx::formatx;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// # App Config
///
/// Login and polling settings of the `jjs` command, stored as toml in the
/// home directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenkins_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenkins_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenkins_api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_parameters_before_build: Option<bool>,
}

impl AppConfig {
    pub fn default_path() -> JobResult<PathBuf> {
        home_dir()
            .filter(|p| p.is_dir())
            .map(|p| p.join(CONFIG_FILE_NAME))
            .ok_or_else(|| JobError::Config(ERR_NO_CONFIG_PATH.to_string()))
    }

    /// Read the config at `path`, or at the default path when `None`.
    /// A missing or unreadable file gives the default config.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Ok(p) => p,
                Err(_) => return Self::default(),
            },
        };

        Self::get_from_path(&path).unwrap_or_default()
    }

    pub fn get_from_path(path: &Path) -> Option<Self> {
        if !path.is_file() {
            return None;
        }

        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignore unreadable config: {}", e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> JobResult<()> {
        let save_error = |e: String| {
            JobError::Config(formatx!(ERR_CONFIG_SAVE_FAILURE, e).unwrap_or_default())
        };

        let str = toml::to_string(self).map_err(|e| save_error(e.to_string()))?;
        File::create(path)
            .map_err(|e| save_error(e.to_string()))?
            .write_all(str.as_bytes())
            .map_err(|e| save_error(e.to_string()))
    }

    /// Username and api token, when both are set.
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.jenkins_username, &self.jenkins_api_token) {
            (Some(username), Some(token)) => Some((username.clone(), token.clone())),
            _ => None,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.unwrap_or(WAIT_POLL_INTERVAL))
    }

    pub fn job_options(&self) -> JobOptions {
        JobOptions {
            poll_interval: self.poll_interval(),
            parameter_routing: if self.refresh_parameters_before_build.unwrap_or(false) {
                ParameterRouting::RefreshBeforeBuild
            } else {
                ParameterRouting::LoadedSnapshot
            },
        }
    }
}
