use crate::constant::log::*;
use crate::default_config::{BUILD_DELAY_KEY, BUILD_DELAY_NONE};
use crate::jenkins::client::{JenkinsTransport, RequestBody};
use crate::jenkins::jenkins_endpoint::job_build::{TriggerBuild, TriggerBuildWithParameters};
use crate::jenkins::jenkins_model::job_status::StringParameter;
use crate::jenkins::job::Job;
use crate::jenkins::query::send_post;
use crate::job_error::JobResult;
use formatx::formatx;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which parameter set decides the build route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterRouting {
    /// Use the parameters captured by the last status load.
    #[default]
    LoadedSnapshot,
    /// Reload the status right before every build.
    RefreshBeforeBuild,
}

pub struct JobBuildParam {
    pub params: BTreeMap<String, String>,
}

impl JobBuildParam {
    /// Only the zero delay, what a build without parameters sends.
    pub fn zero_delay() -> Self {
        Self {
            params: BTreeMap::from([(BUILD_DELAY_KEY.to_string(), BUILD_DELAY_NONE.to_string())]),
        }
    }

    pub fn override_params(&mut self, overrides: &BTreeMap<String, String>) -> &mut Self {
        for (name, value) in overrides {
            self.params.insert(name.clone(), value.clone());
        }
        self
    }

    pub fn to_form(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl From<&[StringParameter]> for JobBuildParam {
    fn from(value: &[StringParameter]) -> Self {
        let mut result = Self::zero_delay();
        for param in value {
            result
                .params
                .insert(param.name.clone(), param.value.clone());
        }
        result
    }
}

impl<C: JenkinsTransport> Job<C> {
    pub fn has_string_params(&self) -> bool {
        !self.string_parameters.is_empty()
    }

    /// # build
    ///
    /// Trigger a build. A job declaring string parameters is built with its
    /// defaults overridden by `overrides`, any other job is built plain and
    /// `overrides` is ignored.
    ///
    /// Returns whether the server accepted the request.
    pub async fn build(&mut self, overrides: &BTreeMap<String, String>) -> JobResult<bool> {
        if self.options.parameter_routing == ParameterRouting::RefreshBeforeBuild {
            self.reload_status().await?;
        }

        if self.has_string_params() {
            self.build_with_string_params(overrides).await
        } else {
            self.build_with_no_params().await
        }
    }

    pub async fn build_with_no_params(&self) -> JobResult<bool> {
        tracing::info!(
            "{}",
            formatx!(BUILD_WITH_NO_PARAMS, self.name()).unwrap_or_default()
        );

        let form = JobBuildParam::zero_delay().to_form();
        let response = send_post(
            self.client.as_ref(),
            &TriggerBuild {
                job_name: self.name().to_string(),
            },
            RequestBody::Form(&form),
        )
        .await?;

        Ok(response.is_accepted())
    }

    pub async fn build_with_string_params(
        &self,
        overrides: &BTreeMap<String, String>,
    ) -> JobResult<bool> {
        let mut param = JobBuildParam::from(self.string_parameters.as_slice());
        param.override_params(overrides);
        let form = param.to_form();

        tracing::info!(
            "{}",
            formatx!(
                BUILD_WITH_PARAMS,
                self.name(),
                form.iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
            .unwrap_or_default()
        );

        let response = send_post(
            self.client.as_ref(),
            &TriggerBuildWithParameters {
                job_name: self.name().to_string(),
            },
            RequestBody::Form(&form),
        )
        .await?;

        Ok(response.is_accepted())
    }
}
