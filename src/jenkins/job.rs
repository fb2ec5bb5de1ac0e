use crate::constant::log::*;
use crate::constant::util::truncate_for_log;
use crate::default_config::{COPY_NAME_PREFIX, WAIT_POLL_INTERVAL};
use crate::jenkins::build::ParameterRouting;
use crate::jenkins::client::{JenkinsTransport, RequestBody, ResponseClass};
use crate::jenkins::jenkins_endpoint::create_item::CopyJob;
use crate::jenkins::jenkins_endpoint::job_action::{JobAction, JobActionKind};
use crate::jenkins::jenkins_endpoint::job_config::{JobConfig, UpdateJobConfig};
use crate::jenkins::jenkins_endpoint::job_info::JobInfo;
use crate::jenkins::jenkins_model::job_config::{
    apply_config_edit, ConfigEdit, ConfigField, ConfigProjection,
};
use crate::jenkins::jenkins_model::job_status::{
    JobStatus, SkippedParameter, StatusProjection, StringParameter,
};
use crate::jenkins::jenkins_model::xml_document::XmlDocument;
use crate::jenkins::query::{fetch_xml, list_active_jobs, list_jobs, send_post};
use crate::jenkins::watch::{Sleeper, TokioSleeper, WaitOptions, WaitOutcome};
use crate::job_error::{JobError, JobResult};
use formatx::formatx;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOptions {
    /// Interval used by `wipe_out_workspace` while it waits for builds.
    pub poll_interval: Duration,
    pub parameter_routing: ParameterRouting,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(WAIT_POLL_INTERVAL),
            parameter_routing: ParameterRouting::default(),
        }
    }
}

/// # Job
///
/// Local mirror of one server side job: the status of `api/xml`, the
/// string parameters it declares and the retained `config.xml`.
///
/// Every setter edits the retained document and pushes the whole document
/// back, never a single field.
pub struct Job<C: JenkinsTransport> {
    pub(crate) client: Arc<C>,
    name: String,
    pub(crate) options: JobOptions,
    status: JobStatus,
    pub(crate) string_parameters: Vec<StringParameter>,
    skipped_parameters: Vec<SkippedParameter>,
    config: ConfigProjection,
    config_doc: XmlDocument,
    config_xml: String,
}

impl<C: JenkinsTransport> Job<C> {
    /// Fetch and project both documents of `name`. Any transport failure
    /// aborts the construction.
    pub async fn load(client: Arc<C>, name: impl Into<String>) -> JobResult<Self> {
        Self::load_with_options(client, name, JobOptions::default()).await
    }

    pub async fn load_with_options(
        client: Arc<C>,
        name: impl Into<String>,
        options: JobOptions,
    ) -> JobResult<Self> {
        let name = name.into();
        let projection = fetch_status(client.as_ref(), &name).await?;
        let (config_xml, config_doc, config) = fetch_config(client.as_ref(), &name).await?;

        tracing::info!(
            "{}",
            formatx!(
                JOB_LOADED,
                &name,
                projection.status.kind,
                projection.parameters.parameters.len()
            )
            .unwrap_or_default()
        );

        Ok(Self {
            client,
            name,
            options,
            status: projection.status,
            string_parameters: projection.parameters.parameters,
            skipped_parameters: projection.parameters.skipped,
            config,
            config_doc,
            config_xml,
        })
    }

    /// Lists names of every job on the server.
    pub async fn list(client: &C) -> JobResult<Vec<String>> {
        list_jobs(client).await
    }

    /// Lists names of the jobs that are building.
    pub async fn list_active(client: &C) -> JobResult<Vec<String>> {
        list_active_jobs(client).await
    }

    pub async fn reload(&mut self) -> JobResult<()> {
        self.reload_status().await?;
        self.reload_config().await
    }

    pub async fn reload_status(&mut self) -> JobResult<()> {
        let projection = fetch_status(self.client.as_ref(), &self.name).await?;
        self.status = projection.status;
        self.string_parameters = projection.parameters.parameters;
        self.skipped_parameters = projection.parameters.skipped;
        Ok(())
    }

    pub async fn reload_config(&mut self) -> JobResult<()> {
        let (config_xml, config_doc, config) =
            fetch_config(self.client.as_ref(), &self.name).await?;
        self.config_xml = config_xml;
        self.config_doc = config_doc;
        self.config = config;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &JobOptions {
        &self.options
    }

    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn color(&self) -> Option<&str> {
        self.status.color.as_deref()
    }

    pub fn string_parameters(&self) -> &[StringParameter] {
        &self.string_parameters
    }

    /// Parameter definitions of the last status load that could not be decoded.
    pub fn skipped_parameters(&self) -> &[SkippedParameter] {
        &self.skipped_parameters
    }

    pub fn config(&self) -> &ConfigProjection {
        &self.config
    }

    pub fn repository_url(&self) -> Option<&str> {
        self.config.repository_url.as_deref()
    }

    pub fn repository_urls(&self) -> &[String] {
        &self.config.repository_urls
    }

    pub fn repository_browser_location(&self) -> Option<&str> {
        self.config.repository_browser_location.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    /// The `config.xml` text pushed by the next `update`.
    pub fn config_xml(&self) -> &str {
        &self.config_xml
    }

    /// # update
    ///
    /// Push a config document to the server. With `Some(xml)` the retained
    /// document is replaced first; without, the retained text is pushed.
    ///
    /// Returns whether the server accepted the push.
    pub async fn update(&mut self, config: Option<String>) -> JobResult<bool> {
        if let Some(config_xml) = config {
            let config_doc = XmlDocument::parse(&config_xml)?;
            self.config = ConfigProjection::parse(&config_doc)?;
            self.config_doc = config_doc;
            self.config_xml = config_xml;
        }

        let response = send_post(
            self.client.as_ref(),
            &UpdateJobConfig {
                job_name: self.name.clone(),
            },
            RequestBody::Xml(&self.config_xml),
        )
        .await?;

        tracing::info!(
            "{}",
            formatx!(JOB_CONFIG_PUSHED, &self.name, response.status).unwrap_or_default()
        );

        Ok(response.is_accepted())
    }

    /// Set the remote of the single module location and update on the server.
    /// Fails without contacting the server when the loaded config has none.
    pub async fn set_repository_url(&mut self, repository_url: &str) -> JobResult<bool> {
        if self.config.repository_url.is_none() {
            return Err(JobError::InvalidEdit {
                field: ConfigField::RepositoryUrl,
            });
        }

        self.push_edit(ConfigEdit::RepositoryUrl(repository_url.to_string()))
            .await
    }

    pub async fn set_repository_urls(&mut self, repository_urls: &[String]) -> JobResult<bool> {
        self.push_edit(ConfigEdit::RepositoryUrls(repository_urls.to_vec()))
            .await
    }

    pub async fn set_repository_browser_location(&mut self, location: &str) -> JobResult<bool> {
        self.push_edit(ConfigEdit::RepositoryBrowserLocation(location.to_string()))
            .await
    }

    pub async fn set_description(&mut self, description: &str) -> JobResult<bool> {
        self.push_edit(ConfigEdit::Description(description.to_string()))
            .await
    }

    async fn push_edit(&mut self, edit: ConfigEdit) -> JobResult<bool> {
        let config_xml = apply_config_edit(&mut self.config_doc, &edit)?;
        self.config = ConfigProjection::parse(&self.config_doc)?;
        self.config_xml = config_xml;
        self.update(None).await
    }

    /// # copy
    ///
    /// Duplicate this job on the server as `new_name` (default `copy_of_<name>`)
    /// and load the copy.
    pub async fn copy(&self, new_name: Option<&str>) -> JobResult<Job<C>> {
        let new_name = new_name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", COPY_NAME_PREFIX, self.name));

        let endpoint = CopyJob {
            from: self.name.clone(),
            name: new_name.clone(),
        };
        let form = endpoint.form();
        let response = send_post(self.client.as_ref(), &endpoint, RequestBody::Form(&form)).await?;

        if response.class() != ResponseClass::Redirection {
            return Err(JobError::Api {
                message: formatx!(
                    ERR_COPY_JOB,
                    &self.name,
                    truncate_for_log(&response.body, 300)
                )
                .unwrap_or_default(),
            });
        }

        Job::load_with_options(self.client.clone(), new_name, self.options.clone()).await
    }

    /// Whether the server lists this job as building.
    pub async fn is_active(&self) -> JobResult<bool> {
        Ok(list_active_jobs(self.client.as_ref())
            .await?
            .iter()
            .any(|name| name == &self.name))
    }

    pub async fn enable(&self) -> JobResult<bool> {
        self.send_action(JobActionKind::Enable).await
    }

    pub async fn disable(&self) -> JobResult<bool> {
        self.send_action(JobActionKind::Disable).await
    }

    /// Delete this job from the server.
    pub async fn delete(&self) -> JobResult<bool> {
        self.send_action(JobActionKind::Delete).await
    }

    /// # wipe out workspace
    ///
    /// Wait for running and queued builds, then wipe the workspace. A wait
    /// that ends early, or a job that is active again afterwards, leaves the
    /// workspace alone and `false` is returned.
    pub async fn wipe_out_workspace(&self) -> JobResult<bool> {
        self.wipe_out_workspace_with(WaitOptions::every(self.options.poll_interval), &TokioSleeper)
            .await
    }

    pub async fn wipe_out_workspace_with(
        &self,
        options: WaitOptions,
        sleeper: &dyn Sleeper,
    ) -> JobResult<bool> {
        let outcome = self.wait_for_build_to_finish_with(options, sleeper).await?;
        if !matches!(outcome, WaitOutcome::Finished { .. }) {
            tracing::warn!(
                "{}",
                formatx!(WIPE_REFUSED_UNFINISHED, &self.name, outcome.ticks()).unwrap_or_default()
            );
            return Ok(false);
        }

        if self.is_active().await? {
            tracing::warn!(
                "{}",
                formatx!(WIPE_REFUSED_ACTIVE, &self.name).unwrap_or_default()
            );
            return Ok(false);
        }

        self.send_action(JobActionKind::WipeOutWorkspace).await
    }

    async fn send_action(&self, kind: JobActionKind) -> JobResult<bool> {
        let response = send_post(
            self.client.as_ref(),
            &JobAction {
                job_name: self.name.clone(),
                kind,
            },
            RequestBody::Empty,
        )
        .await?;

        tracing::info!(
            "{}",
            formatx!(JOB_ACTION_SENT, kind, &self.name, response.status).unwrap_or_default()
        );

        Ok(response.is_accepted())
    }
}

async fn fetch_status<C: JenkinsTransport + ?Sized>(
    client: &C,
    name: &str,
) -> JobResult<StatusProjection> {
    let content = fetch_xml(
        client,
        &JobInfo {
            job_name: name.to_string(),
        },
    )
    .await?;

    Ok(StatusProjection::parse(name, &content)?)
}

async fn fetch_config<C: JenkinsTransport + ?Sized>(
    client: &C,
    name: &str,
) -> JobResult<(String, XmlDocument, ConfigProjection)> {
    let content = fetch_xml(
        client,
        &JobConfig {
            job_name: name.to_string(),
        },
    )
    .await?;

    let doc = XmlDocument::parse(&content)?;
    let config = ConfigProjection::parse(&doc)?;
    Ok((content, doc, config))
}
