//! Client side mirror of a Jenkins job.
//!
//! A [`Job`] fetches the status document and `config.xml` of one job,
//! pushes targeted config edits back as whole documents, triggers builds
//! with string parameters and waits for them to finish.

pub mod app_config;
pub mod constant;
pub mod default_config;
pub mod jenkins;
pub mod job_error;
pub mod logging;
pub mod pretty_log;

pub use jenkins::build::ParameterRouting;
pub use jenkins::client::{JenkinsTransport, RawResponse, RequestBody};
pub use jenkins::jenkins_http_client::JenkinsHttpClient;
pub use jenkins::job::{Job, JobOptions};
pub use jenkins::watch::{WaitCancel, WaitOptions, WaitOutcome};
pub use job_error::{JobError, JobResult};
