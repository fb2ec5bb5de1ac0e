/// Color token substring the server uses for a job that is building.
pub const ACTIVITY_MARKER: &str = "anime";
pub const STRING_PARAMETER_TYPE: &str = "StringParameterDefinition";
/// Subversion module location node of a `config.xml`.
pub const SVN_MODULE_LOCATION: &str = "hudson.scm.SubversionSCM_-ModuleLocation";
pub const BUILD_DELAY_KEY: &str = "delay";
pub const BUILD_DELAY_NONE: &str = "0sec";
pub const COPY_NAME_PREFIX: &str = "copy_of_";
/// Seconds between two ticks of the completion poller.
pub const WAIT_POLL_INTERVAL: u64 = 10;
pub const CONFIG_FILE_NAME: &str = ".jjs-config.toml";
pub const LOG_ENV: &str = "JJS_LOG";
pub const LOG_FILTER: &str = "jenkins_job_sync=info,jjs=info";
pub const USER_AGENT: &str = "jenkins-job-sync-rust";
