pub const ERR_NEED_A_JENKINS_URL: &str = "Need a jenkins url. Run `jjs login --url <URL>` first.";
pub const ERR_NEED_EVEN_PARAM: &str = "You must provide sufficient parameters.";
pub const ERR_XML_NO_ROOT: &str = "The xml document has no root element.";
pub const ERR_COPY_JOB: &str = "Error copying job {}: {}";
pub const ERR_CONFIG_SAVE_FAILURE: &str = "Config storage failure: {}";
pub const ERR_NO_CONFIG_PATH: &str = "Cannot locate the home directory.";
pub const ERR_MALFORMED_PARAMETER: &str =
    "Skip parameter definition #{} of job {}: {}.";

pub const REQUEST_GET: &str = "GET {}";
pub const REQUEST_POST: &str = "POST {} ({})";
pub const JOB_LOADED: &str = "Job {} loaded: kind {}, {} string parameter(s).";
pub const JOB_CONFIG_PUSHED: &str = "Pushed config.xml of {}: {}.";
pub const JOB_ACTION_SENT: &str = "{} on {}: {}.";
pub const BUILD_WITH_NO_PARAMS: &str = "Request build of {} without parameters.";
pub const BUILD_WITH_PARAMS: &str = "Request build of {} with parameters: {}";
pub const WAITING_FOR_BUILD: &str = "Waiting for all {} builds to finish... (tick {}, last check at {})";
pub const WAIT_FINISHED: &str = "Builds of {} finished after {} tick(s).";
pub const WAIT_DEADLINE_REACHED: &str = "Stop waiting for {}: deadline reached after {} tick(s).";
pub const WAIT_CANCELLED: &str = "Stop waiting for {}: cancelled after {} tick(s).";
pub const WIPE_REFUSED_UNFINISHED: &str =
    "Builds of {} did not finish after {} tick(s), refuse to wipe out its workspace.";
pub const WIPE_REFUSED_ACTIVE: &str = "Job {} is still active, refuse to wipe out its workspace.";

pub const HINT_JOB_NAME: &str = "job:";
pub const HINT_JOB_KIND: &str = "kind:";
pub const HINT_COLOR: &str = "color:";
pub const HINT_DESCRIPTION: &str = "description:";
pub const HINT_REPOSITORY: &str = "repository:";
pub const HINT_REPOSITORY_BROWSER: &str = "repository browser:";
pub const HINT_STRING_PARAMETERS: &str = "string parameters:";
pub const HINT_NOT_SET: &str = "(not set)";

pub const LOGIN_SAVED: &str = "Jenkins login saved to {}.";
pub const REQUEST_ACCEPTED: &str = "{} accepted.";
pub const REQUEST_REJECTED: &str = "{} rejected by the server.";
pub const JOB_COPIED: &str = "Job {} copied to {}.";
pub const NO_ACTIVE_JOBS: &str = "No job is active.";
pub const QUEUE_EMPTY: &str = "The build queue is empty.";
pub const CRUMB_UNAVAILABLE: &str = "Continue without crumb: {}";
pub const HINT_URL: &str = "url:";
pub const HINT_USERNAME: &str = "username:";
pub const HINT_API_TOKEN: &str = "api token:";
pub const HINT_POLL_INTERVAL: &str = "poll interval (s):";
pub const HINT_REFRESH_PARAMETERS: &str = "refresh parameters before build:";
pub const HINT_LAST_BUILD: &str = "last build:";
pub const HINT_NEXT_BUILD: &str = "next build:";
