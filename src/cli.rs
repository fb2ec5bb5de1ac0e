use formatx::formatx;
use jenkins_job_sync::app_config::AppConfig;
use jenkins_job_sync::constant::log::*;
use jenkins_job_sync::constant::util::{get_hidden_sensitive_string, SensitiveMode};
use jenkins_job_sync::jenkins::query::{list_active_jobs, list_jobs, query_build_queue};
use jenkins_job_sync::jenkins::watch::{WaitOptions, WaitOutcome};
use jenkins_job_sync::pretty_log::{colored_println, hint_println, ThemeColor};
use jenkins_job_sync::{Job, JobError, JobResult, JenkinsHttpClient};
use std::collections::BTreeMap;
use std::io::Stdout;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type CliJob = Job<JenkinsHttpClient>;

/// # get client
///
/// Build the http client from the saved login and try to attach a crumb.
/// Servers without CSRF protection answer the crumb request with an error,
/// which is only logged.
pub async fn get_client(config: &AppConfig) -> JobResult<JenkinsHttpClient> {
    let url = config
        .jenkins_url
        .as_deref()
        .ok_or_else(|| JobError::Config(ERR_NEED_A_JENKINS_URL.to_string()))?;

    let mut client = JenkinsHttpClient::new(url, config.credentials())?;
    if let Err(e) = client.attach_crumb().await {
        tracing::debug!("{}", formatx!(CRUMB_UNAVAILABLE, e).unwrap_or_default());
    }

    Ok(client)
}

pub async fn load_job(config: &AppConfig, name: &str) -> JobResult<CliJob> {
    let client = Arc::new(get_client(config).await?);
    Job::load_with_options(client, name, config.job_options()).await
}

pub fn cli_do_login(
    stdout: &mut Stdout,
    config_path: &Path,
    url: Option<String>,
    username: Option<String>,
    api_token: Option<String>,
) -> JobResult<()> {
    let mut config = AppConfig::load(Some(config_path));

    if url.is_some() {
        config.jenkins_url = url;
    }
    if username.is_some() {
        config.jenkins_username = username;
    }
    if api_token.is_some() {
        config.jenkins_api_token = api_token;
    }
    if config.jenkins_url.is_none() {
        return Err(JobError::Config(ERR_NEED_A_JENKINS_URL.to_string()));
    }

    config.save(config_path)?;
    colored_println(
        stdout,
        ThemeColor::Success,
        &formatx!(LOGIN_SAVED, config_path.display()).unwrap_or_default(),
    );

    Ok(())
}

pub fn cli_do_config(stdout: &mut Stdout, config: &AppConfig) {
    let or_not_set = |v: Option<String>| v.unwrap_or_else(|| HINT_NOT_SET.to_string());

    hint_println(stdout, HINT_URL, &or_not_set(config.jenkins_url.clone()));
    hint_println(
        stdout,
        HINT_USERNAME,
        &or_not_set(config.jenkins_username.clone()),
    );
    hint_println(
        stdout,
        HINT_API_TOKEN,
        &or_not_set(
            config
                .jenkins_api_token
                .as_deref()
                .map(|t| get_hidden_sensitive_string(t, SensitiveMode::Normal(4))),
        ),
    );
    hint_println(
        stdout,
        HINT_POLL_INTERVAL,
        &config.poll_interval().as_secs().to_string(),
    );
    hint_println(
        stdout,
        HINT_REFRESH_PARAMETERS,
        &config
            .refresh_parameters_before_build
            .unwrap_or(false)
            .to_string(),
    );
}

pub async fn cli_do_show(
    stdout: &mut Stdout,
    config: &AppConfig,
    name: &str,
    json: bool,
) -> JobResult<()> {
    let job = load_job(config, name).await?;

    if json {
        let value = serde_json::json!({
            "name": job.name(),
            "status": job.status(),
            "string_parameters": job.string_parameters(),
            "config": job.config(),
        });
        colored_println(
            stdout,
            ThemeColor::Main,
            &serde_json::to_string_pretty(&value).unwrap_or_default(),
        );
        return Ok(());
    }

    let or_not_set = |v: Option<&str>| v.unwrap_or(HINT_NOT_SET).to_string();
    let number_or_not_set =
        |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or(HINT_NOT_SET.to_string());

    hint_println(stdout, HINT_JOB_NAME, job.name());
    hint_println(stdout, HINT_JOB_KIND, &job.status().kind.to_string());
    hint_println(stdout, HINT_COLOR, &or_not_set(job.color()));
    hint_println(stdout, HINT_LAST_BUILD, &number_or_not_set(job.status().last_build));
    hint_println(
        stdout,
        HINT_NEXT_BUILD,
        &number_or_not_set(job.status().next_build_number),
    );
    hint_println(stdout, HINT_DESCRIPTION, &or_not_set(job.description()));
    hint_println(
        stdout,
        HINT_REPOSITORY,
        &if job.repository_urls().is_empty() {
            HINT_NOT_SET.to_string()
        } else {
            job.repository_urls().join(", ")
        },
    );
    hint_println(
        stdout,
        HINT_REPOSITORY_BROWSER,
        &or_not_set(job.repository_browser_location()),
    );

    hint_println(stdout, HINT_STRING_PARAMETERS, "");
    for param in job.string_parameters() {
        colored_println(
            stdout,
            ThemeColor::Main,
            &format!("  {} = {}", param.name, param.value),
        );
    }

    Ok(())
}

pub async fn cli_do_list(stdout: &mut Stdout, config: &AppConfig, active: bool) -> JobResult<()> {
    let client = get_client(config).await?;
    let names = if active {
        list_active_jobs(&client).await?
    } else {
        list_jobs(&client).await?
    };

    if names.is_empty() && active {
        colored_println(stdout, ThemeColor::Second, NO_ACTIVE_JOBS);
    }
    for name in names {
        colored_println(stdout, ThemeColor::Main, &name);
    }

    Ok(())
}

pub async fn cli_do_queue(stdout: &mut Stdout, config: &AppConfig) -> JobResult<()> {
    let client = get_client(config).await?;
    let names = query_build_queue(&client).await?.job_names();

    if names.is_empty() {
        colored_println(stdout, ThemeColor::Second, QUEUE_EMPTY);
    }
    for name in names {
        colored_println(stdout, ThemeColor::Main, &name);
    }

    Ok(())
}

/// Turn `[k1, v1, k2, v2, ...]` into a map.
pub fn pair_params(params: &[String]) -> JobResult<BTreeMap<String, String>> {
    if params.len() % 2 != 0 {
        return Err(JobError::Config(ERR_NEED_EVEN_PARAM.to_string()));
    }

    Ok(params
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect())
}

pub async fn cli_do_build(
    stdout: &mut Stdout,
    config: &AppConfig,
    name: &str,
    params: &[String],
    wait: bool,
) -> JobResult<()> {
    let overrides = pair_params(params)?;
    let mut job = load_job(config, name).await?;

    let accepted = job.build(&overrides).await?;
    print_accepted(stdout, "Build", accepted);

    if accepted && wait {
        let outcome = job
            .wait_for_build_to_finish(WaitOptions::every(config.poll_interval()))
            .await?;
        print_wait_outcome(stdout, job.name(), outcome);
    }

    Ok(())
}

pub async fn cli_do_wait(
    stdout: &mut Stdout,
    config: &AppConfig,
    name: &str,
    interval: Option<u64>,
    timeout: Option<u64>,
) -> JobResult<()> {
    let job = load_job(config, name).await?;

    let mut options = WaitOptions::every(
        interval
            .map(Duration::from_secs)
            .unwrap_or(config.poll_interval()),
    );
    if let Some(timeout) = timeout {
        options = options.with_deadline(Duration::from_secs(timeout));
    }

    let outcome = job.wait_for_build_to_finish(options).await?;
    print_wait_outcome(stdout, job.name(), outcome);
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum CliJobAction {
    Enable,
    Disable,
    Delete,
    Wipe,
}

pub async fn cli_do_action(
    stdout: &mut Stdout,
    config: &AppConfig,
    name: &str,
    action: CliJobAction,
) -> JobResult<()> {
    let job = load_job(config, name).await?;

    let (title, accepted) = match action {
        CliJobAction::Enable => ("Enable", job.enable().await?),
        CliJobAction::Disable => ("Disable", job.disable().await?),
        CliJobAction::Delete => ("Delete", job.delete().await?),
        CliJobAction::Wipe => ("Wipe out workspace", job.wipe_out_workspace().await?),
    };
    print_accepted(stdout, title, accepted);

    Ok(())
}

pub async fn cli_do_copy(
    stdout: &mut Stdout,
    config: &AppConfig,
    name: &str,
    to: Option<&str>,
) -> JobResult<()> {
    let job = load_job(config, name).await?;
    let copy = job.copy(to).await?;

    colored_println(
        stdout,
        ThemeColor::Success,
        &formatx!(JOB_COPIED, job.name(), copy.name()).unwrap_or_default(),
    );
    Ok(())
}

pub async fn cli_do_describe(
    stdout: &mut Stdout,
    config: &AppConfig,
    name: &str,
    description: &str,
) -> JobResult<()> {
    let mut job = load_job(config, name).await?;
    let accepted = job.set_description(description).await?;
    print_accepted(stdout, "Description update", accepted);
    Ok(())
}

pub async fn cli_do_set_repo(
    stdout: &mut Stdout,
    config: &AppConfig,
    name: &str,
    urls: &[String],
    browser: Option<&str>,
) -> JobResult<()> {
    let mut job = load_job(config, name).await?;

    match urls {
        [] => {}
        [url] => print_accepted(stdout, "Repository update", job.set_repository_url(url).await?),
        _ => print_accepted(
            stdout,
            "Repository update",
            job.set_repository_urls(urls).await?,
        ),
    }

    if let Some(browser) = browser {
        let accepted = job.set_repository_browser_location(browser).await?;
        print_accepted(stdout, "Repository browser update", accepted);
    }

    Ok(())
}

fn print_accepted(stdout: &mut Stdout, title: &str, accepted: bool) {
    if accepted {
        colored_println(
            stdout,
            ThemeColor::Success,
            &formatx!(REQUEST_ACCEPTED, title).unwrap_or_default(),
        );
    } else {
        colored_println(
            stdout,
            ThemeColor::Error,
            &formatx!(REQUEST_REJECTED, title).unwrap_or_default(),
        );
    }
}

fn print_wait_outcome(stdout: &mut Stdout, name: &str, outcome: WaitOutcome) {
    let (color, template) = match outcome {
        WaitOutcome::Finished { .. } => (ThemeColor::Success, WAIT_FINISHED),
        WaitOutcome::DeadlineReached { .. } => (ThemeColor::Warn, WAIT_DEADLINE_REACHED),
        WaitOutcome::Cancelled { .. } => (ThemeColor::Warn, WAIT_CANCELLED),
    };
    colored_println(
        stdout,
        color,
        &formatx!(template, name, outcome.ticks()).unwrap_or_default(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_params() {
        let params: Vec<String> = ["X", "1", "Y", "two words"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = pair_params(&params).unwrap();

        assert_eq!(map.get("X").map(String::as_str), Some("1"));
        assert_eq!(map.get("Y").map(String::as_str), Some("two words"));
    }

    #[test]
    fn test_pair_params_odd() {
        assert!(pair_params(&["X".to_string()]).is_err());
    }
}
