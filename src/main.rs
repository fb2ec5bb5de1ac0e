mod cli;

use crate::cli::*;
use clap::{Parser, Subcommand};
use jenkins_job_sync::app_config::AppConfig;
use jenkins_job_sync::pretty_log::{colored_println, ThemeColor};
use jenkins_job_sync::{logging, JobResult};
use std::io::stdout;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name="jjs",
  author,
  version,
  about(env!("CARGO_PKG_DESCRIPTION")),
  long_about=None,
  arg_required_else_help=true
)]
struct Cli {
    /// config file to use instead of ~/.jjs-config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the Jenkins url and credentials.
    Login {
        /// Jenkins root URL.
        #[arg(long)]
        url: Option<String>,

        /// Username like "somebody@email.com"
        #[arg(short, long)]
        username: Option<String>,

        /// API token from Jenkins.
        /// See also: https://www.jenkins.io/doc/book/using/remote-access-api/
        #[arg(short, long)]
        api_token: Option<String>,
    },
    /// Show the saved config.
    Config,
    /// Show status, string parameters and config fields of a job.
    Show {
        job_name: String,

        /// print as json.
        #[arg(long)]
        json: bool,
    },
    /// List jobs.
    List {
        /// only jobs that are building.
        #[arg(long)]
        active: bool,
    },
    /// List queued jobs.
    Queue,
    /// Trigger a build.
    Build {
        job_name: String,

        /// override a string parameter.
        #[arg(short, long = "param", num_args = 2, value_names = ["KEY", "VALUE"])]
        param: Vec<String>,

        /// wait for the build to finish.
        #[arg(short, long)]
        wait: bool,
    },
    /// Wait until a job is neither building nor queued.
    Wait {
        job_name: String,

        /// seconds between two checks.
        #[arg(short, long)]
        interval: Option<u64>,

        /// give up after this many seconds of waiting.
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Enable a job.
    Enable { job_name: String },
    /// Disable a job.
    Disable { job_name: String },
    /// Delete a job.
    Delete { job_name: String },
    /// Wipe out the workspace of a job once its builds are done.
    Wipe { job_name: String },
    /// Copy a job.
    Copy {
        job_name: String,

        /// name of the copy. default: copy_of_<job_name>
        #[arg(long)]
        to: Option<String>,
    },
    /// Set the description of a job.
    Describe {
        job_name: String,

        description: String,
    },
    /// Set the repository of a job.
    SetRepo {
        job_name: String,

        /// repository url, one per module location.
        #[arg(short, long = "url")]
        url: Vec<String>,

        /// repository browser location.
        #[arg(short, long)]
        browser: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    if let Some(command) = cli.command {
        if let Err(err) = main_cli(cli.config, command).await {
            colored_println(&mut stdout(), ThemeColor::Error, &err.to_string());
            std::process::exit(1);
        }
    }
}

async fn main_cli(config_path: Option<PathBuf>, command: Commands) -> JobResult<()> {
    let mut stdout = stdout();
    let config_path = match config_path {
        Some(path) => path,
        None => AppConfig::default_path()?,
    };
    let config = AppConfig::load(Some(&config_path));

    match command {
        Commands::Login {
            url,
            username,
            api_token,
        } => cli_do_login(&mut stdout, &config_path, url, username, api_token),
        Commands::Config => {
            cli_do_config(&mut stdout, &config);
            Ok(())
        }
        Commands::Show { job_name, json } => {
            cli_do_show(&mut stdout, &config, &job_name, json).await
        }
        Commands::List { active } => cli_do_list(&mut stdout, &config, active).await,
        Commands::Queue => cli_do_queue(&mut stdout, &config).await,
        Commands::Build {
            job_name,
            param,
            wait,
        } => cli_do_build(&mut stdout, &config, &job_name, &param, wait).await,
        Commands::Wait {
            job_name,
            interval,
            timeout,
        } => cli_do_wait(&mut stdout, &config, &job_name, interval, timeout).await,
        Commands::Enable { job_name } => {
            cli_do_action(&mut stdout, &config, &job_name, CliJobAction::Enable).await
        }
        Commands::Disable { job_name } => {
            cli_do_action(&mut stdout, &config, &job_name, CliJobAction::Disable).await
        }
        Commands::Delete { job_name } => {
            cli_do_action(&mut stdout, &config, &job_name, CliJobAction::Delete).await
        }
        Commands::Wipe { job_name } => {
            cli_do_action(&mut stdout, &config, &job_name, CliJobAction::Wipe).await
        }
        Commands::Copy { job_name, to } => {
            cli_do_copy(&mut stdout, &config, &job_name, to.as_deref()).await
        }
        Commands::Describe {
            job_name,
            description,
        } => cli_do_describe(&mut stdout, &config, &job_name, &description).await,
        Commands::SetRepo {
            job_name,
            url,
            browser,
        } => cli_do_set_repo(&mut stdout, &config, &job_name, &url, browser.as_deref()).await,
    }
}
