mod analyze;
mod model;
mod notify;
mod report;
mod tracker;
mod utils;

use crate::analyze::{MilestoneFilter, VelocityCollector};
use crate::notify::slack::SlackWebhook;
use crate::report::markdown::MarkdownReport;
use crate::report::slack::{sorted_velocity, SlackMessage};
use crate::tracker::github::GithubClient;
use crate::tracker::IssueTracker;
use crate::utils::{MultiProgressNew, ProgressStyleTemplate};
use clap::Parser;
use indexmap::IndexMap;
use indicatif::{MultiProgress, ProgressBar};
use model::{merge_all, Config, Repository, Result, VelocityError, VelocityMap};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(about = "Posts story point velocity per milestone to the team channel")]
struct Args {
    #[arg(long = "config", default_value = "config.json")]
    config_path: PathBuf,
    /// Report a single milestone (exact title) instead of every open one
    #[arg(long = "milestone")]
    milestone: Option<String>,
    /// Also write a Markdown report to this path
    #[arg(long = "markdown")]
    markdown_path: Option<PathBuf>,
    /// Print the message without posting it
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args).await {
        error!(error = %e, "velocity report failed");
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = Config::from_config(&args.config_path)?;
    info!(
        repositories = config.repositories.len(),
        api = %config.github_api_url,
        "loaded config"
    );

    let tracker = GithubClient::new(&config.github_api_url, &config.github_token)?;
    let webhook = SlackWebhook::new(&config.slack_webhook_url)?;
    let filter = match &args.milestone {
        Some(title) => MilestoneFilter::Title(title.clone()),
        None => MilestoneFilter::AllOpen,
    };

    let velocity = collect_all(&tracker, &config.repositories, &filter).await?;
    let sorted = sorted_velocity(velocity);
    let printable = sorted.iter().cloned().collect::<IndexMap<_, _>>();
    println!("{}", serde_json::to_string_pretty(&printable)?);

    let message = sorted.message(&config.slack_team_id);
    println!("{message}");

    if let Some(path) = &args.markdown_path {
        sorted.report_create(&config.slack_team_id, path)?;
        info!(path = %path.display(), "markdown report written");
    }

    if args.dry_run {
        info!("dry run, message not sent");
        return Ok(());
    }
    webhook.send(&message).await
}

/// Collects every repository in order and folds the results, the first
/// repository seeding the accumulator.
async fn collect_all<T: IssueTracker>(
    tracker: &T,
    repos: &[Repository],
    filter: &MilestoneFilter,
) -> Result<VelocityMap> {
    let multi_progress = MultiProgress::default();
    let mut velocities = Vec::with_capacity(repos.len());

    for repo in repos {
        let pb = multi_progress.add_with_style(
            ProgressBar::new_spinner(),
            ProgressStyleTemplate::elapsed_message(),
        );
        let progress_pb = pb.clone();
        let name = repo.to_string();
        let progress = move |step: &str| progress_pb.set_message(format!("{name}: {step}"));

        let velocity = match repo.collect_velocity(tracker, filter, Box::new(progress)).await {
            Ok(velocity) => velocity,
            Err(e) => {
                pb.abandon_with_message(format!("❌ {repo}"));
                return Err(e);
            }
        };
        pb.finish_with_message(format!(
            "✅ {repo} (find {} milestones)",
            velocity.len()
        ));
        info!(repo = %repo, milestones = velocity.len(), "collected velocity");
        velocities.push(velocity);
    }

    merge_all(velocities)
        .ok_or_else(|| VelocityError::Config("no target repositories configured".into()))
}
