//! dev-diary: collect your recent git activity for daily summaries
//!
//! Scans the given repositories for commits you authored in the trailing
//! window and prints them, patches included, as a JSON report on stdout.

use anyhow::Context;
use clap::Parser;
use diary_git::{ActivityCollector, GitCli};
use tracing::{info, warn};

use dev_diary::config::Config;
use dev_diary::defaults::Environment;
use dev_diary::preferences::PreferenceStore;
use dev_diary::report::ActivityReport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    let store = PreferenceStore::default_location();
    let prefs = store.load().await;
    let env = Environment::capture();
    let settings = config
        .resolve(&prefs, &env)
        .context("invalid repository selection")?;

    info!(
        repos = settings.repositories.len(),
        days = settings.days,
        "collecting activity"
    );

    let collector = ActivityCollector::new(GitCli::new());
    let progress = |current: usize, total: usize, name: &str| {
        info!("[{current}/{total}] {name}");
    };
    let records = collector
        .aggregate_all(&settings.repositories, settings.days, Some(&progress))
        .await
        .context("failed to collect git activity")?;

    let report = ActivityReport::new(settings.days, settings.output_path.clone(), records);
    if report.is_empty() {
        warn!(days = settings.days, "no commits found in the selected window");
    } else {
        info!(
            repos = report.repositories.len(),
            commits = report.total_commits(),
            "activity collected"
        );
    }
    println!("{}", report.to_json()?);

    if config.remember {
        store.save(&settings.to_preferences(&prefs)).await;
    }

    Ok(())
}
