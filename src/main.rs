use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use healthcheck::app::App;
use healthcheck::config::{Config, load_config, load_config_from_path};
use healthcheck::logging;
use healthcheck::mail::SmtpMailer;
use healthcheck::menu;
use healthcheck::scheduler::PeriodicScheduler;
use healthcheck::system::collector::SysinfoProvider;

#[derive(Parser)]
#[command(
    name = "healthcheck",
    about = "Interactive host health check with scheduled email reports"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hours between emailed reports
    #[arg(long)]
    interval_hours: Option<u64>,

    /// Log filter, e.g. `info` or `healthcheck=debug`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let dotenv = dotenvy::dotenv();
    let mut config = load_config_for_cli(&cli);

    logging::init(&config.logging.level)?;
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to read .env"),
    }
    config.apply_env(|key| std::env::var(key).ok());

    let missing = config.mail.missing_settings();
    if !missing.is_empty() {
        warn!(?missing, "mail settings incomplete, report delivery will fail");
    }

    let provider = Arc::new(SysinfoProvider::new(&config.general));
    let mailer = Arc::new(SmtpMailer::new(config.mail.clone()));
    let scheduler = PeriodicScheduler::new(Handle::current());
    let mut app = App::new(&config, provider, mailer, scheduler);

    // Stdin reads block, so the menu runs off the runtime thread and the
    // report loop keeps ticking underneath it.
    tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        menu::run(&mut app, stdin.lock(), io::stdout())
    })
    .await
    .map_err(|e| eyre!("menu task failed: {e}"))??;

    info!("exiting");
    // Do not wait for an in-flight report.
    std::process::exit(0)
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(hours) = cli.interval_hours {
        config.schedule.interval_hours = hours;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    config
}
