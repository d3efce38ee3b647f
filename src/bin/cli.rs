//! jobwatch CLI
//!
//! Runs the career page monitor and its diagnostics.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobwatch::{
    error::Result,
    models::Config,
    pipeline,
    services::{HttpFetcher, SmtpMailer},
    storage::{LocalStorage, StateStorage},
};

/// jobwatch - Career Page Change Monitor
#[derive(Parser, Debug)]
#[command(
    name = "jobwatch",
    version,
    about = "Mails an alert when the job listings of career pages change"
)]
struct Cli {
    /// Directory holding the site list, signature store and run artifacts
    #[arg(short, long, default_value = ".", global = true)]
    storage_dir: PathBuf,

    /// Path to config file (default: {storage_dir}/jobwatch.conf)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `run`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every listed site and mail an alert if any changed
    Run,

    /// Fetch a page and print the text between two markers
    Probe {
        /// Career page URL
        #[arg(long)]
        url: String,

        /// Text that starts the focus window
        #[arg(long)]
        begin: String,

        /// Text that ends the focus window
        #[arg(long)]
        end: String,
    },

    /// Print the fingerprint of a saved focus window (e.g. output of `probe`)
    Fingerprint {
        /// File holding the focus window text
        #[arg(long, value_name = "FILE")]
        intext: PathBuf,

        /// Keyword to fingerprint with (default: configured keyword)
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Validate configuration and site list
    Validate,

    /// Show storage locations and the last run
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .unwrap_or_else(|| cli.storage_dir.join("jobwatch.conf"));
    let config = Config::load_or_default(&config_path)?;
    log::debug!("Loaded configuration from {}", config_path.display());

    let storage = LocalStorage::new(&cli.storage_dir, config.paths.clone());

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            config.validate()?;
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let mailer = SmtpMailer::new(&config.mail)?;

            let report = pipeline::run_monitor(&config, &storage, &fetcher, &mailer).await?;
            for url in &report.changed {
                log::info!("    {}", url);
            }
        }

        Command::Probe { url, begin, end } => {
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let window = pipeline::run_probe(&fetcher, &url, &begin, &end).await?;
            // Raw bytes, so a saved window fingerprints like the monitor does.
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&window)?;
            stdout.write_all(b"\n")?;
        }

        Command::Fingerprint { intext, keyword } => {
            let keyword = keyword.unwrap_or_else(|| config.crawler.keyword.clone());
            let fp = pipeline::run_fingerprint_file(&intext, &keyword).await?;
            println!("{}", fp);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = pipeline::run_validate(&config, &storage).await {
                log::error!("Validation failed: {}", e);
                return Err(e);
            }
            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!("Config: {}", config_path.display());
            log::info!("Site list: {}", storage.sites_path().display());

            let store = storage.load_signatures().await?;
            log::info!(
                "Signature store: {} ({} sites)",
                storage.store_path().display(),
                store.len()
            );

            match storage.load_stats().await? {
                Some(stats) => {
                    log::info!(
                        "Last run: {} ({}s)",
                        stats.finished_at,
                        stats.duration_secs()
                    );
                    log::info!(
                        "    {} sites, {} changed, {} new, {} unreachable, alert {}",
                        stats.site_count,
                        stats.changed_count,
                        stats.new_count,
                        stats.fetch_failures,
                        if stats.notified { "sent" } else { "not sent" }
                    );
                }
                None => log::info!("No run recorded yet."),
            }
        }
    }

    Ok(())
}
