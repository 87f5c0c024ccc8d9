use clap::{ArgGroup, Parser, Subcommand};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::history::HistoryOptions;

#[derive(Parser, Debug)]
#[command(
    name = "provenant",
    version,
    about = "Check training-crawler permissions and keep a provenance trail"
)]
struct Cli {
    /// Configuration file (YAML). Defaults to ./provenant.yaml when present.
    #[arg(long, global = true, env = "PROVENANT_CONFIG")]
    config: Option<PathBuf>,

    /// Provenance log file, overriding audit.path from the configuration.
    #[arg(long, global = true, env = "PROVENANT_LOG")]
    log: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether the crawler may access a URL and record the decision.
    Check {
        /// URL to check. Defaults to target_url from the configuration.
        url: Option<String>,

        /// Print the provenance record as JSON instead of the summary line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show recorded decisions, newest first.
    #[command(group(ArgGroup::new("verdict").args(["allowed", "denied"])))]
    History {
        /// Only records for this exact URL.
        #[arg(long)]
        url: Option<String>,

        /// Only allowed decisions.
        #[arg(long, default_value_t = false)]
        allowed: bool,

        /// Only denied decisions.
        #[arg(long, default_value_t = false)]
        denied: bool,

        /// Only records checked at or after this RFC 3339 time.
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        /// Only records checked at or before this RFC 3339 time.
        #[arg(long)]
        until: Option<DateTime<Utc>>,

        /// Maximum number of records to show.
        #[arg(long)]
        limit: Option<usize>,

        /// Print raw JSON lines.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the directives extracted from a local directive document.
    Directives {
        /// Path to a robots.txt-style file.
        file: PathBuf,

        /// Also evaluate this request path (e.g. /blog/article1).
        #[arg(long)]
        path: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref(), cli.log)?;

    match cli.cmd {
        Command::Check { url, json } => commands::check::run(&config, url, json).await?,

        Command::History {
            url,
            allowed,
            denied,
            since,
            until,
            limit,
            json,
        } => {
            let allowed = match (allowed, denied) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = HistoryOptions {
                url,
                allowed,
                since,
                until,
                limit,
                json,
            };
            commands::history::run(&config, options).await?
        }

        Command::Directives { file, path } => {
            commands::directives::run(&config, &file, path.as_deref())?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["provenant", "check", "https://example.com/a", "--json"]).unwrap();
        match cli.cmd {
            Command::Check { url, json } => {
                assert_eq!(url.as_deref(), Some("https://example.com/a"));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_allowed_and_denied_conflict() {
        assert!(Cli::try_parse_from(["provenant", "history", "--allowed", "--denied"]).is_err());
    }

    #[test]
    fn test_parse_history_since() {
        let cli = Cli::try_parse_from(["provenant", "history", "--since", "2024-05-01T00:00:00Z"]).unwrap();
        match cli.cmd {
            Command::History { since, .. } => assert!(since.is_some()),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
