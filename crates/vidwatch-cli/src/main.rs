mod analyze;
mod fetch;
mod status;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vidwatch-cli")]
#[command(about = "Vidwatch channel analytics command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch channel videos from the YouTube API into the store
    Fetch {
        /// Channel handle to fetch (overrides YOUTUBE_CHANNEL_HANDLE)
        #[arg(long)]
        handle: Option<String>,

        /// Resolve the channel without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the analytics pipeline and print a report
    Analyze {
        /// Emit the full result bundle as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Show store contents and the latest fetch run
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = vidwatch_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = vidwatch_db::PoolConfig::from_app_config(&config);
    let pool = vidwatch_db::connect_pool(&config.database_url, pool_config).await?;
    vidwatch_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Fetch { handle, dry_run } => {
            fetch::run_fetch(&pool, &config, handle.as_deref(), dry_run).await
        }
        Commands::Analyze { json } => analyze::run_analyze(&pool, &config, json).await,
        Commands::Status => status::run_status(&pool).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn parses_fetch_defaults() {
        let cli = Cli::try_parse_from(["vidwatch-cli", "fetch"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Fetch {
                handle: None,
                dry_run: false,
            }
        ));
    }

    #[test]
    fn parses_fetch_with_handle() {
        let cli =
            Cli::try_parse_from(["vidwatch-cli", "fetch", "--handle", "@somechannel"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Fetch {
                handle: Some(ref h),
                dry_run: false,
            } if h == "@somechannel"
        ));
    }

    #[test]
    fn parses_fetch_dry_run() {
        let cli = Cli::try_parse_from(["vidwatch-cli", "fetch", "--dry-run"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Fetch { dry_run: true, .. }
        ));
    }

    #[test]
    fn parses_analyze_defaults() {
        let cli = Cli::try_parse_from(["vidwatch-cli", "analyze"]).unwrap();
        assert!(matches!(cli.command, Commands::Analyze { json: false }));
    }

    #[test]
    fn parses_analyze_json() {
        let cli = Cli::try_parse_from(["vidwatch-cli", "analyze", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Analyze { json: true }));
    }

    #[test]
    fn parses_status() {
        let cli = Cli::try_parse_from(["vidwatch-cli", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["vidwatch-cli"]).is_err());
    }
}
