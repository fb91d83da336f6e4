//! kdash - An interactive terminal dashboard for Kafka topics
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use kdash_app::{build_report, list_topic_summaries, load_settings, AppState, Settings};
use kdash_broker::KafkaClient;
use kdash_core::prelude::*;
use kdash_core::{format_report, logging};

/// kdash - An interactive terminal dashboard for Kafka topics
#[derive(Parser, Debug)]
#[command(name = "kdash", version)]
#[command(about = "An interactive terminal dashboard for Kafka topics", long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Args {
    /// Comma-separated broker addresses (host:port)
    #[arg(short, long, global = true, value_delimiter = ',', value_name = "BROKERS")]
    brokers: Vec<String>,

    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Browse topics in the interactive dashboard
    List,

    /// Print the report for one topic and exit
    Describe {
        topic: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    logging::init()?;

    let settings = load_settings(args.config.as_deref()).with_broker_override(&args.brokers);
    info!("Brokers: {}", settings.broker.brokers.join(","));

    let result = match args.command {
        Command::List => run_list(settings).await,
        Command::Describe { topic, output } => run_describe(settings, &topic, output).await,
    };

    if let Err(e) = result {
        error!("kdash failed: {:?}", e);
        eprintln!("{}", diagnostic(&e));
        if let Ok(path) = logging::get_current_log_file() {
            eprintln!("See {} for details", path.display());
        }
        std::process::exit(1);
    }

    info!("kdash exiting");
    Ok(())
}

/// Message printed to stderr before exiting nonzero
fn diagnostic(e: &Error) -> String {
    if e.is_fatal() {
        format!("Startup failed: {e}")
    } else if e.is_recoverable() {
        format!("Error: {e}\nRun the command again to retry.")
    } else {
        format!("Error: {e}")
    }
}

/// Startup listing, then the dashboard. No terminal setup happens unless the
/// broker answered.
async fn run_list(settings: Settings) -> Result<()> {
    let client = KafkaClient::connect(settings.broker.connection_config()).await?;
    let topics = list_topic_summaries(&client).await?;

    let options = settings.broker.fetch_options();
    let state = AppState::with_topics(settings, topics);
    kdash_tui::run_dashboard(Arc::new(client), state, options).await
}

async fn run_describe(settings: Settings, topic: &str, output: OutputFormat) -> Result<()> {
    let client = KafkaClient::connect(settings.broker.connection_config()).await?;
    let report = build_report(&client, topic, &settings.broker.fetch_options()).await?;

    match output {
        OutputFormat::Text => print!("{}", format_report(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_shows_help() {
        let err = Args::try_parse_from(["kdash"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_list_with_comma_separated_brokers() {
        let args = Args::try_parse_from(["kdash", "-b", "a:9092,b:9092", "list"]).unwrap();
        assert_eq!(args.brokers, vec!["a:9092", "b:9092"]);
        assert_eq!(args.command, Command::List);
    }

    #[test]
    fn test_brokers_flag_is_global() {
        let args = Args::try_parse_from(["kdash", "list", "--brokers", "k1:9092"]).unwrap();
        assert_eq!(args.brokers, vec!["k1:9092"]);
    }

    #[test]
    fn test_brokers_default_to_empty() {
        let args = Args::try_parse_from(["kdash", "list"]).unwrap();
        assert!(args.brokers.is_empty());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_describe_defaults_to_text() {
        let args = Args::try_parse_from(["kdash", "describe", "orders"]).unwrap();
        assert_eq!(
            args.command,
            Command::Describe {
                topic: "orders".into(),
                output: OutputFormat::Text
            }
        );
    }

    #[test]
    fn test_describe_json_output() {
        let args =
            Args::try_parse_from(["kdash", "describe", "orders", "--output", "json"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Describe {
                output: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_startup_errors_are_reported_as_startup_failures() {
        let e = Error::connection_failed(&["k1:9092".to_string()], "refused");
        let text = diagnostic(&e);
        assert!(text.starts_with("Startup failed: Cannot connect to brokers k1:9092"));

        let e = Error::topic_list_failed("metadata timeout");
        assert!(diagnostic(&e).starts_with("Startup failed: "));
    }

    #[test]
    fn test_fetch_errors_suggest_retry() {
        let e = Error::config_fetch_failed("orders", "timed out");
        let text = diagnostic(&e);
        assert!(text.starts_with("Error: Failed to fetch configuration for topic 'orders'"));
        assert!(text.contains("Run the command again"));
    }

    #[test]
    fn test_other_errors_are_plain() {
        let e = Error::config("unreadable");
        assert_eq!(diagnostic(&e), "Error: Configuration error: unreadable");
    }

    #[test]
    fn test_describe_requires_topic() {
        assert!(Args::try_parse_from(["kdash", "describe"]).is_err());
    }
}
