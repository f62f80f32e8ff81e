use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hf_chat::config::Config;
use hf_chat::transport::{self, cli::Connection};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the default API token
const API_KEY_ENV: &str = "HF_API_KEY";

#[derive(Parser)]
#[command(name = "hf-chat")]
#[command(author, version, about = "hf-chat - chat with hosted text-generation models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct EndpointArgs {
    /// Model identifier (e.g., HuggingFaceH4/zephyr-7b-beta)
    #[arg(short, long)]
    model: Option<String>,

    /// API token (defaults to $HF_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat, each message sent on its own
    Chat {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Interactive chat that includes recent exchanges in every prompt
    Converse {
        #[command(flatten)]
        endpoint: EndpointArgs,

        /// Number of previous exchanges to include in context
        #[arg(long)]
        history_length: Option<usize>,
    },

    /// Run the fixed question set and save the results report
    Test {
        #[command(flatten)]
        endpoint: EndpointArgs,

        /// Report file to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a saved results report
    Show {
        /// Report file to read
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl EndpointArgs {
    fn into_connection(self, config: &Config) -> Connection {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty());
        Connection::resolve(config, self.model, api_key)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "hf_chat=debug,llm=debug"
    } else {
        "hf_chat=info,llm=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config: {:#}", e);
            Config::default()
        }),
    };

    match cli.command {
        Commands::Chat { endpoint } => {
            let connection = endpoint.into_connection(&config);
            tracing::info!("Starting one-off chat with {}", connection.model);
            transport::cli::run_chat(&config, &connection).await?;
        }
        Commands::Converse {
            endpoint,
            history_length,
        } => {
            let connection = endpoint.into_connection(&config);
            tracing::info!("Starting contextual chat with {}", connection.model);
            transport::cli::run_converse(&config, &connection, history_length).await?;
        }
        Commands::Test { endpoint, output } => {
            let connection = endpoint.into_connection(&config);
            transport::cli::run_test(&config, &connection, output).await?;
        }
        Commands::Show { output } => {
            transport::cli::run_show(&config, output)?;
        }
    }

    Ok(())
}
