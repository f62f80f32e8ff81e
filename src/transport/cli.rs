//! CLI transport for direct terminal interaction
//!
//! Turns resolved flags and config into providers, then hands stdin/stdout
//! to the session loop or the batch harness.

use crate::config::Config;
use crate::conversation::{Session, SessionMode};
use crate::harness::{report, run_batch, DEFAULT_QUESTIONS};
use crate::llm::{HfInferenceProvider, TextPolicy};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Endpoint settings the CLI layer resolved from flags, environment and config
#[derive(Debug, Clone)]
pub struct Connection {
    pub model: String,
    pub api_key: Option<String>,
}

impl Connection {
    /// Flags win over config; the key is whatever the caller resolved
    pub fn resolve(config: &Config, model: Option<String>, api_key: Option<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| config.inference.model.clone()),
            api_key,
        }
    }
}

fn build_provider(
    config: &Config,
    connection: &Connection,
    timeout: Duration,
    policy: TextPolicy,
) -> HfInferenceProvider {
    if connection.api_key.is_none() {
        tracing::warn!("No API key configured; sending unauthenticated requests");
    }
    HfInferenceProvider::new(connection.model.as_str(), timeout)
        .with_base_url(&config.inference.base_url)
        .with_api_key(connection.api_key.clone())
        .with_text_policy(policy)
}

/// Provider for one-off chats and batch runs: long timeout, text untouched
fn one_off_provider(config: &Config, connection: &Connection) -> HfInferenceProvider {
    build_provider(
        config,
        connection,
        config.inference.one_off_timeout(),
        TextPolicy::Verbatim,
    )
}

/// Provider for contextual chats: short timeout, text trimmed
fn contextual_provider(config: &Config, connection: &Connection) -> HfInferenceProvider {
    build_provider(
        config,
        connection,
        config.inference.contextual_timeout(),
        TextPolicy::Trim,
    )
}

/// Interactive chat where every line is sent on its own
pub async fn run_chat(config: &Config, connection: &Connection) -> Result<()> {
    let provider = one_off_provider(config, connection);
    Session::new(&provider, SessionMode::OneOff)
        .with_exit_word(&config.session.exit_word)
        .run(io::stdin().lock(), io::stdout().lock())
        .await?;
    Ok(())
}

/// Interactive chat that carries the last `history_length` exchanges
pub async fn run_converse(
    config: &Config,
    connection: &Connection,
    history_length: Option<usize>,
) -> Result<()> {
    let window = history_length.unwrap_or(config.session.history_length);
    let provider = contextual_provider(config, connection);
    Session::new(&provider, SessionMode::Contextual { window })
        .with_exit_word(&config.session.exit_word)
        .run(io::stdin().lock(), io::stdout().lock())
        .await?;
    Ok(())
}

/// Run the fixed question set, save the report, and print it back
pub async fn run_test(
    config: &Config,
    connection: &Connection,
    output: Option<PathBuf>,
) -> Result<()> {
    let path = output.unwrap_or_else(|| config.harness.report_path.clone());
    let provider = one_off_provider(config, connection);

    let results = run_batch(&provider, &DEFAULT_QUESTIONS, io::stdout().lock()).await?;

    println!("{}", "Finished calling model. Results:".bold());
    print!("{}", results);

    report::write(&results, &path)?;
    print_report(&path)
}

/// Print a saved report verbatim
pub fn run_show(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| config.harness.report_path.clone());
    print_report(&path)
}

fn print_report(path: &Path) -> Result<()> {
    let contents = report::read(path)?;
    println!("\n{}", "--- File Contents ---".bold().cyan());
    let mut stdout = io::stdout().lock();
    stdout.write_all(&contents)?;
    stdout.flush()?;
    Ok(())
}
