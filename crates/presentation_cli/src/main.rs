//! Voice relay CLI
//!
//! Operator commands: inspect voices, dry-run classification and
//! synthesize audio locally or through a running server.

#![allow(clippy::print_stdout)]

mod cli;

use std::path::Path;

use anyhow::Context;
use application::RelayService;
use clap::Parser;
use domain::{SpeechProviderKind, SynthesisRequest};
use futures::{Stream, StreamExt};
use infrastructure::{AppConfig, LogFormat, build_relay_service, init_logging};
use tokio::io::AsyncWriteExt;

use cli::{Cli, Commands, endpoint_url, log_filter_from_verbosity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LogFormat::Text, log_filter_from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Status { url } => {
            let resp = reqwest::Client::new()
                .get(endpoint_url(&url, "/health"))
                .send()
                .await?
                .error_for_status()?
                .json::<serde_json::Value>()
                .await?;

            println!("Server status:");
            println!("{}", serde_json::to_string_pretty(&resp)?);
        },

        Commands::Voices { provider, json } => {
            let relay = relay(cli.config.as_deref())?;
            let filter = provider.map(SpeechProviderKind::from);

            let catalog: Vec<_> = relay
                .voice_catalog()
                .await?
                .into_iter()
                .filter(|entry| filter.is_none_or(|p| p == entry.provider))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
                return Ok(());
            }

            for entry in catalog {
                println!("== {} ==", entry.provider);
                println!("Default voice: {}", entry.default_voice);
                for (sender, voice) in &entry.senders {
                    println!("  {sender:<12} -> {voice}");
                }
                println!("Available voices ({}):", entry.voices.len());
                for voice in &entry.voices {
                    let accent = voice.accent.as_deref().unwrap_or("-");
                    let description = voice.description.as_deref().unwrap_or("-");
                    println!("  {:<40} {:<24} {accent:<12} {description}", voice.id, voice.name);
                }
                println!();
            }
        },

        Commands::Classify { text, sender } => {
            let relay = relay(cli.config.as_deref())?;
            let request = SynthesisRequest::new(text, sender)?;
            let plan = relay.plan(&request).await;

            println!("Dialect:        {}", plan.classification.dialect);
            println!("Classification: {}", plan.classification.source.as_str());
            println!("Rendered text:  {}", plan.classification.rendered_text);
            println!("Provider:       {}", plan.decision.provider);
            println!("Voice:          {}", plan.decision.voice_id);
        },

        Commands::Speak {
            text,
            sender,
            output,
        } => {
            let relay = relay(cli.config.as_deref())?;
            let request = SynthesisRequest::new(text, sender)?;
            let outcome = relay.relay(&request).await?;

            println!(
                "{} via {} (voice {})",
                outcome.classification.dialect, outcome.decision.provider, outcome.decision.voice_id
            );

            let written = write_stream(&output, outcome.audio.chunks).await?;
            println!("Wrote {written} bytes to {}", output.display());
        },

        Commands::Generate {
            text,
            sender,
            output,
            url,
        } => {
            let resp = reqwest::Client::new()
                .post(endpoint_url(&url, "/generate-audio"))
                .json(&serde_json::json!({ "text": text, "sender": sender }))
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                anyhow::bail!("Server returned {status}: {body}");
            }

            let header = |name: &str| {
                resp.headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-")
                    .to_string()
            };
            println!(
                "{} via {} ({})",
                header("x-dialect"),
                header("x-speech-provider"),
                header("x-classification")
            );

            let written = write_stream(&output, Box::pin(resp.bytes_stream())).await?;
            println!("Wrote {written} bytes to {}", output.display());
        },
    }

    Ok(())
}

/// Load configuration and build the relay pipeline
fn relay(config_path: Option<&Path>) -> anyhow::Result<RelayService> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    build_relay_service(&config).context("Failed to initialize relay")
}

/// Drain a chunk stream into `path`, returning the number of bytes written
async fn write_stream<S, B, E>(path: &Path, mut chunks: S) -> anyhow::Result<usize>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut written = 0;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        file.write_all(chunk.as_ref()).await?;
        written += chunk.as_ref().len();
    }
    file.flush().await?;

    Ok(written)
}
