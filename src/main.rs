// Copyright 2026 Caption Relay Contributors
// SPDX-License-Identifier: Apache-2.0

//! caption-relay entry point.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use caption_relay::config::{self, PipelineConfig};
use caption_relay::http::RelayClient;
use caption_relay::pipeline;

#[derive(Parser)]
#[command(
    name = "caption-relay",
    about = "Scrape an image from a page, caption it with a vision model, and submit the result",
    version
)]
struct Cli {
    /// Source page to scrape for an image.
    #[arg(long, default_value = config::DEFAULT_PAGE_URL)]
    page_url: String,

    /// Chat-completions endpoint.
    #[arg(long, default_value = config::DEFAULT_INFERENCE_URL)]
    inference_url: String,

    /// Validation endpoint the model response is forwarded to.
    #[arg(long, default_value = config::DEFAULT_SUBMIT_URL)]
    submit_url: String,

    /// Model identifier sent to the inference endpoint.
    #[arg(long, default_value = config::DEFAULT_MODEL)]
    model: String,

    /// Instruction tag sent alongside the image.
    #[arg(long, default_value = config::DEFAULT_PROMPT)]
    prompt: String,

    /// Response length cap for the model.
    #[arg(long, default_value_t = config::DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Request timeout in seconds. The inference call gets double.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Bearer token for the inference and validation endpoints.
    /// Also read from the AUTH_TOKEN env var.
    #[arg(long)]
    token: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let token = config::resolve_token(cli.token.as_deref())?;

    let cfg = PipelineConfig {
        page_url: cli.page_url,
        inference_url: cli.inference_url,
        submit_url: cli.submit_url,
        token,
        model: cli.model,
        prompt: cli.prompt,
        max_tokens: cli.max_tokens,
        timeout: Duration::from_secs(cli.timeout),
        inference_timeout: config::inference_timeout(Duration::from_secs(cli.timeout)),
    };

    let client = RelayClient::new();

    if let Err(e) = pipeline::run(&client, &cfg).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("Pipeline complete: image scraped, captioned, and accepted by the validation endpoint.");
    println!("Next: confirm the graded result on the server dashboard before re-running.");
    Ok(())
}
