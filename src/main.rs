use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use recap::{
    api::ApiServer,
    config::Config,
    mailer::SmtpMailer,
    summarizer::GroqSummarizer,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "recap", version, about = "Meeting summary relay service")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Listen port (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let port = cli.port.unwrap_or(config.server.port);

    let summarizer = Arc::new(GroqSummarizer::new(config.groq.api_key.clone(), None));
    let mailer = Arc::new(SmtpMailer::new(&config.smtp)?);

    ApiServer::new(port, summarizer, mailer).start().await
}
