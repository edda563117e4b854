//! CLI binary for vodcast.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vodcast::{PodcastConfig, PodcastPipeline, PodcastRequest};

/// Turn a video URL into a two-voice commentary podcast.
#[derive(Parser)]
#[command(name = "vodcast", version, about)]
struct Cli {
    /// Source video URL.
    url: String,

    /// Name of the male speaker in the invented conversation.
    #[arg(long, default_value = "sam")]
    male_name: String,

    /// Name of the female speaker in the invented conversation.
    #[arg(long, default_value = "jane")]
    female_name: String,

    /// Maximum summary length, in sentences.
    #[arg(long, default_value_t = 10)]
    max_summary_length: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vodcast=info")),
        )
        .init();

    let cli = Cli::parse();

    // Credentials are validated before any pipeline work begins.
    let config = PodcastConfig::from_env()?;

    let request = PodcastRequest {
        url: cli.url,
        male_name: cli.male_name,
        female_name: cli.female_name,
        max_summary_length: cli.max_summary_length,
    };

    let pipeline = PodcastPipeline::new(config)?;
    let output = pipeline.run(&request).await?;
    println!("{}", output.display());
    Ok(())
}
