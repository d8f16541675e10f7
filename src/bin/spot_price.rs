//! Local entry point: print the spot price as text or SSML, or run a skill
//! envelope through the handler.
//!
//! ```bash
//! spot-price text
//! spot-price --region FI cheapest --ssml
//! echo '{"request":{"type":"LaunchRequest"}}' | spot-price invoke -
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spot_price_skill::client::SpotPriceClient;
use spot_price_skill::domain::price::schedule::RUN_THRESHOLD_CENTS;
use spot_price_skill::network::{DEFAULT_API_URL, DEFAULT_REGION, DEFAULT_TIMEOUT_SECS};
use spot_price_skill::{skill, speech};

#[derive(Parser)]
#[command(author, version, about = "Electricity spot price as text or speech")]
struct Cli {
    #[command(flatten)]
    upstream: UpstreamArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args)]
struct UpstreamArgs {
    /// Pricing API base URL
    #[arg(long, env = "SPOT_PRICE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Price region code
    #[arg(long, env = "SPOT_PRICE_REGION", default_value = DEFAULT_REGION, global = true)]
    region: String,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    /// Cents per kWh at or below which an hour counts as cheap
    #[arg(long, default_value_t = RUN_THRESHOLD_CENTS, global = true)]
    threshold: f64,
}

#[derive(Subcommand)]
enum Command {
    /// Current price and the next three hours, as plain text
    Text,

    /// Current price and the next three hours, as SSML
    Ssml,

    /// Cheapest remaining hour today
    Cheapest {
        #[arg(long)]
        ssml: bool,
    },

    /// Whether now is a good time to run a three-hour cycle
    RunWindow {
        #[arg(long)]
        ssml: bool,
    },

    /// Handle a skill request envelope read from a JSON file ("-" for stdin)
    Invoke { event: PathBuf },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_event(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read event from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?
    };
    serde_json::from_str(&raw).context("event is not valid JSON")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let client = SpotPriceClient::builder()
        .base_url(&cli.upstream.api_url)
        .region(&cli.upstream.region)
        .timeout_secs(cli.upstream.timeout_secs)
        .run_threshold_cents(cli.upstream.threshold)
        .build()?;
    let client = spot_price_skill::init_global(client)?;

    match cli.cmd {
        Command::Text => println!("{}", spot_price_skill::spot_price_text().await?),
        Command::Ssml => println!("{}", spot_price_skill::spot_price_ssml().await?),
        Command::Cheapest { ssml } => {
            let cheapest = client.prices().cheapest_today().await?;
            let out = if ssml {
                speech::format_cheapest_speech(cheapest.as_ref())?
            } else {
                speech::format_cheapest_plain(cheapest.as_ref())?
            };
            println!("{}", out);
        }
        Command::RunWindow { ssml } => {
            let advice = client.prices().run_window().await?;
            let threshold = client.run_threshold_cents();
            let out = if ssml {
                speech::format_run_window_speech(&advice, threshold)?
            } else {
                speech::format_run_window_plain(&advice, threshold)?
            };
            println!("{}", out);
        }
        Command::Invoke { event } => {
            let event = read_event(&event)?;
            let response = skill::handle_value(client, event).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_event_missing_file_names_path() {
        let err = read_event(Path::new("/nonexistent/event.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/event.json"));
    }

    #[test]
    fn test_invoke_accepts_stdin_marker() {
        let cli = Cli::try_parse_from(["spot-price", "--region", "EE", "invoke", "-"]).unwrap();
        assert_eq!(cli.upstream.region, "EE");
        match cli.cmd {
            Command::Invoke { event } => assert_eq!(event.as_path(), Path::new("-")),
            _ => panic!("expected invoke"),
        }
    }
}
