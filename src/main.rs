use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use palaver::core::config::{CliOverrides, load_config, resolve};
use palaver::endpoint::{Endpoint, HttpEndpoint};
use palaver::{oneshot, tui};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "palaver", about = "Terminal chat client for a single-reply chat endpoint")]
struct Args {
    /// Endpoint base URL (overrides config file and PALAVER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request deadline in seconds, 0 for none (overrides PALAVER_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Send this message, print the reply and exit
    #[arg(short, long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to palaver.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("palaver.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().unwrap_or_else(|e| {
        log::warn!("Config error, using defaults: {}", e);
        Default::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        timeout_secs: args.timeout_secs,
    };
    let config = resolve(&file_config, &cli);

    log::info!("Palaver starting up against {}", config.base_url);

    let endpoint = HttpEndpoint::new(config.base_url.clone(), config.request_timeout)
        .map_err(std::io::Error::other)?;

    if let Some(message) = args.message {
        return match oneshot::send_once(&endpoint, &message).await {
            Ok(reply) => {
                println!("{reply}");
                Ok(())
            }
            Err(notice) => {
                eprintln!("{notice}");
                std::process::exit(1);
            }
        };
    }

    let endpoint: Arc<dyn Endpoint> = Arc::new(endpoint);
    tui::run(config, endpoint)
}
