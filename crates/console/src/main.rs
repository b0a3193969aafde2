use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "botdesk", about = "Terminal admin console for the messaging bot", version)]
struct Args {
    /// Backend base URL (overrides the config file).
    #[arg(long)]
    server: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to an alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging();

    let mut config = match &args.config {
        Some(path) => botdesk_console::config::load_from(path),
        None => botdesk_console::config::load(),
    };
    if let Some(server) = args.server {
        config.server.url = server;
    }
    if let Some(timeout) = args.timeout_secs {
        config.server.timeout_secs = timeout;
    }

    botdesk_console::run(config)
}

/// Log to a file under the config directory; stdout belongs to the terminal UI.
fn init_logging() {
    let Ok(dir) = botdesk_console::config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("console.log"))
    else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("botdesk_console=debug".parse().unwrap_or_default())
        .add_directive("botdesk_api_client=info".parse().unwrap_or_default())
        .add_directive(tracing::Level::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init();
}
