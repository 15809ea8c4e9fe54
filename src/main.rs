use clap::Parser;
use tracing_subscriber::EnvFilter;

use charla::core::app::App;
use charla::core::config::Config;
use charla::ui::chat_loop::run_chat;
use charla::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "charla")]
#[command(about = "A terminal chat interface for a self-hosted chat backend")]
#[command(long_about = "Charla is a full-screen terminal chat interface that talks to a single \
self-hosted chat endpoint. Each message is sent as an HTTP POST and the \
reply is shown in the transcript.\n\n\
Environment Variables:\n\
  CHARLA_ENDPOINT    Chat endpoint URL (overrides the config file)\n\
  CHARLA_DEBUG_LOG   Write diagnostic logs to this file\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a line break\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+C            Quit")]
struct Args {
    /// Chat endpoint URL (overrides config and environment)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Log the transcript to this file
    #[arg(short, long)]
    log: Option<String>,

    /// UI theme name ("dark" or "light")
    #[arg(short, long)]
    theme: Option<String>,
}

/// Route tracing output to a file when CHARLA_DEBUG_LOG is set. The terminal
/// runs in raw mode, so diagnostics never go to stderr during a session.
fn init_debug_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(path) = std::env::var("CHARLA_DEBUG_LOG") else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_debug_logging()?;

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let endpoint = config.resolve_endpoint(args.endpoint.as_deref());
    let theme = Theme::from_name(args.theme.or(config.theme).as_deref());
    let log_file = args.log.or(config.log_file);

    let app = match App::new(endpoint, log_file, theme) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    run_chat(app).await
}
