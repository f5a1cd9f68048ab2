//! M31 Code command-line host
//!
//! Exposes the suggest, chat and model-switch commands of the editor
//! integration on the terminal.

mod app;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::M31App;

/// M31 Code - model-routed code suggestions and chat
#[derive(Parser, Debug)]
#[command(name = "m31")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Switch to this model before running the command
    #[arg(short, long, global = true, env = "M31_MODEL")]
    model: Option<String>,

    /// Settings file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Get a suggestion for a code snippet (reads stdin when omitted)
    Suggest {
        code: Option<String>,
    },
    /// Chat with the active model (interactive when no message is given)
    Chat {
        message: Option<String>,

        /// Read and write host JSON messages, one per line
        #[arg(long, conflicts_with = "message")]
        json: bool,
    },
    /// List declared models
    Models,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    init_logging(&args);
    tracing::debug!("Starting M31 Code v{}", m31_core::VERSION);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(args))
}

fn init_logging(args: &Args) {
    let default_filter = if args.verbose {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        m31_core::DEFAULT_LOG_FILTER
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let app = M31App::new(args.config.as_deref()).await?;

    // Reported on stderr only; stdout carries command output.
    if let Some(model) = &args.model {
        if !app.select_model(model).await {
            return Ok(ExitCode::FAILURE);
        }
    }

    let mut out = std::io::stdout();
    let input = BufReader::new(tokio::io::stdin());

    let ok = match args.command {
        Command::Suggest { code } => app.suggest(code, &mut out).await?,
        Command::Chat { json: true, .. } => {
            app.chat_json(input, &mut out).await?;
            true
        }
        Command::Chat {
            message: Some(message),
            ..
        } => app.chat_once(message, &mut out).await?,
        Command::Chat { message: None, .. } => {
            app.chat_loop(input, &mut out).await?;
            true
        }
        Command::Models => {
            app.list_models(&mut out).await?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
