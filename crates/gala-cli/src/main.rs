mod cmd_run;
mod cmd_serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gala", version, about = "Event-planning facts from agent transcripts")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 5001)]
        port: u16,
        /// Store directory (default: GALA_STORE_DIR or the per-user data dir)
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },
    /// Process a transcript file and print the chunk stream
    Run {
        /// Path to a JSON array of transcript record strings
        transcript: PathBuf,
        /// Store directory (default: GALA_STORE_DIR or the per-user data dir)
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve {
            bind,
            port,
            store_dir,
        } => cmd_serve::execute(&bind, port, store_dir.as_deref()),
        Command::Run {
            transcript,
            store_dir,
        } => cmd_run::execute(&transcript, store_dir.as_deref()),
    }
}
