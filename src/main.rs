//! Voicecraft CLI binary entry point.

use tracing_subscriber::EnvFilter;
use voicecraft::cli::commands::{handle_craft, handle_gen, handle_name, handle_voices};
use voicecraft::cli::errors::format_error_help;
use voicecraft::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("voicecraft=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    let result = match cli.command {
        Commands::Craft(args) => handle_craft(args).await,
        Commands::Gen(args) => handle_gen(args).await,
        Commands::Name(args) => handle_name(args).await,
        Commands::Voices(args) => handle_voices(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_error_help(&e));
        std::process::exit(1);
    }
}
