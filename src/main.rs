//! buildinglink CLI binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildinglink::cli::{commands, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match commands::build_client(cli.config.as_deref()) {
        Ok(client) => commands::run(&client, cli.command).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
