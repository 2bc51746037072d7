//! Libris - library catalog manager (CLI + HTTP API)

use clap::Parser;

use libris::cli::{self, Cli};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(err) = cli::run(cli).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
