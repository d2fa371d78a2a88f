use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wealth_position::api::Cli;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wealth_position=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = wealth_position::api::run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
