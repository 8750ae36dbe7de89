mod cli;
mod commands;
mod config;
mod env;
mod error;
mod http;
mod identity;
mod importer;
mod output;
mod roster;
mod store;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose { "padron=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
