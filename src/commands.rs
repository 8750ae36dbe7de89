use crate::cli::{Cli, Command};

pub mod import;

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Import(args) => import::run(args, cli.verbose).await,
    }
}
