use clap::{Parser, Subcommand};

use crate::commands::import;

#[derive(Debug, Parser)]
#[command(name = "padron")]
#[command(about = "Roster importer for Supabase Auth and profile tables", long_about = None)]
pub struct Cli {
    /// Print HTTP diagnostics (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 名簿をインポート（アカウント作成 + プロファイル upsert）
    Import(import::Args),
}
