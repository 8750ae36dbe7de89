//! padron import コマンド
//!
//! 名簿ファイルを読み込み、各メンバーについてアカウント作成と
//! プロファイル upsert を順番に実行する。

use crate::config::{
    resolve_options, resolve_roster, ConfigOverrides, FileConfig, ImportConfig,
};
use crate::identity::GoTrueClient;
use crate::importer::{EntryReport, RosterImporter};
use crate::output::Console;
use crate::roster::load_roster;
use crate::store::PostgrestClient;
use clap::Parser;
use std::path::PathBuf;

const ROSTER_HELP: &str = "\
ROSTER FORMATS:
  padron.json   [{\"identifier\": \"11111111\", \"display_name\": \"SOCIO UNO\"}]
                or {\"members\": [...]}
  padron.toml   [[members]] tables
  padron.yaml   list of members
  `dni` and `nombre` are accepted as field aliases. `email` is optional;
  without it the address is <identifier>@padron.votacion.

  The service URL and key are read from --url / --service-key,
  then SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY, then --config.";

#[derive(Debug, Parser)]
#[command(after_help = ROSTER_HELP)]
pub struct Args {
    /// Roster file (.json, .toml, .yaml)
    #[arg(long, value_name = "PATH")]
    pub roster: Option<PathBuf>,

    /// TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Supabase project URL
    #[arg(long)]
    pub url: Option<String>,

    /// Service role key (never the anon key)
    #[arg(long)]
    pub service_key: Option<String>,

    /// Schema of the profile table
    #[arg(long)]
    pub schema: Option<String>,

    /// Profile table
    #[arg(long)]
    pub table: Option<String>,

    /// Always use <identifier>@padron.votacion, even when an email is given
    #[arg(long)]
    pub synthesize_all: bool,

    /// Do not store the identifier in the profile
    #[arg(long)]
    pub no_store_identifier: bool,

    /// Do not store the email in the profile
    #[arg(long)]
    pub no_store_email: bool,

    /// Preview only, do not call any service
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.url.clone(),
            service_key: self.service_key.clone(),
            roster: self.roster.clone(),
            schema: self.schema.clone(),
            table: self.table.clone(),
            synthesize_all: self.synthesize_all,
            no_store_identifier: self.no_store_identifier,
            no_store_email: self.no_store_email,
        }
    }
}

pub async fn run(args: Args, verbose: bool) -> Result<(), String> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path).map_err(|e| e.to_string())?,
        None => FileConfig::default(),
    };
    let overrides = args.overrides();

    if args.dry_run {
        return preview(&overrides, &file);
    }

    let config = ImportConfig::resolve(overrides, file).map_err(|e| e.to_string())?;
    log::debug!("resolved config: {:?}", config);

    let roster = load_roster(&config.roster).map_err(|e| e.to_string())?;

    // 両サービスで同じ接続プールを使う
    let http = config.http.build_client().map_err(|e| e.to_string())?;
    let identity = GoTrueClient::with_client(http.clone(), &config.credentials);
    let store = PostgrestClient::with_client(http, &config.credentials, config.target.clone());

    let mut importer = RosterImporter::new(
        Box::new(identity),
        Box::new(store),
        config.options,
        Console::stdio().with_summary(verbose),
    );
    let reports = importer.run(&roster).await;

    // 個別の失敗は終了コードに反映しない
    for line in failure_lines(&reports) {
        log::info!("{}", line);
    }

    Ok(())
}

/// 完全にはインポートできなかったエントリの診断行
fn failure_lines(reports: &[EntryReport]) -> Vec<String> {
    reports
        .iter()
        .filter(|report| !report.outcome.is_synced())
        .filter_map(|report| {
            let error = report.outcome.error()?;
            Some(format!(
                "not imported: {} <{}> account={} error={}",
                report.identifier,
                report.email,
                report.outcome.account_id().unwrap_or("-"),
                error
            ))
        })
        .collect()
}

fn preview(overrides: &ConfigOverrides, file: &FileConfig) -> Result<(), String> {
    let path = resolve_roster(overrides, file).map_err(|e| e.to_string())?;
    let options = resolve_options(overrides, file);
    let roster = load_roster(&path).map_err(|e| e.to_string())?;

    let mut console = Console::stdio();
    println!("Dry run: {} member(s) in {}", roster.len(), path.display());
    for entry in &roster {
        console.planned(entry, &entry.email_for(options.prefer_real_email));
    }

    Ok(())
}
