//! HTTP設定・接続情報・インポート設定
//!
//! 優先順位: CLIフラグ > 環境変数 > 設定ファイル > デフォルト

use crate::env::{EnvVar, SERVICE_KEY_VAR, URL_VAR};
use crate::error::{PadronError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// デフォルトのスキーマ
pub const DEFAULT_SCHEMA: &str = "votaciones";

/// デフォルトのプロファイルテーブル
pub const DEFAULT_TABLE: &str = "perfiles";

/// HTTP設定
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// リクエストのタイムアウト
    pub timeout: Option<Duration>,
    /// User-Agent
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: "padron-cli".to_string(),
        }
    }
}

impl HttpConfig {
    /// reqwest::Client を構築
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}

/// 接続情報（エンドポイントと service_role キー）
///
/// キーは Debug 出力に含めない。
#[derive(Clone)]
pub struct ServiceCredentials {
    endpoint: String,
    service_key: String,
}

impl ServiceCredentials {
    pub fn new(endpoint: impl Into<String>, service_key: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    /// 末尾スラッシュを除いたエンドポイント
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn service_key(&self) -> &str {
        &self.service_key
    }
}

impl fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("endpoint", &self.endpoint)
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

/// プロファイルの書き込み先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTarget {
    pub schema: String,
    pub table: String,
}

impl Default for ProfileTarget {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

/// インポート動作のオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// 実メールアドレスがあれば合成アドレスより優先する
    pub prefer_real_email: bool,
    /// プロファイルに識別子を保存する
    pub store_identifier: bool,
    /// プロファイルにメールアドレスを保存する
    pub store_email: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            prefer_real_email: true,
            store_identifier: true,
            store_email: true,
        }
    }
}

/// 設定ファイル（TOML）
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub service_key: Option<String>,
    pub roster: Option<PathBuf>,
    pub schema: Option<String>,
    pub table: Option<String>,
    pub prefer_real_email: Option<bool>,
    pub store_identifier: Option<bool>,
    pub store_email: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// 設定ファイルを読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// CLIから渡される上書き値
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub service_key: Option<String>,
    pub roster: Option<PathBuf>,
    pub schema: Option<String>,
    pub table: Option<String>,
    pub synthesize_all: bool,
    pub no_store_identifier: bool,
    pub no_store_email: bool,
}

/// 解決済みのインポート設定
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub credentials: ServiceCredentials,
    pub roster: PathBuf,
    pub target: ProfileTarget,
    pub options: ImportOptions,
    pub http: HttpConfig,
}

impl ImportConfig {
    /// 各レイヤーを統合して設定を解決
    pub fn resolve(overrides: ConfigOverrides, file: FileConfig) -> Result<Self> {
        let roster = resolve_roster(&overrides, &file)?;
        let options = resolve_options(&overrides, &file);

        let url = overrides
            .url
            .filter(|s| !s.trim().is_empty())
            .or_else(|| EnvVar::get(URL_VAR))
            .or(file.url)
            .ok_or_else(|| {
                PadronError::Config(format!(
                    "service URL is not set (use --url, {} or the config file)",
                    URL_VAR
                ))
            })?;

        let service_key = overrides
            .service_key
            .filter(|s| !s.trim().is_empty())
            .or_else(|| EnvVar::get(SERVICE_KEY_VAR))
            .or(file.service_key)
            .ok_or_else(|| {
                PadronError::Config(format!(
                    "service role key is not set (use --service-key, {} or the config file)",
                    SERVICE_KEY_VAR
                ))
            })?;

        let defaults = ProfileTarget::default();
        let target = ProfileTarget {
            schema: overrides.schema.or(file.schema).unwrap_or(defaults.schema),
            table: overrides.table.or(file.table).unwrap_or(defaults.table),
        };

        let mut http = HttpConfig::default();
        if let Some(secs) = file.timeout_secs {
            http.timeout = Some(Duration::from_secs(secs));
        }

        Ok(Self {
            credentials: ServiceCredentials::new(url, service_key),
            roster,
            target,
            options,
            http,
        })
    }
}

/// 名簿ファイルのパスを解決
pub fn resolve_roster(overrides: &ConfigOverrides, file: &FileConfig) -> Result<PathBuf> {
    overrides
        .roster
        .clone()
        .or_else(|| file.roster.clone())
        .ok_or_else(|| {
            PadronError::Config("roster file is not set (use --roster or the config file)".into())
        })
}

/// インポートオプションを解決（CLIフラグは無効化のみ）
pub fn resolve_options(overrides: &ConfigOverrides, file: &FileConfig) -> ImportOptions {
    ImportOptions {
        prefer_real_email: !overrides.synthesize_all && file.prefer_real_email.unwrap_or(true),
        store_identifier: !overrides.no_store_identifier && file.store_identifier.unwrap_or(true),
        store_email: !overrides.no_store_email && file.store_email.unwrap_or(true),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
