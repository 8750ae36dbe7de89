//! 名簿（padrón）の読み込みと派生値
//!
//! 名簿ファイルは拡張子で形式を判定する構造化ドキュメント。
//! CSVには対応しない。

use crate::error::{PadronError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 合成メールアドレスのドメイン
pub const SYNTHETIC_DOMAIN: &str = "padron.votacion";

/// 名簿エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// 外部識別子（DNI など）
    #[serde(alias = "dni")]
    pub identifier: String,

    /// 氏名
    #[serde(default, alias = "nombre", alias = "displayName")]
    pub display_name: String,

    /// 実メールアドレス
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
impl RosterEntry {
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl RosterEntry {
    /// 空でない実メールアドレス
    pub fn real_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }

    /// アカウント作成に使うメールアドレス
    ///
    /// `prefer_real` が真で実アドレスがあればそれを、なければ合成アドレスを返す。
    pub fn email_for(&self, prefer_real: bool) -> String {
        match self.real_email() {
            Some(email) if prefer_real => email.to_string(),
            _ => synthesized_email(&self.identifier),
        }
    }

    /// 初期パスワード（識別子そのまま）
    pub fn initial_password(&self) -> &str {
        &self.identifier
    }
}

/// 識別子から合成メールアドレスを生成
pub fn synthesized_email(identifier: &str) -> String {
    format!("{}@{}", identifier, SYNTHETIC_DOMAIN)
}

/// 名簿ドキュメント
///
/// 配列そのもの、または `members` キーでラップされた形を受け付ける。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterDocument {
    List(Vec<RosterEntry>),
    Wrapped { members: Vec<RosterEntry> },
}

impl RosterDocument {
    fn into_entries(self) -> Vec<RosterEntry> {
        match self {
            RosterDocument::List(entries) => entries,
            RosterDocument::Wrapped { members } => members,
        }
    }
}

/// 名簿ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Json,
    Toml,
    Yaml,
}

impl RosterFormat {
    /// 拡張子から形式を判定
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(RosterFormat::Json),
            "toml" => Ok(RosterFormat::Toml),
            "yaml" | "yml" => Ok(RosterFormat::Yaml),
            _ => Err(PadronError::UnsupportedRoster(path.display().to_string())),
        }
    }
}

/// 文字列から名簿をパース
pub fn parse_roster(content: &str, format: RosterFormat) -> Result<Vec<RosterEntry>> {
    let document: RosterDocument = match format {
        RosterFormat::Json => serde_json::from_str(content)?,
        // TOML はトップレベルに配列を置けないので `[[members]]` 形式のみ
        RosterFormat::Toml => RosterDocument::Wrapped {
            members: toml::from_str::<TomlRoster>(content)?.members,
        },
        RosterFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(document.into_entries())
}

#[derive(Debug, Deserialize)]
struct TomlRoster {
    #[serde(default)]
    members: Vec<RosterEntry>,
}

/// 名簿ファイルを読み込む
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let format = RosterFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_roster(&content, format)
}

#[cfg(test)]
#[path = "roster_test.rs"]
mod tests;
