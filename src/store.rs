//! プロファイルストア（データストアへの upsert）

pub mod postgrest;

pub use postgrest::PostgrestClient;

use crate::config::ImportOptions;
use crate::error::Result;
use crate::roster::RosterEntry;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

/// インポートされたメンバーのロール
pub const ROLE_MEMBER: &str = "MEMBER";

/// インポート直後のアクセス状態
pub const ACCESS_ACTIVE: &str = "ACTIVE";

/// プロファイルレコード
///
/// `id` はアカウントIDと一致する（1対1）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub role: &'static str,
    pub access_state: &'static str,
}

impl ProfileRecord {
    /// 作成済みアカウントと名簿エントリからレコードを構築
    pub fn new(
        account_id: impl Into<String>,
        entry: &RosterEntry,
        email: &str,
        options: &ImportOptions,
    ) -> Self {
        Self {
            id: account_id.into(),
            name: entry.display_name.clone(),
            email: options.store_email.then(|| email.to_string()),
            identifier: options.store_identifier.then(|| entry.identifier.clone()),
            role: ROLE_MEMBER,
            access_state: ACCESS_ACTIVE,
        }
    }
}

/// プロファイルストア trait
pub trait ProfileStore: Send + Sync {
    /// `id` をキーに upsert
    fn upsert_profile<'a>(
        &'a self,
        record: &'a ProfileRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}
