//! 認証サービス（アカウント作成）
//!
//! service_role 権限での管理者APIによるユーザー作成を抽象化する。

pub mod gotrue;

pub use gotrue::GoTrueClient;

use crate::error::Result;
use crate::roster::RosterEntry;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// アカウントに付与するメタデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMetadata {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub identifier: String,
}

/// アカウント作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    /// 確認メールを送らずに確認済みとする
    pub email_confirm: bool,
    pub user_metadata: AccountMetadata,
}

impl NewAccount {
    /// 名簿エントリからリクエストを構築
    pub fn for_entry(entry: &RosterEntry, prefer_real_email: bool) -> Self {
        Self {
            email: entry.email_for(prefer_real_email),
            password: entry.initial_password().to_string(),
            email_confirm: true,
            user_metadata: AccountMetadata {
                display_name: entry.display_name.clone(),
                identifier: entry.identifier.clone(),
            },
        }
    }
}

/// 作成済みアカウント
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProvisionedAccount {
    #[serde(rename = "id")]
    pub account_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<AccountMetadata>,
}

impl ProvisionedAccount {
    pub fn email_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// 認証サービス trait
pub trait IdentityService: Send + Sync {
    /// アカウントを作成
    fn create_account<'a>(
        &'a self,
        account: &'a NewAccount,
    ) -> Pin<Box<dyn Future<Output = Result<ProvisionedAccount>> + Send + 'a>>;
}
