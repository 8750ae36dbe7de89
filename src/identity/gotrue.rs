//! Supabase Auth (GoTrue) 管理者APIクライアント

use crate::config::ServiceCredentials;
use crate::error::{PadronError, Result};
use crate::http;
use crate::identity::{IdentityService, NewAccount, ProvisionedAccount};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

/// 管理者ユーザー作成のパス
const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";

/// 作成レスポンス
///
/// 素のユーザーオブジェクトと `{"user": ...}` の両方を受け付ける。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreateUserResponse {
    Wrapped { user: ProvisionedAccount },
    Bare(ProvisionedAccount),
}

impl CreateUserResponse {
    fn into_account(self) -> ProvisionedAccount {
        match self {
            CreateUserResponse::Wrapped { user } => user,
            CreateUserResponse::Bare(user) => user,
        }
    }
}

/// GoTrue クライアント
///
/// セッションを持たず、リクエストごとに service_role キーで認証する。
pub struct GoTrueClient {
    http: Client,
    credentials: ServiceCredentials,
}

impl GoTrueClient {
    /// 既存の reqwest::Client を使って作成
    pub fn with_client(http: Client, credentials: &ServiceCredentials) -> Self {
        Self {
            http,
            credentials: credentials.clone(),
        }
    }

    fn admin_users_url(&self) -> String {
        format!("{}{}", self.credentials.endpoint(), ADMIN_USERS_PATH)
    }
}

impl IdentityService for GoTrueClient {
    fn create_account<'a>(
        &'a self,
        account: &'a NewAccount,
    ) -> Pin<Box<dyn Future<Output = Result<ProvisionedAccount>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.admin_users_url();
            log::debug!("POST {} (email: {})", url, account.email);

            let req = http::authorized(self.http.post(&url), &self.credentials).json(account);
            let response = req.send().await?;

            if !response.status().is_success() {
                let (status, message) = http::failure(response).await;
                return Err(PadronError::IdentityApi { status, message });
            }

            // 2xx の時点でアカウントは作成済みの可能性がある
            let status = response.status().as_u16();
            let body = response.text().await?;
            let created: CreateUserResponse =
                serde_json::from_str(&body).map_err(|e| PadronError::IdentityApi {
                    status,
                    message: format!(
                        "account may have been created, but the response could not be decoded: {}",
                        e
                    ),
                })?;
            Ok(created.into_account())
        })
    }
}

#[cfg(test)]
#[path = "gotrue_test.rs"]
mod tests;
