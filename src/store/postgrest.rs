//! Supabase REST (PostgREST) クライアント

use crate::config::{ProfileTarget, ServiceCredentials};
use crate::error::{PadronError, Result};
use crate::http;
use crate::store::{ProfileRecord, ProfileStore};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

/// `id` 衝突時にマージする
const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

/// PostgREST クライアント
pub struct PostgrestClient {
    http: Client,
    credentials: ServiceCredentials,
    target: ProfileTarget,
}

impl PostgrestClient {
    /// 既存の reqwest::Client を使って作成
    pub fn with_client(
        http: Client,
        credentials: &ServiceCredentials,
        target: ProfileTarget,
    ) -> Self {
        Self {
            http,
            credentials: credentials.clone(),
            target,
        }
    }

    /// テーブルURL
    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?on_conflict=id",
            self.credentials.endpoint(),
            self.target.table
        )
    }
}

impl ProfileStore for PostgrestClient {
    fn upsert_profile<'a>(
        &'a self,
        record: &'a ProfileRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.table_url();
            log::debug!(
                "POST {} (schema: {}, id: {})",
                url,
                self.target.schema,
                record.id
            );

            let req = http::authorized(self.http.post(&url), &self.credentials)
                .header("Content-Profile", &self.target.schema)
                .header("Prefer", UPSERT_PREFER)
                .json(record);

            let response = req.send().await?;

            if !response.status().is_success() {
                let (status, message) = http::failure(response).await;
                return Err(PadronError::StoreApi { status, message });
            }

            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "postgrest_test.rs"]
mod tests;
