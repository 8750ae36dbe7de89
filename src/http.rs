//! 共通HTTPヘルパー

use crate::config::ServiceCredentials;
use reqwest::{RequestBuilder, Response, StatusCode};

/// エラーメッセージとして参照するJSONキー（優先順）
const MESSAGE_KEYS: [&str; 4] = ["msg", "message", "error_description", "error"];

/// service_role キーで認証ヘッダーを付与
///
/// Supabase は `apikey` と `Authorization: Bearer` の両方を要求する。
pub fn authorized(req: RequestBuilder, credentials: &ServiceCredentials) -> RequestBuilder {
    req.header("apikey", credentials.service_key())
        .header(
            "Authorization",
            format!("Bearer {}", credentials.service_key()),
        )
}

/// 失敗レスポンスからステータスとメッセージを取り出す
pub async fn failure(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::debug!("response {} body: {}", status.as_u16(), body);
    (status.as_u16(), extract_message(&body, status))
}

/// レスポンスボディから人間向けメッセージを抽出
///
/// JSON の既知キー → 生のボディ → ステータス文言 の順にフォールバックする。
pub fn extract_message(body: &str, status: StatusCode) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = MESSAGE_KEYS
            .iter()
            .find_map(|key| json.get(key).and_then(|v| v.as_str()))
            .filter(|m| !m.is_empty())
        {
            return message.to_string();
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
