/// サービスエンドポイントの環境変数名
pub const URL_VAR: &str = "SUPABASE_URL";

/// service_role キーの環境変数名
pub const SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（空文字列・空白のみはNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
#[path = "env_test.rs"]
mod tests;
