use thiserror::Error;

/// padron統一エラー型
#[derive(Debug, Error)]
pub enum PadronError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Identity service error: {message} (status: {status})")]
    IdentityApi { status: u16, message: String },

    #[error("Data store error: {message} (status: {status})")]
    StoreApi { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported roster format: {0}. Expected .json, .toml, .yaml or .yml")]
    UnsupportedRoster(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PadronError>;

impl PadronError {
    /// 外部サービスが返したメッセージ（なければDisplay表現）
    pub fn message(&self) -> String {
        match self {
            PadronError::IdentityApi { message, .. } | PadronError::StoreApi { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// HTTPステータス（API エラーのみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            PadronError::IdentityApi { status, .. } | PadronError::StoreApi { status, .. } => {
                Some(*status)
            }
            PadronError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
