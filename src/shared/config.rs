use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// ダッシュボードでは表示中の全投稿分のコメントを先読みする
    pub prefetch_comments: bool,
    pub search_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://socialmediabackend-9hqc.onrender.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            prefetch_comments: true,
            search_debounce_ms: 300,
        }
    }
}
