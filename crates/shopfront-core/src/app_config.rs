use std::path::PathBuf;
use std::time::Duration;

use crate::pagination::{PageSize, TotalPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_url: String,
    pub api_key: Option<String>,
    pub log_level: String,
    pub cart_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_size: PageSize,
    pub debounce_ms: u64,
    pub total_policy: TotalPolicy,
    pub forward_search: bool,
}

impl AppConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("log_level", &self.log_level)
            .field("cart_path", &self.cart_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field("debounce_ms", &self.debounce_ms)
            .field("total_policy", &self.total_policy)
            .field("forward_search", &self.forward_search)
            .finish()
    }
}
