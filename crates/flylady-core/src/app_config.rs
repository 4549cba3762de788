use std::net::SocketAddr;
use std::path::PathBuf;

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

/// Runtime configuration, read from `FLYLADY_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Public base URL of the site, used for sitemap and robots output.
    pub site_base_url: String,
    /// Upstream XML export of all sellable experiences.
    pub feed_url: String,
    /// How long a fetched catalog stays fresh before the next request
    /// triggers a re-fetch. A caching hint, not a retry policy.
    pub feed_revalidate_secs: u64,
    pub feed_timeout_secs: u64,
    pub feed_user_agent: String,
    /// Directory of markdown blog posts with YAML front matter.
    pub blog_dir: PathBuf,
}
