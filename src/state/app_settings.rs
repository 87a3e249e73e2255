use log::LevelFilter;
use std::time::Duration;
use viewership_api::client::DEFAULT_BASE_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: LevelFilter::Error,
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppSettings {
    /// Settings from `CFBTV_*` environment variables. Unparseable values fall
    /// back to the defaults.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = var("CFBTV_API_URL") {
            settings.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = var("CFBTV_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok())
            && secs > 0
        {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(level) = var("CFBTV_LOG_LEVEL").and_then(|v| v.parse::<LevelFilter>().ok()) {
            settings.log_level = level;
        }
        settings
    }
}
