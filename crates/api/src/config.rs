use std::env;
use std::str::FromStr;
use std::time::Duration;

use moodlog_journal::DEFAULT_TOKEN_TTL_SECONDS;
use moodlog_ml::MlConfig;
use tracing::warn;

const DEV_TOKEN_SECRET: &str = "dev-moodlog-secret";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `None` keeps everything in memory.
    pub database_url: Option<String>,
    pub token_secret: String,
    pub token_ttl_seconds: i64,
    pub ml: MlConfig,
    pub auth_rate_limit_window: Duration,
    pub auth_rate_limit_max: usize,
    /// Key the auth limiter on `X-Forwarded-For`. Only safe behind a proxy
    /// that overwrites the header.
    pub trust_forwarded_for: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            token_secret: DEV_TOKEN_SECRET.to_string(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            ml: MlConfig::default(),
            auth_rate_limit_window: Duration::from_secs(60),
            auth_rate_limit_max: 12,
            trust_forwarded_for: false,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("MOOD_DATABASE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let token_secret = env::var("MOOD_TOKEN_SECRET")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| {
                warn!("MOOD_TOKEN_SECRET is not set, using the development secret");
                DEV_TOKEN_SECRET.to_string()
            });
        let token_ttl_seconds =
            positive_env::<i64>("MOOD_TOKEN_TTL_SECONDS").unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);
        let auth_rate_limit_window = Duration::from_secs(
            positive_env::<u64>("MOOD_AUTH_RATE_LIMIT_WINDOW_SECONDS").unwrap_or(60),
        );
        let auth_rate_limit_max =
            positive_env::<usize>("MOOD_AUTH_RATE_LIMIT_MAX").unwrap_or(12);
        let trust_forwarded_for = env::var("MOOD_TRUST_FORWARDED_FOR")
            .ok()
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "yes"));

        Self {
            database_url,
            token_secret,
            token_ttl_seconds,
            ml: MlConfig::from_env(),
            auth_rate_limit_window,
            auth_rate_limit_max,
            trust_forwarded_for,
        }
    }
}

fn positive_env<T>(key: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    parse_positive(env::var(key).ok().as_deref())
}

/// Zero, negative and unparsable values all read as unset.
fn parse_positive<T>(raw: Option<&str>) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    raw.and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value > T::default())
}
