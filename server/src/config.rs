//! Server configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and then builds a [`ServerConfig`] once.
//! The config is shared through `AppState`, so handlers and background tasks
//! never read the environment directly.

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_COLLECTION_FLUSH_INTERVAL_MS: u64 = 250;
const DEFAULT_AI_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_LIVE_VOICE: &str = "Kore";

/// Parse `key` as `T`, falling back to `default` when unset or malformed.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Non-empty, trimmed string value.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Upstream realtime voice endpoint used by the Live Tutor relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveConfig {
    /// `None` disables the Live Tutor; the socket reports it as not configured.
    pub upstream_url: Option<String>,
    pub voice: String,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self { upstream_url: None, voice: DEFAULT_LIVE_VOICE.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Postgres URL. Without it the catalog lives in memory only.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub flush_interval_ms: u64,
    pub cookie_secure: bool,
    pub ai_max_tokens: u32,
    pub live: LiveConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            flush_interval_ms: DEFAULT_COLLECTION_FLUSH_INTERVAL_MS,
            cookie_secure: false,
            ai_max_tokens: DEFAULT_AI_MAX_TOKENS,
            live: LiveConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// - `PORT` (3000)
    /// - `DATABASE_URL` (optional)
    /// - `DB_MAX_CONNECTIONS` (5)
    /// - `COLLECTION_FLUSH_INTERVAL_MS` (250)
    /// - `COOKIE_SECURE` (false)
    /// - `AI_MAX_TOKENS` (1024)
    /// - `LIVE_UPSTREAM_URL` (optional), `LIVE_VOICE` (`Kore`)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            database_url: env_string("DATABASE_URL"),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            flush_interval_ms: env_parse("COLLECTION_FLUSH_INTERVAL_MS", DEFAULT_COLLECTION_FLUSH_INTERVAL_MS),
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
            ai_max_tokens: env_parse("AI_MAX_TOKENS", DEFAULT_AI_MAX_TOKENS),
            live: LiveConfig {
                upstream_url: env_string("LIVE_UPSTREAM_URL"),
                voice: env_string("LIVE_VOICE").unwrap_or_else(|| DEFAULT_LIVE_VOICE.to_owned()),
            },
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
