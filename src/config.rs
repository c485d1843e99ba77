use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8888";
const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug, Clone)]
pub struct DashConfig {
    pub data_dir: PathBuf,
    pub bind_addr: String,
    pub session_ttl_secs: u64,
    pub max_sessions: usize,
}

impl DashConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: PathBuf::from(
                std::env::var("DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
            ),
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            session_ttl_secs: parse_or(
                std::env::var("SESSION_TTL_SECS").ok(),
                DEFAULT_SESSION_TTL_SECS,
            ),
            max_sessions: parse_or(std::env::var("MAX_SESSIONS").ok(), DEFAULT_MAX_SESSIONS),
        }
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Unset or unparseable values fall back to the default.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or(Some("60".to_string()), 3600u64), 60);
        assert_eq!(parse_or(Some(" 12 ".to_string()), 1024usize), 12);
        assert_eq!(parse_or(Some("ten".to_string()), 3600u64), 3600);
        assert_eq!(parse_or(None, 1024usize), 1024);
    }

    #[test]
    fn test_defaults() {
        let cfg = DashConfig::default();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8888");
        assert_eq!(cfg.session_ttl_secs, 3600);
        assert_eq!(cfg.max_sessions, 1024);
    }
}
