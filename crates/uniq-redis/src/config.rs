use serde::{Deserialize, Serialize};

/// Redis connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisStoreConfig {
    /// Connection URL, e.g. `redis://localhost:6379/0`.
    pub url: String,
    /// Use `SET NX EX` for finite TTLs instead of `SET NX` followed by `EXPIRE`.
    pub atomic_expiry: bool,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            atomic_expiry: true,
        }
    }
}

impl RedisStoreConfig {
    /// Config for the given URL with default options.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = RedisStoreConfig::default();
        assert_eq!(cfg.url, "redis://127.0.0.1:6379");
        assert!(cfg.atomic_expiry);
    }

    #[test]
    fn partial_deserialization() {
        let cfg: RedisStoreConfig =
            serde_json::from_str(r#"{"url": "redis://cache:6380/2"}"#).unwrap();
        assert_eq!(cfg.url, "redis://cache:6380/2");
        assert!(cfg.atomic_expiry);

        let cfg: RedisStoreConfig = serde_json::from_str(r#"{"atomic_expiry": false}"#).unwrap();
        assert_eq!(cfg.url, RedisStoreConfig::default().url);
        assert!(!cfg.atomic_expiry);
    }
}
