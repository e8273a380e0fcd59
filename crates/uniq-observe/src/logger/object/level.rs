use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

/// Validated `EnvFilter` expression.
///
/// Keeps the raw string (e.g. `"uniq_core=debug,info"`) so it can be serialized back
/// and turned into a fresh [`EnvFilter`] at init time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    /// # Examples
    /// ```
    /// use uniq_observe::LoggerLevel;
    ///
    /// let lvl = LoggerLevel::new("uniq_core=debug,info").unwrap();
    /// assert_eq!(lvl.as_str(), "uniq_core=debug,info");
    /// assert!(LoggerLevel::new("uniq_core=chatty").is_err());
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the filter.
    pub fn to_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.0).map_err(|e| LoggerError::InvalidLevel(format!("{}: {e}", self.0)))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let level = Self(s.trim().to_string());
        level.to_env_filter()?;
        Ok(level)
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_directives() {
        for lvl in ["info", "warn", "trace", "uniq_core=trace,uniq_exec=debug,info"] {
            assert!(lvl.parse::<LoggerLevel>().is_ok(), "expected {lvl} to parse");
        }
    }

    #[test]
    fn rejects_unknown_levels() {
        for lvl in ["uniq_core=lol", "other=trace,another=wat"] {
            assert!(lvl.parse::<LoggerLevel>().is_err(), "expected {lvl} to be rejected");
        }
    }

    #[test]
    fn trims_input() {
        assert_eq!(LoggerLevel::new("  debug ").unwrap().as_str(), "debug");
    }

    #[test]
    fn default_is_info() {
        let lvl = LoggerLevel::default();
        assert_eq!(lvl.as_str(), "info");
        assert!(lvl.to_env_filter().is_ok());
    }

    #[test]
    fn serde_uses_plain_string() {
        let lvl: LoggerLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(lvl.as_str(), "debug");
        assert_eq!(serde_json::to_string(&lvl).unwrap(), r#""debug""#);
    }
}
