//! Configuration strings for dummy data generation.
//!
//! A configuration is a compact `key:value(;key:value)*` string such as
//! `"overview:full;usage:overage"`. Parsing is total: malformed segments are
//! dropped rather than rejected.

use std::collections::BTreeMap;

/// Preset with only the workspace and the fixed users.
pub const EMPTY: &str = "empty";

/// Preset with the base overview block.
pub const OVERVIEW_BASE: &str = "overview:base";

/// Preset exercising every block the generator knows about.
pub const OVERVIEW_ALL: &str = "overview:all;usage:overage;subscription:active";

/// Parsed key/value configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DummyConfig {
    entries: BTreeMap<String, String>,
}

impl DummyConfig {
    /// Parses a configuration string. Never fails.
    ///
    /// Segments are separated by `;`. A segment contributes an entry only if
    /// it has a key and a value around its first `:` that are non-empty after
    /// trimming; the
    /// value stops at a second `:` if there is one. Later keys overwrite
    /// earlier ones.
    pub fn parse(input: &str) -> Self {
        let mut entries = BTreeMap::new();

        for pair in input.split(';') {
            let mut parts = pair.split(':');
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            entries.insert(key.to_string(), value.to_string());
        }

        Self { entries }
    }

    /// Returns the value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `subscription:active`
    pub fn subscription_active(&self) -> bool {
        self.get("subscription") == Some("active")
    }

    /// Any `overview` value enables the base overview block.
    pub fn overview(&self) -> bool {
        self.get("overview").is_some()
    }

    /// `overview:full`, also spelled `overview:all` by the console front end.
    pub fn overview_full(&self) -> bool {
        matches!(self.get("overview"), Some("full" | "all"))
    }

    /// `usage:overage`
    pub fn usage_overage(&self) -> bool {
        self.get("usage") == Some("overage")
    }
}

impl From<&str> for DummyConfig {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let config = DummyConfig::parse("overview:full;usage:overage");

        assert_eq!(config.len(), 2);
        assert_eq!(config.get("overview"), Some("full"));
        assert_eq!(config.get("usage"), Some("overage"));
        assert!(config.overview_full());
        assert!(config.usage_overage());
        assert!(!config.subscription_active());
    }

    #[test]
    fn test_empty_input() {
        assert!(DummyConfig::parse("").is_empty());
    }

    #[test]
    fn test_malformed_segments_dropped() {
        assert!(DummyConfig::parse("overview").is_empty());
        assert!(DummyConfig::parse(";;:").is_empty());
        assert!(DummyConfig::parse("overview:").is_empty());
        assert!(DummyConfig::parse(":full").is_empty());

        let config = DummyConfig::parse("broken;usage:overage");
        assert_eq!(config.len(), 1);
        assert!(config.usage_overage());
    }

    #[test]
    fn test_blank_key_or_value_dropped() {
        for input in ["overview: ", " :full", " : ", "overview:\t;usage: "] {
            let config = DummyConfig::parse(input);
            assert!(config.is_empty(), "{input:?} should parse as empty");
            assert!(!config.overview());
        }

        let config = DummyConfig::parse("overview: ;usage:overage");
        assert_eq!(config.len(), 1);
        assert!(!config.overview());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let config = DummyConfig::parse("overview:base;overview:full");
        assert_eq!(config.get("overview"), Some("full"));
    }

    #[test]
    fn test_whitespace_trimmed() {
        let config = DummyConfig::parse(" overview : full ; subscription:active");
        assert_eq!(config.get("overview"), Some("full"));
        assert!(config.subscription_active());
    }

    #[test]
    fn test_extra_colons_truncate_value() {
        let config = DummyConfig::parse("usage:overage:extra");
        assert_eq!(config.get("usage"), Some("overage"));
    }

    #[test]
    fn test_presets() {
        assert!(DummyConfig::parse(EMPTY).is_empty());

        let base = DummyConfig::parse(OVERVIEW_BASE);
        assert!(base.overview());
        assert!(!base.overview_full());

        let all = DummyConfig::parse(OVERVIEW_ALL);
        assert!(all.overview_full());
        assert!(all.usage_overage());
        assert!(all.subscription_active());
    }
}
