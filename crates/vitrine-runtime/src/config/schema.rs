//! Configuration schema definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use vitrine_core::DEFAULT_PRIORITY;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VitrineConfig {
    /// Plugins enabled for the admin (server) surface. `VITRINE_PLUGINS`.
    #[serde(default)]
    pub plugins: PluginList,

    /// Plugins enabled for the public surface. `VITRINE_PUBLIC_PLUGINS`.
    #[serde(default)]
    pub public_plugins: PluginList,

    /// Loaded-extension cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Navigation composition settings.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Extra or overriding default section lists, keyed by page.
    #[serde(default)]
    pub pages: BTreeMap<String, Vec<String>>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// =============================================================================
// Plugin lists
// =============================================================================

/// An ordered list of plugin identifiers.
///
/// Deserializes from either a comma-separated string (`"freight, loyalty"`)
/// or a sequence of strings. Whitespace is trimmed and empty entries are
/// dropped in both forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginList(Vec<String>);

impl PluginList {
    /// Creates a list from already separated identifiers.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            ids.into_iter()
                .map(|id| id.as_ref().trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        )
    }

    /// Parses a comma-separated list.
    pub fn parse(raw: &str) -> Self {
        Self(parse_plugin_ids(raw))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PluginList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl Serialize for PluginList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PluginList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Csv(String),
            List(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Csv(raw) => Self::parse(&raw),
            Raw::List(ids) => Self::new(ids),
        })
    }
}

/// Splits a comma-separated plugin list, trimming entries and dropping blanks.
pub fn parse_plugin_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Cache
// =============================================================================

/// Loaded-extension cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether loaded sets are cached outside development.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Cache entry lifetime in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    3600
}

// =============================================================================
// Navigation
// =============================================================================

/// Navigation composition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Priority given to contributions that declare none.
    #[serde(default = "default_priority")]
    pub default_priority: i32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
        }
    }
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

// =============================================================================
// Logging
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file path, required when `output` is `file`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Log file rotation when writing to a file.
    #[serde(default)]
    pub rotation: LogRotation,

    /// Per-target level overrides, e.g. `vitrine_runtime = "debug"`.
    #[serde(default)]
    pub filters: BTreeMap<String, LogLevel>,

    /// Span lifecycle events to emit.
    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Include thread ids in each line.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include source file and line in each line.
    #[serde(default)]
    pub file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
            rotation: LogRotation::default(),
            filters: BTreeMap::new(),
            span_events: SpanEventConfig::default(),
            thread_ids: false,
            file_location: false,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
///
/// `json` is honoured only with the `json-log` feature; otherwise it falls
/// back to `full`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// File rotation policy for [`LogOutput::File`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_list_from_csv_string() {
        let list: PluginList = serde_json::from_str(r#"" freight, ,loyalty ,""#).unwrap();
        assert_eq!(list.as_slice(), ["freight", "loyalty"]);
    }

    #[test]
    fn test_plugin_list_from_sequence() {
        let list: PluginList = serde_json::from_str(r#"["freight", " ", "loyalty"]"#).unwrap();
        assert_eq!(list.as_slice(), ["freight", "loyalty"]);
        assert_eq!(list.to_string(), "freight,loyalty");
    }

    #[test]
    fn test_parse_plugin_ids_handles_empty_input() {
        assert!(parse_plugin_ids("").is_empty());
        assert!(parse_plugin_ids(" , ,").is_empty());
    }

    #[test]
    fn test_defaults() {
        let config: VitrineConfig = serde_json::from_str("{}").unwrap();
        assert!(config.plugins.is_empty());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl(), Duration::from_secs(3600));
        assert_eq!(config.navigation.default_priority, DEFAULT_PRIORITY);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_log_level_parses_lowercase() {
        let level: LogLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert!(serde_json::from_str::<LogLevel>(r#""verbose""#).is_err());
    }
}
