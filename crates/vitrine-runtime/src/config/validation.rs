//! Configuration validation utilities.

use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, PluginList, VitrineConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &VitrineConfig) -> ConfigResult<()> {
    validate_plugin_list("plugins", &config.plugins)?;
    validate_plugin_list("public_plugins", &config.public_plugins)?;
    validate_cache(config)?;
    validate_pages(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_plugin_list(list: &'static str, plugins: &PluginList) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for id in plugins.iter() {
        if id.contains(char::is_whitespace) {
            return Err(ConfigError::validation(format!(
                "Plugin identifier '{id}' in '{list}' cannot contain whitespace"
            )));
        }
        if !seen.insert(id) {
            return Err(ConfigError::DuplicatePlugin {
                list,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_cache(config: &VitrineConfig) -> ConfigResult<()> {
    if config.cache.enabled && config.cache.ttl_secs == 0 {
        return Err(ConfigError::validation(
            "Cache TTL must be greater than 0 when caching is enabled",
        ));
    }
    Ok(())
}

fn validate_pages(config: &VitrineConfig) -> ConfigResult<()> {
    for (page, sections) in &config.pages {
        if page.trim().is_empty() {
            return Err(ConfigError::validation("Page keys cannot be empty"));
        }

        let mut seen = HashSet::new();
        for section in sections {
            if section.trim().is_empty() {
                return Err(ConfigError::validation(format!(
                    "Page '{page}' lists an empty section id"
                )));
            }
            if !seen.insert(section.as_str()) {
                return Err(ConfigError::validation(format!(
                    "Page '{page}' lists section '{section}' more than once"
                )));
            }
        }
    }
    Ok(())
}

fn validate_logging(config: &VitrineConfig) -> ConfigResult<()> {
    if config.logging.output == LogOutput::File && config.logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&VitrineConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_ttl_only_when_enabled() {
        let mut config = VitrineConfig::default();
        config.cache.ttl_secs = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));

        config.cache.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_plugins() {
        let config = VitrineConfig {
            public_plugins: PluginList::parse("reviews,freight,reviews"),
            ..Default::default()
        };
        match validate_config(&config) {
            Err(ConfigError::DuplicatePlugin { list, id }) => {
                assert_eq!(list, "public_plugins");
                assert_eq!(id, "reviews");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_plugin_with_inner_whitespace() {
        let config = VitrineConfig {
            plugins: PluginList::new(["free ight"]),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_pages() {
        let mut config = VitrineConfig::default();
        config
            .pages
            .insert("products/new".into(), vec!["A".into(), "A".into()]);
        assert!(validate_config(&config).is_err());

        let mut config = VitrineConfig::default();
        config.pages.insert(" ".into(), vec!["A".into()]);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_file_output_requires_path() {
        let mut config = VitrineConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { .. })
        ));

        config.logging.file_path = Some("vitrine.log".into());
        assert!(validate_config(&config).is_ok());
    }
}
