/// Serde-based configuration system for rules
///
/// Each configurable rule owns a kebab-case config struct; the matching `[rule-name]`
/// table of `.snipfmt.toml` is deserialized into it, falling back to defaults.
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for rule configurations
pub trait RuleConfig: Serialize + DeserializeOwned + Default + Clone {
    /// The rule name (e.g., "indent")
    const RULE_NAME: &'static str;
}

/// Helper to load rule configuration from the global config
pub fn load_rule_config<T: RuleConfig>(config: &crate::config::Config) -> T {
    config
        .rules
        .get(T::RULE_NAME)
        .and_then(|rule_config| {
            let table: toml::map::Map<String, toml::Value> = rule_config
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            match toml::Value::Table(table).try_into::<T>() {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    log::warn!("Ignoring invalid [{}] configuration: {err}", T::RULE_NAME);
                    None
                }
            }
        })
        .unwrap_or_default()
}

/// Serialize a rule config into the table used for `default_config_section`
pub fn config_section<T: RuleConfig>(config: &T) -> Option<(String, toml::Value)> {
    toml::Value::try_from(config)
        .ok()
        .map(|value| (T::RULE_NAME.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RuleConfig as RuleTable};
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "kebab-case")]
    struct SampleConfig {
        #[serde(default = "default_width")]
        width: usize,
    }

    fn default_width() -> usize {
        4
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self { width: 4 }
        }
    }

    impl RuleConfig for SampleConfig {
        const RULE_NAME: &'static str = "sample";
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config = Config::default();
        assert_eq!(load_rule_config::<SampleConfig>(&config), SampleConfig::default());
    }

    #[test]
    fn test_section_is_loaded() {
        let mut config = Config::default();
        let mut table = RuleTable::default();
        table.values.insert("width".to_string(), toml::Value::Integer(2));
        config.rules.insert("sample".to_string(), table);
        assert_eq!(load_rule_config::<SampleConfig>(&config).width, 2);
    }

    #[test]
    fn test_invalid_section_falls_back() {
        let mut config = Config::default();
        let mut table = RuleTable::default();
        table
            .values
            .insert("width".to_string(), toml::Value::String("wide".to_string()));
        config.rules.insert("sample".to_string(), table);
        assert_eq!(load_rule_config::<SampleConfig>(&config).width, 4);
    }

    #[test]
    fn test_config_section() {
        let (name, value) = config_section(&SampleConfig::default()).unwrap();
        assert_eq!(name, "sample");
        assert_eq!(value.get("width").and_then(|v| v.as_integer()), Some(4));
    }
}
