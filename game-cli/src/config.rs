use anyhow::{Context, Result};
use game_core::GameConfig;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Fixed RNG seed; a random one is used when unset.
    pub seed: Option<u64>,
    pub frame_millis: u64,
    pub round_seconds: u32,
    pub json_output: bool,
}

impl Config {
    /// Read configuration from `SKETCH_*` environment variables.
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            seed: lookup("SKETCH_SEED")
                .map(|value| parse_var("SKETCH_SEED", &value))
                .transpose()?,
            frame_millis: parse_or(&lookup, "SKETCH_FRAME_MILLIS", defaults.frame_millis)?.max(1),
            round_seconds: parse_or(&lookup, "SKETCH_ROUND_SECONDS", defaults.round_seconds)?
                .max(1),
            json_output: lookup("SKETCH_JSON")
                .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
                .unwrap_or(defaults.json_output),
        })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            round_seconds: self.round_seconds,
            ..GameConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            frame_millis: 100,
            round_seconds: GameConfig::default().round_seconds,
            json_output: false,
        }
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {}: '{}'", key, value))
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => parse_var(key, &value),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.game_config(), GameConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SKETCH_SEED", "42"),
            ("SKETCH_FRAME_MILLIS", "250"),
            ("SKETCH_ROUND_SECONDS", "30"),
            ("SKETCH_JSON", "true"),
        ])
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.frame_millis, 250);
        assert!(config.json_output);
        assert_eq!(config.game_config().round_seconds, 30);
    }

    #[test]
    fn test_invalid_value() {
        let err = config_from(&[("SKETCH_SEED", "abc")]).unwrap_err();
        assert!(err.to_string().contains("Invalid SKETCH_SEED"));
    }

    #[test]
    fn test_zero_values_are_raised() {
        let config = config_from(&[("SKETCH_FRAME_MILLIS", "0"), ("SKETCH_ROUND_SECONDS", "0")])
            .unwrap();
        assert_eq!(config.frame_millis, 1);
        assert_eq!(config.round_seconds, 1);
    }
}
