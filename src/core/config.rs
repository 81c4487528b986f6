use std::path::{Path, PathBuf};

use scraper::Selector;
use thiserror::Error;

use crate::extraction::{duplicate_names, Locator, Strategy, StrategyRegistry};

// ---------------------------------------------------------------------------
// ScoutConfig — file-based config loader (product-scout.json) with env-var fallback
// ---------------------------------------------------------------------------

pub const CONFIG_FILE_NAME: &str = "product-scout.json";
pub const ENV_CONFIG_PATH: &str = "PRODUCT_SCOUT_CONFIG";
pub const ENV_PORT: &str = "PRODUCT_SCOUT_PORT";
pub const ENV_MAX_HTML_BYTES: &str = "PRODUCT_SCOUT_MAX_HTML_BYTES";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_HTML_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid strategy {name:?}: {reason}")]
    InvalidStrategy { name: String, reason: String },

    #[error("duplicate strategy name {0:?}")]
    DuplicateStrategy(String),
}

/// Top-level config loaded from `product-scout.json`.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct ScoutConfig {
    /// HTTP port for the server binary. Default: 5000.
    pub port: Option<u16>,
    /// Largest HTML payload `/extract` accepts. Default: 5 MiB.
    pub max_html_bytes: Option<usize>,
    /// Site strategies consulted before the built-in ones.
    #[serde(default)]
    pub strategies: Vec<Strategy>,
}

impl ScoutConfig {
    /// Read and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let cfg: ScoutConfig =
            serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject custom strategies that could never match, would swallow every
    /// URL, or carry selectors the parser rejects.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let builtin = StrategyRegistry::builtin();
        let dupes = duplicate_names(self.strategies.iter().chain(builtin.iter()));
        if let Some(name) = dupes.into_iter().next() {
            return Err(ConfigError::DuplicateStrategy(name));
        }

        for strategy in &self.strategies {
            validate_strategy(strategy)?;
        }
        Ok(())
    }

    /// Port: JSON field → `PRODUCT_SCOUT_PORT` / `PORT` env vars → 5000.
    pub fn resolve_port(&self) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        port_from_env().unwrap_or(DEFAULT_PORT)
    }

    /// Max HTML bytes: JSON field → `PRODUCT_SCOUT_MAX_HTML_BYTES` env var → 5 MiB.
    pub fn resolve_max_html_bytes(&self) -> usize {
        if let Some(n) = self.max_html_bytes {
            return n;
        }
        std::env::var(ENV_MAX_HTML_BYTES)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_HTML_BYTES)
    }

    /// Registry with this config's strategies ahead of the built-ins.
    pub fn registry(&self) -> StrategyRegistry {
        StrategyRegistry::with_custom(self.strategies.iter().cloned())
    }
}

fn validate_strategy(strategy: &Strategy) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidStrategy {
        name: strategy.name.clone(),
        reason,
    };

    if strategy.name.trim().is_empty() {
        return Err(invalid("name is empty".to_string()));
    }
    if strategy.url_fragments.is_empty() {
        return Err(invalid("url_fragments is empty".to_string()));
    }
    if strategy.url_fragments.iter().any(|f| f.trim().is_empty()) {
        return Err(invalid("url_fragments contains a blank entry".to_string()));
    }

    let chains = [
        ("title", &strategy.title),
        ("price", &strategy.price),
        ("description", &strategy.description),
    ];
    for (field, chain) in chains {
        for locator in chain {
            match locator {
                Locator::Text { selector } => {
                    if let Err(e) = Selector::parse(selector) {
                        return Err(invalid(format!(
                            "{} selector {:?} does not parse: {}",
                            field, selector, e
                        )));
                    }
                }
                Locator::Meta { key } if key.trim().is_empty() => {
                    return Err(invalid(format!("{} meta key is empty", field)));
                }
                Locator::Meta { .. } => {}
            }
        }
    }
    Ok(())
}

/// Port from `PRODUCT_SCOUT_PORT`, then `PORT`.
pub fn port_from_env() -> Option<u16> {
    for k in [ENV_PORT, "PORT"] {
        if let Ok(v) = std::env::var(k) {
            if let Ok(p) = v.trim().parse::<u16>() {
                return Some(p);
            }
        }
    }
    None
}

/// Candidate config locations, first found wins:
/// 1. `PRODUCT_SCOUT_CONFIG` env var path
/// 2. `./product-scout.json`
/// 3. `../product-scout.json`
/// 4. `<config dir>/product-scout/config.json`
pub fn config_candidates() -> Vec<PathBuf> {
    let mut v = vec![
        PathBuf::from(CONFIG_FILE_NAME),
        PathBuf::from("..").join(CONFIG_FILE_NAME),
    ];
    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        v.insert(0, PathBuf::from(env_path));
    }
    if let Some(dir) = dirs::config_dir() {
        v.push(dir.join("product-scout").join("config.json"));
    }
    v
}

/// Load `product-scout.json` from the standard locations.
///
/// Missing file → `ScoutConfig::default()` (silent, env-var fallbacks apply).
/// Parse or validation error → log a warning, return `ScoutConfig::default()`.
pub fn load_config() -> ScoutConfig {
    for path in config_candidates() {
        if !path.is_file() {
            continue;
        }
        match ScoutConfig::from_path(&path) {
            Ok(cfg) => {
                tracing::info!(
                    "{} loaded from {} ({} custom strategies)",
                    CONFIG_FILE_NAME,
                    path.display(),
                    cfg.strategies.len()
                );
                return cfg;
            }
            Err(e) => {
                tracing::warn!("{} - using defaults", e);
                return ScoutConfig::default();
            }
        }
    }

    ScoutConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg = ScoutConfig::from_json("{}").unwrap();
        assert!(cfg.strategies.is_empty());
        assert_eq!(cfg.port, None);
        assert_eq!(cfg.registry().names(), vec!["amazon", "flipkart", "generic"]);
    }

    #[test]
    fn explicit_fields_win_over_env() {
        let cfg = ScoutConfig {
            port: Some(8081),
            max_html_bytes: Some(1024),
            strategies: Vec::new(),
        };
        assert_eq!(cfg.resolve_port(), 8081);
        assert_eq!(cfg.resolve_max_html_bytes(), 1024);
    }

    #[test]
    fn parses_custom_strategy() {
        let cfg = ScoutConfig::from_json(
            r##"{
                "strategies": [{
                    "name": "ebay",
                    "url_fragments": ["ebay."],
                    "title": [{"kind": "text", "selector": "h1.x-item-title__mainTitle"}],
                    "price": [{"kind": "text", "selector": ".x-price-primary"}],
                    "description": [{"kind": "meta", "key": "og:description"}]
                }]
            }"##,
        )
        .unwrap();
        let registry = cfg.registry();
        assert_eq!(
            registry.names(),
            vec!["ebay", "amazon", "flipkart", "generic"]
        );
        assert_eq!(registry.select("https://www.ebay.com/itm/1").name, "ebay");
    }

    #[test]
    fn rejects_strategy_without_fragments() {
        let err = ScoutConfig::from_json(r#"{"strategies":[{"name":"all"}]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStrategy { .. }), "{err}");
    }

    #[test]
    fn rejects_blank_fragment() {
        let err = ScoutConfig::from_json(
            r#"{"strategies":[{"name":"blank","url_fragments":["  "]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStrategy { .. }), "{err}");
    }

    #[test]
    fn rejects_bad_selector() {
        let err = ScoutConfig::from_json(
            r#"{"strategies":[{
                "name":"broken",
                "url_fragments":["broken.example"],
                "price":[{"kind":"text","selector":"div[[["}]
            }]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not parse"), "{err}");
    }

    #[test]
    fn rejects_name_clash_with_builtin() {
        let err = ScoutConfig::from_json(
            r#"{"strategies":[{"name":"amazon","url_fragments":["amazon.in"]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateStrategy(ref n) if n == "amazon"));
    }

    #[test]
    fn parse_error_is_reported() {
        let err = ScoutConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
