use crate::editor::EditorSettings;
use crate::error::ConfigError;
use crate::fetch::request::RequestShape;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "stylecheck.toml";

const DEFAULT_ENDPOINT: &str = "http://localhost:5000/code";

const CONFIG_HEADER: &str = "\
# stylecheck configuration
#
# [endpoint]
#   url           - checking service URL (POST)
#   request_shape - \"bare\" sends the source as a JSON string,
#                   \"wrapped\" sends {\"code\": ..., \"tab_size\": ...}
#   timeout_secs  - request timeout in seconds, 0 disables it
#
# [editor]
#   theme         - monokai, github, tomorrow, kuroir, twilight, xcode,
#                   textmate, solarized_dark, solarized_light, terminal

";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub editor: EditorSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    pub request_shape: RequestShape,
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            request_shape: RequestShape::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load config from `path`, falling back to defaults when no path was
    /// given and the default file does not exist. Overrides use dot notation
    /// (`endpoint.url=http://...`) and are applied before deserialization.
    pub fn load(path: Option<&str>, overrides: &[String]) -> Result<Self, ConfigError> {
        let mut table = match path {
            Some(p) => read_table(Path::new(p))?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                read_table(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {
                debug!("No {} found, using default config", DEFAULT_CONFIG_PATH);
                toml::Table::new()
            }
        };

        for expr in overrides {
            debug!("Applying config override: {}", expr);
            apply_override(&mut table, expr)?;
        }

        let config: Config = toml::Value::Table(table).try_into()?;
        Ok(config)
    }

    /// Write the default config to `path`
    pub fn write_default(path: &Path, override_existing: bool) -> Result<(), ConfigError> {
        if path.exists() && !override_existing {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        let body = toml::to_string_pretty(&Config::default())?;
        fs::write(path, format!("{}{}", CONFIG_HEADER, body)).map_err(|source| {
            ConfigError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;

        info!("Config written to {}", path.display());
        Ok(())
    }
}

fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
    debug!("Reading config from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

fn apply_override(table: &mut toml::Table, expr: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::Override {
        expr: expr.to_string(),
        reason: reason.to_string(),
    };

    let (key, raw) = expr.split_once('=').ok_or_else(|| invalid("expected key=value"))?;
    let key = key.trim();
    if key.is_empty() || key.split('.').any(|s| s.trim().is_empty()) {
        return Err(invalid("empty key segment"));
    }

    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };

    let mut current = table;
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            if !current.contains_key(segment) {
                current.insert(segment.to_string(), toml::Value::Table(toml::Table::new()));
            }
            current = match current.get_mut(segment) {
                Some(toml::Value::Table(t)) => t,
                _ => return Err(invalid(&format!("'{}' is not a table", segment))),
            };
        }
    }

    current.insert(leaf.to_string(), parse_override_value(raw.trim()));
    Ok(())
}

/// Parse an override as a TOML value, falling back to a plain string
fn parse_override_value(raw: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("value = {}", raw))
        .ok()
        .and_then(|mut t| t.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}
