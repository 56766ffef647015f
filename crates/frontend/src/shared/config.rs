use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    /// Page size for server-filtered screens
    pub page_size: u32,
    /// Limit used when a client-filtered screen loads its whole collection
    pub client_page_size: u32,
    pub search_debounce_ms: u32,
    pub optimistic_status: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub log_level: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "https://ewa-back.vercel.app/api"
request_timeout_ms = 15000

[list]
page_size = 10
client_page_size = 500
search_debounce_ms = 300
optimistic_status = true

[display]
currency_symbol = "$"
log_level = "debug"
"#;

/// localStorage key holding a TOML override
const CONFIG_STORAGE_KEY: &str = "console_config";

static CONFIG: OnceLock<ConsoleConfig> = OnceLock::new();

pub fn parse_config(text: &str) -> Result<ConsoleConfig, toml::de::Error> {
    toml::from_str(text)
}

fn default_config() -> ConsoleConfig {
    match parse_config(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            // embedded text is covered by tests; keep the console usable anyway
            log::error!("Embedded config is invalid: {}", e);
            ConsoleConfig {
                api: ApiConfig {
                    base_url: String::new(),
                    request_timeout_ms: 15000,
                },
                list: ListConfig {
                    page_size: 10,
                    client_page_size: 500,
                    search_debounce_ms: 300,
                    optimistic_status: false,
                },
                display: DisplayConfig {
                    currency_symbol: "$".into(),
                    log_level: "info".into(),
                },
            }
        }
    }
}

/// Picks the override when it parses, otherwise the embedded default.
pub fn resolve_config(override_text: Option<&str>) -> ConsoleConfig {
    match override_text {
        Some(text) if !text.trim().is_empty() => match parse_config(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring invalid '{}' override: {}", CONFIG_STORAGE_KEY, e);
                default_config()
            }
        },
        _ => default_config(),
    }
}

fn stored_override() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(CONFIG_STORAGE_KEY)
        .ok()?
}

/// Configuration loaded once per page
pub fn config() -> &'static ConsoleConfig {
    CONFIG.get_or_init(|| resolve_config(stored_override().as_deref()))
}

impl DisplayConfig {
    pub fn level(&self) -> log::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "info" => log::Level::Info,
            "trace" => log::Level::Trace,
            _ => log::Level::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "https://ewa-back.vercel.app/api");
        assert_eq!(config.list.search_debounce_ms, 300);
        assert_eq!(config.display.currency_symbol, "$");
    }

    #[test]
    fn test_valid_override_wins() {
        let text = DEFAULT_CONFIG.replace("currency_symbol = \"$\"", "currency_symbol = \"€\"");
        let config = resolve_config(Some(&text));
        assert_eq!(config.display.currency_symbol, "€");
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let config = resolve_config(Some("[api]\nbase_url = 5"));
        assert_eq!(config, parse_config(DEFAULT_CONFIG).unwrap());
        assert_eq!(resolve_config(Some("   ")), config);
    }

    #[test]
    fn test_log_level() {
        let mut display = parse_config(DEFAULT_CONFIG).unwrap().display;
        display.log_level = "WARN".into();
        assert_eq!(display.level(), log::Level::Warn);
        display.log_level = "verbose".into();
        assert_eq!(display.level(), log::Level::Debug);
    }
}
