// src/config.rs
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_SERVICE_NAME: &str = "FirePro One AI";
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.4;
pub const DEFAULT_CHAT_ROUTE: &str = "/chat";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),

    #[error("OPENAI_API_STYLE must be 'chat' or 'responses', got '{0}'")]
    InvalidApiStyle(String),

    #[error("OPENAI_TEMPERATURE must be a number, got '{0}'")]
    InvalidTemperature(String),

    #[error("chat route '{0}' must be a literal path starting with '/'")]
    InvalidRoute(String),
}

/// Which completion endpoint shape the relay talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStyle {
    /// `POST /v1/chat/completions`
    #[default]
    ChatCompletions,
    /// `POST /v1/responses`
    Responses,
}

impl ApiStyle {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_lowercase().as_str() {
            "chat" | "chat_completions" | "completions" => Ok(ApiStyle::ChatCompletions),
            "responses" => Ok(ApiStyle::Responses),
            _ => Err(ConfigError::InvalidApiStyle(raw.to_string())),
        }
    }
}

/// Process-wide settings, read once at startup and shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_name: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub api_style: ApiStyle,
    pub temperature: f64,
    pub chat_routes: Vec<String>,
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_style: ApiStyle::default(),
            temperature: DEFAULT_TEMPERATURE,
            chat_routes: vec![DEFAULT_CHAT_ROUTE.to_string()],
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Config::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let api_style = match get("OPENAI_API_STYLE") {
            Some(raw) => ApiStyle::parse(&raw)?,
            None => defaults.api_style,
        };

        let temperature = match get("OPENAI_TEMPERATURE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidTemperature(raw))?,
            None => defaults.temperature,
        };

        let chat_routes = match get("CHAT_ROUTES") {
            Some(raw) => parse_routes(&raw)?,
            None => defaults.chat_routes,
        };

        Ok(Self {
            service_name: get("SERVICE_NAME").unwrap_or(defaults.service_name),
            port,
            api_key: get("OPENAI_API_KEY"),
            api_base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            model: get("OPENAI_MODEL").unwrap_or(defaults.model),
            api_style,
            temperature,
            chat_routes,
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        })
    }
}

fn parse_routes(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut routes = Vec::new();
    for route in raw.split(',').map(str::trim).filter(|r| !r.is_empty()) {
        if !is_literal_path(route) {
            return Err(ConfigError::InvalidRoute(route.to_string()));
        }
        if !routes.iter().any(|r| r == route) {
            routes.push(route.to_string());
        }
    }
    if routes.is_empty() {
        routes.push(DEFAULT_CHAT_ROUTE.to_string());
    }
    Ok(routes)
}

// Captures and wildcards (`:id`, `*rest`, `{id}`) would make the router panic at startup.
fn is_literal_path(route: &str) -> bool {
    route.starts_with('/')
        && !route.contains(['{', '}'])
        && route
            .split('/')
            .all(|segment| !segment.starts_with([':', '*']))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.port, 10000);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.model, "gpt-4.1-mini");
        assert_eq!(cfg.api_style, ApiStyle::ChatCompletions);
        assert_eq!(cfg.chat_routes, vec!["/chat".to_string()]);
        assert!((cfg.temperature - 0.4).abs() < f64::EPSILON);
        assert!(cfg.static_dir.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:9999/"),
            ("OPENAI_API_STYLE", "responses"),
            ("CHAT_ROUTES", "/chat, /api/chat,/ai,/chat"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:9999");
        assert_eq!(cfg.api_style, ApiStyle::Responses);
        assert_eq!(cfg.chat_routes, vec!["/chat", "/api/chat", "/ai"]);
    }

    #[test]
    fn blank_api_key_is_absent() {
        let cfg = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "   ")])).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("PORT", "abc")])).unwrap_err(),
            ConfigError::InvalidPort("abc".into())
        );
        assert!(matches!(
            Config::from_lookup(lookup(&[("OPENAI_API_STYLE", "grpc")])),
            Err(ConfigError::InvalidApiStyle(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("OPENAI_TEMPERATURE", "warm")])),
            Err(ConfigError::InvalidTemperature(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("CHAT_ROUTES", "chat")])),
            Err(ConfigError::InvalidRoute(_))
        ));
    }

    #[test]
    fn rejects_non_literal_routes() {
        for raw in ["/chat/:id", "/chat,/files/*rest", "/ai/{model}", "/*"] {
            assert!(
                matches!(
                    Config::from_lookup(lookup(&[("CHAT_ROUTES", raw)])),
                    Err(ConfigError::InvalidRoute(_))
                ),
                "accepted {raw}"
            );
        }
        let cfg = Config::from_lookup(lookup(&[("CHAT_ROUTES", "/api/v1/chat")])).unwrap();
        assert_eq!(cfg.chat_routes, vec!["/api/v1/chat"]);
    }
}
