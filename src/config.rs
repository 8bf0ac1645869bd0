use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub llm: LlmSettings,
    pub templates_dir: String,
    pub static_dir: String,
}

/// Connection and sampling settings for the completion server.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub server_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: usize,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, falling back to defaults
    /// for missing or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            host: string_or("WEAVER_HOST", "127.0.0.1"),
            port: parse_or(&lookup, "WEAVER_PORT", 8080),
            llm: LlmSettings {
                server_url: string_or("LLM_SERVER_URL", "http://localhost:8081")
                    .trim_end_matches('/')
                    .to_string(),
                model: string_or("LLM_MODEL", "local-model"),
                api_key: lookup("LLM_API_KEY").filter(|v| !v.trim().is_empty()),
                temperature: parse_or(&lookup, "TEMPERATURE", 0.7),
                top_p: parse_or(&lookup, "TOP_P", 0.95),
                max_tokens: parse_or(&lookup, "MAX_TOKENS", 512),
                timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 60)),
            },
            templates_dir: string_or("TEMPLATES_DIR", "templates"),
            static_dir: string_or("STATIC_DIR", "static"),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = settings_from(&[]);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.llm.server_url, "http://localhost:8081");
        assert_eq!(settings.llm.model, "local-model");
        assert!(settings.llm.api_key.is_none());
        assert_eq!(settings.llm.max_tokens, 512);
        assert_eq!(settings.llm.timeout, Duration::from_secs(60));
        assert_eq!(settings.templates_dir, "templates");
    }

    #[test]
    fn reads_overrides() {
        let settings = settings_from(&[
            ("WEAVER_PORT", "9000"),
            ("LLM_SERVER_URL", "http://llm.internal:8000/"),
            ("LLM_API_KEY", "secret"),
            ("TEMPERATURE", "0.2"),
            ("MAX_TOKENS", "1024"),
        ]);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.llm.server_url, "http://llm.internal:8000");
        assert_eq!(settings.llm.api_key.as_deref(), Some("secret"));
        assert!((settings.llm.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(settings.llm.max_tokens, 1024);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let settings = settings_from(&[("WEAVER_PORT", "eighty"), ("TOP_P", "")]);
        assert_eq!(settings.port, 8080);
        assert!((settings.llm.top_p - 0.95).abs() < f32::EPSILON);
    }
}
