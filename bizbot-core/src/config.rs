use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable holding the completion API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable holding the session signing secret.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BizbotConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub api_key: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1-mini".to_string(),
            temperature: 0.7,
            max_tokens: 200,
            timeout_seconds: 30,
            api_key: None,
        }
    }
}

impl CompletionConfig {
    /// API key from the config file, else from `OPENAI_API_KEY`. Empty when neither is set.
    pub fn resolved_api_key(&self) -> String {
        self.api_key_or(std::env::var(API_KEY_ENV).ok())
    }

    /// API key from the config file, else `fallback`.
    pub fn api_key_or(&self, fallback: Option<String>) -> String {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or(fallback)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChatConfig {
    pub min_message_interval_ms: u64,
    /// Replaces the built-in persona when set.
    pub system_prompt: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            min_message_interval_ms: 1000,
            system_prompt: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub secret: Option<String>,
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            cookie_name: "bizbot_session".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn resolved_secret(&self) -> Option<String> {
        self.secret
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| std::env::var(SECRET_KEY_ENV).ok().filter(|s| !s.is_empty()))
    }
}

impl BizbotConfig {
    /// Load `path` if it exists, then apply `BIZBOT__SECTION__KEY` overrides.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("BIZBOT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_tunables() {
        let config = BizbotConfig::default();
        assert_eq!(config.completion.model, "gpt-4.1-mini");
        assert_eq!(config.completion.max_tokens, 200);
        assert!((config.completion.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.chat.min_message_interval_ms, 1000);
        assert_eq!(config.session.cookie_name, "bizbot_session");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = BizbotConfig::load("does-not-exist-bizbot.toml").expect("load");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.completion.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn file_overrides_partial_sections() {
        let dir = std::env::temp_dir().join(format!("bizbot-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bizbot.toml");
        std::fs::write(
            &path,
            "[completion]\nmodel = \"gpt-4o-mini\"\n\n[chat]\nmin_message_interval_ms = 2500\n",
        )
        .unwrap();

        let config = BizbotConfig::load(path.to_str().unwrap()).expect("load");
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.max_tokens, 200);
        assert_eq!(config.chat.min_message_interval_ms, 2500);
        assert_eq!(config.server.host, "127.0.0.1");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn explicit_api_key_wins_over_environment() {
        let completion = CompletionConfig {
            api_key: Some("sk-from-file".to_string()),
            ..Default::default()
        };
        assert_eq!(completion.resolved_api_key(), "sk-from-file");
    }

    #[test]
    fn empty_api_key_uses_fallback() {
        let completion = CompletionConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(completion.api_key_or(Some("sk-env".to_string())), "sk-env");
        assert_eq!(completion.api_key_or(None), "");
    }

    #[test]
    fn explicit_secret_is_used() {
        let session = SessionConfig {
            secret: Some("s3cret".to_string()),
            ..Default::default()
        };
        assert_eq!(session.resolved_secret().as_deref(), Some("s3cret"));
    }
}
