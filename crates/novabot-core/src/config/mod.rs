//! Configuration module for novabot.
//!
//! Loads typed configuration from `~/.novabot/config.json`.
//! All fields use `serde` for zero-boilerplate deserialization.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub forms: FormsConfig,
    pub assistant: AssistantConfig,
}

impl Config {
    /// Load configuration from the default path (`~/.novabot/config.json`).
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".novabot")
            .join("config.json")
    }

    /// Validate the configuration, collecting every problem found.
    ///
    /// Empty webhook URLs are allowed (the form endpoints answer 503
    /// until configured); non-empty ones must be http(s).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.gateway.port == 0 {
            errors.push("gateway.port must be non-zero".to_string());
        }
        for (field, url) in [
            ("forms.contactWebhookUrl", &self.forms.contact_webhook_url),
            ("forms.auditWebhookUrl", &self.forms.audit_webhook_url),
        ] {
            if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(format!("{} must be an http(s) URL", field));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Write the default config template to disk.
    pub fn write_default_template() -> anyhow::Result<PathBuf> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = serde_json::json!({
            "gateway": {
                "host": "127.0.0.1",
                "port": 8790
            },
            "forms": {
                "contactWebhookUrl": "https://script.google.com/macros/s/YOUR_CONTACT_SCRIPT/exec",
                "auditWebhookUrl": "https://script.google.com/macros/s/YOUR_AUDIT_SCRIPT/exec"
            }
        });

        std::fs::write(&path, serde_json::to_string_pretty(&template)?)?;
        Ok(path)
    }
}

// ── Gateway Configuration ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl GatewayConfig {
    /// The bind address as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8790,
        }
    }
}

// ── Forms Configuration ─────────────────────────────────────────────

/// Spreadsheet-webhook endpoints the lead-capture forms relay to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormsConfig {
    pub contact_webhook_url: String,
    pub audit_webhook_url: String,
}

// ── Assistant Configuration ─────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssistantConfig {
    /// Greeting shown as the first assistant turn of a chat.
    pub greeting: String,
    /// Artificial delay before showing a reply, for the typing effect.
    pub typing_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi 👋 I'm Nova, your AI assistant. Ask me anything about this website."
                .into(),
            typing_delay_ms: 800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.gateway.port, 8790);
        assert!(config.forms.contact_webhook_url.is_empty());
        assert_eq!(config.assistant.typing_delay_ms, 800);
    }

    #[test]
    fn test_deserialize_minimal_json() {
        let json = r#"{"forms": {"contactWebhookUrl": "https://script.example/exec"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.forms.contact_webhook_url, "https://script.example/exec");
        // Untouched sections keep their defaults.
        assert_eq!(config.gateway.port, 8790);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_webhook_url() {
        let json = r#"{"forms": {"auditWebhookUrl": "not-a-url"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("auditWebhookUrl"));
    }

    #[test]
    fn test_gateway_addr() {
        let config = Config::default();
        assert_eq!(config.gateway.addr(), "127.0.0.1:8790");
    }
}
