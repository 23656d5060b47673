//! Configuration management for the faucet page.

use crate::error::{FaucetError, FaucetResult};
use crate::messages::Locale;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Configuration for the faucet page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetConfig {
    /// HTTP server configuration
    pub http: HttpConfig,

    /// Remote verification server
    pub verification: VerificationConfig,

    /// Page presentation
    pub page: PageConfig,

    /// Networks listed in the faucet details card
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port to bind to
    pub port: u16,

    /// Address to bind to
    pub bind_address: String,

    /// Request header carrying the session id set by the auth proxy.
    /// Unset means every visitor is anonymous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_header: Option<String>,
}

/// Verification server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Base URL of the verification server, e.g. `http://localhost:3002`
    pub base_url: String,

    /// Path of the "send verification code" endpoint
    pub send_code_path: String,

    /// Path of the "verify code" endpoint
    pub verify_code_path: String,

    /// Request timeout in seconds. Unset means the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Page presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Locale of all user-facing text
    #[serde(default)]
    pub locale: Locale,

    /// Page heading
    pub title: String,

    /// Logo shown in the header
    pub logo_url: String,

    /// Where the logo links to
    pub homepage_url: String,
}

/// A network served by the faucet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                port: 3000,
                bind_address: "127.0.0.1".to_string(),
                session_header: None,
            },
            verification: VerificationConfig {
                base_url: "http://localhost:3002".to_string(),
                send_code_path: "/api/send_verification_code".to_string(),
                verify_code_path: "/api/verify_code".to_string(),
                timeout_secs: None,
            },
            page: PageConfig {
                locale: Locale::En,
                title: "ChatGPT API Faucet".to_string(),
                logo_url: "/logo.png".to_string(),
                homepage_url: "https://openfox.cloud/".to_string(),
            },
            networks: Vec::new(),
        }
    }
}

impl VerificationConfig {
    /// Full URL of the "send verification code" endpoint
    pub fn send_code_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(&self.send_code_path)
    }

    /// Full URL of the "verify code" endpoint
    pub fn verify_code_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(&self.verify_code_path)
    }
}

impl FaucetConfig {
    /// Load configuration from a TOML file.
    ///
    /// Environment variables override file values, e.g. `FAUCET_HTTP__PORT`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> FaucetResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("FAUCET")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> FaucetResult<()> {
        if self.http.port == 0 {
            return Err(FaucetError::InvalidConfig(
                "HTTP port must be greater than 0".to_string(),
            ));
        }

        let base = Url::parse(&self.verification.base_url).map_err(|e| {
            FaucetError::InvalidConfig(format!("Invalid verification base_url: {}", e))
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(FaucetError::InvalidConfig(format!(
                "Verification base_url must use http or https, got {}",
                base.scheme()
            )));
        }

        for path in [&self.verification.send_code_path, &self.verification.verify_code_path] {
            if !path.starts_with('/') {
                return Err(FaucetError::InvalidConfig(format!(
                    "Endpoint path '{}' must start with '/'",
                    path
                )));
            }
        }

        if self.verification.timeout_secs == Some(0) {
            return Err(FaucetError::InvalidConfig(
                "Verification timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FaucetConfig::default();

        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert_eq!(config.page.locale, Locale::En);
        assert!(config.verification.timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = FaucetConfig::default();

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: FaucetConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.http.port, deserialized.http.port);
        assert_eq!(config.verification.base_url, deserialized.verification.base_url);
    }

    #[test]
    fn test_endpoint_urls() {
        let mut config = FaucetConfig::default();
        config.verification.base_url = "http://194.0.2.10:3002".to_string();

        assert_eq!(
            config.verification.send_code_url().unwrap().as_str(),
            "http://194.0.2.10:3002/api/send_verification_code"
        );
        assert_eq!(
            config.verification.verify_code_url().unwrap().as_str(),
            "http://194.0.2.10:3002/api/verify_code"
        );
    }

    #[test]
    fn test_config_from_file() -> anyhow::Result<()> {
        let toml_content = r#"
[http]
port = 8080
bind_address = "0.0.0.0"

[verification]
base_url = "https://verify.example.com"
send_code_path = "/api/send_verification_code"
verify_code_path = "/api/verify_code"
timeout_secs = 10

[page]
locale = "zh-CN"
title = "Test Faucet"
logo_url = "/logo.png"
homepage_url = "https://example.com/"

[[networks]]
name = "Sepolia"
chain_id = 11155111
"#;

        let temp_dir = tempfile::tempdir()?;
        let temp_path = temp_dir.path().join("test_config.toml");
        std::fs::write(&temp_path, toml_content)?;

        let config = FaucetConfig::from_file(&temp_path)?;

        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.bind_address, "0.0.0.0");
        assert_eq!(config.verification.timeout_secs, Some(10));
        assert_eq!(config.page.locale, Locale::ZhCn);
        assert_eq!(config.networks.len(), 1);
        assert_eq!(config.networks[0].chain_id, 11155111);

        Ok(())
    }

    #[test]
    fn test_config_validation() {
        let mut config = FaucetConfig::default();
        assert!(config.validate().is_ok());

        config.verification.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.verification.base_url = "ftp://verify.example.com".to_string();
        assert!(config.validate().is_err());

        config.verification.base_url = "https://verify.example.com".to_string();
        config.verification.verify_code_path = "api/verify_code".to_string();
        assert!(config.validate().is_err());

        config.verification.verify_code_path = "/api/verify_code".to_string();
        config.verification.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.verification.timeout_secs = Some(5);
        config.http.port = 0;
        assert!(matches!(config.validate(), Err(FaucetError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = FaucetConfig::from_file(temp_dir.path().join("missing.toml"));

        assert!(matches!(result, Err(FaucetError::Config(_))));
    }


    #[test]
    fn test_save_and_load_config() -> anyhow::Result<()> {
        let mut config = FaucetConfig::default();
        config.http.port = 8080;
        config.verification.base_url = "https://verify.example.com".to_string();

        let temp_dir = tempfile::tempdir()?;
        let temp_path = temp_dir.path().join("test_save_config.toml");
        config.save_to_file(&temp_path)?;

        let loaded_config = FaucetConfig::from_file(&temp_path)?;

        assert_eq!(config.http.port, loaded_config.http.port);
        assert_eq!(config.verification.base_url, loaded_config.verification.base_url);
        assert_eq!(config.page.title, loaded_config.page.title);

        Ok(())
    }
}
