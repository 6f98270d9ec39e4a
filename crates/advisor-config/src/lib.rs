use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable that overrides any API key in the config file.
/// Keys belong in the environment, not in source or checked-in files.
pub const API_KEY_ENV: &str = "ADVISOR_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub providers: ProvidersConfig,
}

/// Provider configuration with named configs per provider type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Default provider in format "<provider_type>.<config_name>"
    pub default_provider: String,

    /// Named hosted-deployment provider configs
    #[serde(default)]
    pub hosted: HashMap<String, HostedConfig>,

    /// Named mock provider configs (keyless demo runs)
    #[serde(default)]
    pub mock: HashMap<String, MockConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedConfig {
    /// API key; leave unset and export ADVISOR_API_KEY instead
    pub api_key: Option<String>,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Optional canned reply overriding the built-in demo text
    pub reply: Option<String>,
}

impl HostedConfig {
    /// Resolve the API key: the environment wins over the file value.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            return Ok(key);
        }
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured. Set {} or add api_key to the hosted provider config",
                    API_KEY_ENV
                )
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut mock_configs = HashMap::new();
        mock_configs.insert("default".to_string(), MockConfig::default());

        Self {
            providers: ProvidersConfig {
                default_provider: "mock.default".to_string(),
                hosted: HashMap::new(),
                mock: mock_configs,
            },
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Check if any config file exists
        let config_exists = if let Some(path) = config_path {
            Path::new(path).exists()
        } else {
            Self::default_paths().iter().any(|path| {
                let expanded_path = shellexpand::tilde(path);
                Path::new(expanded_path.as_ref()).exists()
            })
        };

        // If no config exists, create and save a default config
        if !config_exists {
            let default_config = Self::default();

            let config_dir = dirs::home_dir()
                .map(|mut path| {
                    path.push(".config");
                    path.push("advisor");
                    path
                })
                .unwrap_or_else(|| std::path::PathBuf::from("."));

            std::fs::create_dir_all(&config_dir).ok();

            let config_file = config_dir.join("config.toml");
            if let Some(path) = config_file.to_str() {
                if let Err(e) = default_config.save(path) {
                    eprintln!("Warning: Could not save default config: {}", e);
                } else {
                    println!("Created default configuration at: {}", config_file.display());
                }
            }

            return Ok(default_config);
        }

        // Load config from file
        let config_path_to_load = if let Some(path) = config_path {
            Some(path.to_string())
        } else {
            Self::default_paths().iter().find_map(|path| {
                let expanded_path = shellexpand::tilde(path);
                if Path::new(expanded_path.as_ref()).exists() {
                    Some(expanded_path.to_string())
                } else {
                    None
                }
            })
        };

        if let Some(path) = config_path_to_load {
            let config_content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&config_content)?;

            // Validate the default_provider format
            config.validate_provider_reference(&config.providers.default_provider)?;

            return Ok(config);
        }

        Ok(Self::default())
    }

    fn default_paths() -> [&'static str; 2] {
        ["./advisor.toml", "~/.config/advisor/config.toml"]
    }

    /// Validate a provider reference (format: "<provider_type>.<config_name>")
    fn validate_provider_reference(&self, reference: &str) -> Result<()> {
        let (provider_type, config_name) = Self::parse_provider_reference(reference)?;

        match provider_type.as_str() {
            "hosted" => {
                if !self.providers.hosted.contains_key(&config_name) {
                    anyhow::bail!(
                        "Provider config 'hosted.{}' not found. Available: {:?}",
                        config_name,
                        self.providers.hosted.keys().collect::<Vec<_>>()
                    );
                }
            }
            "mock" => {
                if !self.providers.mock.contains_key(&config_name) {
                    anyhow::bail!(
                        "Provider config 'mock.{}' not found. Available: {:?}",
                        config_name,
                        self.providers.mock.keys().collect::<Vec<_>>()
                    );
                }
            }
            _ => {
                anyhow::bail!(
                    "Unknown provider type '{}'. Valid types: hosted, mock",
                    provider_type
                );
            }
        }

        Ok(())
    }

    /// Parse a provider reference into (provider_type, config_name)
    pub fn parse_provider_reference(reference: &str) -> Result<(String, String)> {
        let parts: Vec<&str> = reference.split('.').collect();
        if parts.len() != 2 {
            anyhow::bail!(
                "Invalid provider reference '{}'. Expected format: '<provider_type>.<config_name>'",
                reference
            );
        }
        Ok((parts[0].to_string(), parts[1].to_string()))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// Get a hosted config by name
    pub fn get_hosted_config(&self, name: &str) -> Option<&HostedConfig> {
        self.providers.hosted.get(name)
    }

    /// Get a mock config by name
    pub fn get_mock_config(&self, name: &str) -> Option<&MockConfig> {
        self.providers.mock.get(name)
    }
}

#[cfg(test)]
mod tests;
