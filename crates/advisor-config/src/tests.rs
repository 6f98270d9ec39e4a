#[cfg(test)]
mod tests {
    use crate::{Config, HostedConfig};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_hosted_provider_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("advisor.toml");

        let config_content = r#"
[providers]
default_provider = "hosted.default"

[providers.hosted.default]
api_key = "test-key"
endpoint = "https://example.openai.azure.example"
deployment = "advisor-gpt"
api_version = "2024-06-01"
max_tokens = 800
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = Config::load(Some(config_path.to_str().unwrap())).unwrap();

        assert_eq!(config.providers.default_provider, "hosted.default");
        let hosted = config.get_hosted_config("default").unwrap();
        assert_eq!(hosted.deployment, "advisor-gpt");
        assert_eq!(hosted.max_tokens, Some(800));
        assert_eq!(hosted.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_unknown_default_provider_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("advisor.toml");

        let config_content = r#"
[providers]
default_provider = "hosted.missing"

[providers.mock.default]
"#;

        fs::write(&config_path, config_content).unwrap();

        let result = Config::load(Some(config_path.to_str().unwrap()));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("hosted.missing"));
    }

    #[test]
    fn test_malformed_provider_reference_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("advisor.toml");

        fs::write(
            &config_path,
            "[providers]\ndefault_provider = \"justoneword\"\n",
        )
        .unwrap();

        assert!(Config::load(Some(config_path.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_default_config_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("saved.toml");

        let config = Config::default();
        config.save(config_path.to_str().unwrap()).unwrap();

        let reloaded = Config::load(Some(config_path.to_str().unwrap())).unwrap();
        assert_eq!(reloaded.providers.default_provider, "mock.default");
        assert!(reloaded.get_mock_config("default").is_some());
    }

    fn hosted(api_key: Option<&str>) -> HostedConfig {
        HostedConfig {
            api_key: api_key.map(|k| k.to_string()),
            endpoint: "https://example.openai.azure.example".to_string(),
            deployment: "advisor-gpt".to_string(),
            api_version: None,
            max_tokens: None,
            temperature: None,
        }
    }

    #[test]
    fn test_environment_key_wins_over_file_key() {
        let config = hosted(Some("file-key"));
        let key = config
            .resolve_api_key_with(|_| Some("env-key".to_string()))
            .unwrap();
        assert_eq!(key, "env-key");
    }

    #[test]
    fn test_file_key_used_when_environment_is_empty() {
        let config = hosted(Some("file-key"));
        let key = config.resolve_api_key_with(|_| None).unwrap();
        assert_eq!(key, "file-key");
    }

    #[test]
    fn test_missing_key_everywhere_is_an_error() {
        let config = hosted(None);
        let result = config.resolve_api_key_with(|_| None);
        assert!(result.unwrap_err().to_string().contains("ADVISOR_API_KEY"));
    }
}
