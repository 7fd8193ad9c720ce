use crate::config::parser::{CLIENT_ID_VAR, CLIENT_SECRET_VAR};
use crate::config::types::{ChainConfig, Config, OutputConfig, RedditConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_reddit_config(&config.reddit)?;
    validate_chain_config(&config.chain)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates Reddit credentials and endpoints
fn validate_reddit_config(config: &RedditConfig) -> Result<(), ConfigError> {
    if config.client_id.is_empty() || config.client_secret.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} and {} environment variables must be set",
            CLIENT_ID_VAR, CLIENT_SECRET_VAR
        )));
    }

    for (name, base) in [("auth-base", &config.auth_base), ("api-base", &config.api_base)] {
        Url::parse(base)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, base, e)))?;
    }

    Ok(())
}

/// Validates traversal settings
fn validate_chain_config(config: &ChainConfig) -> Result<(), ConfigError> {
    if config.url.is_empty() {
        return Err(ConfigError::Validation("'url' argument is required".to_string()));
    }

    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid post URL '{}': {}", config.url, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "Post URL '{}' must use HTTP(S)",
            config.url
        )));
    }

    if config.next_label.trim().is_empty() {
        return Err(ConfigError::InvalidPattern(
            "next link label cannot be empty".to_string(),
        ));
    }

    if config.link_domain.trim().is_empty() {
        return Err(ConfigError::InvalidPattern(
            "next link domain cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output settings
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("'output' argument is required".to_string()));
    }

    if let Some(bundle) = &config.bundle {
        if bundle.trim().is_empty() {
            return Err(ConfigError::Validation(
                "bundle path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
