use crate::config::types::Config;
use crate::ConfigError;
use std::path::Path;

/// Environment variable holding the Reddit client id
pub const CLIENT_ID_VAR: &str = "REDDIT_CLIENT_ID";

/// Environment variable holding the Reddit client secret
pub const CLIENT_SECRET_VAR: &str = "REDDIT_CLIENT_SECRET";

/// Loads a configuration file from the given path
///
/// Missing sections and keys fall back to their defaults. The result is not
/// validated yet, since command-line flags may still override it.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use reddit2md::config::load_config;
///
/// let config = load_config(Path::new("reddit2md.toml")).unwrap();
/// println!("Delay: {}s", config.chain.delay_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Fills Reddit credentials from the process environment
pub fn apply_env(config: &mut Config) {
    apply_env_with(config, |key| std::env::var(key).ok());
}

/// Fills Reddit credentials from `lookup`; empty values are ignored
pub fn apply_env_with<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(id) = lookup(CLIENT_ID_VAR).filter(|v| !v.is_empty()) {
        config.reddit.client_id = id;
    }

    if let Some(secret) = lookup(CLIENT_SECRET_VAR).filter(|v| !v.is_empty()) {
        config.reddit.client_secret = secret;
    }
}
