//! Configuration module for reddit2md
//!
//! Settings are layered: built-in defaults, an optional TOML file, Reddit
//! credentials from the environment, then command-line flags. The merged
//! result is checked with [`validate`] before anything is fetched.
//!
//! # Example
//!
//! ```no_run
//! use reddit2md::config::{apply_env, load_config, validate};
//! use std::path::Path;
//!
//! let mut config = load_config(Path::new("reddit2md.toml")).unwrap();
//! apply_env(&mut config);
//! validate(&config).unwrap();
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ChainConfig, Config, OutputConfig, RedditConfig};

// Re-export parser and validation functions
pub use parser::{apply_env, apply_env_with, load_config, CLIENT_ID_VAR, CLIENT_SECRET_VAR};
pub use validation::validate;
