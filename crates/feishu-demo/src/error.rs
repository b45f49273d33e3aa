use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("feishu.{0} is not set")]
    Missing(&'static str),

    #[error("feishu.{0} still holds the example placeholder; fill in your app credentials")]
    Placeholder(&'static str),
}
