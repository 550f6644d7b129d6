use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    /// The caller picked construction parameters that cannot work together.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("failed to read config: {0}")]
    ReadConfig(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

impl SceneError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, SceneError::Configuration(_))
    }
}
