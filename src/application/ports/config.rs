//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted deck configuration
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored config; a missing file yields an empty config
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the default config. Fails if one already exists.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load, apply `edit`, and save only if the edit succeeded
    async fn update<F>(&self, edit: F) -> Result<AppConfig, ConfigError>
    where
        Self: Sized,
        F: FnOnce(&mut AppConfig) -> Result<(), ConfigError> + Send,
    {
        let mut config = self.load().await?;
        edit(&mut config)?;
        self.save(&config).await?;
        Ok(config)
    }
}
