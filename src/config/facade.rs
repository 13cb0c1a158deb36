//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::FolioConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<FolioConfig, ApiError> {
        Self::checked(MergeService::load(None)?)
    }

    /// Load configuration with an explicit file layered over the global one.
    pub fn load_from_file(path: &Path) -> Result<FolioConfig, ApiError> {
        Self::checked(MergeService::load(Some(path))?)
    }

    /// Create default configuration.
    pub fn default() -> FolioConfig {
        FolioConfig::default()
    }

    fn checked(config: FolioConfig) -> Result<FolioConfig, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }
}
