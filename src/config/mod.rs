//! Configuration
//!
//! Layered settings: built-in defaults, the global config file, an explicit
//! file, then `FOLIO__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub workspace: WorkspaceSettings,

    #[serde(default)]
    pub templates: TemplateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tree behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Extension appended by CreateFile when the name has none
    #[serde(default = "default_extension")]
    pub default_extension: String,

    /// Root-level file selection falls back to after a delete
    #[serde(default = "default_main_document")]
    pub main_document: String,

    /// Select the first file when a workspace is loaded
    #[serde(default = "default_true")]
    pub auto_select: bool,
}

fn default_extension() -> String {
    "tex".to_string()
}

fn default_main_document() -> String {
    "main.tex".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            default_extension: default_extension(),
            main_document: default_main_document(),
            auto_select: default_true(),
        }
    }
}

/// Content templates; `None` keeps the built-in skeleton
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub tex: Option<String>,

    #[serde(default)]
    pub bib: Option<String>,
}

impl FolioConfig {
    /// Sanity checks that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let ext = &self.workspace.default_extension;
        if ext.starts_with('.') || ext.contains('/') {
            return Err(format!(
                "workspace.default_extension must be a bare extension, got '{}'",
                ext
            ));
        }
        if self.workspace.main_document.trim().is_empty() {
            return Err("workspace.main_document cannot be empty".to_string());
        }
        Ok(())
    }
}
