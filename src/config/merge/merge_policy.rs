//! Built-in defaults seeded into every config builder.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder pre-populated with the defaults every other source overrides.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = Config::builder()
        .set_default("workspace.default_extension", "tex")?
        .set_default("workspace.main_document", "main.tex")?
        .set_default("workspace.auto_select", true)?
        .set_default("logging.level", "info")?;
    Ok(builder)
}
