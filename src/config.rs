//! Configuration file support for bom-reconciler.
//!
//! Provides YAML-based configuration through `bom-reconciler.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bom_reconciler::shared::Result;

pub const CONFIG_FILENAME: &str = "bom-reconciler.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub project_name: Option<String>,
    pub project_type: Option<String>,
    pub inputs: Option<Vec<PathBuf>>,
    pub comparison_bom: Option<PathBuf>,
    pub output_folder: Option<PathBuf>,
    pub output_suffix: Option<String>,
    pub exclude_components: Option<Vec<String>>,
    pub include_components: Option<Vec<IncludeComponent>>,
    pub internal_repos: Option<Vec<String>>,
    pub sw360: Option<Sw360Config>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A component added by hand to every generated BOM.
#[derive(Debug, Deserialize)]
pub struct IncludeComponent {
    pub name: String,
    pub version: String,
    pub purl: String,
    pub group: Option<String>,
}

/// Component tracker connection.
#[derive(Debug, Deserialize)]
pub struct Sw360Config {
    pub url: String,
    /// Environment variable holding the API token
    pub token_env: Option<String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref includes) = config.include_components {
        for (i, entry) in includes.iter().enumerate() {
            for (field, value) in [
                ("name", &entry.name),
                ("version", &entry.version),
                ("purl", &entry.purl),
            ] {
                if value.trim().is_empty() {
                    bail!(
                        "Invalid config: include_components[{}].{} must not be empty.\n\n\
                         💡 Hint: Manually added components need a name, a version and a purl.",
                        i,
                        field
                    );
                }
            }
        }
    }

    if let Some(ref sw360) = config.sw360 {
        if !(sw360.url.starts_with("https://") || sw360.url.starts_with("http://")) {
            bail!(
                "Invalid config: sw360.url must be an http(s) URL, got '{}'.\n\n\
                 💡 Hint: Use the SW360 base URL, e.g. \"https://sw360.example.org\".",
                sw360.url
            );
        }
    }

    if let Some(ref suffix) = config.output_suffix {
        if suffix.trim().is_empty() || suffix.contains(['/', '\\']) {
            bail!(
                "Invalid config: output_suffix '{}' must be a plain file name suffix.\n\n\
                 💡 Hint: For example \"Bom.cdx.json\".",
                suffix
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
