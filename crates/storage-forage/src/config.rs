use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use storage_forage_model::ProviderRegistry;

const CONFIG_PATH: &str = "~/.config/storage-forage.json";

/// Display preferences. Projection inputs are never stored here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ForageConfig {
    /// Provider columns to show, in order. Empty means every built-in provider.
    pub providers: Vec<String>,
    pub show_plan_labels: bool,
}

impl Default for ForageConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            show_plan_labels: true,
        }
    }
}

impl ForageConfig {
    pub fn registry(&self) -> Result<ProviderRegistry> {
        let standard = ProviderRegistry::standard();
        if self.providers.is_empty() {
            return Ok(standard.clone());
        }
        Ok(standard.select(self.providers.as_slice())?)
    }
}

pub fn get_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(CONFIG_PATH).as_ref())
}

pub fn load_config(path: &Path) -> Result<ForageConfig> {
    if !path.exists() {
        return Ok(ForageConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: ForageConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &ForageConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ForageConfig::default());
        assert!(config.show_plan_labels);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"providers": ["Backblaze B2"]}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.providers, vec!["Backblaze B2".to_string()]);
        assert!(config.show_plan_labels);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage-forage.json");
        let config = ForageConfig {
            providers: vec!["Google One".to_string(), "Amazon S3 Standard".to_string()],
            show_plan_labels: false,
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_registry_selection() {
        let config = ForageConfig::default();
        assert_eq!(config.registry().unwrap().len(), 5);

        let config = ForageConfig {
            providers: vec!["Microsoft OneDrive".to_string()],
            show_plan_labels: true,
        };
        assert_eq!(config.registry().unwrap().names(), vec!["Microsoft OneDrive"]);

        let config = ForageConfig {
            providers: vec!["Dropbox".to_string()],
            show_plan_labels: true,
        };
        assert!(config.registry().is_err());
    }
}
