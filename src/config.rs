use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeclaveConfig {
    pub model: Option<String>,
    pub format: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("declave.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<DeclaveConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: DeclaveConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &DeclaveConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("declave.toml");

        let config = DeclaveConfig {
            model: Some("unit.json".to_string()),
            format: Some("json".to_string()),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.model.as_deref(), Some("unit.json"));
        assert_eq!(loaded.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("declave.toml");

        write_config(&path, &DeclaveConfig::default(), false).unwrap();
        assert!(write_config(&path, &DeclaveConfig::default(), false).is_err());
        assert!(write_config(&path, &DeclaveConfig::default(), true).is_ok());
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }
}
