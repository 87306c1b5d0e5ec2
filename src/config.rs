//! Vault configuration
//!
//! The list of vault directories lives in `<config dir>/vaults.json` as a
//! pretty-printed JSON array of paths.
//!
//! The config directory is resolved in this order:
//! 1. the `--config-dir` flag
//! 2. `$DOPE_CONFIG_DIR`
//! 3. the platform config directory joined with `dope`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{APP_DIR, ENV_CONFIG_DIR, VAULTS_FILENAME};
use crate::error::{DopeError, Result};
use crate::util::{display_path, expand_tilde};

/// On-disk form of `vaults.json`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct VaultList(Vec<PathBuf>);

/// Resolve the configuration directory
pub fn config_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(expand_tilde(dir));
    }

    // Treat empty strings as unset
    if let Some(dir) = std::env::var(ENV_CONFIG_DIR).ok().filter(|s| !s.is_empty()) {
        return Ok(expand_tilde(Path::new(&dir)));
    }

    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or_else(|| DopeError::Config {
            path: PathBuf::from(VAULTS_FILENAME),
            reason: "cannot determine the platform config directory".to_string(),
        })
}

/// The configured vault directories
#[derive(Debug, Clone)]
pub struct VaultConfig {
    path: PathBuf,
    vaults: Vec<PathBuf>,
}

impl VaultConfig {
    /// Load `vaults.json` from `config_dir`, creating an empty one if missing
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(VAULTS_FILENAME);

        if !path.exists() {
            tracing::warn!("Vaults configuration doesn't exist; creating '{}'", display_path(&path));
            let config = Self {
                path,
                vaults: Vec::new(),
            };
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        let list: VaultList = serde_json::from_str(&content).map_err(|e| DopeError::Config {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if list.0.is_empty() {
            tracing::warn!("Vaults configuration is empty");
        }
        tracing::debug!("Loaded {} vault(s) from '{}'", list.0.len(), display_path(&path));

        Ok(Self {
            path,
            vaults: list.0,
        })
    }

    /// Write the list back to `vaults.json`
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&VaultList(self.vaults.clone()))?;
        fs::write(&self.path, json + "\n")?;
        Ok(())
    }

    /// Path of `vaults.json`
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn vaults(&self) -> &[PathBuf] {
        &self.vaults
    }

    /// Add a vault directory. Returns `false` if it is already configured.
    ///
    /// The directory must exist; it is stored canonicalized.
    pub fn add(&mut self, dir: &Path) -> Result<bool> {
        let dir = expand_tilde(dir);
        if !dir.is_dir() {
            return Err(DopeError::VaultNotFound(dir));
        }
        let dir = dunce::canonicalize(&dir)?;

        if self.vaults.contains(&dir) {
            return Ok(false);
        }
        self.vaults.push(dir);
        Ok(true)
    }

    /// Remove a vault directory. Returns `false` if it was not configured.
    pub fn remove(&mut self, dir: &Path) -> bool {
        let dir = expand_tilde(dir);
        let canonical = dunce::canonicalize(&dir).unwrap_or_else(|_| dir.clone());

        let before = self.vaults.len();
        self.vaults.retain(|v| *v != dir && *v != canonical);
        self.vaults.len() != before
    }

    /// Vault directories whose name contains any of `filters`.
    ///
    /// No filters selects every vault. Each selected vault must be an
    /// existing directory.
    pub fn vault_dirs(&self, filters: &[String]) -> Result<Vec<PathBuf>> {
        let mut selected = Vec::new();

        for vault in &self.vaults {
            let vault = expand_tilde(vault);
            let name = vault
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            if !filters.is_empty() && !filters.iter().any(|f| name.contains(f.as_str())) {
                continue;
            }
            if !vault.is_dir() {
                return Err(DopeError::VaultNotFound(vault));
            }
            selected.push(vault);
        }

        tracing::info!(
            "Vaults: {}",
            selected
                .iter()
                .map(|d| d.file_name().unwrap_or_default().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config_dir = tmp.path().join("cfg");

        let config = VaultConfig::load(&config_dir).unwrap();
        assert!(config.vaults().is_empty());
        assert_eq!(fs::read_to_string(config_dir.join(VAULTS_FILENAME)).unwrap(), "[]\n");
    }

    #[test]
    fn test_add_save_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = tmp.path().join("work-notes");
        fs::create_dir(&vault).unwrap();

        let mut config = VaultConfig::load(tmp.path()).unwrap();
        assert!(config.add(&vault).unwrap());
        assert!(!config.add(&vault).unwrap());
        config.save().unwrap();

        let reloaded = VaultConfig::load(tmp.path()).unwrap();
        assert_eq!(reloaded.vaults(), &[dunce::canonicalize(&vault).unwrap()]);
    }

    #[test]
    fn test_add_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = VaultConfig::load(tmp.path()).unwrap();
        let err = config.add(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, DopeError::VaultNotFound(_)));
    }

    #[test]
    fn test_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = tmp.path().join("v");
        fs::create_dir(&vault).unwrap();

        let mut config = VaultConfig::load(tmp.path()).unwrap();
        config.add(&vault).unwrap();
        assert!(config.remove(&vault));
        assert!(!config.remove(&vault));
        assert!(config.vaults().is_empty());
    }

    #[test]
    fn test_vault_dirs_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let work = tmp.path().join("work-notes");
        let home = tmp.path().join("home-notes");
        fs::create_dir(&work).unwrap();
        fs::create_dir(&home).unwrap();

        let mut config = VaultConfig::load(tmp.path()).unwrap();
        config.add(&work).unwrap();
        config.add(&home).unwrap();

        assert_eq!(config.vault_dirs(&[]).unwrap().len(), 2);
        let only_work = config.vault_dirs(&["work".to_string()]).unwrap();
        assert_eq!(only_work.len(), 1);
        assert!(only_work[0].ends_with("work-notes"));
        assert!(config.vault_dirs(&["zzz".to_string()]).unwrap().is_empty());
    }

    #[test]
    fn test_vault_dirs_missing_vault() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(VAULTS_FILENAME), r#"["/definitely/not/here"]"#).unwrap();
        let config = VaultConfig::load(tmp.path()).unwrap();
        assert!(matches!(config.vault_dirs(&[]), Err(DopeError::VaultNotFound(_))));
    }

    #[test]
    fn test_malformed_json() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(VAULTS_FILENAME), "{not json").unwrap();
        assert!(matches!(VaultConfig::load(tmp.path()), Err(DopeError::Config { .. })));
    }

    #[test]
    fn test_config_dir_flag_wins() {
        assert_eq!(config_dir(Some(Path::new("/tmp/x"))).unwrap(), PathBuf::from("/tmp/x"));
    }
}
