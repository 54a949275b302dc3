//! YAML file holding the persisted `PlinthConfig`.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::application::ports::ConfigStore;
use crate::domain::PlinthConfig;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "PLINTH_CONFIG";

const CONFIG_DIR: &str = ".plinth";
const CONFIG_FILE: &str = "config.yaml";

/// Settings file store. Without an explicit location the file is looked up
/// on every access, from `PLINTH_CONFIG` or `~/.plinth/config.yaml`.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigStore {
    location: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pinned to one file, ignoring the environment.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Some(path.into()),
        }
    }
}

fn default_location() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
        .context("cannot determine home directory; set PLINTH_CONFIG")
}

/// Replace `path` in one step so a crash never leaves half a file behind.
fn replace_file(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;

    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot stage a file in {}", dir.display()))?;
    staged
        .write_all(content.as_bytes())
        .with_context(|| format!("cannot write {}", staged.path().display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("cannot restrict {}", staged.path().display()))?;
    }
    staged
        .persist(path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<PlinthConfig> {
        let path = self.path()?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PlinthConfig::default()),
            Err(e) => return Err(e).with_context(|| format!("cannot read {}", path.display())),
        };
        if content.trim().is_empty() {
            return Ok(PlinthConfig::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &PlinthConfig) -> Result<()> {
        let path = self.path()?;
        let content = serde_yaml::to_string(config).context("cannot serialize settings")?;
        replace_file(&path, &content)?;
        tracing::debug!(path = %path.display(), "settings written");
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        match &self.location {
            Some(path) => Ok(path.clone()),
            None => default_location(),
        }
    }
}
