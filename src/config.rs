use crate::filter::{UploadPolicy, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_SIZE};
use crate::storage::UploadDir;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen: String,
    pub uploads_dir: String,
    pub max_upload_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_origins: Vec<String>,
    pub static_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:3000".to_string(),
            uploads_dir: "./uploads".to_string(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            allowed_origins: Vec::new(),
            static_dir: None,
        }
    }
}

impl Config {
    /// Reads `path`, writing out the defaults first if it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
        } else {
            let default_config = Config::default();
            let toml_string = toml::to_string_pretty(&default_config)
                .context("failed to serialize default config")?;
            std::fs::write(path, toml_string)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(default_config)
        }
    }

    pub fn from_env_config() -> anyhow::Result<Self> {
        let mut final_cfg = Self::load(Path::new("config.toml"))?;

        if let Ok(listen) = std::env::var("ROMSHELF_LISTEN") {
            final_cfg.listen = listen;
        }
        if let Ok(dir) = std::env::var("ROMSHELF_UPLOADS_DIR") {
            final_cfg.uploads_dir = dir;
        }
        Ok(final_cfg)
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(&self.allowed_extensions, self.max_upload_size)
    }

    pub fn upload_dir(&self) -> UploadDir {
        UploadDir::new(&self.uploads_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_defaults_on_first_run() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let cfg = Config::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.max_upload_size, 10 * 1024 * 1024);
        assert_eq!(cfg.allowed_extensions.len(), 11);

        let again = Config::load(&path).unwrap();
        assert_eq!(again.listen, cfg.listen);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "uploads_dir = \"/var/roms\"\nmax_upload_size = 1024\n").unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.uploads_dir, "/var/roms");
        assert!(cfg.upload_policy().within_size(1024));
        assert!(!cfg.upload_policy().within_size(1025));
        assert!(cfg.upload_policy().accept("zelda.nes"));
    }

    #[test]
    fn rejects_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "max_upload_size = \"big\"").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
