use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// How many recordings (and CSV rows) get renamed.
pub const NUM_FILES_TO_RENAME: u64 = 306;
pub const DEFAULT_CSV_FILE_PATH: &str = "./text_audio.csv";
pub const DEFAULT_AUDIO_FOLDER_PATH: &str = "./audio";

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "recsync.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub num_files_to_rename: u64,
    pub csv_file_path: PathBuf,
    pub audio_folder_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_files_to_rename: NUM_FILES_TO_RENAME,
            csv_file_path: PathBuf::from(DEFAULT_CSV_FILE_PATH),
            audio_folder_path: PathBuf::from(DEFAULT_AUDIO_FOLDER_PATH),
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Defaults,
    File(PathBuf),
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::Defaults => write!(f, "built-in defaults"),
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    /// Parse a YAML config. Fields left out keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text).context("parsing config YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, ConfigOrigin)> {
        let path = path.as_ref();
        if !path.exists() {
            info!("{} not found, using built-in defaults", path.display());
            return Ok((Self::default(), ConfigOrigin::Defaults));
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let cfg = Self::from_yaml(&text)
            .with_context(|| format!("loading config file {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok((cfg, ConfigOrigin::File(path.to_path_buf())))
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_files_to_rename == 0 {
            bail!("num_files_to_rename must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.num_files_to_rename, 306);
        assert_eq!(cfg.csv_file_path, PathBuf::from("./text_audio.csv"));
        assert_eq!(cfg.audio_folder_path, PathBuf::from("./audio"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<()> {
        let cfg = Config::from_yaml("num_files_to_rename: 12\n")?;
        assert_eq!(cfg.num_files_to_rename, 12);
        assert_eq!(cfg.audio_folder_path, PathBuf::from("./audio"));
        Ok(())
    }

    #[test]
    fn test_zero_count_rejected() {
        assert!(Config::from_yaml("num_files_to_rename: 0\n").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_yaml("num_files: 3\n").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() -> Result<()> {
        let tmp = tempdir()?;
        let (cfg, origin) = Config::load_or_default(tmp.path().join(CONFIG_FILE))?;
        assert_eq!(cfg, Config::default());
        assert_eq!(origin, ConfigOrigin::Defaults);
        assert_eq!(origin.to_string(), "built-in defaults");
        Ok(())
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "csv_file_path: /data/lines.csv\naudio_folder_path: /data/rec\n",
        )?;

        let (cfg, origin) = Config::load_or_default(&path)?;

        assert_eq!(origin, ConfigOrigin::File(path.clone()));
        assert_eq!(cfg.csv_file_path, PathBuf::from("/data/lines.csv"));
        assert_eq!(cfg.audio_folder_path, PathBuf::from("/data/rec"));
        assert_eq!(cfg.num_files_to_rename, NUM_FILES_TO_RENAME);
        Ok(())
    }
}
