use serde::Deserialize;
use std::{fs, io::ErrorKind, path::PathBuf};

pub const CONFIG_ENV: &str = "NEM_EXPORT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "nem-export.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the transposed CSV files are written to.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub export: ExportConfig,
}

impl AppConfig {
    /// Loads from `$NEM_EXPORT_CONFIG`, falling back to `nem-export.toml`.
    ///
    /// A missing default file yields the defaults; a missing file named by the
    /// environment variable is an error.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => match fs::read_to_string(DEFAULT_CONFIG_PATH) {
                Ok(contents) => Self::from_toml(&contents),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
                Err(e) => Err(e.into()),
            },
        }
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {path}: {e}"))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        Ok(cfg)
    }
}
