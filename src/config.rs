use crate::import::PACKAGE_ARCHIVE_MIME;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

const DEFAULT_ARTIFACT_NAME: &str = "app.apk";
const DEFAULT_RUNTIME_NAME: &str = "silene-runtime";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No data directory available; set SILENE_DATA_DIR")]
    NoDataDir,
}

/// Application configuration
/// In debug builds: loads a .env file first, then reads the environment
#[derive(Clone, Debug)]
pub struct Config {
    /// Private storage directory holding the imported artifact
    pub data_dir: PathBuf,
    /// File name of the imported artifact inside `data_dir`
    pub artifact_name: String,
    /// Program that consumes the imported artifact
    pub runtime_program: PathBuf,
    /// MIME filter handed to the picker
    pub mime_filter: String,
}

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                info!("Config: Dev mode activated - loaded .env file");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup("SILENE_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let artifact_name = lookup("SILENE_ARTIFACT_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());

        let runtime_program = lookup("SILENE_RUNTIME")
            .map(PathBuf::from)
            .unwrap_or_else(default_runtime_program);

        let mime_filter = lookup("SILENE_MIME_FILTER")
            .filter(|mime| !mime.trim().is_empty())
            .unwrap_or_else(|| PACKAGE_ARCHIVE_MIME.to_string());

        info!("Config: Data directory: {}", data_dir.display());
        info!("Config: Runtime program: {}", runtime_program.display());

        Ok(Self {
            data_dir,
            artifact_name,
            runtime_program,
            mime_filter,
        })
    }

    /// Full path of the imported artifact
    pub fn artifact_path(&self) -> PathBuf {
        self.data_dir.join(&self.artifact_name)
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join("silene"));
    }
    dirs::home_dir()
        .map(|home| home.join(".silene"))
        .ok_or(ConfigError::NoDataDir)
}

/// The runtime is expected next to the running executable
fn default_runtime_program() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_RUNTIME_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RUNTIME_NAME))
}
