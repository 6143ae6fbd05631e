use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

/// Settings handed to the storage gateway at construction.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Cloud project that owns newly created buckets.
    pub project_id: Option<String>,
    /// Location used when a bucket has to be created.
    pub bucket_location: String,
    /// Destination bucket for copies into the team library.
    pub team_bucket: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub download_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            storage: StorageConfig {
                project_id: non_empty_var("PROJECT_ID"),
                bucket_location: non_empty_var("GCS_BUCKET_LOCATION")
                    .unwrap_or_else(|| "US".to_string()),
                team_bucket: non_empty_var("TEAM_BUCKET"),
            },
            ui: UiConfig {
                download_dir: non_empty_var("DOWNLOAD_DIR")
                    .map(PathBuf::from)
                    .or_else(dirs::download_dir)
                    .unwrap_or_else(|| PathBuf::from(".")),
                log_dir: non_empty_var("LOG_DIR")
                    .map(PathBuf::from)
                    .or_else(|| dirs::data_local_dir().map(|d| d.join("image-library").join("logs")))
                    .unwrap_or_else(|| PathBuf::from("logs")),
            },
        })
    }
}

/// Read an environment variable, treating an empty value as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
