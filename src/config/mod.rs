use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "RCHECKIN_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_geocoder_url")]
    pub geocoder_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Forwarded verbatim as the `Cookie` header of every submission.
    #[serde(default)]
    pub session_cookie: Option<String>,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// External locator printing `<lat>,<lng>` on stdout.
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default = "default_geo_timeout")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}
fn default_user_agent() -> String {
    format!("rcheckin/{}", env!("CARGO_PKG_VERSION"))
}
fn default_request_timeout() -> u64 {
    30
}
fn default_geo_timeout() -> u64 {
    10
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            command: None,
            timeout_secs: default_geo_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            geocoder_url: default_geocoder_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            session_cookie: None,
            database: default_database(),
            geolocation: GeolocationConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(HOME_ENV)
            && !dir.trim().is_empty()
        {
            return PathBuf::from(dir);
        }

        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rcheckin")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rcheckin")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcheckin.conf")
    }

    /// Return the full path of the SQLite journal
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcheckin.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str::<Config>(&content).map_err(|e| {
                AppError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Config::default()
        };

        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Initialize configuration and journal files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB path: user provided or default
        let db_path = match custom_db {
            Some(name) => expand_tilde(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {}", Self::config_file().display());
        }

        Ok(db_path)
    }
}
