//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `LARDER_*` environment variables.
//! Scoring knobs live on [`ScoringPolicy::from_env`](crate::scoring::ScoringPolicy::from_env).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::catalog::CatalogSources;
use crate::constants::DEFAULT_SEARCH_CACHE_CAPACITY;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `LARDER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the startup datasets. Default: `./data`.
    pub data_dir: PathBuf,

    /// Ingredient catalog CSV. Default: `<data_dir>/ingredients.csv`.
    pub ingredients_path: PathBuf,

    /// Pantry staples CSV. Default: `<data_dir>/pantry_ingredients.csv`.
    pub pantry_path: PathBuf,

    /// Substitution table JSON. Default: `<data_dir>/substitutions.json`.
    pub substitutions_path: PathBuf,

    /// Recipe database. Default: `sqlite://<data_dir>/recipes.db`.
    pub database_url: String,

    /// Max entries in the search-result cache. Default: `10_000`.
    pub search_cache_capacity: u64,

    /// Origins allowed by CORS. Default: `http://localhost:5173`.
    pub cors_origins: Vec<String>,
}

/// Default CORS origin (the frontend dev server).
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default data directory used when `LARDER_DATA_DIR` is not set.
pub const DEFAULT_DATA_DIR: &str = "./data";

impl Default for Config {
    fn default() -> Self {
        Self::with_data_dir(PathBuf::from(DEFAULT_DATA_DIR))
    }
}

impl Config {
    const ENV_PORT: &'static str = "LARDER_PORT";
    const ENV_BIND_ADDR: &'static str = "LARDER_BIND_ADDR";
    const ENV_DATA_DIR: &'static str = "LARDER_DATA_DIR";
    const ENV_INGREDIENTS_PATH: &'static str = "LARDER_INGREDIENTS_PATH";
    const ENV_PANTRY_PATH: &'static str = "LARDER_PANTRY_PATH";
    const ENV_SUBSTITUTIONS_PATH: &'static str = "LARDER_SUBSTITUTIONS_PATH";
    const ENV_DATABASE_URL: &'static str = "LARDER_DATABASE_URL";
    const ENV_SEARCH_CACHE_CAPACITY: &'static str = "LARDER_SEARCH_CACHE_CAPACITY";
    const ENV_CORS_ORIGINS: &'static str = "LARDER_CORS_ORIGINS";

    /// Defaults with every data path placed under `data_dir`.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        let sources = CatalogSources::in_dir(&data_dir);
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            database_url: default_database_url(&data_dir),
            data_dir,
            ingredients_path: sources.ingredients,
            pantry_path: sources.pantry,
            substitutions_path: sources.substitutions,
            search_cache_capacity: DEFAULT_SEARCH_CACHE_CAPACITY,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
        }
    }

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = Self::parse_path_from_env(Self::ENV_DATA_DIR, PathBuf::from(DEFAULT_DATA_DIR));
        let defaults = Self::with_data_dir(data_dir);

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let ingredients_path =
            Self::parse_path_from_env(Self::ENV_INGREDIENTS_PATH, defaults.ingredients_path);
        let pantry_path = Self::parse_path_from_env(Self::ENV_PANTRY_PATH, defaults.pantry_path);
        let substitutions_path =
            Self::parse_path_from_env(Self::ENV_SUBSTITUTIONS_PATH, defaults.substitutions_path);
        let database_url =
            Self::parse_string_from_env(Self::ENV_DATABASE_URL, defaults.database_url);
        let search_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_SEARCH_CACHE_CAPACITY,
            defaults.search_cache_capacity,
        );
        let cors_origins = Self::parse_list_from_env(Self::ENV_CORS_ORIGINS, defaults.cors_origins);

        Ok(Self {
            port,
            bind_addr,
            data_dir: defaults.data_dir,
            ingredients_path,
            pantry_path,
            substitutions_path,
            database_url,
            search_cache_capacity,
            cors_origins,
        })
    }

    /// Checks that the three datasets exist and the database URL is a SQLite URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [
            &self.ingredients_path,
            &self.pantry_path,
            &self.substitutions_path,
        ] {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_DATABASE_URL,
                value: self.database_url.clone(),
                reason: "expected a sqlite: URL",
            });
        }

        Ok(())
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Dataset locations for [`Catalogs::load`](crate::catalog::Catalogs::load).
    pub fn catalog_sources(&self) -> CatalogSources {
        CatalogSources {
            ingredients: self.ingredients_path.clone(),
            pantry: self.pantry_path.clone(),
            substitutions: self.substitutions_path.clone(),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_list_from_env(var_name: &str, default: Vec<String>) -> Vec<String> {
        match env::var(var_name) {
            Ok(value) => value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => default,
        }
    }
}

fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}", data_dir.join("recipes.db").display())
}
