use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Внешний адрес сервера, из него строятся `image_url`
    pub public_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadsConfig {
    pub dir: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
public_url = "http://localhost:3000"

[database]
path = "target/db/ecoleta.db"

[uploads]
dir = "uploads"
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Make the loaded configuration available to request handlers
pub fn set_current(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration already initialized"))
}

pub fn current() -> &'static Config {
    CONFIG.get().expect("Configuration has not been initialized")
}

/// Resolves relative paths relative to the executable directory
fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(path_str)
}

/// Get the database file path from configuration
pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path)
}

/// Каталог со статическими иконками категорий
pub fn get_uploads_path(config: &Config) -> PathBuf {
    resolve_path(&config.uploads.dir)
}

/// `{public_url}/uploads/{file}`
pub fn upload_url(public_url: &str, file: &str) -> String {
    format!("{}/uploads/{}", public_url.trim_end_matches('/'), file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "target/db/ecoleta.db");
        assert_eq!(config.uploads.dir, "uploads");
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = Config {
            server: ServerConfig {
                port: 3000,
                public_url: "http://localhost:3000".into(),
            },
            database: DatabaseConfig {
                path: "/var/lib/ecoleta/app.db".into(),
            },
            uploads: UploadsConfig {
                dir: "/srv/uploads".into(),
            },
        };
        assert_eq!(get_database_path(&config), PathBuf::from("/var/lib/ecoleta/app.db"));
        assert_eq!(get_uploads_path(&config), PathBuf::from("/srv/uploads"));
    }

    #[test]
    fn test_upload_url_trims_trailing_slash() {
        assert_eq!(
            upload_url("http://localhost:3000/", "lampadas.svg"),
            "http://localhost:3000/uploads/lampadas.svg"
        );
    }
}
