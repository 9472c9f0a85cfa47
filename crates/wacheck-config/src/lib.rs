use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "wacheck";
const CONFIG_FILENAME: &str = "config.toml";

pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const DB_PATH_ENV: &str = "WHATSAPP_DB";
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
pub const MAX_POLL_TIMEOUT_SECS: u64 = 50;
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub telegram_token: Option<String>,
    pub db_path: Option<PathBuf>,
    pub poll_timeout_secs: u64,
    pub api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram_token: None,
            db_path: None,
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn require_token(&self) -> Result<&str> {
        self.telegram_token
            .as_deref()
            .ok_or(ConfigError::MissingToken)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid poll_timeout_secs value: {0}")]
    InvalidPollTimeout(u64),
    #[error("invalid api_base value: {0}")]
    InvalidApiBase(String),
    #[error(
        "Переменная окружения TELEGRAM_BOT_TOKEN не установлена. \
         Создайте .env файл или передайте токен при запуске."
    )]
    MissingToken,
    #[error("failed to load .env file: {0}")]
    DotEnv(#[source] dotenvy::Error),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    telegram_token: Option<String>,
    db_path: Option<PathBuf>,
    poll_timeout_secs: Option<u64>,
    api_base: Option<String>,
}

/// Resolves the configuration once: defaults, then the TOML file, then
/// `.env`, then the process environment.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = load_file(config_path)?;
    check_dotenv(dotenvy::dotenv().map(|_| ()))?;
    apply_env(&mut config, |key| env::var(key).ok());
    Ok(config)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_file(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if parsed.telegram_token.is_some() {
        ensure_permissions(path)?;
    }
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    config.telegram_token = non_empty(parsed.telegram_token);

    if let Some(path) = parsed.db_path {
        if !path.as_os_str().is_empty() {
            config.db_path = Some(path);
        }
    }

    if let Some(timeout) = parsed.poll_timeout_secs {
        if timeout == 0 || timeout > MAX_POLL_TIMEOUT_SECS {
            return Err(ConfigError::InvalidPollTimeout(timeout));
        }
        config.poll_timeout_secs = timeout;
    }

    if let Some(api_base) = parsed.api_base {
        let trimmed = api_base.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(ConfigError::InvalidApiBase(api_base));
        }
        config.api_base = trimmed.to_string();
    }

    Ok(config)
}

/// A missing `.env` is fine; one that fails to parse is not, since dotenvy
/// stops at the first bad line and drops the keys after it.
fn check_dotenv(result: std::result::Result<(), dotenvy::Error>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::DotEnv(err)),
    }
}

fn apply_env<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = non_empty(lookup(TOKEN_ENV)) {
        config.telegram_token = Some(token);
    }
    if let Some(path) = non_empty(lookup(DB_PATH_ENV)) {
        config.db_path = Some(PathBuf::from(path));
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
