use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

/// Application configuration managed by Figment.
///
/// Sources, lowest to highest precedence: built-in defaults, `config.toml` if
/// present, then `SAMBAZA_`-prefixed environment variables with nested keys
/// joined by `__` (e.g. `SAMBAZA_AFRICASTALKING__API_KEY`).
///
/// Constructed once at startup and passed by reference; there is no global
/// instance.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `server` table in config.toml).
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings (see `database` table in config.toml).
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Africa's Talking provider credentials (see `africastalking` table).
    #[serde(default)]
    pub africastalking: AfricasTalkingConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "SAMBAZA_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// prefixed environment variables.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration and validates the provider credentials.
    ///
    /// Panics on malformed sources or missing credentials; the service cannot
    /// send anything without them.
    pub fn load() -> Self {
        let cfg: Self = Self::figment()
            .extract()
            .unwrap_or_else(|err| panic!("failed to extract configuration: {err}"));
        if cfg.africastalking.username.trim().is_empty() {
            panic!("africastalking.username must be set and non-empty");
        }
        if cfg.africastalking.sender_id.trim().is_empty() {
            panic!("africastalking.sender_id must be set and non-empty");
        }
        if cfg.africastalking.api_key.trim().is_empty() {
            panic!("africastalking.api_key must be set and non-empty");
        }
        cfg
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `server.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `server.listen_port`. Default: `8187`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn",
    /// "info", "debug", "trace").
    /// TOML: `server.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: default_loglevel(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database URL for SQLite.
    /// TOML: `database.url`. Default: `sqlite://sambaza.db`.
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AfricasTalkingConfig {
    /// Account username; `sandbox` targets the provider's test environment.
    /// TOML: `africastalking.username`. Must be provided.
    #[serde(default)]
    pub username: String,

    /// Registered sender id (short code or alphanumeric).
    /// TOML: `africastalking.sender_id`. Must be provided.
    #[serde(default)]
    pub sender_id: String,

    /// API key for the account.
    /// TOML: `africastalking.api_key`. Must be provided.
    #[serde(default)]
    pub api_key: String,

    /// Bulk messaging endpoint. Overridable for the sandbox host or tests.
    /// TOML: `africastalking.api_url`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for AfricasTalkingConfig {
    fn default() -> Self {
        Self {
            // No insecure defaults. `Config::load()` enforces non-empty.
            username: String::new(),
            sender_id: String::new(),
            api_key: String::new(),
            api_url: default_api_url(),
        }
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    8187
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_database_url() -> String {
    "sqlite://sambaza.db".to_string()
}

fn default_api_url() -> String {
    "https://api.africastalking.com/version1/messaging".to_string()
}
