use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub options: OptionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

fn default_log_format() -> String { "compact".into() }

/// Behaviour switches for the option services.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Reject a bulk create whose payload repeats a name.
    #[serde(default = "default_true")]
    pub reject_batch_duplicates: bool,
    /// Apply pending migrations on startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self { Self { reject_batch_duplicates: true, run_migrations: true } }
}

fn default_true() -> bool { true }

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file when present, otherwise defaults overlaid with `SERVER_HOST`,
    /// `SERVER_PORT` and `DATABASE_URL`.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    /// Only a missing file falls back to defaults; an unreadable or
    /// malformed file is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => {
                let mut cfg = AppConfig::default();
                if let Ok(host) = std::env::var("SERVER_HOST") {
                    cfg.server.host = host;
                }
                if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                    cfg.server.port = port;
                }
                cfg
            }
            Err(e) => return Err(e.context(format!("invalid config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        let env_threads = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok());
        self.normalize_with(env_threads)
    }

    /// `env_threads` fills an unset or zero `worker_threads` before the
    /// default of 4 does.
    fn normalize_with(&mut self, env_threads: Option<usize>) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(env_threads.filter(|n| *n > 0).unwrap_or(4)),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; the env var only fills a missing url
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        // every pooled connection to an in-memory database is a separate database
        if lower.starts_with("sqlite:") && lower.contains(":memory:") && self.max_connections > 1 {
            return Err(anyhow!("in-memory sqlite requires database.max_connections = 1"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }

    /// In-memory SQLite with a single pooled connection.
    pub fn sqlite_memory() -> Self {
        Self { url: "sqlite::memory:".into(), max_connections: 1, min_connections: 1, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let cfg = parse(r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://u:p@localhost:5432/options"
            max_connections = 5

            [log]
            format = "json"

            [options]
            reject_batch_duplicates = false
        "#).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.log.format, "json");
        assert!(!cfg.options.reject_batch_duplicates);
        assert!(cfg.options.run_migrations);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.log.format, "compact");
        assert!(cfg.options.reject_batch_duplicates);
    }

    #[test]
    fn rejects_unknown_scheme() {
        let db = DatabaseConfig { url: "mysql://localhost/x".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let db = DatabaseConfig { url: "postgres://localhost/x".into(), max_connections: 1, min_connections: 3, ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn sqlite_memory_is_valid() {
        assert!(DatabaseConfig::sqlite_memory().validate().is_ok());
    }

    #[test]
    fn normalize_fills_worker_threads() {
        let mut s = ServerConfig { host: " ".into(), port: 8080, worker_threads: Some(0) };
        s.normalize_with(None).unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));
    }

    #[test]
    fn worker_threads_env_fills_unset_value() {
        let mut unset = ServerConfig { worker_threads: None, ..ServerConfig::default() };
        unset.normalize_with(Some(7)).unwrap();
        assert_eq!(unset.worker_threads, Some(7));

        let mut explicit = ServerConfig { worker_threads: Some(2), ..ServerConfig::default() };
        explicit.normalize_with(Some(7)).unwrap();
        assert_eq!(explicit.worker_threads, Some(2));

        let mut zero_env = ServerConfig { worker_threads: None, ..ServerConfig::default() };
        zero_env.normalize_with(Some(0)).unwrap();
        assert_eq!(zero_env.worker_threads, Some(4));
    }

    #[test]
    fn in_memory_sqlite_needs_single_connection() {
        let pooled = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
        assert!(pooled.validate().is_err());
        let file = DatabaseConfig { url: "sqlite://options.db?mode=rwc".into(), ..DatabaseConfig::default() };
        assert!(file.validate().is_ok());
    }

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("option-registry-{}-{}.toml", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = temp_config("malformed", "[server]\nhost = \"0.0.0.0\"\nport = \"not-a-number\"\n\n[database]\nurl = \"postgres://cfg/db\"\n");
        let res = AppConfig::load_or_env_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn present_config_file_is_used() {
        let path = temp_config("valid", "[server]\nhost = \"0.0.0.0\"\nport = 9100\n\n[database]\nurl = \"postgres://cfg/db\"\n");
        let res = AppConfig::load_or_env_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        let cfg = res.unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.database.url, "postgres://cfg/db");
    }

    #[test]
    fn missing_config_file_is_not_found() {
        let err = load_from_file("/nonexistent/option-registry.toml").unwrap_err();
        assert!(is_not_found(&err));
        let err = parse("port = ").unwrap_err();
        assert!(!is_not_found(&err));
    }
}
