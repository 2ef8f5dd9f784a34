use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

/// Upper bound applied to any requested page size.
pub const MAX_PAGE_LIMIT: u64 = 100;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub auth: AuthConfig,
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

/// Page size used by list endpoints when the caller omits `limit`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_limit")]
    pub default_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self { Self { default_limit: default_page_limit() } }
}

fn default_page_limit() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_secret")]
    pub secret: String,
    #[serde(default = "default_token_duration")]
    pub token_duration_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { secret: default_secret(), token_duration_secs: default_token_duration() }
    }
}

fn default_secret() -> String { "dev-secret-change-me".into() }
fn default_token_duration() -> u64 { 3000 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Read `config.toml` when present, otherwise start from defaults, then
    /// apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment variables win over the file.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        self.database.normalize_from_env();
        if let Some(limit) = std::env::var("MAX_PAGE_SIZE").ok().and_then(|v| v.parse::<u64>().ok()) {
            self.pagination.default_limit = limit;
        }
        if let Ok(secret) = std::env::var("SECRET") {
            self.auth.secret = secret;
        }
        if let Some(d) = std::env::var("TOKEN_DURATION").ok().and_then(|v| v.parse::<u64>().ok()) {
            self.auth.token_duration_secs = d;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        self.pagination.normalize();
        self.auth.validate()?;
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill the URL from `DATABASE_URL` when it is set.
    pub fn normalize_from_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.url = url;
            }
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgresql://, postgres:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl PaginationConfig {
    fn normalize(&mut self) {
        self.default_limit = self.default_limit.clamp(1, MAX_PAGE_LIMIT);
    }
}

impl AuthConfig {
    fn validate(&self) -> Result<()> {
        if self.secret.trim().is_empty() {
            return Err(anyhow!("auth.secret must not be empty"));
        }
        if self.token_duration_secs == 0 {
            return Err(anyhow!("auth.token_duration_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.database.url = url.into();
        cfg
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://localhost/registry"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.pagination.default_limit, 30);
        assert_eq!(cfg.auth.token_duration_secs, 3000);
    }

    #[test]
    fn accepts_postgres_and_sqlite_urls() {
        assert!(with_url("postgres://localhost/registry").normalize_and_validate().is_ok());
        assert!(with_url("sqlite::memory:").normalize_and_validate().is_ok());
        assert!(with_url("mysql://localhost/registry").normalize_and_validate().is_err());
        assert!(with_url("").normalize_and_validate().is_err());
    }

    #[test]
    fn default_page_limit_is_clamped() {
        let mut cfg = with_url("sqlite::memory:");
        cfg.pagination.default_limit = 500;
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.pagination.default_limit, MAX_PAGE_LIMIT);
    }

    #[test]
    fn zero_workers_fall_back_to_four() {
        let mut cfg = with_url("sqlite::memory:");
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }
}
