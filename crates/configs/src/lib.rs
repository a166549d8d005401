use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Columns the employee listing may sort and filter on unless configured otherwise.
pub const DEFAULT_EMPLOYEE_COLUMNS: [&str; 4] = ["id", "name", "age", "position"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub employees: EmployeesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), log_format: default_log_format() }
    }
}

fn default_log_format() -> String { "compact".into() }

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
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    /// Insert demo teams and employees when the employee table is empty.
    #[serde(default)]
    pub seed_demo_data: bool,
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
            run_migrations: true,
            seed_demo_data: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }

/// Listing rules for the employee endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    #[serde(default = "default_allowed_columns")]
    pub allowed_columns: Vec<String>,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for EmployeesConfig {
    fn default() -> Self {
        Self {
            allowed_columns: default_allowed_columns(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_allowed_columns() -> Vec<String> { DEFAULT_EMPLOYEE_COLUMNS.iter().map(|c| c.to_string()).collect() }
fn default_page_size() -> u64 { 20 }
fn default_max_page_size() -> u64 { 1000 }

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise defaults filled from the environment.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e.context(format!("failed to load {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        // database URL may come from DATABASE_URL
        self.database.normalize_from_env();
        self.database.validate()?;
        self.employees.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    /// `SERVER_HOST` / `SERVER_PORT` override the file values.
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
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
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl EmployeesConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.allowed_columns.iter().find(|c| !DEFAULT_EMPLOYEE_COLUMNS.contains(&c.as_str())) {
            return Err(anyhow!("employees.allowed_columns: unknown column `{bad}`"));
        }
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(anyhow!("employees page sizes must be >= 1"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(anyhow!("employees.default_page_size must be <= max_page_size"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "sqlite::memory:"
            "#,
        ).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.log_format, "compact");
        assert!(cfg.database.run_migrations);
        assert!(!cfg.database.seed_demo_data);
        assert_eq!(cfg.employees.default_page_size, 20);
        assert_eq!(cfg.employees.allowed_columns, vec!["id", "name", "age", "position"]);
        cfg.database.validate().unwrap();
        cfg.employees.validate().unwrap();
    }

    fn write_temp_config(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.toml", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn malformed_config_file_is_an_error_not_defaults() {
        let path = write_temp_config(
            "configs-malformed",
            r#"
            [server]
            host = "127.0.0.1"
            port = "not a number"

            [employees]
            allowed_columns = ["id"]
            "#,
        );
        let res = AppConfig::load_or_env_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("port"), "unexpected error: {err:#}");
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("configs-definitely-absent-9f1c.toml");
        std::fs::remove_file(&path).ok();
        assert!(is_missing_file(&load_from_file(path.to_str().unwrap()).unwrap_err()));
        // defaults only lack a database URL, which DATABASE_URL may supply
        match AppConfig::load_or_env_from(path.to_str().unwrap()) {
            Ok(cfg) => assert_eq!(cfg.employees.default_page_size, 20),
            Err(e) => assert!(e.to_string().contains("database.url"), "unexpected error: {e:#}"),
        }
    }

    #[test]
    fn valid_config_file_is_used() {
        let path = write_temp_config(
            "configs-valid",
            r#"
            [server]
            host = "127.0.0.1"
            port = 9100

            [database]
            url = "sqlite::memory:"

            [employees]
            allowed_columns = ["id", "name"]
            "#,
        );
        let res = AppConfig::load_or_env_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        let cfg = res.unwrap();
        assert_eq!(cfg.employees.allowed_columns, vec!["id", "name"]);
    }

    #[test]
    fn rejects_unknown_employee_column() {
        let cfg = EmployeesConfig { allowed_columns: vec!["id".into(), "email".into()], ..Default::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn rejects_bad_database_urls() {
        let mut cfg = DatabaseConfig { url: "mysql://localhost/db".into(), ..Default::default() };
        assert!(cfg.validate().is_err());
        cfg.url = "postgres://u:p@localhost/fnb".into();
        assert!(cfg.validate().is_ok());
        cfg.max_connections = 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_default_page_size_above_max() {
        let cfg = EmployeesConfig { default_page_size: 50, max_page_size: 10, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
