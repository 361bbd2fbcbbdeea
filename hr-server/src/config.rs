//! Server configuration

use sqlx::mysql::MySqlConnectOptions;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which storage backend the server runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// MySQL via sqlx (default)
    MySql,
    /// Process-local store, data is lost on restart
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = BoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "memory" => Ok(Self::Memory),
            other => Err(format!("Unknown STORAGE backend: {other}").into()),
        }
    }
}

/// MySQL connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Pool size
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    pub storage: StorageKind,
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let storage = match lookup("STORAGE") {
            Some(s) => s.parse()?,
            None => StorageKind::MySql,
        };

        let password = match lookup("DB_PASSWORD") {
            Some(p) if !p.is_empty() => p,
            _ if environment != "development" && storage == StorageKind::MySql => {
                return Err(format!("DB_PASSWORD must be set in {environment} environment").into());
            }
            other => other.unwrap_or_default(),
        };

        Ok(Self {
            http_port: parse_or(&lookup, "HTTP_PORT", 5000)?,
            storage,
            database: DatabaseConfig {
                host: lookup("DB_HOST").unwrap_or_else(|| "localhost".into()),
                port: parse_or(&lookup, "DB_PORT", 3306)?,
                user: lookup("DB_USER").unwrap_or_else(|| "root".into()),
                password,
                database: lookup("DB_NAME").unwrap_or_else(|| "company_db".into()),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            },
            environment,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, BoxError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("Invalid {name} value {raw:?}: {e}").into()),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, BoxError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.storage, StorageKind::MySql);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.user, "root");
        assert_eq!(config.database.database, "company_db");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HTTP_PORT", "8080"),
            ("STORAGE", "Memory"),
            ("DB_HOST", "db.internal"),
            ("DB_NAME", "database-system"),
        ])
        .unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.database, "database-system");
    }

    #[test]
    fn test_password_required_outside_development() {
        assert!(load(&[("ENVIRONMENT", "production")]).is_err());
        assert!(load(&[("ENVIRONMENT", "production"), ("DB_PASSWORD", "s3cret")]).is_ok());
        assert!(load(&[("ENVIRONMENT", "production"), ("STORAGE", "memory")]).is_ok());
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("HTTP_PORT", "eighty")]).is_err());
        assert!(load(&[("STORAGE", "mongo")]).is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = load(&[("DB_PASSWORD", "hunter2")]).unwrap();
        let debug = format!("{:?}", config.database);
        assert!(!debug.contains("hunter2"));
    }
}
