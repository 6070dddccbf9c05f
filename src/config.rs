//! Process configuration from the environment (`.env` honored by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Absent: rows are kept in memory.
    pub database_url: Option<String>,
    pub server_addr: SocketAddr,
    pub jwt_secret: String,
    /// When set, `/admin` requires a matching `X-Admin-Key` header.
    pub admin_api_key: Option<String>,
    pub db_max_connections: u32,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let server_addr = get("SERVER_ADDR")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "SERVER_ADDR",
                message: e.to_string(),
            })?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse::<u32>().map_err(|e| ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                message: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let body_limit_bytes = match get("BODY_LIMIT_BYTES") {
            Some(v) => v.parse::<usize>().map_err(|e| ConfigError::Invalid {
                var: "BODY_LIMIT_BYTES",
                message: e.to_string(),
            })?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        Ok(AppConfig {
            database_url: get("DATABASE_URL"),
            server_addr,
            jwt_secret,
            admin_api_key: get("ADMIN_API_KEY"),
            db_max_connections,
            body_limit_bytes,
        })
    }

    /// Settings for tests and tools: in-memory rows, open admin routes.
    pub fn for_tests(jwt_secret: &str) -> Self {
        AppConfig {
            database_url: None,
            server_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: jwt_secret.to_string(),
            admin_api_key: None,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_apply() {
        let cfg = load(&[("JWT_SECRET", "s")]).unwrap();
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.server_addr.to_string(), DEFAULT_SERVER_ADDR);
        assert_eq!(cfg.db_max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.body_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
        assert!(cfg.admin_api_key.is_none());
    }

    #[test]
    fn jwt_secret_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("JWT_SECRET"))));
        assert!(matches!(load(&[("JWT_SECRET", "  ")]), Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn invalid_numbers_name_the_variable() {
        let err = load(&[("JWT_SECRET", "s"), ("DB_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", .. }));
        let err = load(&[("JWT_SECRET", "s"), ("SERVER_ADDR", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SERVER_ADDR", .. }));
    }

    #[test]
    fn reads_all_values() {
        let cfg = load(&[
            ("JWT_SECRET", "s"),
            ("DATABASE_URL", "postgres://localhost/content"),
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("ADMIN_API_KEY", "k"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("BODY_LIMIT_BYTES", "2048"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/content"));
        assert_eq!(cfg.server_addr.port(), 8080);
        assert_eq!(cfg.admin_api_key.as_deref(), Some("k"));
        assert_eq!(cfg.db_max_connections, 12);
        assert_eq!(cfg.body_limit_bytes, 2048);
    }
}
