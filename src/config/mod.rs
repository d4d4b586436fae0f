// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LogLevel, LoggingConfig, PerformanceConfig, ServerConfig, StoreConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the optional file,
    /// then `MOVIES_*` environment variables (`MOVIES_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("MOVIES")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::IdStrategy;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.http.content_type, "application/json");
        assert_eq!(cfg.logging.level, LogLevel::Info);
        assert!(cfg.store.seed);
        assert_eq!(cfg.store.id_strategy, IdStrategy::Sequential);
        assert!(!cfg.store.update_moves_to_end);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
        );

        let mut bad = Config::default();
        bad.server.host = "not a host".to_string();
        assert!(bad.get_socket_addr().is_err());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let cfg = Config::load_from("definitely/not/here/movies").unwrap();
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert_eq!(cfg.store.random_id_bound, 10_000_000);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 9000\n\n[store]\nid_strategy = \"random\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: Config = settings.try_deserialize().unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.store.id_strategy, IdStrategy::Random);
        assert!(cfg.store.seed);
    }
}
