use std::time::Duration;

/// Server configuration, loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// How long a room with no connections survives before the sweeper
    /// removes its game state
    pub room_ttl: Duration,
    /// How often the sweeper runs
    pub sweep_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            room_ttl: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let room_ttl = std::env::var("ROOM_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.room_ttl);

        let sweep_interval = std::env::var("ROOM_SWEEP_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.sweep_interval);

        Self {
            port,
            room_ttl,
            sweep_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("ROOM_TTL_SECS");
        std::env::remove_var("ROOM_SWEEP_SECS");
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = ServerConfig::from_env();
        assert_eq!(config.port, 8000);
        assert_eq!(config.room_ttl, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("PORT", "9090");
        std::env::set_var("ROOM_TTL_SECS", "60");
        std::env::set_var("ROOM_SWEEP_SECS", "5");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, 9090);
        assert_eq!(config.room_ttl, Duration::from_secs(60));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_garbage_env_falls_back_to_defaults() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        let config = ServerConfig::from_env();
        assert_eq!(config.port, 8000);
        clear_env();
    }
}
