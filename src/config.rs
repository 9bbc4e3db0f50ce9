// =============================================================================
// Server Configuration - environment-variable driven
// =============================================================================
//
// All knobs come from the environment (loaded from .env by the binary before
// this runs). Malformed values fall back to defaults with a warning rather
// than aborting startup; a mock service should come up even with a sloppy
// environment.
// =============================================================================

use tracing::warn;

/// Default listen port for the mock API.
const DEFAULT_PORT: u16 = 4000;
/// Default bind host.
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default environment tag reported by the health endpoint.
const DEFAULT_ENVIRONMENT: &str = "development";

/// Listener and identity settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host (MARKET_API_HOST).
    pub host: String,
    /// Listen port (MARKET_API_PORT).
    pub port: u16,
    /// Environment tag surfaced by /health (MARKET_API_ENV).
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Split out from `from_env`
    /// so tests can inject values without touching process-global state.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match get("MARKET_API_PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(raw = %raw, default = DEFAULT_PORT, "invalid MARKET_API_PORT, using default");
                    defaults.port
                }
            },
            None => defaults.port,
        };

        Self {
            host: get("MARKET_API_HOST").unwrap_or(defaults.host),
            port,
            environment: get("MARKET_API_ENV").unwrap_or(defaults.environment),
        }
    }

    /// Socket address string for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.environment, "development");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let cfg = ServerConfig::from_lookup(|_| None);
        assert_eq!(cfg, ServerConfig::default());
    }

    #[test]
    fn lookup_overrides_every_field() {
        let cfg = ServerConfig::from_lookup(|key| match key {
            "MARKET_API_HOST" => Some("127.0.0.1".into()),
            "MARKET_API_PORT" => Some("4050".into()),
            "MARKET_API_ENV" => Some("test".into()),
            _ => None,
        });
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 4050);
        assert_eq!(cfg.environment, "test");
        assert_eq!(cfg.bind_addr(), "127.0.0.1:4050");
    }

    #[test]
    fn malformed_port_falls_back_to_default() {
        let cfg = ServerConfig::from_lookup(|key| match key {
            "MARKET_API_PORT" => Some("not-a-port".into()),
            _ => None,
        });
        assert_eq!(cfg.port, 4000);
    }
}
