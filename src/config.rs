//! Configuration loading and constants.
//!
//! The service is configured entirely through two environment variables,
//! `PORT` and `SERVICE`. Both are read once at startup into an immutable
//! [`Config`]. Exit codes, message prefixes and logging defaults live here too.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::http::ServerError;

// =============================================================================
// Environment
// =============================================================================

/// Environment variable holding the TCP port to listen on
pub const PORT_VAR: &str = "PORT";

/// Environment variable holding the service name shown at startup
pub const SERVICE_VAR: &str = "SERVICE";

/// Interface the listener binds to: every interface, dual-stack where the
/// host allows IPv4 clients on an IPv6 socket
pub const BIND_HOST: Ipv6Addr = Ipv6Addr::UNSPECIFIED;

/// Used instead of [`BIND_HOST`] when the host has no IPv6 support
pub const FALLBACK_BIND_HOST: Ipv4Addr = Ipv4Addr::UNSPECIFIED;

// =============================================================================
// Exit Behaviour
// =============================================================================

/// Prefix printed ahead of a listener failure
pub const SERVER_ERROR_PREFIX: &str = "Error starting server: ";

/// Exit status used when configuration is missing
pub const CONFIG_ERROR_EXIT_CODE: i32 = 1;

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "pulse=info";

/// Service configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port as given, not yet validated as a number
    pub port: String,
    /// Human-readable service name, used only for the startup message
    pub service: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// A variable that is unset and one that is set to the empty string are
    /// treated the same way.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        match (non_empty(PORT_VAR), non_empty(SERVICE_VAR)) {
            (Some(port), Some(service)) => Ok(Self { port, service }),
            _ => Err(ConfigError::Missing),
        }
    }

    /// Line printed to stdout once configuration has loaded.
    pub fn startup_message(&self) -> String {
        format!("Starting {} on port {}", self.service, self.port)
    }

    /// Resolve the socket address to bind: every interface, configured port.
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerError> {
        let port: u16 = self
            .port
            .parse()
            .map_err(|_| ServerError::InvalidAddress(self.port.clone()))?;

        Ok(SocketAddr::from((BIND_HOST, port)))
    }

    /// IPv4-only address on the same port as `addr`.
    pub fn fallback_addr(addr: SocketAddr) -> SocketAddr {
        SocketAddr::from((FALLBACK_BIND_HOST, addr.port()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT and SERVICE environment variables must be set")]
    Missing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn loads_both_variables() {
        let config =
            Config::from_lookup(lookup_from(&[("PORT", "8080"), ("SERVICE", "billing")])).unwrap();

        assert_eq!(config.port, "8080");
        assert_eq!(config.service, "billing");
    }

    #[test]
    fn missing_port_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("SERVICE", "billing")]));
        assert!(matches!(result, Err(ConfigError::Missing)));
    }

    #[test]
    fn missing_service_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "8080")]));
        assert!(matches!(result, Err(ConfigError::Missing)));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let empty_port = Config::from_lookup(lookup_from(&[("PORT", ""), ("SERVICE", "billing")]));
        let empty_service = Config::from_lookup(lookup_from(&[("PORT", "8080"), ("SERVICE", "")]));

        assert!(matches!(empty_port, Err(ConfigError::Missing)));
        assert!(matches!(empty_service, Err(ConfigError::Missing)));
    }

    #[test]
    fn error_displays_fixed_message() {
        assert_eq!(
            ConfigError::Missing.to_string(),
            "PORT and SERVICE environment variables must be set"
        );
    }

    #[test]
    fn port_is_not_validated_at_load_time() {
        let config =
            Config::from_lookup(lookup_from(&[("PORT", "not-a-port"), ("SERVICE", "x")])).unwrap();
        assert_eq!(config.port, "not-a-port");
    }

    #[test]
    fn startup_message_uses_raw_values() {
        let config = Config {
            port: "9000".to_string(),
            service: "orders api".to_string(),
        };
        assert_eq!(config.startup_message(), "Starting orders api on port 9000");
    }

    #[test]
    fn bind_addr_uses_all_interfaces() {
        let config = Config {
            port: "8080".to_string(),
            service: "billing".to_string(),
        };
        let addr = config.bind_addr().unwrap();

        assert!(addr.is_ipv6());
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn fallback_addr_keeps_port_on_ipv4() {
        let addr = SocketAddr::from((BIND_HOST, 8080));
        let fallback = Config::fallback_addr(addr);

        assert!(fallback.is_ipv4());
        assert!(fallback.ip().is_unspecified());
        assert_eq!(fallback.port(), 8080);
    }

    #[test]
    fn bind_addr_rejects_invalid_port() {
        for port in ["http", "70000", "-1", " 80"] {
            let config = Config {
                port: port.to_string(),
                service: "billing".to_string(),
            };
            assert!(
                matches!(config.bind_addr(), Err(ServerError::InvalidAddress(ref p)) if p == port),
                "port {port:?} should be rejected"
            );
        }
    }
}
