//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to startup logs
    pub service_name: String,

    /// Log filter directive (e.g. `info`, `nw_03_transfers=debug`)
    pub log_level: String,

    /// Whether to write logs to stderr at all
    pub console_output: bool,

    /// Whether to format logs as JSON
    pub json_logs: bool,

    /// Network identifier (live, beta, test)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "nano-wallet".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "live".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `NW_SERVICE_NAME`: Service name (default: nano-wallet)
    /// - `NW_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `NW_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `NW_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `NW_NETWORK`: Network name (default: live)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("NW_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("NW_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("NW_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("NW_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            network: lookup("NW_NETWORK").unwrap_or(defaults.network),
        }
    }

    /// Configuration for one subsystem, e.g. `for_subsystem("04", "account-watcher")`.
    pub fn for_subsystem(subsystem_id: &str, subsystem_name: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("nw-{subsystem_id}-{subsystem_name}");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TelemetryConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("NW_LOG_LEVEL", "debug"),
            ("NW_JSON_LOGS", "1"),
            ("NW_CONSOLE_OUTPUT", "false"),
            ("NW_NETWORK", "beta"),
            ("NW_SERVICE_NAME", "watcher"),
        ]));
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
        assert!(!config.console_output);
        assert_eq!(config.network, "beta");
        assert_eq!(config.service_name, "watcher");
    }

    #[test]
    fn test_rust_log_fallback_and_container_json() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            ("DOCKER_CONTAINER", "1"),
        ]));
        assert_eq!(config.log_level, "warn");
        assert!(config.json_logs);
    }

    #[test]
    fn test_for_subsystem() {
        let config = TelemetryConfig::for_subsystem("03", "transfers");
        assert_eq!(config.service_name, "nw-03-transfers");
    }
}
