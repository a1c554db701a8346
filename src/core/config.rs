//! Configuration management for the Living Atlas MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and an optional `.env` file) on top of defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Resources domain configuration.
    pub resources: ResourcesConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// ArcGIS access and generated output configuration.
    pub atlas: AtlasConfig,

    /// Security and path validation configuration.
    pub security: SecurityConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the resources domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Expose the layer catalog and state table as resources.
    pub expose_catalog: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// ArcGIS REST access and output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Timeout for a single ArcGIS request, in seconds.
    pub request_timeout_secs: u64,

    /// User agent sent to ArcGIS services.
    pub user_agent: String,

    /// Directory where generated HTML pages are written.
    pub output_dir: PathBuf,

    /// Open generated pages in the system browser.
    pub open_browser: bool,

    /// Command used by `display_geojson` to show a GeoJSON file.
    pub geojsonio_command: String,
}

/// Configuration for security and path validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Optional root directory for path operations.
    /// If None, no path restrictions are enforced.
    pub root_path: Option<PathBuf>,

    /// Whether symlinks may be followed during path validation.
    pub allow_symlinks: bool,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: format!("living-atlas-mcp/{}", env!("CARGO_PKG_VERSION")),
            output_dir: PathBuf::from("."),
            open_browser: true,
            geojsonio_command: "geojsonio".to_string(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            allow_symlinks: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "living-atlas-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            resources: ResourcesConfig {
                expose_catalog: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            atlas: AtlasConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_OUTPUT_DIR`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(expose) = std::env::var("MCP_EXPOSE_CATALOG") {
            config.resources.expose_catalog = parse_flag(&expose, true);
        }

        config.transport = TransportConfig::from_env();

        if let Ok(timeout) = std::env::var("MCP_REQUEST_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.atlas.request_timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid MCP_REQUEST_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Ok(dir) = std::env::var("MCP_OUTPUT_DIR") {
            config.atlas.output_dir = PathBuf::from(dir);
            info!("Generated pages will be written to {:?}", config.atlas.output_dir);
        }

        if let Ok(open) = std::env::var("MCP_OPEN_BROWSER") {
            config.atlas.open_browser = parse_flag(&open, true);
        }

        if let Ok(command) = std::env::var("MCP_GEOJSONIO_COMMAND") {
            config.atlas.geojsonio_command = command;
        }

        if let Ok(root_path) = std::env::var("MCP_ROOT_PATH") {
            config.security.root_path = Some(PathBuf::from(root_path));
            info!("Path security enabled: root directory set to {:?}", config.security.root_path);
        } else {
            warn!(
                "MCP_ROOT_PATH not set - no path restrictions active. \
                 GeoJSON input and output paths will not be confined."
            );
        }

        if let Ok(allow_symlinks) = std::env::var("MCP_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = parse_flag(&allow_symlinks, true);
            info!("Symlinks allowed: {}", config.security.allow_symlinks);
        }

        config
    }
}

/// Parse a boolean environment flag; anything unrecognized yields `default`.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "living-atlas-mcp");
        assert_eq!(config.atlas.request_timeout_secs, 30);
        assert_eq!(config.atlas.geojsonio_command, "geojsonio");
        assert!(config.atlas.open_browser);
        assert!(config.resources.expose_catalog);
        assert!(config.security.root_path.is_none());
    }

    #[test]
    fn test_atlas_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_OUTPUT_DIR", "/tmp/atlas-pages");
            std::env::set_var("MCP_OPEN_BROWSER", "false");
            std::env::set_var("MCP_REQUEST_TIMEOUT_SECS", "5");
        }
        let config = Config::from_env();
        assert_eq!(config.atlas.output_dir, PathBuf::from("/tmp/atlas-pages"));
        assert!(!config.atlas.open_browser);
        assert_eq!(config.atlas.request_timeout_secs, 5);
        unsafe {
            std::env::remove_var("MCP_OUTPUT_DIR");
            std::env::remove_var("MCP_OPEN_BROWSER");
            std::env::remove_var("MCP_REQUEST_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_REQUEST_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.atlas.request_timeout_secs, 30);
        unsafe {
            std::env::remove_var("MCP_REQUEST_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE", false));
        assert!(parse_flag("1", false));
        assert!(!parse_flag("off", true));
        assert!(parse_flag("maybe", true));
        assert!(!parse_flag("maybe", false));
    }
}
