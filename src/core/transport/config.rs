//! Transport configuration types.

use serde::{Deserialize, Serialize};
#[cfg(any(feature = "tcp", feature = "http"))]
use tracing::warn;

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 3000;

/// Port the `atlas-client` binary expects by default.
#[cfg(feature = "http")]
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP clients).
    #[cfg(feature = "stdio")]
    Stdio,

    /// One rmcp session per accepted TCP connection.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Allow any origin, so map pages served elsewhere can call the server.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_TCP_PORT,
            host: default_host(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    fn from_env() -> Self {
        Self {
            port: env_port("MCP_TCP_PORT", DEFAULT_TCP_PORT),
            host: std::env::var("MCP_TCP_HOST").unwrap_or_else(|_| default_host()),
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    fn from_env() -> Self {
        Self {
            port: env_port("MCP_HTTP_PORT", DEFAULT_HTTP_PORT),
            host: std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host()),
            rpc_path: std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path()),
            enable_cors: std::env::var("MCP_HTTP_CORS")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
                .unwrap_or_else(|_| default_cors()),
        }
    }
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn env_port(var: &str, default: u16) -> u16 {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}: {}", var, raw);
            default
        }),
        Err(_) => default,
    }
}

impl TransportConfig {
    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from `MCP_TRANSPORT` and the per-transport
    /// variables. Unknown transport names fall back to the default.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig::from_env()),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            _ => Self::default(),
        }
    }

    /// Force the HTTP transport, keeping any HTTP settings from the
    /// environment. Used by the `--http` command line flag.
    #[cfg(feature = "http")]
    pub fn force_http(self) -> Self {
        match self {
            Self::Http(cfg) => Self::Http(cfg),
            #[allow(unreachable_patterns)]
            _ => Self::Http(HttpConfig::from_env()),
        }
    }

    /// Human-readable description used in startup logs.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[cfg(feature = "stdio")]
    #[test]
    fn test_default_is_stdio() {
        assert!(TransportConfig::default().is_stdio());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_defaults_match_client() {
        let cfg = HttpConfig::default();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.rpc_path, "/mcp");
        assert!(cfg.enable_cors);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "HTTP");
            std::env::set_var("MCP_HTTP_PORT", "9100");
            std::env::set_var("MCP_HTTP_CORS", "off");
        }
        let config = TransportConfig::from_env();
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
            std::env::remove_var("MCP_HTTP_PORT");
            std::env::remove_var("MCP_HTTP_CORS");
        }

        match config {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.port, 9100);
                assert!(!cfg.enable_cors);
            }
            other => panic!("expected HTTP transport, got {}", other.description()),
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_invalid_port_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_HTTP_PORT", "eighty");
        }
        let port = env_port("MCP_HTTP_PORT", DEFAULT_HTTP_PORT);
        unsafe {
            std::env::remove_var("MCP_HTTP_PORT");
        }
        assert_eq!(port, DEFAULT_HTTP_PORT);
    }

    #[cfg(all(feature = "http", feature = "stdio"))]
    #[test]
    fn test_force_http() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let config = TransportConfig::Stdio.force_http();
        assert_eq!(config.description(), "HTTP on 127.0.0.1:8000/mcp");

        let custom = TransportConfig::http(9000, "0.0.0.0").force_http();
        assert_eq!(custom.description(), "HTTP on 0.0.0.0:9000/mcp");
    }
}
