//! Shared infrastructure: configuration, errors, path security, the MCP
//! server handler and its transports.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use security::{PathSecurityError, validate_output_path, validate_path};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
