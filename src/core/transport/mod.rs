//! Transport layer for the MCP server.
//!
//! - **STDIO** (feature `stdio`, default): what desktop MCP clients launch.
//! - **TCP** (feature `tcp`): one rmcp session per connection.
//! - **HTTP** (feature `http`, default): JSON-RPC over POST, used by the
//!   `atlas-client` binary and by browser pages.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::{DEFAULT_HTTP_PORT, HttpConfig};
