//! Living Atlas MCP Server Library
//!
//! An MCP server that queries Esri ArcGIS Living Atlas feature layers
//! (states, counties, USGS gauges, rivers, dams, watersheds, water quality),
//! converts the results to GeoJSON and generates ArcGIS JS map pages.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, path security, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **geometry**: Esri JSON and GeoJSON geometry conversion
//!   - **atlas**: layer catalog and the ArcGIS REST query client
//!   - **maps**: HTML map page generation and external viewers
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: data resources that can be read by clients
//! - **client**: JSON-RPC client used by the `atlas-client` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use living_atlas_mcp::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
