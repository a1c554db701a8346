//! Resources domain.
//!
//! Read-only data for MCP clients: the layer catalog, the state name table and
//! server information.
//!
//! - `definitions/` - One file per resource
//! - `registry.rs` - Resource registration
//! - `service.rs` - Listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{DynamicResourceType, ResourceContent, ResourceEntry, ResourceService};
