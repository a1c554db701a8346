//! Tools domain.
//!
//! - `definitions/` - One file per tool: params, `execute()`, `http_handler()`
//! - `router.rs` - ToolRouter for the STDIO/TCP transports
//! - `registry.rs` - Tool list and HTTP dispatch
//!
//! A new tool needs a file in `definitions/`, a route in `router.rs` and an
//! entry in `registry.rs`.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
