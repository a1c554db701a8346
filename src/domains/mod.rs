//! Domains module containing business logic organized by bounded contexts.
//!
//! `geometry` and `atlas` talk to ArcGIS, `maps` renders pages from their
//! output, and `tools` and `resources` expose all of it over MCP.

pub mod atlas;
pub mod geometry;
pub mod maps;
pub mod resources;
pub mod tools;
