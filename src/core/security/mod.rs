// Security module for path validation.
//
// GeoJSON inputs and generated pages are confined to MCP_ROOT_PATH when it
// is set.

pub mod path_validator;

pub use path_validator::{PathSecurityError, validate_output_path, validate_path};
