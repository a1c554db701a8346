//! JSON-RPC client for the server's HTTP transport, used by `atlas-client`.

mod args;
mod error;
mod rpc;

pub use args::parse_params;
pub use error::{ClientError, ClientResult};
pub use rpc::{DEFAULT_SERVER_URL, RpcClient, ToolSummary, display_value};
