//! Command-line client for the Living Atlas MCP server's HTTP transport.
//!
//! ```text
//! atlas-client list-tools
//! atlas-client call-tool query_layer layer_name usgs-gauges where "state = 'MI'" return_count_only true
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use living_atlas_mcp::client::{DEFAULT_SERVER_URL, RpcClient, display_value, parse_params};

#[derive(Parser)]
#[command(name = "atlas-client", version, about = "Call Living Atlas MCP tools over HTTP")]
struct Cli {
    /// MCP endpoint of the server
    #[arg(long, env = "ATLAS_MCP_URL", default_value = DEFAULT_SERVER_URL)]
    url: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tools the server offers
    ListTools,
    /// Call a tool with `key value` parameter pairs
    CallTool {
        /// Tool name
        tool: String,
        /// Alternating keys and values; values are parsed as JSON when possible
        #[arg(allow_hyphen_values = true)]
        params: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = RpcClient::new(&cli.url)?;
    debug!("Using server {}", client.url());

    match cli.cmd {
        Commands::ListTools => {
            let tools = client.initialize().and_then(|_| client.list_tools());
            match tools {
                Ok(tools) => {
                    println!("Available tools:");
                    for tool in tools {
                        println!("- {}: {}", tool.name, tool.description.unwrap_or_default());
                    }
                }
                Err(e) => println!("Error listing tools: {}", e),
            }
        }
        Commands::CallTool { tool, params } => {
            let arguments = parse_params(&params);
            let result = client
                .initialize()
                .and_then(|_| client.call_tool(&tool, arguments));
            match result {
                Ok(result) => {
                    println!("Tool result:");
                    println!("{}", serde_json::to_string_pretty(display_value(&result))?);
                }
                Err(e) => println!("Error calling tool: {}", e),
            }
        }
    }

    Ok(())
}
