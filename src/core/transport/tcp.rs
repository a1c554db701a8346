//! TCP transport: each accepted connection gets its own rmcp session.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed `accept` so persistent errors don't spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (MCP over TCP)", addr);

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
                    }
                    tokio::spawn(serve_connection(server.clone(), stream, peer));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}

async fn serve_connection(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    info!("Accepted connection from {}", peer);

    let running = match server.serve(stream).await {
        Ok(running) => running,
        Err(e) => {
            warn!("Handshake with {} failed: {}", peer, e);
            return;
        }
    };

    match running.waiting().await {
        Ok(reason) => {
            info!("Client {} disconnected", peer);
            debug!("Session with {} ended: {:?}", peer, reason);
        }
        Err(e) => warn!("Error while serving {}: {:?}", peer, e),
    }
}
