//! Initialization and Initialized Handlers
//!
//! This module handles the LSP initialization handshake:
//!
//! 1. Client sends `initialize` request with its capabilities
//! 2. Server responds with its capabilities
//! 3. Client sends `initialized` notification
//! 4. Server is now ready to handle requests

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{info, warn};

use crate::capabilities::server_capabilities;
use crate::TlaLanguageServer;

/// Handles the `initialize` request.
///
/// Settings in `initializationOptions` are merged over the configuration
/// given on the command line. Malformed options are logged and ignored.
pub async fn handle_initialize(
    server: &TlaLanguageServer,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("Initializing TLA+ Language Server");

    server.state().set_client_capabilities(params.capabilities);

    if let Some(options) = &params.initialization_options {
        match server.state().config().merged_with(options) {
            Ok(config) => {
                info!("Initialization options applied: {:?}", config);
                server.state().update_config(config);
            }
            Err(err) => warn!("Ignoring initialization options: {}", err),
        }
    }

    if let Some(client_info) = &params.client_info {
        info!(
            "Client: {} {}",
            client_info.name,
            client_info.version.as_deref().unwrap_or("unknown")
        );
    }

    Ok(InitializeResult {
        capabilities: server_capabilities(),
        server_info: Some(ServerInfo {
            name: "tla-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handles the `initialized` notification.
pub async fn handle_initialized(server: &TlaLanguageServer, _params: InitializedParams) {
    info!("TLA+ Language Server initialized successfully");

    server.state().set_initialized(true);
}
