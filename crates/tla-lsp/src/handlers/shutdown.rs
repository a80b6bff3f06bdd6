//! Shutdown Handler
//!
//! The shutdown sequence is:
//! 1. Client sends `shutdown` request
//! 2. Server responds
//! 3. Client sends `exit` notification
//! 4. Server process terminates

use tower_lsp::jsonrpc::Result;
use tracing::info;

use crate::TlaLanguageServer;

/// Handles the `shutdown` request.
///
/// Marks the server as uninitialized. Open documents are kept until exit.
pub async fn handle_shutdown(server: &TlaLanguageServer) -> Result<()> {
    info!(
        "TLA+ Language Server shutting down ({} open documents)",
        server.state().document_count()
    );

    server.state().set_initialized(false);

    Ok(())
}
