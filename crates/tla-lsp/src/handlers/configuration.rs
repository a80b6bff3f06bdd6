//! Configuration Change Handler
//!
//! `workspace/didChangeConfiguration` replaces settings at runtime. The new
//! values take effect on the next resolve request; items already listed are
//! not touched.

use tower_lsp::lsp_types::{DidChangeConfigurationParams, MessageType};
use tracing::{info, warn};

use crate::TlaLanguageServer;

/// Handles the `workspace/didChangeConfiguration` notification.
pub async fn handle_did_change_configuration(
    server: &TlaLanguageServer,
    params: DidChangeConfigurationParams,
) {
    let current = server.state().config();
    match current.merged_with(&params.settings) {
        Ok(config) if config != current => {
            info!("Configuration updated: {:?}", config);
            server.state().update_config(config);
        }
        Ok(_) => {}
        Err(err) => {
            warn!("Ignoring configuration change: {}", err);
            server
                .client()
                .show_message(MessageType::WARNING, format!("TLA+ settings ignored: {}", err))
                .await;
        }
    }
}
