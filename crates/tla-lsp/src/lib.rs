//! TLA+ Language Server Protocol Implementation
//!
//! This crate exposes the [`tla_completion`] engine to editors over LSP.
//! It keeps open documents in memory, indexes their declarations, and
//! answers `textDocument/completion` and `completionItem/resolve`.
//!
//! # Architecture
//!
//! - **State Management**: Centralized server state with document storage
//! - **Index**: Per-document symbol table and PlusCal block spans
//! - **Capabilities**: Negotiated feature set with the client
//! - **Handlers**: Request/notification handlers for LSP protocol
//!
//! # Modules
//!
//! - [`capabilities`]: Server capability declarations
//! - [`config`]: Client settings and their merge rules
//! - [`handlers`]: LSP request and notification handlers
//! - [`index`]: Textual declaration scanner
//! - [`state`]: Server state and document management

pub mod capabilities;
pub mod config;
pub mod handlers;
pub mod index;
pub mod state;

use std::sync::Arc;
use tla_completion::CompletionEngine;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::state::ServerState;

/// The TLA+ Language Server.
///
/// Handles all LSP protocol messages and forwards completion work to the
/// [`CompletionEngine`].
pub struct TlaLanguageServer {
    /// The LSP client handle for sending notifications.
    client: Client,
    /// The server state containing documents and configuration.
    state: Arc<ServerState>,
    engine: CompletionEngine,
}

impl TlaLanguageServer {
    /// Creates a new server starting from the given configuration.
    pub fn new(client: Client, config: ServerConfig) -> Self {
        Self {
            client,
            state: Arc::new(ServerState::with_config(config)),
            engine: CompletionEngine::new(),
        }
    }

    /// Returns a reference to the server state.
    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Returns a reference to the LSP client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Returns the completion engine.
    pub fn engine(&self) -> &CompletionEngine {
        &self.engine
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for TlaLanguageServer {
    #[instrument(skip(self))]
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::initialize::handle_initialize(self, params).await
    }

    #[instrument(skip(self))]
    async fn initialized(&self, params: InitializedParams) {
        handlers::initialize::handle_initialized(self, params).await
    }

    #[instrument(skip(self))]
    async fn shutdown(&self) -> Result<()> {
        handlers::shutdown::handle_shutdown(self).await
    }

    #[instrument(skip(self))]
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document::handle_did_open(self, params).await
    }

    #[instrument(skip(self))]
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document::handle_did_change(self, params).await
    }

    #[instrument(skip(self))]
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document::handle_did_close(self, params).await
    }

    #[instrument(skip(self))]
    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        handlers::document::handle_did_save(self, params).await
    }

    #[instrument(skip(self))]
    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::configuration::handle_did_change_configuration(self, params).await
    }

    #[instrument(skip(self))]
    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        handlers::completion::handle_completion(self, params).await
    }

    #[instrument(skip(self))]
    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        handlers::completion::handle_completion_resolve(self, item).await
    }
}

/// Creates the LSP service and IO transport.
pub fn create_server(config: ServerConfig) -> (LspService<TlaLanguageServer>, tower_lsp::ClientSocket) {
    LspService::build(move |client| TlaLanguageServer::new(client, config)).finish()
}

/// Runs the TLA+ Language Server over stdio.
///
/// # Example
///
/// ```ignore
/// #[tokio::main]
/// async fn main() {
///     tla_lsp::run_server(Default::default()).await;
/// }
/// ```
pub async fn run_server(config: ServerConfig) {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_server(config);

    info!("TLA+ Language Server starting...");

    Server::new(stdin, stdout, socket).serve(service).await;

    info!("TLA+ Language Server stopped.");
}
