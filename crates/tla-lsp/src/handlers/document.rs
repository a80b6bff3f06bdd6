//! Text Document Synchronization Handlers
//!
//! This module handles document lifecycle events:
//!
//! - `didOpen`: Document opened in the editor
//! - `didChange`: Document content changed
//! - `didSave`: Document saved to disk
//! - `didClose`: Document closed in the editor
//!
//! Every content change rebuilds the document's symbol index so the next
//! completion request sees current declarations.

use tower_lsp::lsp_types::*;
use tracing::{debug, info, warn};

use crate::TlaLanguageServer;

/// Handles the `textDocument/didOpen` notification.
pub async fn handle_did_open(server: &TlaLanguageServer, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    let version = params.text_document.version;
    let language_id = params.text_document.language_id;
    let text = params.text_document.text;

    info!("Document opened: {}", uri);
    debug!(
        "Document version: {}, language: {}, length: {} bytes",
        version,
        language_id,
        text.len()
    );

    server.state().open_document(uri, text, version, language_id);
}

/// Handles the `textDocument/didChange` notification.
pub async fn handle_did_change(server: &TlaLanguageServer, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;
    let version = params.text_document.version;

    debug!("Document changed: {} (version {})", uri, version);

    let updated = server
        .state()
        .update_document(&uri, params.content_changes, version);

    if !updated {
        warn!("Received change for unknown document: {}", uri);
    }
}

/// Handles the `textDocument/didSave` notification.
///
/// When the client includes the saved text and it differs from our copy,
/// the stored document is replaced.
pub async fn handle_did_save(server: &TlaLanguageServer, params: DidSaveTextDocumentParams) {
    let uri = params.text_document.uri;

    info!("Document saved: {}", uri);

    if let Some(text) = params.text {
        if let Some(doc) = server.state().get_document(&uri) {
            if doc.text() != text {
                debug!("Syncing document content from save");
                let changes = vec![TextDocumentContentChangeEvent {
                    range: None,
                    range_length: None,
                    text,
                }];
                server.state().update_document(&uri, changes, doc.version + 1);
            }
        }
    }
}

/// Handles the `textDocument/didClose` notification.
pub async fn handle_did_close(server: &TlaLanguageServer, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;

    info!("Document closed: {}", uri);

    if server.state().close_document(&uri).is_none() {
        warn!("Closed document was not in store: {}", uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::create_server;
    use pretty_assertions::assert_eq;
    use tla_completion::DocumentInfo;

    fn uri() -> Url {
        Url::parse("file:///Spec.tla").unwrap()
    }

    #[tokio::test]
    async fn test_document_open_change_save_close() {
        let (service, _socket) = create_server(ServerConfig::default());
        let server = service.inner();

        handle_did_open(
            server,
            DidOpenTextDocumentParams {
                text_document: TextDocumentItem {
                    uri: uri(),
                    language_id: "tlaplus".to_string(),
                    version: 1,
                    text: "VARIABLE x\n".to_string(),
                },
            },
        )
        .await;
        assert_eq!(server.state().document_count(), 1);

        handle_did_change(
            server,
            DidChangeTextDocumentParams {
                text_document: VersionedTextDocumentIdentifier { uri: uri(), version: 2 },
                content_changes: vec![TextDocumentContentChangeEvent {
                    range: Some(Range::new(Position::new(0, 10), Position::new(0, 10))),
                    range_length: None,
                    text: ", y".to_string(),
                }],
            },
        )
        .await;

        let doc = server.state().get_document(&uri()).unwrap();
        assert_eq!(doc.text(), "VARIABLE x, y\n");
        let names: Vec<_> = doc.symbols().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);

        handle_did_save(
            server,
            DidSaveTextDocumentParams {
                text_document: TextDocumentIdentifier { uri: uri() },
                text: Some("CONSTANT N\n".to_string()),
            },
        )
        .await;
        let doc = server.state().get_document(&uri()).unwrap();
        assert_eq!(doc.text(), "CONSTANT N\n");
        assert_eq!(doc.version, 3);

        handle_did_close(
            server,
            DidCloseTextDocumentParams {
                text_document: TextDocumentIdentifier { uri: uri() },
            },
        )
        .await;
        assert!(server.state().get_document(&uri()).is_none());
    }
}
