//! Completion Handlers
//!
//! This module handles `textDocument/completion` and `completionItem/resolve`.
//!
//! # Completion Triggers
//!
//! Completion is triggered by:
//! - `\` - Operator names (`\in`, `\cup`, ...)
//! - Manual invocation (Ctrl+Space)
//!
//! Operators carry a `textEdit` that covers the marker and the partial name,
//! so that the resolved text replaces both. When the client accepts
//! `insertText` and `textEdit` from `completionItem/resolve`, listed items
//! carry no insert text and it is computed at resolve time from the current
//! Unicode preference. Otherwise items are resolved before they are listed.

use tla_completion as tla;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::TlaLanguageServer;

/// Handles the `textDocument/completion` request.
///
/// Returns `None` only when the document or the line is unknown. A context
/// with nothing to offer yields an empty, complete list.
pub async fn handle_completion(
    server: &TlaLanguageServer,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = &params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;
    let trigger = params.context.as_ref().and_then(|c| c.trigger_character.as_deref());

    debug!(
        "Completion request at {}:{}:{} (trigger: {:?})",
        uri, position.line, position.character, trigger
    );

    let doc = match server.state().get_document(uri) {
        Some(doc) => doc,
        None => {
            debug!("Document not found: {}", uri);
            return Ok(None);
        }
    };

    let Some(prefix) = doc.line_prefix(position) else {
        debug!("Line {} is past the end of {}", position.line, uri);
        return Ok(None);
    };

    let cursor = tla::Position::new(position.line, position.character);
    let list = server.engine().provide(&prefix, cursor, &doc);
    let lazy = server.state().resolves_lazily();

    let items = list
        .items
        .into_iter()
        .map(|item| {
            if lazy {
                item
            } else {
                server.engine().resolve(item, server.state())
            }
        })
        .enumerate()
        .map(|(index, item)| to_lsp_item(item, index, position.line))
        .collect();

    Ok(Some(CompletionResponse::List(CompletionList {
        is_incomplete: list.is_incomplete,
        items,
    })))
}

/// Handles the `completionItem/resolve` request.
///
/// Fills `insertText`, and for operators rewrites the `textEdit` text, using
/// the Unicode preference as it is at the moment of the request. Items sent
/// to clients that cannot take these properties lazily are returned as they
/// are; they were resolved when listed.
pub async fn handle_completion_resolve(
    server: &TlaLanguageServer,
    mut item: CompletionItem,
) -> Result<CompletionItem> {
    if !server.state().resolves_lazily() {
        return Ok(item);
    }

    let resolved = server.engine().resolve(from_lsp_item(&item), server.state());

    debug!("Resolved {:?} to {:?}", item.label, resolved.insert_text);

    if let Some(text) = resolved.insert_text {
        if let Some(CompletionTextEdit::Edit(edit)) = item.text_edit.as_mut() {
            edit.new_text = text.clone();
        }
        item.insert_text = Some(text);
    }

    Ok(item)
}

fn to_lsp_item(item: tla::CompletionItem, index: usize, line: u32) -> CompletionItem {
    let text_edit = item.range.map(|range| {
        CompletionTextEdit::Edit(TextEdit {
            range: Range::new(Position::new(line, range.start), Position::new(line, range.end)),
            new_text: item.insert_text.clone().unwrap_or_else(|| item.label.clone()),
        })
    });
    let filter_text = text_edit.as_ref().map(|_| item.label.clone());

    CompletionItem {
        kind: Some(to_lsp_kind(item.kind)),
        detail: item.detail,
        insert_text: item.insert_text,
        sort_text: Some(format!("{:04}", index)),
        filter_text,
        text_edit,
        label: item.label,
        ..Default::default()
    }
}

fn from_lsp_item(item: &CompletionItem) -> tla::CompletionItem {
    let kind = item.kind.map_or(tla::CompletionKind::Text, from_lsp_kind);
    let mut tla_item = tla::CompletionItem::new(item.label.clone(), kind);
    tla_item.detail = item.detail.clone();

    if let Some(CompletionTextEdit::Edit(edit)) = &item.text_edit {
        tla_item.range = Some(tla::EditRange::new(
            edit.range.start.character,
            edit.range.end.character,
        ));
    }
    tla_item
}

/// Maps an engine kind to its LSP counterpart.
pub fn to_lsp_kind(kind: tla::CompletionKind) -> CompletionItemKind {
    match kind {
        tla::CompletionKind::Keyword => CompletionItemKind::KEYWORD,
        tla::CompletionKind::Operator => CompletionItemKind::OPERATOR,
        tla::CompletionKind::Constant => CompletionItemKind::CONSTANT,
        tla::CompletionKind::Module | tla::CompletionKind::Namespace => CompletionItemKind::MODULE,
        tla::CompletionKind::Field => CompletionItemKind::FIELD,
        tla::CompletionKind::Variable => CompletionItemKind::VARIABLE,
        tla::CompletionKind::Function => CompletionItemKind::FUNCTION,
        tla::CompletionKind::Method => CompletionItemKind::METHOD,
        tla::CompletionKind::Text => CompletionItemKind::TEXT,
    }
}

/// Maps an LSP kind back to the engine's. Unknown kinds become text.
pub fn from_lsp_kind(kind: CompletionItemKind) -> tla::CompletionKind {
    match kind {
        CompletionItemKind::KEYWORD => tla::CompletionKind::Keyword,
        CompletionItemKind::OPERATOR => tla::CompletionKind::Operator,
        CompletionItemKind::CONSTANT => tla::CompletionKind::Constant,
        CompletionItemKind::MODULE => tla::CompletionKind::Module,
        CompletionItemKind::FIELD => tla::CompletionKind::Field,
        CompletionItemKind::VARIABLE => tla::CompletionKind::Variable,
        CompletionItemKind::FUNCTION => tla::CompletionKind::Function,
        CompletionItemKind::METHOD => tla::CompletionKind::Method,
        _ => tla::CompletionKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::create_server;
    use pretty_assertions::assert_eq;

    const SPEC: &str = "---- MODULE Spec ----\n\
                        EXTENDS Naturals\n\
                        VARIABLE count\n\
                        Init == count \\i\n\
                        ====\n";

    fn uri() -> Url {
        Url::parse("file:///Spec.tla").unwrap()
    }

    fn params(line: u32, character: u32) -> CompletionParams {
        CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri() },
                position: Position::new(line, character),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        }
    }

    fn items(response: Option<CompletionResponse>) -> Vec<CompletionItem> {
        match response {
            Some(CompletionResponse::List(list)) => {
                assert!(!list.is_incomplete);
                list.items
            }
            other => panic!("expected a completion list, got {:?}", other),
        }
    }

    fn lazy_client() -> ClientCapabilities {
        ClientCapabilities {
            text_document: Some(TextDocumentClientCapabilities {
                completion: Some(CompletionClientCapabilities {
                    completion_item: Some(CompletionItemCapability {
                        resolve_support: Some(CompletionItemCapabilityResolveSupport {
                            properties: vec!["insertText".to_string(), "textEdit".to_string()],
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn open(server: &TlaLanguageServer) {
        server.state().set_client_capabilities(lazy_client());
        server
            .state()
            .open_document(uri(), SPEC.to_string(), 1, "tlaplus".to_string());
    }

    #[test]
    fn test_kind_mapping_round_trips() {
        for kind in [
            tla::CompletionKind::Keyword,
            tla::CompletionKind::Operator,
            tla::CompletionKind::Constant,
            tla::CompletionKind::Module,
            tla::CompletionKind::Variable,
            tla::CompletionKind::Function,
            tla::CompletionKind::Text,
        ] {
            assert_eq!(from_lsp_kind(to_lsp_kind(kind)), kind);
        }
        assert_eq!(
            from_lsp_kind(to_lsp_kind(tla::CompletionKind::Namespace)),
            tla::CompletionKind::Module
        );
    }

    #[tokio::test]
    async fn test_unknown_document_has_no_response() {
        let (service, _socket) = create_server(ServerConfig::default());
        let response = handle_completion(service.inner(), params(0, 0)).await.unwrap();
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_operator_completion_and_resolve() {
        let (service, _socket) = create_server(ServerConfig::default());
        let server = service.inner();
        open(server);

        let listed = items(handle_completion(server, params(3, 16)).await.unwrap());
        assert!(listed.iter().all(|i| i.kind == Some(CompletionItemKind::OPERATOR)));
        assert!(listed.iter().all(|i| i.insert_text.is_none()));

        let item = listed.into_iter().find(|i| i.label == "\\in").unwrap();
        assert_eq!(item.filter_text.as_deref(), Some("\\in"));
        match &item.text_edit {
            Some(CompletionTextEdit::Edit(edit)) => {
                assert_eq!(edit.range, Range::new(Position::new(3, 14), Position::new(3, 16)));
            }
            other => panic!("expected a text edit, got {:?}", other),
        }

        let ascii = handle_completion_resolve(server, item.clone()).await.unwrap();
        assert_eq!(ascii.insert_text.as_deref(), Some("\\in "));

        server.state().update_config(ServerConfig { prefer_unicode: true });
        let unicode = handle_completion_resolve(server, item).await.unwrap();
        assert_eq!(unicode.insert_text.as_deref(), Some("∈ "));
        match unicode.text_edit {
            Some(CompletionTextEdit::Edit(edit)) => assert_eq!(edit.new_text, "∈ "),
            other => panic!("expected a text edit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extends_lists_modules_in_order() {
        let (service, _socket) = create_server(ServerConfig::default());
        let server = service.inner();
        open(server);

        let listed = items(handle_completion(server, params(1, 16)).await.unwrap());
        let labels: Vec<_> = listed.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"Bags"));
        assert!(listed.iter().all(|i| i.kind == Some(CompletionItemKind::MODULE)));

        let sort_texts: Vec<_> = listed.iter().filter_map(|i| i.sort_text.clone()).collect();
        let mut sorted = sort_texts.clone();
        sorted.sort();
        assert_eq!(sort_texts, sorted);
    }

    #[tokio::test]
    async fn test_keyword_resolves_with_trailing_space() {
        let (service, _socket) = create_server(ServerConfig::default());
        let server = service.inner();
        open(server);

        let listed = items(handle_completion(server, params(4, 0)).await.unwrap());
        let item = listed.into_iter().find(|i| i.label == "THEOREM").unwrap();

        let resolved = handle_completion_resolve(server, item).await.unwrap();
        assert_eq!(resolved.insert_text.as_deref(), Some("THEOREM "));
        assert!(resolved.text_edit.is_none());
    }

    #[tokio::test]
    async fn test_declared_symbols_are_offered() {
        let (service, _socket) = create_server(ServerConfig::default());
        let server = service.inner();
        open(server);

        let listed = items(handle_completion(server, params(3, 8)).await.unwrap());
        let count = listed.iter().find(|i| i.label == "count").unwrap();
        assert_eq!(count.kind, Some(CompletionItemKind::VARIABLE));

        let resolved = handle_completion_resolve(server, count.clone()).await.unwrap();
        assert!(resolved.insert_text.is_none());
    }

    #[tokio::test]
    async fn test_eager_client_gets_text_when_listed() {
        let (service, _socket) = create_server(ServerConfig { prefer_unicode: true });
        let server = service.inner();
        server
            .state()
            .open_document(uri(), SPEC.to_string(), 1, "tlaplus".to_string());

        let listed = items(handle_completion(server, params(3, 16)).await.unwrap());
        let item = listed.into_iter().find(|i| i.label == "\\in").unwrap();
        assert_eq!(item.insert_text.as_deref(), Some("∈ "));
        match &item.text_edit {
            Some(CompletionTextEdit::Edit(edit)) => assert_eq!(edit.new_text, "∈ "),
            other => panic!("expected a text edit, got {:?}", other),
        }

        // Resolve leaves the listed text alone, even after a settings change.
        server.state().update_config(ServerConfig::default());
        let resolved = handle_completion_resolve(server, item.clone()).await.unwrap();
        assert_eq!(resolved, item);
    }
}
