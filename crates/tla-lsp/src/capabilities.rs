//! Server Capability Declarations
//!
//! This module defines the LSP capabilities that the TLA+ language server
//! supports. Capabilities are negotiated during the initialization handshake
//! with the client.

use tower_lsp::lsp_types::*;

/// Typing this character opens the operator completion list.
pub const TRIGGER_CHARACTERS: &[&str] = &["\\"];

/// Creates the server capabilities to advertise to the client.
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            text_document_sync_options(),
        )),
        completion_provider: Some(completion_options()),
        ..ServerCapabilities::default()
    }
}

/// Text document synchronization options.
///
/// Incremental sync: only changed portions of documents are sent.
fn text_document_sync_options() -> TextDocumentSyncOptions {
    TextDocumentSyncOptions {
        open_close: Some(true),
        change: Some(TextDocumentSyncKind::INCREMENTAL),
        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
            include_text: Some(true),
        })),
        will_save: Some(false),
        will_save_wait_until: Some(false),
    }
}

/// Completion provider options.
///
/// Items are listed without insert text; the final text is computed by
/// `completionItem/resolve`.
fn completion_options() -> CompletionOptions {
    CompletionOptions {
        trigger_characters: Some(TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect()),
        all_commit_characters: None,
        resolve_provider: Some(true),
        work_done_progress_options: WorkDoneProgressOptions {
            work_done_progress: Some(false),
        },
        completion_item: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_capabilities_has_basic_features() {
        let caps = server_capabilities();

        assert!(caps.text_document_sync.is_some());
        assert!(caps.completion_provider.is_some());
        assert!(caps.hover_provider.is_none());
        assert!(caps.definition_provider.is_none());
    }

    #[test]
    fn test_text_document_sync_is_incremental() {
        let options = text_document_sync_options();

        assert_eq!(options.change, Some(TextDocumentSyncKind::INCREMENTAL));
        assert_eq!(options.open_close, Some(true));
    }

    #[test]
    fn test_completion_triggers_on_backslash() {
        let options = completion_options();

        assert_eq!(options.trigger_characters, Some(vec!["\\".to_string()]));
        assert_eq!(options.resolve_provider, Some(true));
    }
}
