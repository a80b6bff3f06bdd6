//! Server State Management
//!
//! This module provides centralized state management for the TLA+ language
//! server: the open documents with their symbol indexes, and the live
//! configuration.
//!
//! # Architecture
//!
//! The state is designed for concurrent access from multiple async tasks:
//!
//! - **Documents**: Thread-safe storage using `DashMap`
//! - **Configuration**: `RwLock`-guarded settings, read on every resolve

use dashmap::DashMap;
use ropey::Rope;
use std::sync::atomic::{AtomicBool, Ordering};
use tla_completion::{DocumentInfo, SymbolRecord, UnicodePreference};
use tower_lsp::lsp_types::*;

use crate::config::ServerConfig;
use crate::index::{is_line_break, DocumentIndex};

/// Completion item properties the server fills in at resolve time.
const LAZY_PROPERTIES: &[&str] = &["insertText", "textEdit"];

/// A stored document with its content and metadata.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document URI.
    pub uri: Url,

    /// The document content as a rope for efficient editing.
    pub content: Rope,

    /// The document version from the client.
    pub version: i32,

    /// The language ID (should be "tlaplus").
    pub language_id: String,

    /// Symbols and algorithm spans, rebuilt after every change.
    index: DocumentIndex,
}

impl Document {
    /// Creates a new document from the given parameters.
    pub fn new(uri: Url, content: String, version: i32, language_id: String) -> Self {
        let content = Rope::from_str(&content);
        let index = DocumentIndex::build(&content);
        Self {
            uri,
            content,
            version,
            language_id,
            index,
        }
    }

    /// Returns the document content as a string.
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Returns the text of the line from its start up to the position.
    ///
    /// The character offset is in UTF-16 code units and is clamped to the
    /// end of the line. Returns `None` when the line does not exist.
    pub fn line_prefix(&self, position: Position) -> Option<String> {
        let line_idx = position.line as usize;
        if line_idx >= self.content.len_lines() {
            return None;
        }

        let mut prefix = String::new();
        let mut units = 0usize;
        for c in self.content.line(line_idx).chars() {
            if is_line_break(c) || units + c.len_utf16() > position.character as usize {
                break;
            }
            units += c.len_utf16();
            prefix.push(c);
        }
        Some(prefix)
    }

    /// Converts an LSP position to a char index into the rope.
    fn position_to_char(&self, position: Position) -> Option<usize> {
        let line_idx = position.line as usize;
        if line_idx >= self.content.len_lines() {
            return None;
        }

        let line_start = self.content.line_to_char(line_idx);
        let line_end = line_start + self.content.line(line_idx).len_chars();

        let start_cu = self.content.char_to_utf16_cu(line_start);
        let end_cu = self.content.char_to_utf16_cu(line_end);
        let target_cu = (start_cu + position.character as usize).min(end_cu);

        Some(self.content.utf16_cu_to_char(target_cu))
    }

    /// Applies incremental text changes to the document.
    pub fn apply_changes(&mut self, changes: Vec<TextDocumentContentChangeEvent>, version: i32) {
        for change in changes {
            if let Some(range) = change.range {
                // Incremental change
                let start = self.position_to_char(range.start);
                let end = self.position_to_char(range.end);

                if let (Some(start), Some(end)) = (start, end) {
                    self.content.remove(start..end.max(start));
                    self.content.insert(start, &change.text);
                }
            } else {
                // Full document replacement
                self.content = Rope::from_str(&change.text);
            }
        }

        self.version = version;
        self.index = DocumentIndex::build(&self.content);
    }
}

impl DocumentInfo for Document {
    fn symbols(&self) -> &[SymbolRecord] {
        self.index.symbols()
    }

    fn is_inside_sub_block(&self, position: tla_completion::Position) -> bool {
        self.index.is_inside_sub_block(position)
    }
}

/// The server state containing all runtime data.
///
/// This struct is designed to be wrapped in an `Arc` for shared access
/// across async tasks. All fields use interior mutability patterns
/// for thread-safe concurrent access.
pub struct ServerState {
    /// Open documents, keyed by URI.
    documents: DashMap<Url, Document>,

    /// Server configuration.
    config: parking_lot::RwLock<ServerConfig>,

    /// Whether the server has been initialized.
    initialized: AtomicBool,

    /// Client capabilities received during initialization.
    client_capabilities: parking_lot::RwLock<Option<ClientCapabilities>>,
}

impl ServerState {
    /// Creates a new server state with default configuration.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Creates a new server state with the given configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            documents: DashMap::new(),
            config: parking_lot::RwLock::new(config),
            initialized: AtomicBool::new(false),
            client_capabilities: parking_lot::RwLock::new(None),
        }
    }

    /// Marks the server as initialized.
    pub fn set_initialized(&self, initialized: bool) {
        self.initialized.store(initialized, Ordering::SeqCst);
    }

    /// Returns whether the server has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Sets the client capabilities.
    pub fn set_client_capabilities(&self, capabilities: ClientCapabilities) {
        *self.client_capabilities.write() = Some(capabilities);
    }

    /// Whether the client accepts `insertText` and `textEdit` filled in by
    /// `completionItem/resolve`. Without it, items are resolved when listed.
    pub fn resolves_lazily(&self) -> bool {
        self.client_capabilities
            .read()
            .as_ref()
            .and_then(|caps| caps.text_document.as_ref())
            .and_then(|text| text.completion.as_ref())
            .and_then(|completion| completion.completion_item.as_ref())
            .and_then(|item| item.resolve_support.as_ref())
            .is_some_and(|support| {
                LAZY_PROPERTIES
                    .iter()
                    .all(|wanted| support.properties.iter().any(|p| p == wanted))
            })
    }

    /// Opens a document and stores it.
    pub fn open_document(&self, uri: Url, text: String, version: i32, language_id: String) {
        let doc = Document::new(uri.clone(), text, version, language_id);
        self.documents.insert(uri, doc);
    }

    /// Updates a document with incremental changes.
    pub fn update_document(
        &self,
        uri: &Url,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> bool {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            doc.apply_changes(changes, version);
            true
        } else {
            false
        }
    }

    /// Closes a document and removes it from storage.
    pub fn close_document(&self, uri: &Url) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }

    /// Gets a document by URI.
    pub fn get_document(&self, uri: &Url) -> Option<Document> {
        self.documents.get(uri).map(|r| r.clone())
    }

    /// Returns the number of open documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Gets the current configuration.
    pub fn config(&self) -> ServerConfig {
        self.config.read().clone()
    }

    /// Updates the configuration.
    pub fn update_config(&self, config: ServerConfig) {
        *self.config.write() = config;
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl UnicodePreference for ServerState {
    fn prefer_unicode(&self) -> bool {
        self.config.read().prefer_unicode
    }
}
