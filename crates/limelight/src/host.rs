//
// host.rs
//
// Host capability seams: symbol provider, document accessors, and the
// decoration renderer. The host editor supplies the real implementations;
// this crate ships trivial ones for the inspect command and for tests.
//

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tower_lsp::lsp_types::{DocumentSymbol, Range, Url};

/// Asynchronous symbol-tree source — `textDocument/documentSymbol` or the
/// host's equivalent. An empty tree means the provider had nothing to say
/// for this document; the caller treats that the same as "no scope".
#[async_trait]
pub trait SymbolProvider: Send + Sync {
    async fn fetch_symbol_tree(&self, uri: &Url) -> anyhow::Result<Vec<DocumentSymbol>>;
}

/// Synchronous line-level access to one open document.
pub trait DocumentAccess: Send + Sync {
    fn line_count(&self) -> u32;

    /// Text of one line without its trailing newline; empty when out of range.
    fn line_text(&self, line: u32) -> String;

    /// Raw host language tag, e.g. "python" or "typescriptreact".
    fn language_tag(&self) -> &str;
}

/// Visual parameters for one decoration style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    pub opacity: f64,
    /// Background wash color, when the style paints one.
    pub background: Option<String>,
}

/// Opaque handle to a created style. Handles are only compared and passed
/// back to the renderer, never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleHandle(pub u64);

/// Decoration surface. Each `set_regions` call replaces the previous
/// region set for that style on that document, so clearing is a call with
/// an empty list.
pub trait DecorationRenderer: Send + Sync {
    fn create_style(&self, spec: &StyleSpec) -> StyleHandle;
    fn dispose_style(&self, handle: StyleHandle);
    fn set_regions(&self, style: StyleHandle, uri: &Url, regions: Vec<Range>);
}

/// Provider over a tree fixed at construction time. Backs the inspect
/// command and fixtures in tests.
pub struct StaticSymbolProvider {
    tree: Vec<DocumentSymbol>,
}

impl StaticSymbolProvider {
    pub fn new(tree: Vec<DocumentSymbol>) -> Self {
        Self { tree }
    }
}

#[async_trait]
impl SymbolProvider for StaticSymbolProvider {
    async fn fetch_symbol_tree(&self, _uri: &Url) -> anyhow::Result<Vec<DocumentSymbol>> {
        Ok(self.tree.clone())
    }
}

/// Renderer that allocates handles and drops everything else on the floor.
#[derive(Default)]
pub struct NullRenderer {
    next_handle: AtomicU64,
}

impl DecorationRenderer for NullRenderer {
    fn create_style(&self, _spec: &StyleSpec) -> StyleHandle {
        StyleHandle(self.next_handle.fetch_add(1, Ordering::Relaxed))
    }

    fn dispose_style(&self, _handle: StyleHandle) {}

    fn set_regions(&self, _style: StyleHandle, _uri: &Url, _regions: Vec<Range>) {}
}
