//
// controller.rs
//
// Spotlight controller: wires host events to the resolver and the
// decoration renderer, and owns configuration and enablement state
//

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{DocumentSymbol, Position, Url};

use crate::config::SpotlightConfig;
use crate::host::{DecorationRenderer, DocumentAccess, StyleHandle, SymbolProvider};
use crate::language::LanguageId;
use crate::regions;
use crate::resolver::{self, ScopeOrigin};

/// The dim/normal style pair. Recreated wholesale on configuration change
/// so no caller ever observes a half-updated pair.
#[derive(Debug, Clone, Copy)]
struct StylePair {
    dim: StyleHandle,
    normal: StyleHandle,
}

/// Commands exposed through the host's command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotlightCommand {
    /// Turn the feature on and re-resolve immediately.
    Enable,
    /// Force a resolution cycle for the active document.
    Refresh,
    /// Report the symbol tree and resolution outcome without touching
    /// styles.
    Inspect,
}

/// What a command produced: an optional user-facing message and, for
/// inspections, the report.
#[derive(Debug, Default)]
pub struct CommandOutcome {
    pub message: Option<String>,
    pub report: Option<InspectionReport>,
}

/// Diagnostic snapshot of one resolution, serialized for display.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub language: String,
    pub supported: bool,
    pub symbol_count: usize,
    pub cursor: Position,
    pub scope: Option<InspectedScope>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectedScope {
    pub name: String,
    pub kind: String,
    pub origin: String,
    pub start_line: u32,
    pub end_line: u32,
}

pub struct SpotlightController {
    provider: Arc<dyn SymbolProvider>,
    renderer: Arc<dyn DecorationRenderer>,
    config: RwLock<SpotlightConfig>,
    styles: RwLock<Option<StylePair>>,
    /// Bumped at the start of every refresh. A resolution whose snapshot
    /// is no longer current applies nothing, so a slow symbol fetch cannot
    /// overwrite a newer result.
    generation: AtomicU64,
}

impl SpotlightController {
    pub fn new(
        provider: Arc<dyn SymbolProvider>,
        renderer: Arc<dyn DecorationRenderer>,
        config: SpotlightConfig,
    ) -> Self {
        let styles = StylePair {
            dim: renderer.create_style(&config.dim_style()),
            normal: renderer.create_style(&config.normal_style()),
        };
        Self {
            provider,
            renderer,
            config: RwLock::new(config),
            styles: RwLock::new(Some(styles)),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn is_enabled(&self) -> bool {
        self.config.read().await.enabled
    }

    /// One resolution cycle. Every trigger funnels through here: cursor
    /// and selection moves, document saves, manual refreshes, and the
    /// re-resolve after a configuration change. Failures degrade to
    /// "nothing is dimmed" and never disable the feature.
    pub async fn refresh(&self, doc: &dyn DocumentAccess, uri: &Url, cursor: Position) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.is_enabled().await {
            self.clear(uri).await;
            return;
        }
        if LanguageId::parse(doc.language_tag()).is_none() {
            log::debug!("unsupported language '{}', clearing", doc.language_tag());
            self.clear(uri).await;
            return;
        }

        let tree = match self.provider.fetch_symbol_tree(uri).await {
            Ok(tree) => tree,
            Err(err) => {
                log::warn!("symbol tree fetch failed for {}: {:#}", uri, err);
                self.clear(uri).await;
                return;
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            log::trace!("discarding stale resolution for {}", uri);
            return;
        }

        if tree.is_empty() {
            self.clear(uri).await;
            return;
        }

        let Some(scope) = resolver::resolve(&tree, cursor, doc.language_tag(), doc) else {
            self.clear(uri).await;
            return;
        };

        let spotlight = regions::complement(scope.range(), doc);
        log::debug!(
            "spotlighting '{}' lines {}..={} ({} dim regions) in {}",
            scope.symbol.name,
            spotlight.focus.start.line,
            spotlight.focus.end.line,
            spotlight.dim.len(),
            uri
        );

        let styles = self.styles.read().await;
        if let Some(styles) = *styles {
            self.renderer.set_regions(styles.dim, uri, spotlight.dim);
            self.renderer
                .set_regions(styles.normal, uri, vec![spotlight.focus]);
        }
    }

    /// Remove both decorations for the document.
    pub async fn clear(&self, uri: &Url) {
        let styles = self.styles.read().await;
        if let Some(styles) = *styles {
            self.renderer.set_regions(styles.dim, uri, Vec::new());
            self.renderer.set_regions(styles.normal, uri, Vec::new());
        }
    }

    /// Flip the enabled flag. Returns the confirmation message to show
    /// when enabling. The caller follows up with a refresh, which applies
    /// when enabling and clears when disabling.
    pub async fn set_enabled(&self, enabled: bool) -> Option<String> {
        self.config.write().await.enabled = enabled;
        log::info!("spotlight {}", if enabled { "enabled" } else { "disabled" });
        enabled.then(|| String::from("Scope spotlight enabled"))
    }

    /// Swap in a new configuration, tearing down and recreating the style
    /// pair under one lock. The caller follows up with a refresh for the
    /// active document, if any.
    pub async fn update_config(&self, new: SpotlightConfig) {
        let mut styles = self.styles.write().await;
        if let Some(old) = styles.take() {
            self.renderer.dispose_style(old.dim);
            self.renderer.dispose_style(old.normal);
        }
        *styles = Some(StylePair {
            dim: self.renderer.create_style(&new.dim_style()),
            normal: self.renderer.create_style(&new.normal_style()),
        });
        drop(styles);
        *self.config.write().await = new;
    }

    /// Run one command against the active document.
    pub async fn execute(
        &self,
        command: SpotlightCommand,
        doc: &dyn DocumentAccess,
        uri: &Url,
        cursor: Position,
    ) -> CommandOutcome {
        match command {
            SpotlightCommand::Enable => {
                let message = self.set_enabled(true).await;
                self.refresh(doc, uri, cursor).await;
                CommandOutcome {
                    message,
                    report: None,
                }
            }
            SpotlightCommand::Refresh => {
                self.refresh(doc, uri, cursor).await;
                CommandOutcome::default()
            }
            SpotlightCommand::Inspect => CommandOutcome {
                message: None,
                report: Some(self.inspect(doc, uri, cursor).await),
            },
        }
    }

    /// Report the symbol tree and resolution outcome for the active
    /// document without altering any styles.
    pub async fn inspect(
        &self,
        doc: &dyn DocumentAccess,
        uri: &Url,
        cursor: Position,
    ) -> InspectionReport {
        let language = doc.language_tag().to_string();
        let supported = LanguageId::parse(&language).is_some();

        let tree = match self.provider.fetch_symbol_tree(uri).await {
            Ok(tree) => tree,
            Err(err) => {
                log::warn!("symbol tree fetch failed during inspection of {}: {:#}", uri, err);
                Vec::new()
            }
        };

        let scope = resolver::resolve(&tree, cursor, &language, doc).map(|scope| InspectedScope {
            name: scope.symbol.name.clone(),
            kind: format!("{:?}", scope.symbol.kind),
            origin: origin_label(scope.origin).to_string(),
            start_line: scope.range().start.line,
            end_line: scope.range().end.line,
        });

        InspectionReport {
            language,
            supported,
            symbol_count: count_symbols(&tree),
            cursor,
            scope,
        }
    }
}

fn origin_label(origin: ScopeOrigin) -> &'static str {
    match origin {
        ScopeOrigin::Provider => "provider",
        ScopeOrigin::RangeExtended => "range-extended",
        ScopeOrigin::Synthesized => "synthesized",
    }
}

fn count_symbols(nodes: &[DocumentSymbol]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + node.children.as_deref().map_or(0, count_symbols))
        .sum()
}
