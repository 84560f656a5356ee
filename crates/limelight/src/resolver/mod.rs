//
// resolver/mod.rs
//
// Scope resolution: map (symbol tree, cursor, language) to the single
// scope worth spotlighting, or none
//

pub mod indent_scan;


use tower_lsp::lsp_types::{DocumentSymbol, Position, Range};

use crate::host::DocumentAccess;
use crate::language::{self, LanguageId};

/// Where a resolved scope came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeOrigin {
    /// Taken from the provider tree as-is.
    Provider,
    /// Provider node whose end was extended by the indentation scan.
    RangeExtended,
    /// Built from line text; the tree had no matching node.
    Synthesized,
}

/// The one scope selected for spotlighting. Computed fresh per event and
/// discarded once translated into render regions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScope {
    pub symbol: DocumentSymbol,
    pub origin: ScopeOrigin,
}

impl ResolvedScope {
    pub fn range(&self) -> Range {
        self.symbol.range
    }
}

/// Resolve the scope enclosing `cursor`.
///
/// Never errors: an unsupported language, an empty tree, or a cursor in
/// file-level code all come back as `None`. Pure over its inputs, so
/// resolving twice with the same tree and cursor yields the same scope.
pub fn resolve(
    tree: &[DocumentSymbol],
    cursor: Position,
    language_tag: &str,
    doc: &dyn DocumentAccess,
) -> Option<ResolvedScope> {
    let lang = LanguageId::parse(language_tag)?;

    let mut best: Option<(usize, &DocumentSymbol)> = None;
    search(tree, cursor, lang, 0, &mut best);

    if let Some((_, symbol)) = best {
        // Variable-like JS/TS candidates must span more than one line.
        // When the check fails the result is "none", not the enclosing
        // container.
        if language::needs_liveness_check(lang, symbol.kind)
            && symbol.range.start.line == symbol.range.end.line
        {
            log::debug!(
                "dropping single-line {:?} candidate '{}'",
                symbol.kind,
                symbol.name
            );
            return None;
        }
        return Some(ResolvedScope {
            symbol: symbol.clone(),
            origin: ScopeOrigin::Provider,
        });
    }

    if lang.uses_indentation_fallback() {
        return indent_scan::scan(tree, cursor, doc);
    }
    None
}

/// Depth-first walk, siblings in given order. Overlapping siblings are
/// pathological but legal provider output: the walk never stops early, so
/// the deepest worthy candidate wins and equally deep ties go to the last
/// sibling visited.
fn search<'a>(
    nodes: &'a [DocumentSymbol],
    cursor: Position,
    lang: LanguageId,
    depth: usize,
    best: &mut Option<(usize, &'a DocumentSymbol)>,
) {
    for node in nodes {
        if !range_contains(&node.range, cursor) {
            continue;
        }
        if language::is_spotlight_worthy(lang, node.kind) {
            let replace = match best {
                Some((best_depth, _)) => depth >= *best_depth,
                None => true,
            };
            if replace {
                *best = Some((depth, node));
            }
        }
        if let Some(children) = &node.children {
            search(children, cursor, lang, depth + 1, best);
        }
    }
}

/// Containment with inclusive ends, matching how decoration ranges treat
/// their boundaries.
pub(crate) fn range_contains(range: &Range, pos: Position) -> bool {
    position_le(range.start, pos) && position_le(pos, range.end)
}

fn position_le(a: Position, b: Position) -> bool {
    a.line < b.line || (a.line == b.line && a.character <= b.character)
}

#[cfg(test)]
#[allow(deprecated)]
pub(crate) fn test_symbol(
    name: &str,
    kind: tower_lsp::lsp_types::SymbolKind,
    start: (u32, u32),
    end: (u32, u32),
    children: Vec<DocumentSymbol>,
) -> DocumentSymbol {
    let range = Range::new(
        Position::new(start.0, start.1),
        Position::new(end.0, end.1),
    );
    DocumentSymbol {
        name: name.to_string(),
        detail: None,
        kind,
        tags: None,
        deprecated: None,
        range,
        selection_range: Range::new(range.start, range.start),
        children: if children.is_empty() {
            None
        } else {
            Some(children)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use tower_lsp::lsp_types::SymbolKind;

    fn doc(lang: &str) -> Document {
        Document::new("", lang)
    }

    fn pos(line: u32, character: u32) -> Position {
        Position::new(line, character)
    }

    #[test]
    fn test_single_function_contains_cursor() {
        let tree = vec![test_symbol(
            "add",
            SymbolKind::FUNCTION,
            (3, 0),
            (5, 1),
            vec![],
        )];
        let scope = resolve(&tree, pos(4, 2), "rust", &doc("rust")).unwrap();
        assert_eq!(scope.symbol.name, "add");
        assert_eq!(scope.origin, ScopeOrigin::Provider);
    }

    #[test]
    fn test_inclusive_range_boundaries() {
        let tree = vec![test_symbol(
            "f",
            SymbolKind::FUNCTION,
            (2, 0),
            (4, 1),
            vec![],
        )];
        assert!(resolve(&tree, pos(2, 0), "rust", &doc("rust")).is_some());
        assert!(resolve(&tree, pos(4, 1), "rust", &doc("rust")).is_some());
        assert!(resolve(&tree, pos(4, 2), "rust", &doc("rust")).is_none());
        assert!(resolve(&tree, pos(1, 0), "rust", &doc("rust")).is_none());
    }

    #[test]
    fn test_innermost_nested_function_wins() {
        let inner = test_symbol("inner", SymbolKind::FUNCTION, (2, 0), (4, 1), vec![]);
        let tree = vec![test_symbol(
            "outer",
            SymbolKind::FUNCTION,
            (0, 0),
            (8, 1),
            vec![inner],
        )];
        let scope = resolve(&tree, pos(3, 0), "rust", &doc("rust")).unwrap();
        assert_eq!(scope.symbol.name, "inner");
    }

    #[test]
    fn test_cursor_in_outer_body_only() {
        let inner = test_symbol("inner", SymbolKind::FUNCTION, (2, 0), (4, 1), vec![]);
        let tree = vec![test_symbol(
            "outer",
            SymbolKind::FUNCTION,
            (0, 0),
            (8, 1),
            vec![inner],
        )];
        let scope = resolve(&tree, pos(6, 0), "rust", &doc("rust")).unwrap();
        assert_eq!(scope.symbol.name, "outer");
    }

    #[test]
    fn test_overlapping_siblings_last_visited_wins() {
        // Pathological provider output: two siblings both contain the
        // cursor. The second-listed one must win.
        let tree = vec![
            test_symbol("first", SymbolKind::FUNCTION, (0, 0), (10, 0), vec![]),
            test_symbol("second", SymbolKind::FUNCTION, (0, 0), (10, 0), vec![]),
        ];
        let scope = resolve(&tree, pos(5, 0), "go", &doc("go")).unwrap();
        assert_eq!(scope.symbol.name, "second");
    }

    #[test]
    fn test_deeper_candidate_beats_later_shallow_sibling() {
        let deep = test_symbol("deep", SymbolKind::FUNCTION, (1, 0), (9, 0), vec![]);
        let tree = vec![
            test_symbol("outer", SymbolKind::FUNCTION, (0, 0), (10, 0), vec![deep]),
            test_symbol("shallow", SymbolKind::FUNCTION, (0, 0), (10, 0), vec![]),
        ];
        let scope = resolve(&tree, pos(5, 0), "rust", &doc("rust")).unwrap();
        assert_eq!(scope.symbol.name, "deep");
    }

    #[test]
    fn test_unworthy_kind_climbs_to_worthy_ancestor() {
        // A rust VARIABLE inside a function is not a scope; its parent is.
        let var = test_symbol("x", SymbolKind::VARIABLE, (2, 0), (6, 0), vec![]);
        let tree = vec![test_symbol(
            "f",
            SymbolKind::FUNCTION,
            (0, 0),
            (8, 0),
            vec![var],
        )];
        let scope = resolve(&tree, pos(3, 0), "rust", &doc("rust")).unwrap();
        assert_eq!(scope.symbol.name, "f");
    }

    #[test]
    fn test_rust_impl_block_as_namespace() {
        let method = test_symbol("run", SymbolKind::METHOD, (2, 0), (4, 1), vec![]);
        let tree = vec![test_symbol(
            "impl Runner",
            SymbolKind::NAMESPACE,
            (0, 0),
            (10, 1),
            vec![method],
        )];
        // Between methods, the impl block itself is the scope.
        let scope = resolve(&tree, pos(7, 0), "rust", &doc("rust")).unwrap();
        assert_eq!(scope.symbol.name, "impl Runner");
    }

    #[test]
    fn test_outside_every_node_is_none() {
        let tree = vec![test_symbol(
            "f",
            SymbolKind::FUNCTION,
            (5, 0),
            (9, 0),
            vec![],
        )];
        assert!(resolve(&tree, pos(1, 0), "rust", &doc("rust")).is_none());
    }

    #[test]
    fn test_unsupported_language_is_none_regardless_of_tree() {
        let tree = vec![test_symbol(
            "f",
            SymbolKind::FUNCTION,
            (0, 0),
            (100, 0),
            vec![],
        )];
        assert!(resolve(&tree, pos(5, 0), "ruby", &doc("ruby")).is_none());
        assert!(resolve(&tree, pos(5, 0), "", &doc("")).is_none());
    }

    #[test]
    fn test_multiline_variable_accepted_in_typescript() {
        // const handler = async () => { ... } spanning several lines.
        let tree = vec![test_symbol(
            "handler",
            SymbolKind::VARIABLE,
            (0, 0),
            (5, 1),
            vec![],
        )];
        let scope = resolve(&tree, pos(2, 0), "typescript", &doc("typescript")).unwrap();
        assert_eq!(scope.symbol.name, "handler");
    }

    #[test]
    fn test_single_line_variable_dropped_in_typescript() {
        let tree = vec![test_symbol(
            "x",
            SymbolKind::VARIABLE,
            (3, 0),
            (3, 20),
            vec![],
        )];
        // Drops to none rather than climbing to a parent.
        assert!(resolve(&tree, pos(3, 5), "typescript", &doc("typescript")).is_none());
    }

    #[test]
    fn test_single_line_variable_inside_class_still_none() {
        let field = test_symbol("x", SymbolKind::PROPERTY, (3, 4), (3, 24), vec![]);
        let tree = vec![test_symbol(
            "Widget",
            SymbolKind::CLASS,
            (0, 0),
            (10, 1),
            vec![field],
        )];
        // The property is the deepest candidate; failing its liveness
        // check yields none, not the class.
        assert!(resolve(&tree, pos(3, 10), "javascript", &doc("javascript")).is_none());
    }

    #[test]
    fn test_python_class_is_worthy() {
        let tree = vec![test_symbol(
            "Shape",
            SymbolKind::CLASS,
            (0, 0),
            (12, 0),
            vec![],
        )];
        let scope = resolve(&tree, pos(4, 0), "python", &doc("python")).unwrap();
        assert_eq!(scope.symbol.name, "Shape");
    }

    #[test]
    fn test_idempotent_resolution() {
        let inner = test_symbol("inner", SymbolKind::FUNCTION, (2, 0), (4, 1), vec![]);
        let tree = vec![test_symbol(
            "outer",
            SymbolKind::FUNCTION,
            (0, 0),
            (8, 1),
            vec![inner],
        )];
        let document = doc("rust");
        let first = resolve(&tree, pos(3, 0), "rust", &document);
        let second = resolve(&tree, pos(3, 0), "rust", &document);
        assert_eq!(first, second);
    }
}
