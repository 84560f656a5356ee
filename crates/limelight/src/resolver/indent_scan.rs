//
// resolver/indent_scan.rs
//
// Textual fallback for indentation-significant languages. Structured
// symbol providers for these are frequently shallow or miss function
// boundaries entirely; this scan reconstructs the enclosing function from
// line text and indentation alone, with no parser dependency.
//

use std::sync::OnceLock;

use regex::Regex;
use tower_lsp::lsp_types::{DocumentSymbol, Position, Range, SymbolKind};

use super::{ResolvedScope, ScopeOrigin};
use crate::host::DocumentAccess;

struct HeaderPatterns {
    def_header: Regex,
}

fn patterns() -> &'static HeaderPatterns {
    static PATTERNS: OnceLock<HeaderPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| HeaderPatterns {
        def_header: Regex::new(r"^\s*(?:async\s+)?def\s+[A-Za-z_][A-Za-z0-9_]*\s*\(").unwrap(),
    })
}

fn is_def_header(line: &str) -> bool {
    patterns().def_header.is_match(line)
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Leading whitespace width in characters.
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn line_len_utf16(line: &str) -> u32 {
    line.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Reconstruct the function enclosing `cursor` from indentation.
///
/// Runs only after the structured search came up empty. Finds the nearest
/// `def` header above the cursor with strictly smaller indentation, then
/// scans downward for the end of its body. When the provider tree knows a
/// Function at the def line it is reused (its range extended if the
/// provider undershot the body); otherwise a node is synthesized from the
/// header text.
pub(super) fn scan(
    tree: &[DocumentSymbol],
    cursor: Position,
    doc: &dyn DocumentAccess,
) -> Option<ResolvedScope> {
    let line_count = doc.line_count();
    if line_count == 0 || cursor.line >= line_count {
        return None;
    }
    let current = doc.line_text(cursor.line);

    // Cursor sitting on a def header itself: take the provider's node for
    // that line directly when one exists.
    if is_def_header(&current) {
        if let Some(node) = find_function_at_line(tree, cursor.line) {
            return Some(ResolvedScope {
                symbol: node.clone(),
                origin: ScopeOrigin::Provider,
            });
        }
    }

    let cur_indent = indent_width(&current);

    // Upward: nearest def header with strictly smaller indentation. Any
    // other smaller-indent line that is neither blank nor a comment means
    // we left the scope before finding a def.
    let mut found: Option<(u32, usize)> = None;
    let mut line = cursor.line;
    while line > 0 {
        line -= 1;
        let text = doc.line_text(line);
        if is_blank(&text) || is_comment(&text) {
            continue;
        }
        let indent = indent_width(&text);
        if indent >= cur_indent {
            continue;
        }
        if is_def_header(&text) {
            found = Some((line, indent));
        }
        break;
    }
    let (def_line, def_indent) = found?;

    // Downward: the body extends while lines are blank, comments, or
    // indented deeper than the def. A shallower line only terminates the
    // body once it is past the cursor's line.
    let mut end_line = line_count - 1;
    let mut line = def_line + 1;
    while line < line_count {
        let text = doc.line_text(line);
        if !is_blank(&text)
            && !is_comment(&text)
            && indent_width(&text) <= def_indent
            && line > cursor.line
        {
            end_line = line - 1;
            break;
        }
        line += 1;
    }
    let end = Position::new(end_line, line_len_utf16(&doc.line_text(end_line)));

    if let Some(node) = find_function_at_line(tree, def_line) {
        if node.range.end.line < end_line {
            // The provider knows this function but undershot its body;
            // hand back a corrected copy, leaving the tree untouched.
            let mut symbol = node.clone();
            symbol.range = Range::new(node.range.start, end);
            return Some(ResolvedScope {
                symbol,
                origin: ScopeOrigin::RangeExtended,
            });
        }
        return Some(ResolvedScope {
            symbol: node.clone(),
            origin: ScopeOrigin::Provider,
        });
    }

    let def_text = doc.line_text(def_line);
    Some(ResolvedScope {
        symbol: synthesize(&def_text, def_line, end),
        origin: ScopeOrigin::Synthesized,
    })
}

/// First Function node (in traversal order, any depth) starting at `line`.
fn find_function_at_line(nodes: &[DocumentSymbol], line: u32) -> Option<&DocumentSymbol> {
    for node in nodes {
        if node.kind == SymbolKind::FUNCTION && node.range.start.line == line {
            return Some(node);
        }
        if let Some(children) = &node.children {
            if let Some(found) = find_function_at_line(children, line) {
                return Some(found);
            }
        }
    }
    None
}

/// Build a scope node from the header line alone: "  async def f(x):" -> "f".
#[allow(deprecated)]
fn synthesize(def_text: &str, def_line: u32, end: Position) -> DocumentSymbol {
    let mut name = def_text.trim();
    if let Some(rest) = name.strip_prefix("async") {
        name = rest.trim_start();
    }
    if let Some(rest) = name.strip_prefix("def") {
        name = rest.trim_start();
    }
    if let Some(paren) = name.find('(') {
        name = &name[..paren];
    }
    DocumentSymbol {
        name: name.trim().to_string(),
        detail: None,
        kind: SymbolKind::FUNCTION,
        tags: None,
        deprecated: None,
        range: Range::new(Position::new(def_line, 0), end),
        selection_range: Range::new(
            Position::new(def_line, 0),
            Position::new(def_line, line_len_utf16(def_text)),
        ),
        children: None,
    }
}
