//
// regions.rs
//
// Complement-region construction. The dimming effect comes from styling
// everything outside the resolved scope, not from a single highlight.
//

use tower_lsp::lsp_types::{Position, Range};

use crate::host::DocumentAccess;

/// Region sets handed to the renderer for one resolution cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightRegions {
    /// Zero, one, or two regions covering everything outside the scope.
    pub dim: Vec<Range>,
    /// Exactly the scope's range.
    pub focus: Range,
}

/// Split the document into dimmed surroundings and the focused scope.
///
/// The "before" region runs from the document start up to, but not
/// including, the scope's first line; the "after" region runs from the end
/// of the scope's last line through the end of the document. Either is
/// omitted when the scope touches that edge, so a scope spanning the whole
/// document dims nothing.
pub fn complement(scope: Range, doc: &dyn DocumentAccess) -> SpotlightRegions {
    let last_line = doc.line_count().saturating_sub(1);
    let mut dim = Vec::with_capacity(2);

    if scope.start.line > 0 {
        dim.push(Range::new(
            Position::new(0, 0),
            Position::new(scope.start.line, 0),
        ));
    }
    if scope.end.line < last_line {
        dim.push(Range::new(
            Position::new(scope.end.line, line_len_utf16(doc, scope.end.line)),
            Position::new(last_line, line_len_utf16(doc, last_line)),
        ));
    }

    SpotlightRegions { dim, focus: scope }
}

fn line_len_utf16(doc: &dyn DocumentAccess, line: u32) -> u32 {
    doc.line_text(line).chars().map(|c| c.len_utf16() as u32).sum()
}
