//
// language.rs
//
// Language tags and the per-language spotlight-worthy kind tables
//

use tower_lsp::lsp_types::SymbolKind;

/// Languages with spotlight support. Anything else short-circuits to
/// "no scope" before any tree is examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Rust,
    TypeScript,
    TypeScriptReact,
    JavaScript,
    JavaScriptReact,
    Python,
    Go,
}

impl LanguageId {
    /// Parse a host-supplied language tag. Unknown tags are unsupported.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "rust" => Some(Self::Rust),
            "typescript" => Some(Self::TypeScript),
            "typescriptreact" => Some(Self::TypeScriptReact),
            "javascript" => Some(Self::JavaScript),
            "javascriptreact" => Some(Self::JavaScriptReact),
            "python" => Some(Self::Python),
            "go" => Some(Self::Go),
            _ => None,
        }
    }

    /// The JS/TS family shares one kind table and the liveness post-filter.
    pub fn is_ecma(self) -> bool {
        matches!(
            self,
            Self::TypeScript | Self::TypeScriptReact | Self::JavaScript | Self::JavaScriptReact
        )
    }

    /// Block structure defined by whitespace. Symbol providers for these
    /// languages are often shallow or miss function boundaries entirely,
    /// so the textual fallback scan applies when the tree yields nothing.
    pub fn uses_indentation_fallback(self) -> bool {
        matches!(self, Self::Python)
    }
}

/// Kinds every supported language treats as a scope.
const UNIVERSAL_KINDS: &[SymbolKind] = &[
    SymbolKind::FUNCTION,
    SymbolKind::METHOD,
    SymbolKind::CONSTRUCTOR,
];

// NAMESPACE covers `impl` blocks, which some providers report that way.
const RUST_KINDS: &[SymbolKind] = &[SymbolKind::MODULE, SymbolKind::NAMESPACE];

const ECMA_KINDS: &[SymbolKind] = &[SymbolKind::CLASS, SymbolKind::MODULE];

/// Variable-like kinds the JS/TS family accepts only after the multi-line
/// liveness check (see [`needs_liveness_check`]).
const ECMA_VARIABLE_KINDS: &[SymbolKind] = &[
    SymbolKind::VARIABLE,
    SymbolKind::FIELD,
    SymbolKind::PROPERTY,
    SymbolKind::OBJECT,
];

const PYTHON_KINDS: &[SymbolKind] = &[SymbolKind::CLASS, SymbolKind::MODULE];

const GO_KINDS: &[SymbolKind] = &[
    SymbolKind::STRUCT,
    SymbolKind::INTERFACE,
    SymbolKind::CLASS,
    SymbolKind::NAMESPACE,
    SymbolKind::MODULE,
];

/// Whether a symbol of this kind can be the spotlighted scope for `lang`.
///
/// Variable-like JS/TS kinds pass this test but remain subject to the
/// liveness post-filter after the structured search picks a candidate.
pub fn is_spotlight_worthy(lang: LanguageId, kind: SymbolKind) -> bool {
    if UNIVERSAL_KINDS.contains(&kind) {
        return true;
    }
    match lang {
        LanguageId::Rust => RUST_KINDS.contains(&kind),
        LanguageId::TypeScript
        | LanguageId::TypeScriptReact
        | LanguageId::JavaScript
        | LanguageId::JavaScriptReact => {
            ECMA_KINDS.contains(&kind) || ECMA_VARIABLE_KINDS.contains(&kind)
        }
        LanguageId::Python => PYTHON_KINDS.contains(&kind),
        LanguageId::Go => GO_KINDS.contains(&kind),
    }
}

/// Whether a selected candidate of this kind still needs the multi-line
/// span check before it counts as a scope. A single-line variable binding
/// is virtually never a function value; requiring a multi-line span is a
/// cheap proxy for "holds a function or object literal" without parsing
/// the expression.
pub fn needs_liveness_check(lang: LanguageId, kind: SymbolKind) -> bool {
    lang.is_ecma() && ECMA_VARIABLE_KINDS.contains(&kind)
}
