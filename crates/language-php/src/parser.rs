//! ast-grep integration: parse PHP and copy the tree into [`SyntaxTree`]s.

use std::path::PathBuf;
use std::sync::Arc;

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_core::{AstGrep, Node};
use ast_grep_language::SupportLang;
use language_core::{
    BoundaryRule, ByteOffset, ByteRange, NodeId, SemanticResult, SyntaxTree, SyntaxTreeProvider,
};

use crate::cache::TreeCache;
use crate::error::PhpSemanticError;

type PhpNode<'r> = Node<'r, StrDoc<SupportLang>>;

/// Both views of one tree-sitter parse of a document.
#[derive(Debug)]
pub struct ParsedDocument {
    /// Named nodes and anonymous tokens (`class`, `{`, `=`, ...).
    pub tokens: SyntaxTree,
    /// Named nodes only.
    pub nodes: SyntaxTree,
    /// Range of the first `ERROR` node in source order.
    pub syntax_error: Option<ByteRange>,
}

impl ParsedDocument {
    /// The parse error reported by strict collaborators, if any.
    pub(crate) fn strict_error(&self) -> Option<PhpSemanticError> {
        self.syntax_error.map(|range| PhpSemanticError::ParseError {
            path: PathBuf::from("<untitled>"),
            message: format!("syntax error at bytes {}..{}", range.start, range.end),
        })
    }
}

/// Parse `text` as PHP.
///
/// The roots always span `[0, len]` of the text so every valid cursor offset
/// is covered, including trailing whitespace after the last statement. The
/// tree-sitter tree is walked with an explicit work stack, so nesting depth
/// is bounded by memory and not by the thread's stack.
pub fn parse_document(text: &str) -> Result<ParsedDocument, PhpSemanticError> {
    let end = ByteOffset::try_from(text.len())
        .map_err(|_| PhpSemanticError::DocumentTooLarge { length: text.len() })?;

    let grep = AstGrep::new(text, SupportLang::Php);
    let root = grep.root();

    let document_range = ByteRange::new(0, end.get());
    let mut tokens = SyntaxTree::builder(root.kind().to_string(), document_range);
    let mut nodes = SyntaxTree::builder(root.kind().to_string(), document_range);
    let mut syntax_error = (root.kind() == "ERROR").then_some(document_range);

    let mut stack: Vec<(NodeId, Option<NodeId>, PhpNode<'_>)> =
        vec![(tokens.root(), Some(nodes.root()), root)];

    // Each node's children are pushed in one pass, so sibling order in the
    // arena is source order whatever order the stack visits nodes in.
    while let Some((token_parent, node_parent, node)) = stack.pop() {
        for child in node.children() {
            let range = to_byte_range(child.range());

            if child.kind() == "ERROR"
                && syntax_error.map_or(true, |error| range.start < error.start)
            {
                syntax_error = Some(range);
            }

            let token_id = tokens.push(token_parent, child.kind().to_string(), range);
            // Anonymous tokens and everything below them stay out of the
            // named view.
            let node_id = node_parent
                .filter(|_| child.is_named())
                .map(|parent| nodes.push(parent, child.kind().to_string(), range));

            stack.push((token_id, node_id, child));
        }
    }

    Ok(ParsedDocument {
        tokens: tokens.finish(),
        nodes: nodes.finish(),
        syntax_error,
    })
}

// Node ranges lie inside the document, whose length was checked against the
// `u32` offset space before parsing.
fn to_byte_range(range: std::ops::Range<usize>) -> ByteRange {
    ByteRange::new(range.start as u32, range.end as u32)
}

/// [`SyntaxTreeProvider`] for PHP documents.
///
/// Only named nodes are kept, mirroring the usual "nodes, not tokens" view of
/// refactoring tools: a cursor on a keyword or brace lands on the construct
/// owning it. Offsets on the boundary between two siblings go to the node
/// selected by the configured [`BoundaryRule`]; with the default
/// `Preceding` rule the node ending at the offset wins, and an offset at the
/// end of the document lands in the last node touching it.
///
/// Parses go through a [`TreeCache`] that can be shared with a
/// [`crate::PhpSymbolClassifier`], so classifying and then parsing the same
/// text runs tree-sitter once.
#[derive(Debug, Clone, Default)]
pub struct PhpSyntaxProvider {
    cache: Arc<TreeCache>,
    boundary: BoundaryRule,
    strict: bool,
}

impl PhpSyntaxProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(mut self, cache: Arc<TreeCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_boundary_rule(mut self, boundary: BoundaryRule) -> Self {
        self.boundary = boundary;
        self
    }

    /// Fail with a parse error instead of returning a tree that contains
    /// error recovery nodes.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl SyntaxTreeProvider for PhpSyntaxProvider {
    fn parse(&self, text: &str) -> SemanticResult<SyntaxTree> {
        let parsed = self.cache.get_or_parse(text)?;

        if self.strict {
            if let Some(error) = parsed.strict_error() {
                return Err(error.into());
            }
        }

        log::trace!("PHP document has {} named nodes", parsed.nodes.len());
        Ok(parsed.nodes.clone().with_boundary_rule(self.boundary))
    }
}
