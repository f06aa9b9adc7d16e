//! Lightweight PHP symbol classifier working on node kinds.

use std::sync::Arc;

use language_core::{
    ByteOffset, NodeId, SemanticError, SemanticResult, SymbolClassifier, SymbolContext,
    SymbolKind, SyntaxTree, TextDocument,
};

use crate::cache::TreeCache;
use crate::error::PhpSemanticError;
use crate::parser::ParsedDocument;

/// Classifies offsets of PHP documents from the shape of the syntax tree.
///
/// The classifier finds the token under the cursor and walks up through the
/// nodes that start exactly at the cursor:
///
/// - identifiers are classified from the construct that owns them (a `name`
///   under `class_declaration` is a class, under `member_call_expression` a
///   method, ...), wherever the cursor sits inside the identifier
/// - declarations are classified only when the cursor is on their first
///   token, so `class` of `class Foo {}` is a class but its `{` is not
///
/// No type inference happens: a method call is a method whatever the
/// receiver is.
#[derive(Debug, Default)]
pub struct PhpSymbolClassifier {
    cache: Arc<TreeCache>,
    strict: bool,
}

impl PhpSymbolClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `cache` for parsed documents, typically one shared with a
    /// [`crate::PhpSyntaxProvider`].
    pub fn with_cache(mut self, cache: Arc<TreeCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Refuse to classify documents with syntax errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn parsed(
        &self,
        document: &TextDocument,
        offset: ByteOffset,
    ) -> SemanticResult<Arc<ParsedDocument>> {
        let classification_error = |e: PhpSemanticError| PhpSemanticError::Classification {
            path: document.display_path(),
            offset: offset.get(),
            message: e.to_string(),
        };

        let parsed = self
            .cache
            .get_or_parse(document.as_str())
            .map_err(classification_error)?;

        if self.strict {
            if let Some(error) = parsed.strict_error() {
                return Err(classification_error(error).into());
            }
        }
        Ok(parsed)
    }
}

impl SymbolClassifier for PhpSymbolClassifier {
    fn classify(
        &self,
        document: &TextDocument,
        offset: ByteOffset,
    ) -> SemanticResult<SymbolContext> {
        let end = document.end_offset()?;
        if offset > end {
            return Err(SemanticError::InvalidOffset {
                offset: offset.get(),
                length: end.get(),
            });
        }

        let parsed = self.parsed(document, offset)?;
        let kind = classify_in_tree(&parsed.tokens, offset.get());
        log::trace!("Classified offset {} as {}", offset, kind.as_str());
        Ok(SymbolContext::new(kind))
    }
}

/// Classify `offset` inside a token-level tree.
pub(crate) fn classify_in_tree(tree: &SyntaxTree, offset: u32) -> SymbolKind {
    let mut current = Some(token_at(tree, offset));

    while let Some(id) = current {
        if let Some(kind) = classify_node(tree, id, offset) {
            return kind;
        }
        if tree.node(id).range().start != offset {
            break;
        }
        current = tree.parent(id);
    }

    SymbolKind::Unknown
}

/// Deepest node under the cursor, preferring the node that contains the byte
/// after the cursor over the one ending at it.
fn token_at(tree: &SyntaxTree, offset: u32) -> NodeId {
    let mut current = tree.root();
    loop {
        let children = tree.node(current).children();
        let next = children
            .iter()
            .copied()
            .find(|child| tree.node(*child).range().contains(offset))
            .or_else(|| {
                children
                    .iter()
                    .copied()
                    .find(|child| tree.node(*child).range().touches(offset))
            });

        match next {
            Some(child) => current = child,
            None => return current,
        }
    }
}

fn classify_node(tree: &SyntaxTree, id: NodeId, offset: u32) -> Option<SymbolKind> {
    let node = tree.node(id);
    let parent_kind = tree.parent(id).map(|parent| tree.node(parent).kind());

    match node.kind() {
        "name" | "qualified_name" | "namespace_name" => {
            classify_identifier(tree, id, parent_kind?)
        }
        "variable_name" => Some(match parent_kind {
            Some("property_element") => SymbolKind::Property,
            Some("simple_parameter") | Some("variadic_parameter") => SymbolKind::Parameter,
            _ => SymbolKind::Variable,
        }),
        kind if node.range().start == offset => declaration_kind(kind),
        _ => None,
    }
}

fn classify_identifier(tree: &SyntaxTree, id: NodeId, parent_kind: &str) -> Option<SymbolKind> {
    let kind = match parent_kind {
        "class_declaration" | "object_creation_expression" | "named_type" | "base_clause"
        | "class_interface_clause" => SymbolKind::Class,
        "interface_declaration" => SymbolKind::Interface,
        "trait_declaration" | "use_declaration" => SymbolKind::Trait,
        "enum_declaration" => SymbolKind::Enum,
        "enum_case" => SymbolKind::EnumMember,
        "function_definition" | "function_call_expression" => SymbolKind::Function,
        "method_declaration" | "member_call_expression" | "nullsafe_member_call_expression" => {
            SymbolKind::Method
        }
        "scoped_call_expression" => scoped_member_kind(tree, id, SymbolKind::Method),
        "class_constant_access_expression" => scoped_member_kind(tree, id, SymbolKind::Constant),
        "member_access_expression"
        | "nullsafe_member_access_expression"
        | "scoped_property_access_expression" => SymbolKind::Property,
        "variable_name" => SymbolKind::Variable,
        "const_element" => SymbolKind::Constant,
        "namespace_definition" | "namespace_name" => SymbolKind::Namespace,
        "namespace_use_clause" => SymbolKind::Import,
        // `Foo\Bar` and `Foo\Bar\baz()` are classified by what owns the path.
        "qualified_name" => {
            let owner = tree.parent(id)?;
            return classify_identifier(tree, owner, tree.node(tree.parent(owner)?).kind());
        }
        _ => return None,
    };
    Some(kind)
}

/// `Foo::bar()` and `Foo::BAR`: the left operand names a class.
fn scoped_member_kind(tree: &SyntaxTree, id: NodeId, member: SymbolKind) -> SymbolKind {
    let is_scope = tree
        .parent(id)
        .and_then(|parent| tree.node(parent).children().first().copied())
        == Some(id);
    if is_scope {
        SymbolKind::Class
    } else {
        member
    }
}

fn declaration_kind(kind: &str) -> Option<SymbolKind> {
    Some(match kind {
        "class_declaration" => SymbolKind::Class,
        "interface_declaration" => SymbolKind::Interface,
        "trait_declaration" => SymbolKind::Trait,
        "enum_declaration" => SymbolKind::Enum,
        "enum_case" => SymbolKind::EnumMember,
        "function_definition" => SymbolKind::Function,
        "method_declaration" => SymbolKind::Method,
        "property_declaration" => SymbolKind::Property,
        "const_declaration" => SymbolKind::Constant,
        "simple_parameter" => SymbolKind::Parameter,
        "namespace_definition" => SymbolKind::Namespace,
        "namespace_use_declaration" => SymbolKind::Import,
        _ => return None,
    })
}
