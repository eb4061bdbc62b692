// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree (AST) types for superviews templates.
//!
//! The parser produces an ordered forest of [`Node`]s, the transform stage
//! normalizes it and the code generator walks it.
//!
//! # Node Types
//!
//! - [`Node::ElementNode`]: markup elements, optionally carrying an `each`
//!   loop and/or an `if` guard taken from their attributes
//! - [`Node::TextNode`]: text runs, line breaks preserved verbatim
//! - [`Node::EachBlock`]: the explicit `<each expression="...">` wrapper
//! - [`Node::ScriptNode`]: raw `<script>` content, emitted in place or hoisted

use serde::{Deserialize, Serialize};

/// AST node types representing template structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A markup element like `<div>` or `<li each="item in items">`.
    ElementNode {
        /// The tag name as written.
        tag: String,
        /// Static attributes in source order, directives excluded.
        attributes: Vec<Attribute>,
        /// Child nodes nested within this element.
        children: Vec<Node>,
        /// Loop parsed from an `each` attribute.
        each: Option<EachSpec>,
        /// Guard expression parsed from an `if` attribute.
        condition: Option<Expression>,
        /// Location of the opening tag.
        span: Span,
    },
    /// Plain text content between elements.
    TextNode {
        /// The text content, line breaks included.
        content: String,
    },
    /// Explicit loop wrapper `<each expression="item in items">...</each>`.
    EachBlock {
        /// The parsed loop directive.
        spec: EachSpec,
        /// Loop body; every top-level child is keyed per iteration.
        children: Vec<Node>,
        /// Location of the opening tag.
        span: Span,
    },
    /// Raw `<script>` content passed through untouched.
    ScriptNode {
        /// The script body.
        code: String,
        /// Run once in the module preamble instead of on every render.
        hoisted: bool,
    },
}

/// A parsed template: the root node forest plus its name.
///
/// Produced by [`crate::parser::parse_template`], normalized by
/// [`crate::transform::transform`] and consumed by the code generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateAST {
    /// Root nodes in source order.
    pub body: Vec<Node>,
    /// Template name, used in error messages and key derivation.
    pub path: Option<String>,
}

impl TemplateAST {
    /// Creates a template from its root nodes.
    pub fn new(body: Vec<Node>) -> Self {
        Self { body, path: None }
    }
}

/// A static `name="value"` attribute.
///
/// Attributes written without a value (`<input disabled>`) carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute name.
    pub name: String,
    /// The unescaped attribute value.
    pub value: String,
}

impl Attribute {
    /// Creates a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Loop directive parsed from `item[, keyExpr] in iterableExpr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EachSpec {
    /// Name bound to the current item inside the loop body.
    pub item_var: String,
    /// Custom per-iteration key expression, replacing the loop index.
    pub key_expr: Option<String>,
    /// Expression yielding the array or object to iterate.
    pub iterable_expr: String,
}

/// An expression extracted from a directive attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    /// The expression text, trimmed.
    pub content: String,
    /// Source location of the attribute holding it.
    pub span: Span,
}

impl Expression {
    /// Creates a new expression with the given content and source location.
    pub fn new(content: impl Into<String>, span: Span) -> Self {
        Self {
            content: content.into(),
            span,
        }
    }
}

/// Source location information for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset from the start of the source.
    pub start: usize,
    /// Byte offset of the end (exclusive).
    pub end: usize,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

impl Span {
    /// Creates a new source span.
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

impl Node {
    /// Creates a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::TextNode {
            content: content.into(),
        }
    }

    /// Creates a plain element without directives.
    pub fn element(
        tag: impl Into<String>,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    ) -> Self {
        Node::ElementNode {
            tag: tag.into(),
            attributes,
            children,
            each: None,
            condition: None,
            span: Span::default(),
        }
    }

    /// Returns true for text nodes made only of whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::TextNode { content } if content.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_detection() {
        assert!(Node::text("\n  ").is_blank_text());
        assert!(!Node::text(" a ").is_blank_text());
        assert!(!Node::element("div", vec![], vec![]).is_blank_text());
    }

    #[test]
    fn test_node_serializes_to_json() {
        let node = Node::element(
            "h1",
            vec![Attribute::new("class", "header")],
            vec![Node::text("Hi")],
        );
        let json = serde_json::to_string(&node).unwrap();

        assert!(json.contains("\"ElementNode\""));
        assert!(json.contains("\"tag\":\"h1\""));
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
