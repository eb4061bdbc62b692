// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Normalization of the parsed node forest.
//!
//! # Transformation Steps
//!
//! 1. **Whitespace normalization**: whitespace-only text runs (indentation and
//!    line breaks between tags) are removed
//! 2. **Loop lowering**: an element carrying an `each` attribute becomes an
//!    [`Node::EachBlock`] whose single child is that element, so the code
//!    generator only knows one loop shape
//!
//! # Usage
//!
//! ```rust,ignore
//! use superviews::{parse_template, transform};
//!
//! let ast = transform(parse_template(source)?);
//! ```

use crate::ast::*;

/// Normalizes a parsed template for code generation.
pub fn transform(ast: TemplateAST) -> TemplateAST {
    TemplateAST {
        body: transform_nodes(ast.body),
        path: ast.path,
    }
}

fn transform_nodes(nodes: Vec<Node>) -> Vec<Node> {
    nodes
        .into_iter()
        .filter(|node| !node.is_blank_text())
        .map(transform_node)
        .collect()
}

fn transform_node(node: Node) -> Node {
    match node {
        Node::ElementNode {
            tag,
            attributes,
            children,
            each,
            condition,
            span,
        } => {
            let element = Node::ElementNode {
                tag,
                attributes,
                children: transform_nodes(children),
                each: None,
                condition,
                span,
            };
            match each {
                Some(spec) => Node::EachBlock {
                    spec,
                    children: vec![element],
                    span,
                },
                None => element,
            }
        }
        Node::EachBlock {
            spec,
            children,
            span,
        } => Node::EachBlock {
            spec,
            children: transform_nodes(children),
            span,
        },
        other => other,
    }
}
