// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Render statement generation.
//!
//! This module walks a normalized node forest and emits the statements of the
//! render function body. The statements call the incremental-DOM API:
//!
//! ```js
//! elementOpen("h1", "xxxx-xxxx", hoisted1)
//!   text("Hello")
//! elementClose("h1")
//! ```
//!
//! # Features
//!
//! - Static attribute arrays are canonicalized and hoisted through the
//!   [`HoistTable`]
//! - `each` loops iterate arrays directly and objects through their key set,
//!   deriving one key per iteration
//! - `if` guards wrap the element they are declared on
//! - Multi-line text stays a single string literal via line continuations

use crate::ast::*;
use crate::error::Result;
use crate::hoist::HoistTable;

/// Scratch variable holding the iteration target of the current loop.
pub const TARGET_VAR: &str = "__target";

/// Generates the render statements for `nodes`.
///
/// `key_token` is the per-template token prefixing generated keys. Hoisted
/// statics and `<script hoisted>` bodies are recorded in `hoist`.
///
/// # Examples
///
/// ```rust,ignore
/// let mut hoist = HoistTable::new();
/// let statements = generate(&ast.body, "xxxx-xxxx", &mut hoist)?;
/// ```
pub fn generate(nodes: &[Node], key_token: &str, hoist: &mut HoistTable) -> Result<Vec<String>> {
    let mut generator = CodeGenerator::new(key_token, hoist);
    generator.generate_nodes(nodes)?;
    tracing::debug!(
        "generated {} statements, {} hoisted statics",
        generator.lines.len(),
        generator.hoist.len()
    );
    Ok(generator.lines)
}

struct CodeGenerator<'a> {
    key_token: &'a str,
    hoist: &'a mut HoistTable,
    lines: Vec<String>,
    indent_level: usize,
}

impl<'a> CodeGenerator<'a> {
    fn new(key_token: &'a str, hoist: &'a mut HoistTable) -> Self {
        Self {
            key_token,
            hoist,
            lines: Vec::new(),
            indent_level: 0,
        }
    }

    fn generate_nodes(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            self.generate_node(node, None)?;
        }
        Ok(())
    }

    /// `key` is the per-iteration key expression when `node` is a top-level
    /// child of a loop body.
    fn generate_node(&mut self, node: &Node, key: Option<&str>) -> Result<()> {
        match node {
            Node::ElementNode {
                tag,
                attributes,
                children,
                each,
                condition,
                ..
            } => match each {
                // Normally lowered by the transform; kept for hand-built forests.
                Some(spec) => {
                    let inner = Node::ElementNode {
                        tag: tag.clone(),
                        attributes: attributes.clone(),
                        children: children.clone(),
                        each: None,
                        condition: condition.clone(),
                        span: Span::default(),
                    };
                    self.generate_each(spec, std::slice::from_ref(&inner))
                }
                None => match condition {
                    Some(condition) => {
                        self.write_line(&format!("if ({}) {{", condition.content));
                        self.indent();
                        self.generate_element(tag, attributes, children, key)?;
                        self.dedent();
                        self.write_line("}");
                        Ok(())
                    }
                    None => self.generate_element(tag, attributes, children, key),
                },
            },
            Node::TextNode { content } => {
                self.write_line(&format!("text({})", text_literal(content)));
                Ok(())
            }
            Node::EachBlock { spec, children, .. } => self.generate_each(spec, children),
            Node::ScriptNode { code, hoisted } => {
                if *hoisted {
                    self.hoist.add_literal(code.clone());
                } else {
                    self.write_line(code);
                }
                Ok(())
            }
        }
    }

    fn generate_element(
        &mut self,
        tag: &str,
        attributes: &[Attribute],
        children: &[Node],
        key: Option<&str>,
    ) -> Result<()> {
        let tag_literal = string_literal(tag);
        let mut args = vec![tag_literal.clone()];

        match key {
            Some(key) => args.push(key.to_string()),
            None if !attributes.is_empty() => args.push(string_literal(self.key_token)),
            None => {}
        }
        if !attributes.is_empty() {
            args.push(self.hoist.add_statics(&canonicalize_attributes(attributes)));
        }

        self.write_line(&format!("elementOpen({})", args.join(", ")));
        self.indent();
        self.generate_nodes(children)?;
        self.dedent();
        self.write_line(&format!("elementClose({})", tag_literal));
        Ok(())
    }

    fn generate_each(&mut self, spec: &EachSpec, children: &[Node]) -> Result<()> {
        self.write_line(&format!("{} = {}", TARGET_VAR, spec.iterable_expr));
        self.write_line(&format!("if ({}) {{", TARGET_VAR));
        self.indent();
        self.write_line(&format!(
            ";({t}.forEach ? {t} : Object.keys({t})).forEach(function($value, $item, $target) {{",
            t = TARGET_VAR
        ));
        self.indent();
        self.write_line(&format!("var {} = $value", spec.item_var));

        let key_source = spec.key_expr.as_deref().unwrap_or("$item");
        self.write_line(&format!(
            "var $key = {} + {}",
            string_literal(&format!("{}_", self.key_token)),
            key_source
        ));

        let suffixed = children.len() > 1;
        for (index, child) in children.iter().enumerate() {
            let key = if suffixed {
                format!("$key + \"_{}\"", index + 1)
            } else {
                "$key".to_string()
            };
            self.generate_node(child, Some(&key))?;
        }

        self.dedent();
        self.write_line("}, this)");
        self.dedent();
        self.write_line("}");
        Ok(())
    }

    /// Indents the first line only; continuation lines of multi-line
    /// statements belong to a literal or to raw script code.
    fn write_line(&mut self, line: &str) {
        self.lines
            .push(format!("{}{}", "  ".repeat(self.indent_level), line));
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// Canonical text of an attribute set: names sorted, flattened to
/// `["name1", "value1", "name2", "value2"]`.
///
/// Equal sets in any source order produce equal text.
pub fn canonicalize_attributes(attributes: &[Attribute]) -> String {
    let mut sorted: Vec<&Attribute> = attributes.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let items: Vec<String> = sorted
        .iter()
        .flat_map(|attr| [string_literal(&attr.name), string_literal(&attr.value)])
        .collect();
    format!("[{}]", items.join(", "))
}

/// Quotes `s` as a double-quoted JavaScript string literal.
pub fn string_literal(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Quotes text content for a `text(...)` call.
///
/// Backslashes and double quotes are escaped; every line break becomes a
/// space, a backslash and the line break itself, so the literal spans the
/// same lines as the source text.
pub fn text_literal(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 2);
    out.push('"');
    for c in content.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str(" \\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
