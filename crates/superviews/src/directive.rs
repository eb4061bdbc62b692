// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Directive expression extraction.
//!
//! Loop directives have the shape `item[, keyExpr] in iterableExpr`;
//! conditional directives are a single expression. Expressions are only
//! split into their parts and checked for balanced brackets and closed
//! string literals. Nothing is evaluated or type-checked.

use crate::ast::{EachSpec, Expression, Span};
use crate::error::{Result, SuperviewsError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EACH_RE: Regex =
        Regex::new(r"(?s)^([A-Za-z_$][A-Za-z0-9_$]*)\s*(?:,\s*(.+?))?\s+in\s+(.+)$").unwrap();
    static ref IDENT_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// True when `name` can be used as a generated variable or function name.
pub fn is_identifier(name: &str) -> bool {
    IDENT_RE.is_match(name)
}

/// Parses the text of an `each` attribute or `<each expression>` wrapper.
pub fn parse_each(text: &str, span: Span) -> Result<EachSpec> {
    let trimmed = text.trim();
    let caps = EACH_RE
        .captures(trimmed)
        .ok_or_else(|| expression_error("expected `item[, key] in iterable`", text, span))?;

    let item_var = caps[1].to_string();
    let key_expr = caps.get(2).map(|m| m.as_str().trim().to_string());
    let iterable_expr = caps[3].trim().to_string();

    if let Some(key) = &key_expr {
        check_balanced(key)
            .map_err(|msg| expression_error(&format!("key expression: {}", msg), text, span))?;
    }
    check_balanced(&iterable_expr)
        .map_err(|msg| expression_error(&format!("iterable expression: {}", msg), text, span))?;

    Ok(EachSpec {
        item_var,
        key_expr,
        iterable_expr,
    })
}

/// Parses the text of an `if` attribute.
pub fn parse_condition(text: &str, span: Span) -> Result<Expression> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(expression_error("empty condition", text, span));
    }
    check_balanced(trimmed).map_err(|msg| expression_error(&msg, text, span))?;
    Ok(Expression::new(trimmed, span))
}

fn expression_error(message: &str, expression: &str, span: Span) -> SuperviewsError {
    SuperviewsError::ExpressionSyntaxError {
        message: message.to_string(),
        expression: expression.to_string(),
        line: span.line,
        column: span.column,
    }
}

/// Checks that brackets nest properly and string literals are closed.
fn check_balanced(expr: &str) -> std::result::Result<(), String> {
    let mut stack: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in expr.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let open = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(open) {
                    return Err(format!("unbalanced `{}`", c));
                }
            }
            _ => {}
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated string literal starting with `{}`", q));
    }
    if let Some(open) = stack.pop() {
        return Err(format!("unclosed `{}`", open));
    }
    Ok(())
}
