// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the superviews template compiler.
//!
//! This module defines [`SuperviewsError`], the main error enum, and helper
//! types for rich error reporting with source context.
//!
//! # Error Categories
//!
//! - **Parse errors**: malformed or unterminated markup, unknown directive shapes
//! - **Expression syntax errors**: `each`/`if` directive text that cannot be
//!   split into its parts
//! - **Invalid options**: compile options that would produce broken output
//!
//! Every error aborts the compilation; no partial output is ever returned.

use std::fmt;
use thiserror::Error;

/// Lines shown on each side of the error line.
const CONTEXT_LINES: usize = 2;

/// Numbered source lines around an error location, rendered with a caret
/// under the offending column.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceContext {
    /// `(line number, text)` pairs of the snippet window, 1-indexed.
    pub lines: Vec<(usize, String)>,
    /// Line the caret is drawn under (1-indexed).
    pub line: usize,
    /// Column of the caret (1-indexed, in characters).
    pub column: usize,
}

impl SourceContext {
    /// Captures the window of `source` around `line`.
    pub fn from_source(source: &str, line: usize, column: usize) -> Self {
        let first = line.saturating_sub(CONTEXT_LINES).max(1);
        let last = line + CONTEXT_LINES;
        let lines = source
            .lines()
            .enumerate()
            .map(|(index, text)| (index + 1, text.to_string()))
            .skip(first - 1)
            .take_while(|(number, _)| *number <= last)
            .collect();

        Self { lines, line, column }
    }

    /// Formats the snippet:
    ///
    /// ```text
    ///    1 | <ul>
    ///    2 |   <li each="item of items"></li>
    ///      |       ^
    ///    3 | </ul>
    /// ```
    ///
    /// Tabs before the caret are kept so the caret lines up with the text.
    pub fn format_snippet(&self) -> String {
        let mut result = String::new();
        for (number, text) in &self.lines {
            result.push_str(&format!("{:4} | {}\n", number, text));
            if *number == self.line {
                let padding: String = text
                    .chars()
                    .chain(std::iter::repeat(' '))
                    .take(self.column.saturating_sub(1))
                    .map(|c| if c == '\t' { '\t' } else { ' ' })
                    .collect();
                result.push_str(&format!("     | {}^\n", padding));
            }
        }
        result
    }
}

impl fmt::Display for SourceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_snippet())
    }
}

fn in_file(file: &Option<String>) -> String {
    file.as_ref().map(|name| format!(" in {}", name)).unwrap_or_default()
}

fn snippet(context: &Option<SourceContext>) -> String {
    context
        .as_ref()
        .map(|ctx| format!("\n{}", ctx))
        .unwrap_or_default()
}

/// The main error type for superviews operations.
#[derive(Error, Debug)]
pub enum SuperviewsError {
    /// Template markup is malformed, unterminated, or uses an unknown directive shape.
    #[error(
        "Parse error{}: {message} at line {line}, column {column}{}",
        in_file(file),
        snippet(source_context)
    )]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Column number where the error occurred (1-indexed).
        column: usize,
        /// The template name, if known.
        file: Option<String>,
        /// Source context for rich error display.
        source_context: Option<SourceContext>,
    },

    /// A loop or conditional directive expression is malformed.
    #[error("Expression syntax error: {message} in `{expression}` at line {line}, column {column}")]
    ExpressionSyntaxError {
        /// Description of what is wrong with the expression.
        message: String,
        /// The offending directive text.
        expression: String,
        /// Line number of the directive attribute (1-indexed).
        line: usize,
        /// Column number of the directive attribute (1-indexed).
        column: usize,
    },

    /// Compile options cannot produce valid output.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl SuperviewsError {
    /// Creates a parse error without file or source context.
    ///
    /// [`crate::parser::parse_template_with_context`] fills those in.
    pub fn parse(message: impl Into<String>, line: usize, column: usize) -> Self {
        SuperviewsError::ParseError {
            message: message.into(),
            line,
            column,
            file: None,
            source_context: None,
        }
    }

    /// Returns the 1-indexed `(line, column)` the error points at, if any.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            SuperviewsError::ParseError { line, column, .. }
            | SuperviewsError::ExpressionSyntaxError { line, column, .. } => Some((*line, *column)),
            SuperviewsError::InvalidOptions(_) => None,
        }
    }
}

/// Convenience type alias for Results with [`SuperviewsError`].
pub type Result<T> = std::result::Result<T, SuperviewsError>;
