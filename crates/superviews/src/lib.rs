// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # superviews
//!
//! Ahead-of-time compiler from HTML-like templates to incremental-DOM render
//! functions.
//!
//! A template such as
//!
//! ```html
//! <ul class="list">
//!   <li each="item, item.id in data.items" if="item.visible">Item</li>
//! </ul>
//! ```
//!
//! becomes a JavaScript module whose render function calls `elementOpen`,
//! `elementClose` and `text` directly, with constant attribute arrays hoisted
//! into the module preamble.
//!
//! ## Pipeline
//!
//! - [`parser`]: pest grammar to [`Node`] forest, directive extraction
//! - [`transform`]: whitespace normalization and loop lowering
//! - [`codegen`]: render statements, hoisting through a [`HoistTable`]
//! - [`assembler`]: the module wrapper
//!
//! ## Quick Start
//!
//! ```rust
//! use superviews::{compile, CompileOptions};
//!
//! let options = CompileOptions::new().with_template_name("header");
//! let js = compile(r#"<h1 class="header">Hello</h1>"#, &options)?;
//! assert!(js.contains("var hoisted1 = [\"class\", \"header\"]"));
//! # Ok::<(), superviews::SuperviewsError>(())
//! ```

/// Abstract Syntax Tree types for templates.
pub mod ast;
/// Template parser.
pub mod parser;
/// Loop and conditional directive extraction.
pub mod directive;
/// Parsed forest normalization.
pub mod transform;
/// Per-compilation literal hoisting.
pub mod hoist;
/// Render statement generation.
pub mod codegen;
/// Module wrapper assembly.
pub mod assembler;
/// Compile entry points and per-compilation context.
pub mod compiler;
/// Compile options and key token derivation.
pub mod options;
/// Error types and reporting.
pub mod error;

pub use assembler::assemble;
pub use ast::*;
pub use codegen::{canonicalize_attributes, generate, text_literal};
pub use compiler::{compile, compile_ast, parse, CompilationContext};
pub use error::*;
pub use hoist::{HoistEntry, HoistTable};
pub use options::{CompileOptions, KeyToken};
pub use parser::{parse_template, parse_template_with_context, Rule, TemplateParser};
pub use transform::transform;
