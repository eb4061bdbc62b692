// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Compile entry points.
//!
//! Every call to [`compile`] builds its own [`CompilationContext`], so hoisted
//! identifiers always start at `hoisted1` and concurrent compilations never
//! share state.

use crate::assembler::assemble;
use crate::ast::TemplateAST;
use crate::codegen::{generate, TARGET_VAR};
use crate::error::Result;
use crate::hoist::HoistTable;
use crate::options::CompileOptions;
use crate::parser::parse_template_with_context;
use crate::transform::transform;

/// State owned by a single compilation.
#[derive(Debug, Clone)]
pub struct CompilationContext {
    /// Hoisted statics and literal blocks collected while generating.
    pub hoist: HoistTable,
    /// Per-template key token prefixing generated keys.
    pub key_token: String,
}

impl CompilationContext {
    /// Creates a context with an empty hoisting table.
    pub fn new(key_token: impl Into<String>) -> Self {
        Self {
            hoist: HoistTable::new(),
            key_token: key_token.into(),
        }
    }

    /// Creates a context for `source`, resolving the key token from `options`.
    pub fn for_template(source: &str, options: &CompileOptions) -> Self {
        Self::new(
            options
                .key_token
                .resolve(options.template_name.as_deref(), source),
        )
    }
}

/// Parses and normalizes a template without generating code.
pub fn parse(source: &str, options: &CompileOptions) -> Result<TemplateAST> {
    let ast = parse_template_with_context(source, options.template_name.as_deref())?;
    Ok(transform(ast))
}

/// Compiles template markup into module source text.
///
/// # Errors
///
/// Returns a parse or expression error for invalid templates and
/// [`crate::SuperviewsError::InvalidOptions`] for unusable option values.
/// Nothing is returned on failure.
///
/// # Examples
///
/// ```rust
/// use superviews::{compile, CompileOptions};
///
/// let options = CompileOptions::new().with_fixed_key_token("xxxx-xxxx");
/// let js = compile("<div></div>", &options).unwrap();
/// assert!(js.contains("elementOpen(\"div\")\nelementClose(\"div\")"));
/// ```
pub fn compile(source: &str, options: &CompileOptions) -> Result<String> {
    options.validate()?;

    let ast = parse(source, options)?;
    tracing::debug!(
        "parsed {:?}: {} root nodes",
        options.template_name.as_deref().unwrap_or("<inline>"),
        ast.body.len()
    );

    let mut context = CompilationContext::for_template(source, options);
    let output = compile_ast(&ast, &mut context, options)?;
    tracing::debug!("compiled module: {} bytes", output.len());
    Ok(output)
}

/// Generates and assembles a module from an already parsed template.
///
/// `context` should be fresh; anything already hoisted into it ends up in
/// the preamble. The scratch variable declaration is registered after code
/// generation, so it follows every hoisted script block.
pub fn compile_ast(
    ast: &TemplateAST,
    context: &mut CompilationContext,
    options: &CompileOptions,
) -> Result<String> {
    let statements = generate(&ast.body, &context.key_token, &mut context.hoist)?;
    context.hoist.add_literal(format!("var {}", TARGET_VAR));
    Ok(assemble(
        &context.hoist,
        &statements,
        &options.function_name,
        &options.data_param,
    ))
}
