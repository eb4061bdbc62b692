// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template parser.
//!
//! The pest grammar in `template.pest` recognizes the markup; this module
//! turns the resulting pairs into [`Node`]s, pulling the `each` and `if`
//! directives out of element attributes and validating the reserved
//! `<each>` and `<script>` elements.

use crate::ast::*;
use crate::directive::{parse_condition, parse_each};
use crate::error::{Result, SourceContext, SuperviewsError};
use pest::error::{ErrorVariant, LineColLocation};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use std::collections::HashSet;

/// Pest parser for template markup.
#[derive(Parser)]
#[grammar = "template.pest"]
pub struct TemplateParser;

/// Tag name of the explicit loop wrapper.
pub const EACH_TAG: &str = "each";
/// Directive attribute of the loop wrapper.
pub const EACH_EXPRESSION_ATTR: &str = "expression";
/// Accepted alias of [`EACH_EXPRESSION_ATTR`].
pub const EACH_CONDITION_ATTR: &str = "condition";
/// Attribute turning an element into an implicit single-child loop.
pub const EACH_ATTR: &str = "each";
/// Attribute guarding an element with a condition.
pub const IF_ATTR: &str = "if";
/// Boolean attribute moving a `<script>` body into the module preamble.
pub const HOISTED_ATTR: &str = "hoisted";

/// Parses template markup into a [`TemplateAST`].
///
/// # Errors
///
/// Returns [`SuperviewsError::ParseError`] for malformed markup and
/// [`SuperviewsError::ExpressionSyntaxError`] for malformed directives.
pub fn parse_template(source: &str) -> Result<TemplateAST> {
    let mut pairs = TemplateParser::parse(Rule::template, source).map_err(from_pest_error)?;
    let template = pairs
        .next()
        .ok_or_else(|| SuperviewsError::parse("empty parse result", 1, 1))?;

    let body = build_nodes(template.into_inner())?;
    Ok(TemplateAST::new(body))
}

/// Parses a template and attaches its name and a source snippet to parse errors.
pub fn parse_template_with_context(
    source: &str,
    template_name: Option<&str>,
) -> Result<TemplateAST> {
    match parse_template(source) {
        Ok(mut ast) => {
            ast.path = template_name.map(String::from);
            Ok(ast)
        }
        Err(SuperviewsError::ParseError {
            message,
            line,
            column,
            ..
        }) => Err(SuperviewsError::ParseError {
            message,
            line,
            column,
            file: template_name.map(String::from),
            source_context: Some(SourceContext::from_source(source, line, column)),
        }),
        Err(e) => Err(e),
    }
}

fn from_pest_error(err: pest::error::Error<Rule>) -> SuperviewsError {
    let (line, column) = match err.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };
    let message = match &err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => match (describe_rules(negatives), describe_rules(positives)) {
            (None, None) => "unexpected input".to_string(),
            (Some(unexpected), None) => format!("unexpected {}", unexpected),
            (None, Some(expected)) => format!("expected {}", expected),
            (Some(unexpected), Some(expected)) => {
                format!("unexpected {}; expected {}", unexpected, expected)
            }
        },
        ErrorVariant::CustomError { message } => message.clone(),
    };
    SuperviewsError::parse(message, line, column)
}

fn rule_label(rule: &Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::text => "text",
        Rule::tag_name => "tag name",
        Rule::void_tag => "void element name",
        Rule::attribute | Rule::attr_name => "attribute",
        Rule::dq_value | Rule::sq_value | Rule::bare_value => "attribute value",
        Rule::script | Rule::script_body | Rule::script_self_closing => "script",
        Rule::element | Rule::void_element | Rule::self_closing => "element",
        _ => "markup",
    }
}

/// Joins the labels of `rules` as `a, b or c`, each label once.
fn describe_rules(rules: &[Rule]) -> Option<String> {
    let mut labels: Vec<&str> = Vec::new();
    for label in rules.iter().map(rule_label) {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    match labels.split_last() {
        None => None,
        Some((last, [])) => Some(last.to_string()),
        Some((last, rest)) => Some(format!("{} or {}", rest.join(", "), last)),
    }
}

fn span_of(pair: &Pair<Rule>) -> Span {
    let (line, column) = pair.line_col();
    let span = pair.as_span();
    Span::new(span.start(), span.end(), line, column)
}

fn build_nodes(pairs: Pairs<Rule>) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::EOI {
            continue;
        }
        nodes.push(build_node(pair)?);
    }
    Ok(nodes)
}

fn build_node(pair: Pair<Rule>) -> Result<Node> {
    match pair.as_rule() {
        Rule::text => Ok(Node::text(pair.as_str())),
        Rule::script => build_script(pair),
        Rule::script_self_closing => {
            let span = span_of(&pair);
            Err(SuperviewsError::parse(
                "<script> needs a body and a closing </script> tag",
                span.line,
                span.column,
            ))
        }
        Rule::element | Rule::void_element | Rule::self_closing => build_element(pair),
        rule => {
            let span = span_of(&pair);
            Err(SuperviewsError::parse(
                format!("unexpected {:?}", rule),
                span.line,
                span.column,
            ))
        }
    }
}

/// An attribute as written, before directives are separated out.
struct RawAttribute {
    name: String,
    value: Option<String>,
    span: Span,
}

fn build_attribute(pair: Pair<Rule>) -> RawAttribute {
    let span = span_of(&pair);
    let mut inner = pair.into_inner();
    let name = inner.next().map(|p| p.as_str().to_string()).unwrap_or_default();
    let value = inner.next().map(|p| p.as_str().to_string());
    RawAttribute { name, value, span }
}

/// Splits an element's inner pairs into attributes and children, rejecting
/// duplicate attribute names.
fn split_inner(pairs: Pairs<Rule>) -> Result<(Vec<RawAttribute>, Vec<Pair<Rule>>)> {
    let mut attributes = Vec::new();
    let mut children = Vec::new();
    let mut seen = HashSet::new();

    for pair in pairs {
        match pair.as_rule() {
            Rule::attribute => {
                let attr = build_attribute(pair);
                if !seen.insert(attr.name.clone()) {
                    return Err(SuperviewsError::parse(
                        format!("duplicate attribute `{}`", attr.name),
                        attr.span.line,
                        attr.span.column,
                    ));
                }
                attributes.push(attr);
            }
            Rule::tag_name | Rule::void_tag | Rule::script_body => {}
            _ => children.push(pair),
        }
    }

    Ok((attributes, children))
}

fn build_script(pair: Pair<Rule>) -> Result<Node> {
    let code = pair
        .clone()
        .into_inner()
        .find(|p| p.as_rule() == Rule::script_body)
        .map(|p| p.as_str().trim().to_string())
        .unwrap_or_default();
    let (attributes, _) = split_inner(pair.into_inner())?;

    let mut hoisted = false;
    for attr in attributes {
        if attr.name == HOISTED_ATTR {
            hoisted = true;
        } else {
            return Err(SuperviewsError::parse(
                format!("unsupported attribute `{}` on <script>", attr.name),
                attr.span.line,
                attr.span.column,
            ));
        }
    }

    Ok(Node::ScriptNode { code, hoisted })
}

fn build_element(pair: Pair<Rule>) -> Result<Node> {
    let span = span_of(&pair);
    let tag = pair
        .clone()
        .into_inner()
        .find(|p| matches!(p.as_rule(), Rule::tag_name | Rule::void_tag))
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| SuperviewsError::parse("missing tag name", span.line, span.column))?;

    let (raw_attributes, child_pairs) = split_inner(pair.into_inner())?;
    let children = child_pairs
        .into_iter()
        .map(build_node)
        .collect::<Result<Vec<_>>>()?;

    if tag == EACH_TAG {
        let spec = each_wrapper_spec(raw_attributes, span)?;
        return Ok(Node::EachBlock {
            spec,
            children,
            span,
        });
    }

    let mut attributes = Vec::new();
    let mut each = None;
    let mut condition = None;
    for attr in raw_attributes {
        let value = attr.value.unwrap_or_default();
        match attr.name.as_str() {
            EACH_ATTR => each = Some(parse_each(&value, attr.span)?),
            IF_ATTR => condition = Some(parse_condition(&value, attr.span)?),
            _ => attributes.push(Attribute::new(attr.name, value)),
        }
    }

    Ok(Node::ElementNode {
        tag,
        attributes,
        children,
        each,
        condition,
        span,
    })
}

/// The loop wrapper takes exactly one directive attribute.
fn each_wrapper_spec(attributes: Vec<RawAttribute>, span: Span) -> Result<EachSpec> {
    let mut directive = None;
    for attr in attributes {
        match attr.name.as_str() {
            EACH_EXPRESSION_ATTR | EACH_CONDITION_ATTR if directive.is_none() => {
                directive = Some(attr);
            }
            EACH_EXPRESSION_ATTR | EACH_CONDITION_ATTR => {
                return Err(SuperviewsError::parse(
                    "<each> takes a single `expression` attribute",
                    attr.span.line,
                    attr.span.column,
                ));
            }
            other => {
                return Err(SuperviewsError::parse(
                    format!("unsupported attribute `{}` on <each>", other),
                    attr.span.line,
                    attr.span.column,
                ));
            }
        }
    }

    let attr = directive.ok_or_else(|| {
        SuperviewsError::parse("<each> requires an `expression` attribute", span.line, span.column)
    })?;
    parse_each(attr.value.as_deref().unwrap_or_default(), attr.span)
}
