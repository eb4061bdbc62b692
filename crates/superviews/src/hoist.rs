// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Per-compilation hoisting of static literals.
//!
//! Repeated constant data (canonical attribute arrays) is declared once in the
//! module preamble and referenced by identifier from every use site. Raw
//! blocks such as `<script hoisted>` bodies are lifted verbatim.
//!
//! A [`HoistTable`] belongs to exactly one compilation. It lives inside
//! [`crate::compiler::CompilationContext`], which is built fresh for every
//! compile call.

use indexmap::IndexMap;

/// A hoisted declaration: `var <identifier> = <canonical_text>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoistEntry {
    /// The canonical literal text, used as the deduplication key.
    pub canonical_text: String,
    /// The generated identifier, `hoisted<N>`.
    pub identifier: String,
}

/// Store of hoisted statics and raw literal blocks for one compilation.
#[derive(Debug, Default, Clone)]
pub struct HoistTable {
    statics: IndexMap<String, String>,
    literals: Vec<String>,
    count: usize,
}

impl HoistTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier for `canonical_text`, allocating the next
    /// `hoisted<N>` the first time the text is seen.
    pub fn add_statics(&mut self, canonical_text: &str) -> String {
        if let Some(identifier) = self.statics.get(canonical_text) {
            return identifier.clone();
        }

        self.count += 1;
        let identifier = format!("hoisted{}", self.count);
        tracing::trace!("hoisting {} = {}", identifier, canonical_text);
        self.statics
            .insert(canonical_text.to_string(), identifier.clone());
        identifier
    }

    /// Appends a raw block emitted verbatim at the top of the output.
    pub fn add_literal(&mut self, text: impl Into<String>) {
        self.literals.push(text.into());
    }

    /// Builds the preamble: literal blocks joined by newlines, then one
    /// declaration per static in first-seen order.
    pub fn build(&self) -> String {
        let mut result = self.literals.join("\n");
        for (text, identifier) in &self.statics {
            result.push_str(&format!("\nvar {} = {}", identifier, text));
        }
        result
    }

    /// Resets the counter, the statics and the literal blocks.
    pub fn clear(&mut self) {
        self.statics.clear();
        self.literals.clear();
        self.count = 0;
    }

    /// Raw literal blocks in the order they were added.
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// Hoisted statics in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = HoistEntry> + '_ {
        self.statics.iter().map(|(text, identifier)| HoistEntry {
            canonical_text: text.clone(),
            identifier: identifier.clone(),
        })
    }

    /// Number of distinct hoisted statics.
    pub fn len(&self) -> usize {
        self.statics.len()
    }

    /// True when neither statics nor literal blocks were recorded.
    pub fn is_empty(&self) -> bool {
        self.statics.is_empty() && self.literals.is_empty()
    }
}
