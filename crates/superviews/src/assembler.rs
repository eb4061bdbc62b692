// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Module assembly.
//!
//! Wraps the render statements in the fixed module text:
//!
//! ```js
//! ;(function () {
//! var test = require("test")          // hoisted literal blocks
//! var __target                        // scratch variable
//! var hoisted1 = ["class", "header"]  // hoisted statics
//!
//! return function description (data) {
//! elementOpen("h1", "xxxx-xxxx", hoisted1)
//! elementClose("h1")
//! }
//! })()
//! ```

use crate::hoist::HoistTable;

/// Builds the final module source around the built preamble of `hoist`.
///
/// The preamble is [`HoistTable::build`]: literal blocks (the compiler
/// registers the scratch variable declaration as the last one), then one
/// declaration per hoisted static.
pub fn assemble(
    hoist: &HoistTable,
    statements: &[String],
    function_name: &str,
    data_param: &str,
) -> String {
    format!(
        ";(function () {{\n{}\n\nreturn function {} ({}) {{\n{}\n}}\n}})()\n",
        hoist.build(),
        function_name,
        data_param,
        statements.join("\n")
    )
}
