// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! superviews CLI library.
//!
//! Feeds template files into the [`superviews`] compiler and writes the
//! generated modules.
//!
//! # Usage
//!
//! ```bash
//! superviews build views/list.html                 # print the module
//! superviews build "views/**/*.html" -o dist       # one module per template
//! superviews build views/list.html --emit ast      # dump the parsed forest
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `superviews.toml` at the project root.

/// CLI commands.
pub mod commands;
/// Project configuration from `superviews.toml`.
pub mod config;
