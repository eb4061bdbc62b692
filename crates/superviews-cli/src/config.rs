// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project configuration.
//!
//! Configuration is loaded from `superviews.toml` at the project root.
//!
//! # Example Configuration
//!
//! ```toml
//! [compile]
//! function_name = "description"
//! data_param = "data"
//! key_token = "xxxx-xxxx"
//!
//! [build]
//! output_dir = "dist"
//! emit = "js"
//! ```

use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use superviews::CompileOptions;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "superviews.toml";

/// Main configuration structure loaded from `superviews.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Options passed to every compilation.
    #[serde(default)]
    pub compile: CompileOptions,
    /// Build output settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// What the build command writes for each template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emit {
    /// The compiled JavaScript module.
    #[default]
    Js,
    /// The normalized node forest as JSON.
    Ast,
}

impl Emit {
    /// File extension of the emitted output.
    pub fn extension(self) -> &'static str {
        match self {
            Emit::Js => "js",
            Emit::Ast => "json",
        }
    }
}

/// Build output configuration.
#[derive(Debug, Default, Deserialize)]
pub struct BuildConfig {
    /// Output directory; when unset a single result goes to stdout.
    #[serde(default)]
    pub output_dir: Option<String>,
    /// Output kind (default: js).
    #[serde(default)]
    pub emit: Emit,
}

impl Config {
    /// Loads configuration from `path`, or from `superviews.toml` in the
    /// current directory when no path is given.
    ///
    /// A missing default file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or a file cannot be parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(path) => path,
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if !default_path.exists() {
                    return Ok(Config::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(config_path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.compile.validate()?;
        Ok(config)
    }
}
