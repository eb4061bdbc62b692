// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Compile options.
//!
//! Options deserialize from the `[compile]` table of a `superviews.toml`:
//!
//! ```toml
//! [compile]
//! function_name = "description"
//! data_param = "data"
//! key_token = "xxxx-xxxx"   # omit to derive the token from the template
//! ```

use crate::directive::is_identifier;
use crate::error::{Result, SuperviewsError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Default name of the generated render function.
pub const DEFAULT_FUNCTION_NAME: &str = "description";
/// Default name of the render function's data parameter.
pub const DEFAULT_DATA_PARAM: &str = "data";

/// How the per-template key token is chosen.
///
/// The token prefixes every generated element key so keys of different
/// templates never collide.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum KeyToken {
    /// Hash of the template name and source; stable across recompiles.
    #[default]
    Derived,
    /// A fixed token used verbatim.
    Fixed(String),
}

impl From<Option<String>> for KeyToken {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(token) => KeyToken::Fixed(token),
            None => KeyToken::Derived,
        }
    }
}

impl From<KeyToken> for Option<String> {
    fn from(value: KeyToken) -> Self {
        match value {
            KeyToken::Derived => None,
            KeyToken::Fixed(token) => Some(token),
        }
    }
}

impl KeyToken {
    /// Resolves the token for one template.
    pub fn resolve(&self, template_name: Option<&str>, source: &str) -> String {
        match self {
            KeyToken::Fixed(token) => token.clone(),
            KeyToken::Derived => derive_key_token(template_name, source),
        }
    }
}

/// Derives a `xxxx-xxxx` token from the SHA-256 of the template identity.
pub fn derive_key_token(template_name: Option<&str>, source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(template_name.unwrap_or_default().as_bytes());
    hasher.update([0u8]);
    hasher.update(source.as_bytes());
    let digest = hasher.finalize();
    format!(
        "{:02x}{:02x}-{:02x}{:02x}",
        digest[0], digest[1], digest[2], digest[3]
    )
}

/// Options for a single compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Template name, used in error messages and key derivation.
    pub template_name: Option<String>,
    /// Name of the generated render function.
    pub function_name: String,
    /// Name of the render function's single parameter.
    pub data_param: String,
    /// Per-template key token strategy.
    pub key_token: KeyToken,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            template_name: None,
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            data_param: DEFAULT_DATA_PARAM.to_string(),
            key_token: KeyToken::Derived,
        }
    }
}

impl CompileOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the template name.
    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Sets the render function name.
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = name.into();
        self
    }

    /// Sets the data parameter name.
    pub fn with_data_param(mut self, name: impl Into<String>) -> Self {
        self.data_param = name.into();
        self
    }

    /// Uses a fixed key token instead of a derived one.
    pub fn with_fixed_key_token(mut self, token: impl Into<String>) -> Self {
        self.key_token = KeyToken::Fixed(token.into());
        self
    }

    /// Checks that the generated names are valid identifiers.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.function_name) {
            return Err(SuperviewsError::InvalidOptions(format!(
                "function name `{}` is not an identifier",
                self.function_name
            )));
        }
        if !is_identifier(&self.data_param) {
            return Err(SuperviewsError::InvalidOptions(format!(
                "data parameter `{}` is not an identifier",
                self.data_param
            )));
        }
        Ok(())
    }
}
