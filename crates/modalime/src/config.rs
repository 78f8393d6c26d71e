//! # Bridge configuration
//!
//! ## Overview
//!
//! [BridgeConfig] controls which characters are treated as operators that take a literal
//! character argument, how keys are written into the editor's input queue, and how newlines are
//! delivered.
//!
//! ```
//! use modalime::config::{BridgeConfig, KeyEncodingKind};
//!
//! let config = BridgeConfig::default()
//!     .with_encoding(KeyEncodingKind::Vim)
//!     .with_operators(BridgeConfig::operators_from_str("fFtT").unwrap());
//!
//! assert!(config.is_operator('t'));
//! assert!(!config.is_operator('r'));
//! ```
use crate::key::{KeyEncoding, VimEncoding, VtEncoding};

/// The operators that, in Vim, consume the next typed character literally.
pub const DEFAULT_OPERATORS: [char; 5] = ['f', 'F', 't', 'T', 'r'];

/// Errors from building a [BridgeConfig].
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// No operator characters were given.
    #[error("Operator list is empty")]
    EmptyOperators,

    /// An operator character that can never be typed as a command.
    #[error("Invalid operator character: {0:?}")]
    InvalidOperator(char),
}

/// Which [KeyEncoding] to write the editor's input in.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum KeyEncodingKind {
    /// Write keys as a VT-style terminal would.
    #[default]
    Vt,

    /// Write keys the way Vim stores them in its input buffer.
    Vim,
}

impl KeyEncodingKind {
    /// Get the encoder for this kind.
    pub fn encoding(&self) -> &'static dyn KeyEncoding {
        match self {
            KeyEncodingKind::Vt => &VtEncoding,
            KeyEncodingKind::Vim => &VimEncoding,
        }
    }
}

/// Configuration for an [InputBridge](crate::bridge::InputBridge).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BridgeConfig {
    pub(crate) operators: Vec<char>,
    pub(crate) encoding: KeyEncodingKind,
    pub(crate) newline_as_enter: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            operators: DEFAULT_OPERATORS.to_vec(),
            encoding: KeyEncodingKind::default(),
            newline_as_enter: true,
        }
    }
}

impl BridgeConfig {
    /// Parse a list of operator characters, such as `"fFtTr"`.
    pub fn operators_from_str(s: &str) -> Result<Vec<char>, ConfigError> {
        let mut ops = vec![];

        for c in s.chars() {
            if c.is_whitespace() || c.is_control() {
                return Err(ConfigError::InvalidOperator(c));
            }

            if !ops.contains(&c) {
                ops.push(c);
            }
        }

        if ops.is_empty() {
            return Err(ConfigError::EmptyOperators);
        }

        return Ok(ops);
    }

    /// Set the operator characters.
    pub fn with_operators(mut self, operators: Vec<char>) -> Self {
        self.operators = operators;
        self
    }

    /// Set the encoding used for the editor's input queue.
    pub fn with_encoding(mut self, encoding: KeyEncodingKind) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set whether a typed `"\n"` is sent as a carriage return.
    pub fn with_newline_as_enter(mut self, newline_as_enter: bool) -> Self {
        self.newline_as_enter = newline_as_enter;
        self
    }

    /// Whether `c` is one of the configured operators.
    pub fn is_operator(&self, c: char) -> bool {
        self.operators.contains(&c)
    }

    /// The configured operator characters.
    pub fn operators(&self) -> &[char] {
        &self.operators
    }

    /// The configured encoding.
    pub fn encoding(&self) -> KeyEncodingKind {
        self.encoding
    }

    /// Whether `"\n"` is sent as a carriage return.
    pub fn newline_as_enter(&self) -> bool {
        self.newline_as_enter
    }
}
