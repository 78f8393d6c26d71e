//! # Operator-pending gate
//!
//! ## Overview
//!
//! Some Normal mode commands, like Vim's `f`, `t` and `r`, consume exactly one following
//! character literally. That character must reach the editor as typed, and never be held back as
//! the start of an IME composition. [OperatorGate] remembers that the next character is one of
//! these arguments.
use crate::config::BridgeConfig;

/// One-shot flag for "the next character is an operator's argument".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OperatorGate {
    pending: bool,
}

impl OperatorGate {
    /// Whether the next character should bypass composition.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clear the gate, returning whether it was set.
    pub fn clear(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    /// Update the gate after `text` has been forwarded to an editor in its base mode.
    ///
    /// The gate opens when `text` is a single configured operator character, or when the editor
    /// itself reports that it's waiting for a character.
    pub fn observe(&mut self, text: &str, config: &BridgeConfig, awaiting: bool) -> bool {
        let mut chars = text.chars();

        let operator = match (chars.next(), chars.next()) {
            (Some(c), None) => config.is_operator(c),
            _ => false,
        };

        self.pending = operator || awaiting;

        if self.pending {
            tracing::debug!(text, operator, awaiting, "operator pending");
        }

        return self.pending;
    }
}
