//! # Common types
//!
//! ## Overview
//!
//! This module re-exports the types most hosts need when wiring up an [InputBridge].
pub use crate::bridge::InputBridge;
pub use crate::config::{BridgeConfig, KeyEncodingKind};
pub use crate::errors::{BridgeError, BridgeResult};
pub use crate::focus::DeferredTask;
pub use crate::key::{EditorKey, KeyEncoding, Keystroke};
pub use crate::protocol::{TextInputRequest, TextInputResponse};
pub use crate::queue::{EditorQueue, LineMode, LineQueue, RecordingQueue};
pub use crate::types::{LayoutDirection, TextHandle, TextPosition, TextRange, WritingDirection};
