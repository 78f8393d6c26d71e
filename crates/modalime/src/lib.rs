//! # modalime
//!
//! ## Overview
//!
//! This crate lets a modal editor that reads keys from a byte queue, such as Vim running inside
//! of a terminal or embedded in a mobile app, accept text from a platform input method.
//!
//! Input methods compose text provisionally: typing "kanji" on a Japanese keyboard shows "かんじ"
//! and then offers to convert it to "漢字". The editor never sees any of this directly. Instead,
//! the [bridge::InputBridge] types the composing text into the editor as it goes, and corrects
//! it with arrow keys and backspaces whenever the input method changes its mind.
//!
//! The bridge also knows when to stay out of the way. Normal mode commands are sent through
//! immediately, and so is the character argument to commands like `f` and `r`.
//!
//! ## Examples
//!
//! ```
//! use modalime::prelude::*;
//!
//! let queue = LineQueue::insert_mode(KeyEncodingKind::Vt);
//! let mut bridge = InputBridge::new(queue, BridgeConfig::default());
//!
//! bridge.set_marked_text("ｋ", TextRange::new(1, 0));
//! bridge.set_marked_text("か", TextRange::new(1, 0));
//! bridge.unmark_text();
//!
//! assert_eq!(bridge.queue().line(), "か");
//! ```

// Require docs for public APIs, and disable the more annoying clippy lints.
#![deny(missing_docs)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::needless_return)]

pub mod bridge;
pub mod composition;
pub mod config;
pub mod errors;
pub mod focus;
pub mod gate;
pub mod key;
pub mod prelude;
pub mod protocol;
pub mod queue;

pub use crossterm;
pub use modalime_types as types;
