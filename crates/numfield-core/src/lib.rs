#![forbid(unsafe_code)]

//! Core: input events, logging setup, and text width helpers.
//!
//! # Role in numfield
//! `numfield-core` is the input layer. It owns the normalized event types
//! that widgets consume, so a display layer (a crossterm loop, a test
//! harness, a web shim) only has to translate its own input into
//! [`event::Event`] values.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, paste, resize, focus).
//! - **Logging**: tracing re-exports and subscriber setup from the environment.
//! - **Text width**: terminal cell widths shared by the widgets.

pub mod event;
pub mod logging;
pub mod text_width;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
