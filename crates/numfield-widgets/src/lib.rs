#![forbid(unsafe_code)]

//! Widgets for numeric form fields.
//!
//! - [`DecimalInput`]: a decimal text field that validates keystrokes,
//!   formats with locale punctuation, and clamps on commit.
//! - [`OverflowTip`]: single-line text that clips with an ellipsis and
//!   exposes a tooltip only when clipped.
//!
//! Widgets consume [`numfield_core::event::Event`] values and hold their
//! own state. Nothing here draws to a terminal; a display layer reads
//! [`DecimalInput::view`] and [`OverflowTip::render`] and draws the result.

pub mod decimal_input;
pub mod overflow_tip;

pub use decimal_input::{DecimalInput, DecimalInputConfig, Notification, ZeroPolicy};
pub use overflow_tip::{CellMeasure, Extent, Measure, OverflowStyle, OverflowTip};
