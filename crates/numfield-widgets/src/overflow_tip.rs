#![forbid(unsafe_code)]

//! Single-line text with a tooltip that only appears when the text is clipped.
//!
//! [`OverflowTip`] asks an injected [`Measure`] how wide its text is compared
//! to the space it has. When the content is wider, the rendered line is cut
//! with an ellipsis and the full text is offered as a tooltip. When it fits,
//! the tooltip stays disabled.
//!
//! Measurement happens when the widget is created, when the text changes,
//! when the host calls [`OverflowTip::measure`], and on [`Event::Resize`].
//!
//! # Example
//! ```
//! use numfield_widgets::overflow_tip::{CellMeasure, OverflowStyle, OverflowTip};
//!
//! let tip = OverflowTip::new("Quarterly revenue", CellMeasure::fixed(10));
//! let out = tip.render(&OverflowStyle::default());
//! assert_eq!(out.lines, vec!["Quarterly…".to_string()]);
//! assert_eq!(out.tooltip, Some("Quarterly revenue"));
//! ```

use numfield_core::event::Event;
use numfield_core::text_width::{display_width, truncate_to_width};
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

/// Identifier exposed for test harnesses.
pub const TEST_ID: &str = "overflow-tip";

/// Glyph appended to clipped text.
pub const ELLIPSIS: &str = "…";

/// Result of measuring a text against its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    /// Width the full content needs.
    pub content_width: usize,
    /// Width the container shows.
    pub visible_width: usize,
}

impl Extent {
    /// Whether the content is wider than the container.
    #[must_use]
    pub const fn overflows(&self) -> bool {
        self.content_width > self.visible_width
    }
}

/// Measures rendered text.
pub trait Measure {
    /// Measure `text` in the current container.
    fn extent(&self, text: &str) -> Extent;

    /// The viewport changed size. Implementations that track the viewport
    /// update themselves here.
    fn resize(&mut self, _width: u16, _height: u16) {}
}

impl<F> Measure for F
where
    F: Fn(&str) -> Extent,
{
    fn extent(&self, text: &str) -> Extent {
        self(text)
    }
}

/// Terminal cell measurement.
///
/// A fixed measure keeps its width across resizes. A filling measure spans
/// the viewport minus a margin and follows resize events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMeasure {
    width: usize,
    margin: Option<u16>,
}

impl CellMeasure {
    /// Container of exactly `width` cells.
    #[must_use]
    pub const fn fixed(width: usize) -> Self {
        Self {
            width,
            margin: None,
        }
    }

    /// Container spanning the viewport minus `margin` cells.
    #[must_use]
    pub const fn fill(viewport_width: u16, margin: u16) -> Self {
        Self {
            width: viewport_width.saturating_sub(margin) as usize,
            margin: Some(margin),
        }
    }

    /// Current container width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }
}

impl Measure for CellMeasure {
    fn extent(&self, text: &str) -> Extent {
        Extent {
            content_width: display_width(text),
            visible_width: self.width,
        }
    }

    fn resize(&mut self, width: u16, _height: u16) {
        if let Some(margin) = self.margin {
            self.width = width.saturating_sub(margin) as usize;
        }
    }
}

/// How overflowing text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowStyle {
    /// End clipped text with [`ELLIPSIS`].
    pub ellipsis: bool,
    /// Keep the text on one line. When false the text wraps instead.
    pub nowrap: bool,
}

impl Default for OverflowStyle {
    fn default() -> Self {
        Self {
            ellipsis: true,
            nowrap: true,
        }
    }
}

/// Rendered output of an [`OverflowTip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowRender<'a> {
    /// Lines to draw, top to bottom.
    pub lines: Vec<String>,
    /// Full text to show on hover; `None` when the tooltip is disabled.
    pub tooltip: Option<&'a str>,
    /// Identifier for test harnesses.
    pub test_id: &'static str,
}

/// Text that reveals itself in a tooltip when clipped.
#[derive(Debug, Clone)]
pub struct OverflowTip<M = CellMeasure> {
    text: String,
    measure: M,
    extent: Extent,
}

impl<M: Measure> OverflowTip<M> {
    /// Create the widget and take an initial measurement.
    pub fn new(text: impl Into<String>, measure: M) -> Self {
        let text = text.into();
        let extent = measure.extent(&text);
        Self {
            text,
            measure,
            extent,
        }
    }

    /// Full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and re-measure.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.measure();
    }

    /// Last measurement.
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The injected measure.
    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measure
    }

    /// Whether the last measurement found the text clipped.
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        self.extent.overflows()
    }

    /// Tooltip text, present only while the text overflows.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.is_overflowing().then_some(self.text.as_str())
    }

    /// Re-run the measurement. Returns whether the text overflows.
    pub fn measure(&mut self) -> bool {
        let extent = self.measure.extent(&self.text);
        if extent != self.extent {
            trace!(
                content = extent.content_width,
                visible = extent.visible_width,
                "overflow tip re-measured"
            );
        }
        self.extent = extent;
        extent.overflows()
    }

    /// React to viewport changes. Returns whether the overflow state flipped.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let _span = tracing::debug_span!("widget_event", widget = "OverflowTip").entered();
        match *event {
            Event::Resize { width, height } => {
                let before = self.is_overflowing();
                self.measure.resize(width, height);
                self.measure() != before
            }
            _ => false,
        }
    }

    /// Lay out the text for the last measured container.
    #[must_use]
    pub fn render(&self, style: &OverflowStyle) -> OverflowRender<'_> {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "OverflowTip",
            w = self.extent.visible_width,
            overflow = self.is_overflowing()
        )
        .entered();

        let width = self.extent.visible_width;
        let lines = if !self.is_overflowing() {
            vec![self.text.clone()]
        } else if style.nowrap {
            vec![clip_line(&self.text, width, style.ellipsis)]
        } else {
            wrap_lines(&self.text, width)
        };

        OverflowRender {
            lines,
            tooltip: self.tooltip(),
            test_id: TEST_ID,
        }
    }
}

fn clip_line(text: &str, width: usize, ellipsis: bool) -> String {
    if !ellipsis {
        return truncate_to_width(text, width).to_string();
    }
    let Some(room) = width.checked_sub(display_width(ELLIPSIS)) else {
        return String::new();
    };
    let mut line = truncate_to_width(text, room).to_string();
    line.push_str(ELLIPSIS);
    line
}

fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = display_width(grapheme);
        if used + w > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push_str(grapheme);
        used += w;
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
