//! Logging and debugging facilities for scrollkit.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - [`ListingDebug`], a text dump of a recycling view's slots and items
//!
//! # Tracing Integration
//!
//! scrollkit uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("scrollkit=debug,scrollkit_core=info")
//!     .init();
//! ```

use std::fmt::Write as FmtWrite;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "scrollkit_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "scrollkit_core::signal";
    /// Property sync target.
    pub const SYNC: &str = "scrollkit_core::sync";
    /// Viewport geometry tracking.
    pub const VIEWPORT: &str = "scrollkit::viewport";
    /// Slot pool growth and shrink.
    pub const SLOTS: &str = "scrollkit::slots";
    /// Item creation and removal.
    pub const RECYCLER: &str = "scrollkit::recycler";
    /// Population scheduling.
    pub const SCHEDULER: &str = "scrollkit::scheduler";
    /// Scroll view facade (generation requests, scroll events, lifecycle).
    pub const VIEW: &str = "scrollkit::view";
}

/// Read-only access to the state of a recycling view, for debugging.
pub trait ListingSource {
    /// Number of layout slots currently in the pool.
    fn slot_count(&self) -> usize;

    /// Number of records in the data source.
    fn data_len(&self) -> usize;

    /// Name of the population phase the view is in.
    fn phase_name(&self) -> &'static str;

    /// Indices that currently have an item bound, in ascending order, with a
    /// short label for each item.
    fn bound_items(&self) -> Vec<(usize, String)>;
}

/// Style options for listing visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Formats a [`ListingSource`] as human-readable text.
#[derive(Debug, Clone, Default)]
pub struct ListingDebug {
    style: TreeStyle,
    /// Show at most this many bound items (`None` for all).
    max_items: Option<usize>,
}

impl ListingDebug {
    /// Create a formatter with the default (Unicode) style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given tree style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Limit the number of bound items listed.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Format the listing.
    pub fn format(&self, source: &dyn ListingSource) -> String {
        let items = source.bound_items();
        let mut output = String::new();

        if self.style == TreeStyle::Compact {
            let indices: Vec<String> = items.iter().map(|(index, _)| index.to_string()).collect();
            let _ = write!(
                output,
                "{} slots={}/{} bound=[{}]",
                source.phase_name(),
                source.slot_count(),
                source.data_len(),
                indices.join(",")
            );
            return output;
        }

        let _ = writeln!(
            output,
            "Listing ({}, {} slots for {} records, {} bound):",
            source.phase_name(),
            source.slot_count(),
            source.data_len(),
            items.len()
        );

        if items.is_empty() {
            let _ = writeln!(output, "  (empty)");
            return output;
        }

        let shown = self.max_items.unwrap_or(items.len()).min(items.len());
        for (position, (index, label)) in items.iter().take(shown).enumerate() {
            let is_last = position + 1 == shown && shown == items.len();
            let branch = match (self.style, is_last) {
                (TreeStyle::Ascii, false) => "|-- ",
                (TreeStyle::Ascii, true) => "`-- ",
                (_, false) => "├── ",
                (_, true) => "└── ",
            };
            let _ = writeln!(output, "{branch}[{index}] {label}");
        }
        if shown < items.len() {
            let _ = writeln!(output, "... {} more", items.len() - shown);
        }

        output
    }
}
