//! Plain linear text surface

use super::{ChangeListener, Surface};
use std::fmt;

/// A plain multi-line text box: one linear string plus a selection range
///
/// Offsets are byte positions into the value, clamped to char boundaries.
/// A collapsed selection is the caret.
pub struct PlainSurface {
    value: String,
    selection: (usize, usize),
    attached: bool,
    listeners: Vec<ChangeListener>,
}

impl PlainSurface {
    /// Create an empty surface with the caret at position 0
    #[must_use]
    pub fn new() -> Self {
        Self::with_value("")
    }

    /// Create a surface with initial content and the caret at the end
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let end = value.len();
        Self {
            value,
            selection: (end, end),
            attached: true,
            listeners: Vec::new(),
        }
    }

    /// Current value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the whole value, collapsing the caret to the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        let end = self.value.len();
        self.selection = (end, end);
    }

    /// Set the selection range; offsets are clamped and reordered
    pub fn select(&mut self, start: usize, end: usize) {
        let start = self.clamp(start);
        let end = self.clamp(end);
        self.selection = if start <= end { (start, end) } else { (end, start) };
    }

    /// The selection range as `(start, end)` byte offsets
    #[must_use]
    pub const fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// The caret position (start of the selection)
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.selection.0
    }

    fn clamp(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.value.len());
        while !self.value.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

impl Default for PlainSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for PlainSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn replace_selection(&mut self, text: &str) {
        let (start, end) = self.selection;
        self.value.replace_range(start..end, text);
        let caret = start + text.len();
        self.selection = (caret, caret);
    }

    fn notify_changed(&mut self) {
        let contents = self.value.clone();
        for listener in &mut self.listeners {
            listener(&contents);
        }
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    fn text(&self) -> String {
        self.value.clone()
    }
}

impl fmt::Debug for PlainSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainSurface")
            .field("value", &self.value)
            .field("selection", &self.selection)
            .field("attached", &self.attached)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_caret() {
        let mut surface = PlainSurface::with_value("hello world");
        surface.select(5, 5);
        surface.replace_selection(", dear");

        assert_eq!(surface.value(), "hello, dear world");
        assert_eq!(surface.caret(), 11);
        assert_eq!(surface.selection(), (11, 11));
    }

    #[test]
    fn test_replace_selected_range() {
        let mut surface = PlainSurface::with_value("hello world");
        surface.select(6, 11);
        surface.replace_selection("there");

        assert_eq!(surface.value(), "hello there");
        assert_eq!(surface.caret(), 11);
    }

    #[test]
    fn test_reversed_selection_is_reordered() {
        let mut surface = PlainSurface::with_value("abcdef");
        surface.select(4, 2);
        surface.replace_selection("X");

        assert_eq!(surface.value(), "abXef");
        assert_eq!(surface.caret(), 3);
    }

    #[test]
    fn test_offsets_clamped_to_char_boundaries() {
        // 'é' is two bytes; offset 1 falls inside it
        let mut surface = PlainSurface::with_value("ému");
        surface.select(1, 1);
        assert_eq!(surface.caret(), 0);

        surface.select(99, 99);
        assert_eq!(surface.caret(), surface.value().len());
    }

    #[test]
    fn test_empty_surface_insert() {
        let mut surface = PlainSurface::new();
        assert!(surface.is_empty());

        surface.replace_selection("**praise:** ");
        assert_eq!(surface.value(), "**praise:** ");
        assert!(!surface.is_empty());
        assert_eq!(surface.caret(), surface.value().len());
    }

    #[test]
    fn test_set_value_moves_caret_to_end() {
        let mut surface = PlainSurface::new();
        surface.set_value("abc");
        assert_eq!(surface.caret(), 3);
    }
}
