//! Testing utilities
//!
//! Provides a recording surface for asserting exactly what the insertion
//! path did to its target.
//!
//! Only available when compiled with `cfg(test)`.

use crate::surface::{ChangeListener, Surface};
use std::fmt;

/// Surface double that records every mutation made through the trait
///
/// Fields are public so tests can both arrange state (detach, mark
/// non-empty) and assert on what happened.
pub struct RecordingSurface {
    /// Whether the surface reports itself attached
    pub attached: bool,
    /// Whether the surface reports itself empty
    pub empty: bool,
    /// Every text handed to `replace_selection`, in order
    pub replaced: Vec<String>,
    /// How many times `notify_changed` ran
    pub notifications: usize,
    listeners: Vec<ChangeListener>,
}

impl RecordingSurface {
    /// Create an attached, empty recording surface
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: true,
            empty: true,
            replaced: Vec::new(),
            notifications: 0,
            listeners: Vec::new(),
        }
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_empty(&self) -> bool {
        self.empty
    }

    fn replace_selection(&mut self, text: &str) {
        self.replaced.push(text.to_string());
        self.empty = false;
    }

    fn notify_changed(&mut self) {
        self.notifications += 1;
        let contents = self.text();
        for listener in &mut self.listeners {
            listener(&contents);
        }
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    fn text(&self) -> String {
        self.replaced.concat()
    }
}

impl fmt::Debug for RecordingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSurface")
            .field("attached", &self.attached)
            .field("empty", &self.empty)
            .field("replaced", &self.replaced)
            .field("notifications", &self.notifications)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface;

    #[test]
    fn test_recording_surface_tracks_insertions() {
        let mut recording = RecordingSurface::new();
        assert!(recording.is_empty());

        surface::insert(&mut recording, "**note:** ");
        assert_eq!(recording.replaced, vec!["**note:** "]);
        assert_eq!(recording.notifications, 1);
        assert!(!recording.is_empty());
        assert_eq!(recording.text(), "**note:** ");
    }

    #[test]
    fn test_recording_surface_detach() {
        let mut recording = RecordingSurface::new();
        recording.detach();
        assert!(!recording.is_attached());

        surface::insert(&mut recording, "ignored");
        assert!(recording.replaced.is_empty());
        assert_eq!(recording.notifications, 0);
    }
}
