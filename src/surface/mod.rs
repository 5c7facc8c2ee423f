//! Editable text surfaces and the insertion contract
//!
//! A surface is whatever part of the host application can receive the
//! composed prefix: either a plain linear text box ([`PlainSurface`]) or a
//! structured editable region ([`EditableRegion`]). The picker only ever
//! talks to the [`Surface`] capability trait, so hosts can supply their own
//! implementations.
//!
//! Surfaces are owned by the host and shared through `Rc<RefCell<_>>`
//! handles; everything runs on one thread inside the host's event loop.

pub mod plain;
pub mod region;

pub use plain::PlainSurface;
pub use region::{EditableRegion, Node, RegionCaret, RegionRange};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Callback invoked with the surface's full text after a committed mutation
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// Shared handle to a surface owned by the host application
pub type SurfaceHandle = Rc<RefCell<dyn Surface>>;

/// Non-owning handle held by the session while a flow is open
pub type WeakSurfaceHandle = Weak<RefCell<dyn Surface>>;

/// Capability interface over the supported surface kinds
pub trait Surface {
    /// Whether the surface is still part of the host's widget tree
    fn is_attached(&self) -> bool;

    /// Mark the surface as removed from the host's widget tree
    fn detach(&mut self);

    /// Whether the surface has no text content
    fn is_empty(&self) -> bool;

    /// Replace the current selection (or splice at the caret) with `text`,
    /// leaving the caret immediately after the inserted text
    fn replace_selection(&mut self, text: &str);

    /// Dispatch one change notification to registered listeners
    fn notify_changed(&mut self);

    /// Register a listener observing content changes
    fn on_change(&mut self, listener: ChangeListener);

    /// The surface's full text content
    fn text(&self) -> String;
}

/// Outcome of an insertion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The text was inserted and one change notification dispatched
    Inserted,
    /// The target is no longer attached; nothing was touched
    DetachedTarget,
}

/// Insert `text` at the surface's caret, replacing any selected range
///
/// Single-shot: the full string appears once, contiguously, followed by
/// exactly one change notification. A detached target makes this a no-op;
/// the function never panics and never propagates an error to the host.
pub fn insert(surface: &mut dyn Surface, text: &str) -> InsertOutcome {
    if !surface.is_attached() {
        return InsertOutcome::DetachedTarget;
    }
    surface.replace_selection(text);
    surface.notify_changed();
    InsertOutcome::Inserted
}
