//! Convkeys - a slash-triggered prefix picker for terminal text surfaces
//!
//! Typing the trigger character into an empty, focused text surface opens a
//! filterable overlay of conventional comment terms. Choosing a term either
//! inserts its formatted prefix directly or, for terms that accept one,
//! opens a second overlay of modifiers before inserting. The composed
//! prefix lands in the surface with the caret placed after it, ready for
//! the comment body.
//!
//! The crate is a library for ratatui hosts: construct a [`PrefixPicker`],
//! feed it every crossterm event together with the focused surface, and
//! render it after your own widgets each frame.

use thiserror::Error;

pub mod catalog;
pub mod matcher;
pub mod overlay;
pub mod picker;
pub mod session;
pub mod surface;

#[cfg(test)]
pub mod testing;

pub use catalog::{Catalog, Modifier, Term};
pub use overlay::{OverlayState, PickerOverlay, Theme};
pub use picker::{DEFAULT_TRIGGER, EventOutcome, PrefixPicker};
pub use session::{Phase, Resolution, Session, compose_prefix};
pub use surface::{
    EditableRegion, InsertOutcome, PlainSurface, Surface, SurfaceHandle, WeakSurfaceHandle,
};

/// Error enum, contains all failure states of the crate
#[derive(Debug, Error)]
pub enum ConvkeysError {
    /// Catalog error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
}

/// Convenience alias for results using [`ConvkeysError`]
pub type Result<T> = std::result::Result<T, ConvkeysError>;
