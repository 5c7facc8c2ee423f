//! Two-phase selection state machine
//!
//! Owns the one selection flow that can exist at a time: which phase it is
//! in, the query, the highlight, the filtered candidate list, and a weak
//! handle to the target surface. The session holds no reference to the
//! overlay or the terminal; the picker drives it and renders its state.

use crate::catalog::{Catalog, Term};
use crate::matcher;
use crate::surface::{self, InsertOutcome, SurfaceHandle, WeakSurfaceHandle};
use std::rc::Rc;

/// Phase of the selection flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No flow in progress
    #[default]
    Idle,
    /// Choosing a primary term
    Primary,
    /// Choosing a modifier for the already-chosen term
    Modifier,
}

/// What resolving a candidate produced
pub enum Resolution {
    /// Nothing resolved; state unchanged
    None,
    /// A term accepting a modifier was chosen; the modifier list is now active
    ModifierPhase,
    /// The flow finished and the composed prefix was handed to the inserter
    Finalized {
        /// The composed prefix text
        text: String,
        /// Whether the insertion reached an attached surface
        outcome: InsertOutcome,
        /// The target surface, if still attached, for the host to refocus
        refocus: Option<SurfaceHandle>,
    },
}

/// The single selection session
///
/// Invariants: the chosen term is `Some` iff the phase is `Modifier`, and
/// the highlight always indexes the filtered list unless that list is empty.
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    target: Option<WeakSurfaceHandle>,
    chosen: Option<Term>,
    query: String,
    highlight: usize,
    filtered: Vec<usize>,
}

impl Session {
    /// Create an idle session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a flow is in progress
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Current query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Index of the highlighted row in the filtered list
    #[must_use]
    pub const fn highlight(&self) -> usize {
        self.highlight
    }

    /// Indices into the active phase's catalog list, in catalog order
    #[must_use]
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Identifier of the term chosen in the primary phase, if any
    #[must_use]
    pub fn chosen_identifier(&self) -> Option<&str> {
        self.chosen.as_ref().map(|t| t.identifier.as_str())
    }

    /// Open the flow on `target` with the full primary list
    ///
    /// Returns false (and changes nothing) unless the session is idle.
    pub fn open(&mut self, catalog: &Catalog, target: &SurfaceHandle) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Primary;
        self.target = Some(Rc::downgrade(target));
        self.chosen = None;
        self.query.clear();
        self.highlight = 0;
        self.filtered = matcher::matching_indices("", &catalog.terms);
        true
    }

    /// Replace the query and re-filter the active phase's list
    ///
    /// The highlight always resets to the first visible row.
    pub fn set_query(&mut self, catalog: &Catalog, query: impl Into<String>) {
        if self.phase == Phase::Idle {
            return;
        }
        self.query = query.into();
        self.refilter(catalog);
    }

    /// Append one character to the query
    pub fn push_query_char(&mut self, catalog: &Catalog, c: char) {
        if self.phase == Phase::Idle {
            return;
        }
        self.query.push(c);
        self.refilter(catalog);
    }

    /// Remove the last character of the query
    pub fn pop_query_char(&mut self, catalog: &Catalog) {
        if self.phase == Phase::Idle {
            return;
        }
        self.query.pop();
        self.refilter(catalog);
    }

    fn refilter(&mut self, catalog: &Catalog) {
        self.filtered = match self.phase {
            Phase::Idle => Vec::new(),
            Phase::Primary => matcher::matching_indices(&self.query, &catalog.terms),
            Phase::Modifier => matcher::matching_indices(&self.query, &catalog.modifiers),
        };
        self.highlight = 0;
    }

    /// Move the highlight by `delta`, wrapping around both ends
    pub fn move_highlight(&mut self, delta: i32) {
        let count = self.filtered.len();
        if count == 0 {
            return;
        }
        let next = (self.highlight as i64 + i64::from(delta)).rem_euclid(count as i64);
        self.highlight = next as usize;
    }

    /// Resolve the currently highlighted candidate
    ///
    /// No-op when the filtered list is empty.
    pub fn choose_highlighted(&mut self, catalog: &Catalog) -> Resolution {
        if self.filtered.is_empty() {
            return Resolution::None;
        }
        self.resolve(catalog, self.highlight)
    }

    /// Resolve a candidate by identifier, as clicked in the rendered list
    ///
    /// The identifier must still be present in the filtered list; a stale
    /// identifier (filtered out since the row was rendered) is rejected
    /// silently.
    pub fn choose(&mut self, catalog: &Catalog, identifier: &str) -> Resolution {
        let position = self.filtered.iter().position(|&idx| match self.phase {
            Phase::Idle => false,
            Phase::Primary => catalog
                .terms
                .get(idx)
                .is_some_and(|t| t.identifier == identifier),
            Phase::Modifier => catalog
                .modifiers
                .get(idx)
                .is_some_and(|m| m.identifier == identifier),
        });
        match position {
            Some(position) => self.resolve(catalog, position),
            None => Resolution::None,
        }
    }

    fn resolve(&mut self, catalog: &Catalog, position: usize) -> Resolution {
        let Some(&idx) = self.filtered.get(position) else {
            return Resolution::None;
        };
        match self.phase {
            Phase::Idle => Resolution::None,
            Phase::Primary => {
                let Some(term) = catalog.terms.get(idx) else {
                    return Resolution::None;
                };
                if term.accepts_modifier {
                    self.chosen = Some(term.clone());
                    self.phase = Phase::Modifier;
                    self.query.clear();
                    self.highlight = 0;
                    self.filtered = matcher::matching_indices("", &catalog.modifiers);
                    Resolution::ModifierPhase
                } else {
                    let identifier = term.identifier.clone();
                    self.finalize(&identifier, None)
                }
            }
            Phase::Modifier => {
                let Some(modifier) = catalog.modifiers.get(idx) else {
                    return Resolution::None;
                };
                let Some(term) = self.chosen.clone() else {
                    return Resolution::None;
                };
                let modifier = modifier.identifier.clone();
                self.finalize(&term.identifier, Some(&modifier))
            }
        }
    }

    /// Compose the prefix, insert it, and reset regardless of the outcome
    fn finalize(&mut self, primary: &str, modifier: Option<&str>) -> Resolution {
        let text = compose_prefix(primary, modifier);
        let target = self.target.take().and_then(|weak| weak.upgrade());
        let outcome = match &target {
            Some(handle) => surface::insert(&mut *handle.borrow_mut(), &text),
            None => InsertOutcome::DetachedTarget,
        };
        let refocus = target.filter(|_| outcome == InsertOutcome::Inserted);
        self.reset();
        Resolution::Finalized {
            text,
            outcome,
            refocus,
        }
    }

    /// Abandon the flow without inserting
    ///
    /// Returns the target surface for the host to refocus, unless it has
    /// been detached in the meantime (refocus is skipped, not attempted).
    pub fn cancel(&mut self) -> Option<SurfaceHandle> {
        let target = self
            .target
            .take()
            .and_then(|weak| weak.upgrade())
            .filter(|handle| handle.borrow().is_attached());
        self.reset();
        target
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.target = None;
        self.chosen = None;
        self.query.clear();
        self.highlight = 0;
        self.filtered.clear();
    }
}

/// Compose the inserted prefix string
///
/// `"**{primary}:** "` without a modifier, `"**{primary} ({modifier}):** "`
/// with one. The trailing space is significant: it separates the prefix
/// from whatever the user types next.
#[must_use]
pub fn compose_prefix(primary: &str, modifier: Option<&str>) -> String {
    match modifier {
        Some(modifier) => format!("**{primary} ({modifier}):** "),
        None => format!("**{primary}:** "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PlainSurface;
    use crate::testing::RecordingSurface;
    use std::cell::RefCell;

    fn plain_target() -> (Rc<RefCell<PlainSurface>>, SurfaceHandle) {
        let surface = Rc::new(RefCell::new(PlainSurface::new()));
        let handle: SurfaceHandle = surface.clone();
        (surface, handle)
    }

    #[test]
    fn test_compose_prefix() {
        assert_eq!(compose_prefix("nitpick", None), "**nitpick:** ");
        assert_eq!(
            compose_prefix("issue", Some("blocking")),
            "**issue (blocking):** "
        );
    }

    #[test]
    fn test_open_requires_idle() {
        let catalog = Catalog::conventional();
        let (_surface, handle) = plain_target();
        let mut session = Session::new();

        assert!(session.open(&catalog, &handle));
        assert_eq!(session.phase(), Phase::Primary);
        assert_eq!(session.filtered().len(), catalog.terms.len());
        assert_eq!(session.highlight(), 0);

        // Re-entrant open is rejected
        assert!(!session.open(&catalog, &handle));
    }

    #[test]
    fn test_query_change_resets_highlight() {
        let catalog = Catalog::conventional();
        let (_surface, handle) = plain_target();
        let mut session = Session::new();
        session.open(&catalog, &handle);

        session.move_highlight(3);
        assert_eq!(session.highlight(), 3);

        session.push_query_char(&catalog, 'i');
        assert_eq!(session.highlight(), 0);
        assert!(!session.filtered().is_empty());
    }

    #[test]
    fn test_move_highlight_wraps_both_ways() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[term]]
            identifier = "a"
            description = "1"
            [[term]]
            identifier = "b"
            description = "2"
            [[term]]
            identifier = "c"
            description = "3"
            [[term]]
            identifier = "d"
            description = "4"
            [[term]]
            identifier = "e"
            description = "5"
            "#,
        )
        .unwrap();
        let (_surface, handle) = plain_target();
        let mut session = Session::new();
        session.open(&catalog, &handle);

        session.move_highlight(-1);
        assert_eq!(session.highlight(), 4);
        session.move_highlight(1);
        assert_eq!(session.highlight(), 0);
    }

    #[test]
    fn test_choose_plain_term_inserts_and_resets() {
        let catalog = Catalog::conventional();
        let (surface, handle) = plain_target();
        let mut session = Session::new();
        session.open(&catalog, &handle);
        session.set_query(&catalog, "nitpick");

        let resolution = session.choose_highlighted(&catalog);
        match resolution {
            Resolution::Finalized {
                text,
                outcome,
                refocus,
            } => {
                assert_eq!(text, "**nitpick:** ");
                assert_eq!(outcome, InsertOutcome::Inserted);
                assert!(refocus.is_some());
            }
            _ => panic!("expected finalization"),
        }
        assert_eq!(surface.borrow().value(), "**nitpick:** ");
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.chosen_identifier().is_none());
    }

    #[test]
    fn test_choose_modifier_term_advances_without_mutating() {
        let catalog = Catalog::conventional();
        let (surface, handle) = plain_target();
        let mut session = Session::new();
        session.open(&catalog, &handle);
        session.set_query(&catalog, "suggestion");

        let resolution = session.choose_highlighted(&catalog);
        assert!(matches!(resolution, Resolution::ModifierPhase));
        assert_eq!(session.phase(), Phase::Modifier);
        assert_eq!(session.chosen_identifier(), Some("suggestion"));
        assert_eq!(session.query(), "");
        assert_eq!(session.filtered().len(), catalog.modifiers.len());
        assert!(surface.borrow().value().is_empty());
    }

    #[test]
    fn test_modifier_phase_finalizes_with_both_identifiers() {
        let catalog = Catalog::conventional();
        let (surface, handle) = plain_target();
        let mut session = Session::new();
        session.open(&catalog, &handle);
        session.set_query(&catalog, "issue");
        session.choose_highlighted(&catalog);

        session.set_query(&catalog, "block");
        let resolution = session.choose_highlighted(&catalog);
        match resolution {
            Resolution::Finalized { text, .. } => assert_eq!(text, "**issue (blocking):** "),
            _ => panic!("expected finalization"),
        }
        assert_eq!(surface.borrow().value(), "**issue (blocking):** ");
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_choose_with_empty_list_is_noop() {
        let catalog = Catalog::conventional();
        let (_surface, handle) = plain_target();
        let mut session = Session::new();
        session.open(&catalog, &handle);
        session.set_query(&catalog, "zzz");

        assert!(session.filtered().is_empty());
        assert!(matches!(
            session.choose_highlighted(&catalog),
            Resolution::None
        ));
        assert_eq!(session.phase(), Phase::Primary);
    }

    #[test]
    fn test_stale_identifier_is_rejected() {
        let catalog = Catalog::conventional();
        let (surface, handle) = plain_target();
        let mut session = Session::new();
        session.open(&catalog, &handle);

        // "praise" was visible, then the query filtered it out
        session.set_query(&catalog, "issue");
        assert!(matches!(
            session.choose(&catalog, "praise"),
            Resolution::None
        ));
        assert_eq!(session.phase(), Phase::Primary);
        assert!(surface.borrow().value().is_empty());

        // A still-visible identifier resolves normally
        assert!(matches!(
            session.choose(&catalog, "issue"),
            Resolution::ModifierPhase
        ));
    }

    #[test]
    fn test_cancel_returns_attached_target() {
        let catalog = Catalog::conventional();
        let (surface, handle) = plain_target();
        let mut session = Session::new();
        session.open(&catalog, &handle);

        let refocus = session.cancel();
        assert!(refocus.is_some());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(surface.borrow().value().is_empty());
    }

    #[test]
    fn test_cancel_skips_refocus_for_detached_target() {
        let catalog = Catalog::conventional();
        let surface = Rc::new(RefCell::new(RecordingSurface::new()));
        let handle: SurfaceHandle = surface.clone();
        let mut session = Session::new();
        session.open(&catalog, &handle);

        surface.borrow_mut().attached = false;
        assert!(session.cancel().is_none());
    }

    #[test]
    fn test_finalize_against_dropped_target_is_noop() {
        let catalog = Catalog::conventional();
        let mut session = Session::new();
        {
            let (_surface, handle) = plain_target();
            session.open(&catalog, &handle);
            // both the typed Rc and the handle drop here
        }
        session.set_query(&catalog, "typo");

        let resolution = session.choose_highlighted(&catalog);
        match resolution {
            Resolution::Finalized {
                outcome, refocus, ..
            } => {
                assert_eq!(outcome, InsertOutcome::DetachedTarget);
                assert!(refocus.is_none());
            }
            _ => panic!("expected finalization"),
        }
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_finalize_against_detached_target_inserts_nothing() {
        let catalog = Catalog::conventional();
        let surface = Rc::new(RefCell::new(RecordingSurface::new()));
        let handle: SurfaceHandle = surface.clone();
        let mut session = Session::new();
        session.open(&catalog, &handle);
        surface.borrow_mut().attached = false;
        session.set_query(&catalog, "note");

        let resolution = session.choose_highlighted(&catalog);
        assert!(matches!(
            resolution,
            Resolution::Finalized {
                outcome: InsertOutcome::DetachedTarget,
                ..
            }
        ));
        assert!(surface.borrow().replaced.is_empty());
        assert_eq!(surface.borrow().notifications, 0);
    }
}
