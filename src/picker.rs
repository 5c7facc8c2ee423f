//! Trigger controller wiring terminal events to the selection flow
//!
//! The picker owns the catalog, the session, and the overlay state, and is
//! the only piece the host application talks to: feed it every input event
//! plus the currently focused surface, render it once per frame, and act on
//! the returned [`EventOutcome`].

use crate::catalog::Catalog;
use crate::overlay::{OverlayState, PickerOverlay, Theme};
use crate::session::{Resolution, Session};
use crate::surface::{InsertOutcome, SurfaceHandle};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use std::path::Path;

/// Character that opens the picker when typed into an empty surface
pub const DEFAULT_TRIGGER: char = '/';

/// What the picker did with an event
pub enum EventOutcome {
    /// The event is not for the picker; the host should handle it
    Ignored,
    /// The picker consumed the event
    Consumed,
    /// The flow was abandoned without inserting
    Dismissed {
        /// Surface to refocus, when the target is still attached
        refocus: Option<SurfaceHandle>,
    },
    /// A prefix was composed and inserted into the target surface
    Inserted {
        /// Surface to refocus, carrying the new text and caret
        refocus: Option<SurfaceHandle>,
    },
}

/// The prefix picker: trigger detection, key routing, and pointer dispatch
#[derive(Debug)]
pub struct PrefixPicker {
    catalog: Catalog,
    trigger: char,
    theme: Theme,
    session: Session,
    overlay: OverlayState,
}

impl PrefixPicker {
    /// Create a picker over `catalog` with the default trigger and theme
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            trigger: DEFAULT_TRIGGER,
            theme: Theme::default(),
            session: Session::new(),
            overlay: OverlayState::new(),
        }
    }

    /// Create a picker over a catalog loaded from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_catalog_file(path: &Path) -> crate::Result<Self> {
        Ok(Self::new(Catalog::from_toml_file(path)?))
    }

    /// Use a different trigger character
    #[must_use]
    pub fn with_trigger(mut self, trigger: char) -> Self {
        self.trigger = trigger;
        self
    }

    /// Use a different overlay theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// The catalog the picker selects from
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The selection session, for inspection
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The overlay state, for inspection
    #[must_use]
    pub const fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Whether a selection flow is in progress
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    /// Route one input event
    ///
    /// `focused` is the surface that currently has input focus, if any; it
    /// becomes the insertion target when the trigger fires. While the
    /// overlay is open every key event is captured, so the host must not
    /// also deliver consumed events to its own widgets.
    pub fn handle_event(&mut self, event: &Event, focused: Option<&SurfaceHandle>) -> EventOutcome {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if self.is_open() {
                    self.handle_open_key(key)
                } else {
                    self.handle_idle_key(key, focused)
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => EventOutcome::Ignored,
        }
    }

    /// Render the overlay; call once per frame after the host's own widgets
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_stateful_widget(
            PickerOverlay::new(&self.session, &self.catalog, &self.theme, self.trigger),
            area,
            &mut self.overlay,
        );
    }

    fn handle_idle_key(&mut self, key: &KeyEvent, focused: Option<&SurfaceHandle>) -> EventOutcome {
        if key.code != KeyCode::Char(self.trigger) {
            return EventOutcome::Ignored;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return EventOutcome::Ignored;
        }
        let Some(target) = focused else {
            return EventOutcome::Ignored;
        };
        {
            let surface = target.borrow();
            if !surface.is_attached() || !surface.is_empty() {
                return EventOutcome::Ignored;
            }
        }
        if self.session.open(&self.catalog, target) {
            self.overlay.show();
            EventOutcome::Consumed
        } else {
            EventOutcome::Ignored
        }
    }

    fn handle_open_key(&mut self, key: &KeyEvent) -> EventOutcome {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.dismiss(),
            (KeyCode::Enter, _) => {
                let resolution = self.session.choose_highlighted(&self.catalog);
                self.apply(resolution)
            }
            (KeyCode::Up, _) => {
                self.session.move_highlight(-1);
                EventOutcome::Consumed
            }
            (KeyCode::Down, _) => {
                self.session.move_highlight(1);
                EventOutcome::Consumed
            }
            (KeyCode::Backspace, _) => {
                self.session.pop_query_char(&self.catalog);
                EventOutcome::Consumed
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.session.set_query(&self.catalog, "");
                EventOutcome::Consumed
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.session.push_query_char(&self.catalog, c);
                EventOutcome::Consumed
            }
            // The open overlay captures every remaining key
            _ => EventOutcome::Consumed,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> EventOutcome {
        if !self.overlay.is_visible() {
            return EventOutcome::Ignored;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return EventOutcome::Ignored;
        }
        if !self.overlay.contains(mouse.column, mouse.row) {
            return self.dismiss();
        }
        if let Some(identifier) = self.overlay.row_identifier_at(mouse.column, mouse.row) {
            let identifier = identifier.to_string();
            let resolution = self.session.choose(&self.catalog, &identifier);
            return self.apply(resolution);
        }
        EventOutcome::Consumed
    }

    fn dismiss(&mut self) -> EventOutcome {
        let refocus = self.session.cancel();
        self.overlay.hide();
        EventOutcome::Dismissed { refocus }
    }

    fn apply(&mut self, resolution: Resolution) -> EventOutcome {
        match resolution {
            Resolution::None | Resolution::ModifierPhase => EventOutcome::Consumed,
            Resolution::Finalized {
                outcome, refocus, ..
            } => {
                self.overlay.hide();
                match outcome {
                    InsertOutcome::Inserted => EventOutcome::Inserted { refocus },
                    InsertOutcome::DetachedTarget => EventOutcome::Dismissed { refocus },
                }
            }
        }
    }
}
