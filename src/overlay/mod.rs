//! Overlay presenter
//!
//! One overlay exists per picker, created once and reused for every flow:
//! the picker shows and hides it by flag, never rebuilds it. Every render
//! call replaces the row contents with the active phase's filtered
//! candidates; the identifiers of the rendered rows are kept on the state
//! as the snapshot that pointer clicks resolve against.

pub mod theme;

pub use theme::Theme;

use crate::catalog::Catalog;
use crate::session::{Phase, Session};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, StatefulWidget, Widget},
};

/// Singleton overlay state, reused across invocations
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    visible: bool,
    /// Popup rect from the last render, for outside-click hit tests
    area: Option<Rect>,
    /// Candidate-list rect from the last render, for row hit tests
    list_area: Option<Rect>,
    /// Identifiers of the rows rendered last, top to bottom
    rows: Vec<String>,
}

impl OverlayState {
    /// Create a hidden overlay
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the overlay visible
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the overlay; the instance survives for the next flow
    pub fn hide(&mut self) {
        self.visible = false;
        self.area = None;
        self.list_area = None;
        self.rows.clear();
    }

    /// Whether the overlay is currently visible
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Popup rect from the last render
    #[must_use]
    pub const fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Candidate-list rect from the last render
    #[must_use]
    pub const fn list_area(&self) -> Option<Rect> {
        self.list_area
    }

    /// Identifiers of the rows rendered last, top to bottom
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Whether a terminal position falls inside the last rendered popup
    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Identifier of the rendered row at a terminal position, if any
    #[must_use]
    pub fn row_identifier_at(&self, column: u16, row: u16) -> Option<&str> {
        let list = self.list_area?;
        if !list.contains(Position::new(column, row)) {
            return None;
        }
        let index = (row - list.y) as usize;
        self.rows.get(index).map(String::as_str)
    }
}

/// Overlay widget rendering the active phase's filtered candidates
///
/// One row per match, the identifier decorated by phase (primary rows carry
/// the trigger character, modifier rows are parenthesized), exactly one row
/// highlighted. The rendered row identifiers and rects are written back to
/// the [`OverlayState`].
pub struct PickerOverlay<'a> {
    session: &'a Session,
    catalog: &'a Catalog,
    theme: &'a Theme,
    trigger: char,
}

impl<'a> PickerOverlay<'a> {
    /// Create the overlay widget for one render pass
    #[must_use]
    pub const fn new(
        session: &'a Session,
        catalog: &'a Catalog,
        theme: &'a Theme,
        trigger: char,
    ) -> Self {
        Self {
            session,
            catalog,
            theme,
            trigger,
        }
    }

    /// Centered popup rect sized to the candidate list
    fn popup_area(&self, area: Rect) -> Rect {
        let rows = self.session.filtered().len() as u16;
        // borders + query line + hint line around the list
        let height = rows.saturating_add(4).clamp(5, area.height.saturating_sub(2).max(5));
        let width = area.width.saturating_sub(2).clamp(1, 64);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 3;
        Rect::new(x, y, width, height)
    }

    /// Decorated label and description for the candidate at catalog index
    fn row_content(&self, idx: usize) -> Option<(String, String, &'a str)> {
        match self.session.phase() {
            Phase::Idle => None,
            Phase::Primary => self.catalog.terms.get(idx).map(|term| {
                (
                    term.identifier.clone(),
                    format!("{}{}", self.trigger, term.identifier),
                    term.description.as_str(),
                )
            }),
            Phase::Modifier => self.catalog.modifiers.get(idx).map(|modifier| {
                (
                    modifier.identifier.clone(),
                    format!("({})", modifier.identifier),
                    modifier.description.as_str(),
                )
            }),
        }
    }

    fn title(&self) -> String {
        match self.session.phase() {
            Phase::Modifier => match self.session.chosen_identifier() {
                Some(chosen) => format!(" {}{} modifier ", self.trigger, chosen),
                None => " Modifier ".to_string(),
            },
            _ => " Prefix ".to_string(),
        }
    }

    fn hint(&self) -> &'static str {
        match self.session.phase() {
            Phase::Modifier => "Enter inserts with modifier. Esc cancels.",
            _ => "Type to filter. Enter to choose. Esc to cancel.",
        }
    }

    fn render_query(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled("> ", self.theme.dimmed_style())];
        if !self.session.query().is_empty() {
            spans.push(Span::raw(self.session.query().to_string()));
        }
        spans.push(Span::styled(
            "│",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer, state: &mut OverlayState) {
        state.list_area = Some(area);
        state.rows.clear();

        let visible = area.height as usize;
        // Window the list so the highlighted row is always on screen.
        let first = self
            .session
            .highlight()
            .saturating_sub(visible.saturating_sub(1));
        let items: Vec<ListItem> = self
            .session
            .filtered()
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .filter_map(|(pos, &idx)| {
                let (identifier, label, description) = self.row_content(idx)?;
                state.rows.push(identifier);

                let highlighted = pos == self.session.highlight();
                let label_style = if highlighted {
                    self.theme.highlight_style()
                } else {
                    self.theme.identifier_style()
                };
                let line = Line::from(vec![
                    Span::styled(label, label_style),
                    Span::raw("  "),
                    Span::styled(
                        description.to_string(),
                        self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
                    ),
                ]);
                let item = ListItem::new(line);
                Some(if highlighted {
                    item.style(self.theme.highlight_style())
                } else {
                    item.style(self.theme.normal_style())
                })
            })
            .collect();

        Widget::render(List::new(items), area, buf);
    }
}

impl StatefulWidget for PickerOverlay<'_> {
    type State = OverlayState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut OverlayState) {
        if !state.visible {
            return;
        }

        let popup = self.popup_area(area);
        state.area = Some(popup);

        Clear.render(popup, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title())
            .title_alignment(Alignment::Center);
        let inner = block.inner(popup);
        block.render(popup, buf);

        if inner.height < 3 {
            state.list_area = None;
            state.rows.clear();
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        self.render_query(chunks[0], buf);
        self.render_list(chunks[1], buf, state);
        Paragraph::new(Line::styled(self.hint(), self.theme.dimmed_style())).render(chunks[2], buf);
    }
}
