//! Structured editable region surface
//!
//! Models the second supported surface kind: an ordered list of content
//! nodes with a live selection range, as found in rich message composers.
//! Insertion follows the region's own editing rules: delete the range
//! contents, insert one text node, collapse the selection after it.

use super::{ChangeListener, Surface};
use std::fmt;

/// One node of an editable region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of text
    Text(String),
    /// A hard line break
    Break,
}

impl Node {
    /// Length of the node's editable text in bytes (breaks have none)
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Break => 0,
        }
    }

    /// Whether the node carries no editable text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A position inside a region: node index plus byte offset within that node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegionCaret {
    /// Index into the region's node list
    pub node: usize,
    /// Byte offset within the node's text
    pub offset: usize,
}

impl RegionCaret {
    /// Create a new position
    #[must_use]
    pub const fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A live selection range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRange {
    /// Anchor of the range
    pub start: RegionCaret,
    /// Focus of the range
    pub end: RegionCaret,
}

impl RegionRange {
    /// Create a range between two positions
    #[must_use]
    pub const fn new(start: RegionCaret, end: RegionCaret) -> Self {
        Self { start, end }
    }

    /// Create a collapsed range (a caret)
    #[must_use]
    pub const fn collapsed(at: RegionCaret) -> Self {
        Self { start: at, end: at }
    }

    /// The range with start and end in document order
    #[must_use]
    pub fn ordered(self) -> (RegionCaret, RegionCaret) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// Whether the range is a caret
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A structured editable region
pub struct EditableRegion {
    nodes: Vec<Node>,
    range: Option<RegionRange>,
    attached: bool,
    listeners: Vec<ChangeListener>,
}

impl EditableRegion {
    /// Create an empty region with no active selection
    #[must_use]
    pub fn new() -> Self {
        Self::with_nodes(Vec::new())
    }

    /// Create a region with initial content and no active selection
    #[must_use]
    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            range: None,
            attached: true,
            listeners: Vec::new(),
        }
    }

    /// The region's nodes, in order
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The active selection range, if any
    #[must_use]
    pub const fn range(&self) -> Option<RegionRange> {
        self.range
    }

    /// Set the active selection range; positions are clamped
    pub fn select(&mut self, range: RegionRange) {
        let start = self.clamp_caret(range.start);
        let end = self.clamp_caret(range.end);
        self.range = Some(RegionRange::new(start, end));
    }

    /// Drop the active selection
    pub fn clear_selection(&mut self) {
        self.range = None;
    }

    /// The caret position if the selection is collapsed
    #[must_use]
    pub fn caret(&self) -> Option<RegionCaret> {
        self.range.filter(RegionRange::is_collapsed).map(|r| r.start)
    }

    fn clamp_caret(&self, caret: RegionCaret) -> RegionCaret {
        if self.nodes.is_empty() {
            return RegionCaret::new(0, 0);
        }
        let node = caret.node.min(self.nodes.len() - 1);
        let mut offset = caret.offset.min(self.nodes[node].len());
        if let Node::Text(text) = &self.nodes[node] {
            while !text.is_char_boundary(offset) {
                offset -= 1;
            }
        }
        RegionCaret::new(node, offset)
    }

    /// Remove the contents of `range`, returning the collapse point
    ///
    /// Boundary nodes are trimmed, nodes strictly between them are removed.
    /// A break at a boundary survives (its length is zero).
    fn delete_contents(&mut self, range: RegionRange) -> RegionCaret {
        let (start, end) = range.ordered();
        let start = self.clamp_caret(start);
        let end = self.clamp_caret(end);
        if start == end {
            return start;
        }

        if start.node == end.node {
            if let Some(Node::Text(text)) = self.nodes.get_mut(start.node) {
                text.drain(start.offset..end.offset);
            }
            return start;
        }

        if let Some(Node::Text(text)) = self.nodes.get_mut(start.node) {
            text.truncate(start.offset);
        }
        if let Some(Node::Text(text)) = self.nodes.get_mut(end.node) {
            text.drain(..end.offset);
        }
        self.nodes.drain(start.node + 1..end.node);
        start
    }

    /// Insert a new text node at `at`, returning its index
    ///
    /// Splits a text node when the position falls strictly inside it.
    fn insert_text_node(&mut self, at: RegionCaret, text: &str) -> usize {
        if at.node >= self.nodes.len() {
            self.nodes.push(Node::Text(text.to_string()));
            return self.nodes.len() - 1;
        }

        let at = self.clamp_caret(at);
        let node_len = self.nodes[at.node].len();
        let idx = if at.offset == 0 {
            at.node
        } else if at.offset >= node_len {
            at.node + 1
        } else {
            if let Node::Text(existing) = &mut self.nodes[at.node] {
                let tail = existing.split_off(at.offset);
                self.nodes.insert(at.node + 1, Node::Text(tail));
            }
            at.node + 1
        };
        self.nodes.insert(idx, Node::Text(text.to_string()));
        idx
    }
}

impl Default for EditableRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for EditableRegion {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_empty(&self) -> bool {
        // Bare line breaks don't count as content, matching textContent
        // semantics of the surfaces this models.
        self.nodes.iter().all(Node::is_empty)
    }

    fn replace_selection(&mut self, text: &str) {
        let at = match self.range {
            Some(range) => self.delete_contents(range),
            // No active range: append at the end of the region's content.
            None => RegionCaret::new(self.nodes.len(), 0),
        };
        let inserted = self.insert_text_node(at, text);
        self.range = Some(RegionRange::collapsed(RegionCaret::new(inserted, text.len())));
    }

    fn notify_changed(&mut self) {
        let contents = self.text();
        for listener in &mut self.listeners {
            listener(&contents);
        }
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Break => out.push('\n'),
            }
        }
        out
    }
}

impl fmt::Debug for EditableRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableRegion")
            .field("nodes", &self.nodes)
            .field("range", &self.range)
            .field("attached", &self.attached)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
