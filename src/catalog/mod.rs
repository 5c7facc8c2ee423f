//! Static catalog of selectable prefix terms and modifiers
//!
//! The catalog is configuration supplied at startup: either the built-in
//! conventional-comments set or a TOML document provided by the host
//! application. It is immutable once constructed; the session only ever
//! reads from it.

pub mod error;

pub use error::{CatalogError, Result};

use crate::matcher::Candidate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A top-level selectable prefix term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Unique key, lowercase, no whitespace (e.g. "suggestion")
    pub identifier: String,
    /// Human-readable description shown next to the identifier
    pub description: String,
    /// Whether choosing this term opens the modifier phase
    #[serde(default)]
    pub accepts_modifier: bool,
}

impl Term {
    /// Create a new term
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        description: impl Into<String>,
        accepts_modifier: bool,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
            accepts_modifier,
        }
    }
}

/// A secondary qualifier selectable after a term that accepts one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    /// Unique key (e.g. "non-blocking")
    pub identifier: String,
    /// Human-readable description shown next to the identifier
    pub description: String,
}

impl Modifier {
    /// Create a new modifier
    #[must_use]
    pub fn new(identifier: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
        }
    }
}

impl Candidate for Term {
    fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl Candidate for Modifier {
    fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// The full set of selectable terms and modifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Primary terms, in display order
    #[serde(rename = "term", default)]
    pub terms: Vec<Term>,
    /// Modifiers, in display order
    #[serde(rename = "modifier", default)]
    pub modifiers: Vec<Modifier>,
}

impl Catalog {
    /// The built-in conventional-comments catalog
    #[must_use]
    pub fn conventional() -> Self {
        Self {
            terms: vec![
                Term::new(
                    "praise",
                    "Praises highlight something positive. Always try to leave at least one sincere praise per review.",
                    false,
                ),
                Term::new(
                    "nitpick",
                    "Trivial, preference-based requests. Always non-blocking.",
                    false,
                ),
                Term::new(
                    "suggestion",
                    "Proposes a clear improvement. Can include modifiers.",
                    true,
                ),
                Term::new(
                    "issue",
                    "Highlights a concrete problem. Often paired with a suggestion. Can include modifiers.",
                    true,
                ),
                Term::new("todo", "Small, trivial but necessary changes.", false),
                Term::new(
                    "question",
                    "Asks for clarification or raises a potential concern. Can include modifiers.",
                    true,
                ),
                Term::new(
                    "thought",
                    "A non-blocking idea that came up during review. Can include modifiers.",
                    true,
                ),
                Term::new(
                    "chore",
                    "A simple, required task linked to process. Can include modifiers.",
                    true,
                ),
                Term::new("note", "A non-blocking remark for awareness.", false),
                Term::new("typo", "Notes a spelling error. Like a todo.", false),
                Term::new(
                    "polish",
                    "A suggestion to improve quality, even if nothing is broken.",
                    false,
                ),
            ],
            modifiers: vec![
                Modifier::new("blocking", "Must be resolved before approval."),
                Modifier::new("non-blocking", "Should not block merging."),
                Modifier::new("if-minor", "Should only be resolved if the change is minor."),
            ],
        }
    }

    /// Parse a catalog from a TOML document
    ///
    /// The document consists of `[[term]]` and `[[modifier]]` tables:
    ///
    /// ```toml
    /// [[term]]
    /// identifier = "suggestion"
    /// description = "Proposes a clear improvement."
    /// accepts_modifier = true
    ///
    /// [[modifier]]
    /// identifier = "blocking"
    /// description = "Must be resolved before approval."
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or the catalog fails
    /// validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(toml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate identifier rules and cross-references
    fn validate(&self) -> Result<()> {
        let mut seen = Vec::new();
        for term in &self.terms {
            Self::check_identifier(&term.identifier)?;
            if seen.contains(&term.identifier.as_str()) {
                return Err(CatalogError::DuplicateIdentifier(term.identifier.clone()));
            }
            seen.push(&term.identifier);
        }

        seen.clear();
        for modifier in &self.modifiers {
            Self::check_identifier(&modifier.identifier)?;
            if seen.contains(&modifier.identifier.as_str()) {
                return Err(CatalogError::DuplicateIdentifier(modifier.identifier.clone()));
            }
            seen.push(&modifier.identifier);
        }

        if self.modifiers.is_empty()
            && let Some(term) = self.terms.iter().find(|t| t.accepts_modifier)
        {
            return Err(CatalogError::MissingModifiers(term.identifier.clone()));
        }

        Ok(())
    }

    /// Identifiers must be non-empty, lowercase, and free of whitespace
    fn check_identifier(identifier: &str) -> Result<()> {
        let valid = !identifier.is_empty()
            && !identifier.chars().any(|c| c.is_whitespace() || c.is_uppercase());
        if valid {
            Ok(())
        } else {
            Err(CatalogError::InvalidIdentifier(identifier.to_string()))
        }
    }

    /// Look up a term by identifier
    #[must_use]
    pub fn term(&self, identifier: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.identifier == identifier)
    }

    /// Look up a modifier by identifier
    #[must_use]
    pub fn modifier(&self, identifier: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.identifier == identifier)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::conventional()
    }
}
