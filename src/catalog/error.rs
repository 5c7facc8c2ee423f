//! Catalog error types

use thiserror::Error;

/// Errors that can occur while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog TOML could not be parsed
    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The same identifier appears more than once in a list
    #[error("Duplicate identifier in catalog: {0}")]
    DuplicateIdentifier(String),

    /// Identifier is empty, contains whitespace, or contains uppercase
    #[error("Invalid identifier in catalog: {0:?}")]
    InvalidIdentifier(String),

    /// A term accepts a modifier but the catalog defines no modifiers
    #[error("Term '{0}' accepts a modifier but the catalog defines none")]
    MissingModifiers(String),

    /// IO error while reading a catalog file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
