//! Error types for rs-html-query.
//!
//! Structural failures are few: a node that is not part of any document
//! arena, a node owned by another document, a wrap template that has
//! nowhere to nest, and an edit that would move a node inside itself.
//! Everything else (no match, no parent, non-element under an element
//! accessor) is a silent no-op.

/// Error type for selection and mutation operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A supplied value does not address a node of the document tree.
    #[error("Expect an instance of a tree node: {0}")]
    TypeError(String),

    /// A supplied node belongs to a different document handle.
    #[error("The DOM node does not belong to the document")]
    OwnershipError,

    /// A wrap template has no element to nest the target into.
    #[error("Invalid wrap html format: {0}")]
    StructureError(String),

    /// An edit would move a node under itself or one of its descendants.
    #[error("The new child element contains the parent: {0}")]
    HierarchyError(String),

    /// Selector text could not be compiled.
    #[error("Invalid selector: {0}")]
    SelectorError(String),

    /// Reading an HTML file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for selection and mutation operations.
pub type Result<T> = std::result::Result<T, Error>;
