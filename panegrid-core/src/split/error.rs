//! Error types for split view operations

/// Errors that can occur during split view operations.
///
/// The first group are user no-ops: the operation did nothing and the
/// layout is unchanged. The second group covers structural persistence.
/// Internal invariant violations are not represented here — they are bugs
/// in the tree transforms and surface as panics.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// No pane is currently focused.
    #[error("no pane is currently focused")]
    NoFocusedPane,

    /// No content factory has been registered.
    #[error("no content factory is registered")]
    NoContentFactory,

    /// Cannot remove the last pane in a layout.
    #[error("cannot remove the last pane")]
    CannotRemoveLastPane,

    /// The requested pane is not part of this layout.
    #[error("pane not found in this layout")]
    PaneNotFound,

    /// A multi-way split needs at least two sizes.
    #[error("a multi-way split needs at least two sizes, got {0}")]
    TooFewSizes(usize),

    /// A slot weight must be a positive finite number.
    #[error("invalid slot weight: {0} (must be positive and finite)")]
    InvalidWeight(f64),

    /// A layout description failed structural validation before loading.
    #[error("invalid layout description: {0}")]
    InvalidLayoutDescription(String),

    /// A snapshot was written by an incompatible format version.
    #[error("unsupported layout snapshot version: expected {expected}, got {actual}")]
    UnsupportedSnapshotVersion {
        /// Version this build reads and writes.
        expected: u32,
        /// Version found in the snapshot.
        actual: u32,
    },

    /// Serialization to JSON failed.
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),

    /// Deserialization from JSON failed.
    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),

    /// I/O error while reading or writing a snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
