//! Core type definitions for the split view system
//!
//! This module contains the fundamental identifier types, enums and
//! constants used throughout the split view system.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weight assigned to a freshly created slot.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Tolerance used when comparing slot weights.
///
/// Weights are star sizes: only their ratios within a container are
/// meaningful, and redistribution on remove accumulates floating error.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Returns true if two weights are equal within [`WEIGHT_EPSILON`].
#[must_use]
pub fn weights_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < WEIGHT_EPSILON
}

/// Direction along which a container subdivides its slot.
///
/// The names follow the grid convention: splitting `Horizontally` works on
/// columns (panes end up side by side), splitting `Vertically` works on
/// rows (panes end up stacked). A container has exactly one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitDirection {
    /// Split into columns, arranging panes left to right.
    Horizontally,
    /// Split into rows, arranging panes top to bottom.
    Vertically,
}

impl SplitDirection {
    /// Returns the other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Horizontally => Self::Vertically,
            Self::Vertically => Self::Horizontally,
        }
    }
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontally => write!(f, "Horizontally"),
            Self::Vertically => write!(f, "Vertically"),
        }
    }
}

/// Ready-made content handle for hosts that do not bring their own.
///
/// The manager is generic over any `Copy + Eq + Hash + Debug` handle type;
/// `ContentId` is the default choice, a random UUID with stable identity
/// for the lifetime of the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub Uuid);

impl ContentId {
    /// Creates a new random content ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a content ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Content({})", self.0)
    }
}
