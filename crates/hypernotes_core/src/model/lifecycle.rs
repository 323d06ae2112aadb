//! Soft-delete lifecycle tag.

use serde::{Deserialize, Serialize};

/// Visibility state of a page or task.
///
/// Persisted as the `is_deleted` integer column (`0` active, `1` deleted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Shown in normal views.
    #[default]
    Active,
    /// Hidden from normal views, listed in the bin, restorable.
    Deleted,
}

impl Lifecycle {
    /// Integer stored in the `is_deleted` column.
    pub fn to_db(self) -> i64 {
        match self {
            Self::Active => 0,
            Self::Deleted => 1,
        }
    }

    /// Parses the `is_deleted` column; anything but `0`/`1` is rejected.
    pub fn from_db(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Active),
            1 => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}
