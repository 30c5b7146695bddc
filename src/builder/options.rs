//! Build-time configuration.

use serde::{Deserialize, Serialize};

/// Width of the descriptor indexes stored in the dense table.
///
/// The width bounds both the number of cells (`states * events`) and the
/// position of the last `Next` descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexWidth {
    /// One byte per cell, up to 256 cells.
    #[default]
    Narrow,
    /// Two bytes per cell, up to 65536 cells.
    Wide,
}

impl IndexWidth {
    /// Number of cells (and descriptor positions) the width can address.
    pub const fn capacity(self) -> usize {
        match self {
            Self::Narrow => 1 << 8,
            Self::Wide => 1 << 16,
        }
    }
}

/// What to do when two `Next` descriptors fill the same cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Reject the description with `DuplicateTransition`.
    #[default]
    Reject,
    /// Keep the later descriptor.
    LastWriteWins,
}

/// Options for a single table build.
///
/// # Example
///
/// ```rust
/// use fc_fsm::builder::{BuildOptions, DuplicatePolicy, IndexWidth};
///
/// let options: BuildOptions =
///     serde_json::from_str(r#"{ "index_width": "wide", "duplicates": "last_write_wins" }"#).unwrap();
/// assert_eq!(options.index_width, IndexWidth::Wide);
/// assert_eq!(options.duplicates, DuplicatePolicy::LastWriteWins);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub index_width: IndexWidth,
    pub duplicates: DuplicatePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_narrow_and_strict() {
        let options = BuildOptions::default();
        assert_eq!(options.index_width, IndexWidth::Narrow);
        assert_eq!(options.duplicates, DuplicatePolicy::Reject);
    }

    #[test]
    fn capacities_match_index_domains() {
        assert_eq!(IndexWidth::Narrow.capacity(), 256);
        assert_eq!(IndexWidth::Wide.capacity(), 65536);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options: BuildOptions = serde_json::from_str(r#"{ "index_width": "wide" }"#).unwrap();
        assert_eq!(options.index_width, IndexWidth::Wide);
        assert_eq!(options.duplicates, DuplicatePolicy::Reject);
    }
}
