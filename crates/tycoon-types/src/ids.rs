//! Type-safe index wrappers.
//!
//! Participants and positions are both addressed by zero-based indices.
//! Wrapping each in its own newtype keeps a participant index from ever
//! being used to look up a board position (and vice versa).

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around a zero-based `usize` index.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// Wrap a raw zero-based index.
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Return the raw zero-based index.
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            fn from(index: $name) -> Self {
                index.0
            }
        }
    };
}

define_index! {
    /// Zero-based seat number of a participant in the roster.
    ParticipantIndex
}

define_index! {
    /// Zero-based location of a position on the board.
    PositionIndex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_display_is_raw_number() {
        assert_eq!(ParticipantIndex::new(3).to_string(), "3");
        assert_eq!(PositionIndex::new(17).to_string(), "17");
    }

    #[test]
    fn index_serializes_transparently() {
        let json = serde_json::to_string(&PositionIndex::new(5)).ok();
        assert_eq!(json.as_deref(), Some("5"));
    }
}
