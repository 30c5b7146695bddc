//! State and event numbers.
//!
//! A state-machine instance is nothing more than a [`StateId`] owned by the
//! caller. Number 0 is reserved in both spaces and always named `"none"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to the reserved state 0 and event 0.
pub const NONE_NAME: &str = "none";

/// Number of a state in a transition table.
///
/// # Example
///
/// ```rust
/// use fc_fsm::core::StateId;
///
/// let ready = StateId::new(2);
/// assert_eq!(ready.get(), 2);
/// assert!(!ready.is_none());
/// assert!(StateId::NONE.is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(u16);

/// Number of an event in a transition table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u16);

macro_rules! impl_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// The reserved sentinel, number 0.
            pub const NONE: Self = Self(0);

            pub const fn new(number: u16) -> Self {
                Self(number)
            }

            pub const fn get(self) -> u16 {
                self.0
            }

            pub const fn is_none(self) -> bool {
                self.0 == 0
            }

            pub(crate) const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u16> for $name {
            fn from(number: u16) -> Self {
                Self(number)
            }
        }

        impl From<$name> for u16 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

impl_id!(StateId, "state#");
impl_id!(EventId, "event#");
