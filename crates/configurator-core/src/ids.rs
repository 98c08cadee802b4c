#![forbid(unsafe_code)]

//! Typed identifiers for configurator navigation entities.
//!
//! The engine hands out plain integers for every entity. Wrapping them in
//! distinct newtypes keeps a group id from being passed where an attribute id
//! is expected. Ids are signed because the engine reserves negative values for
//! pseudo-groups (e.g. the designer or saved-compositions entries).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub i64);

        impl $name {
            /// Create an id from a raw engine value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw engine value.
            #[must_use]
            pub const fn raw(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a top-level group.
    GroupId,
    "group"
);
entity_id!(
    /// Identifier of a step inside a group.
    StepId,
    "step"
);
entity_id!(
    /// Identifier of an attribute inside a group or step.
    AttributeId,
    "attribute"
);
entity_id!(
    /// Identifier of a selectable option inside an attribute.
    OptionId,
    "option"
);
entity_id!(
    /// Identifier of a template group.
    TemplateGroupId,
    "template-group"
);
