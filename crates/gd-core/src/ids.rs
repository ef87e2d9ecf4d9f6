//! Strongly typed, zero-cost identifier wrappers.
//!
//! Node, POI and zone ids come from external tables and are kept verbatim;
//! agent ids are assigned sequentially by the sampler.  All IDs are
//! `Copy + Ord + Hash` so they can be used as map keys and sorted collection
//! elements without ceremony.  "Not assigned" is modelled with `Option<Id>`,
//! never with a sentinel value.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw integer as it appears in input and output tables.
            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identifier of a network node (`node_id` column).
    pub struct NodeId(u64);
}

typed_id! {
    /// Identifier of a point of interest (`poi_id` column).
    pub struct PoiId(u64);
}

typed_id! {
    /// Identifier of an analysis zone.  Grid zones are numbered from 0 in
    /// row-major order followed by the gates; TAZ zones keep their file ids.
    pub struct ZoneId(u64);
}

typed_id! {
    /// Identifier of a sampled agent, sequential from 1.
    pub struct AgentId(u64);
}
