// Copyright 2022 Oxide Computer Company

use std::fmt;

use serde::{Deserialize, Serialize};

/// The relation between a pair of sets S1 and S2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// S1 is identical to S2.
    Equal,
    /// S1 is a proper subset of S2.
    Subset,
    /// S1 is a proper superset of S2.
    Superset,
    /// S1 and S2 overlap but neither contains the other.
    Intersect,
    /// S1 and S2 share no elements.
    Disjoint,
}

impl Relation {
    /// Fold the relation of one component pair into the accumulated
    /// relation of the whole. `Equal` is the identity and `Disjoint`
    /// absorbs, so a fold may stop as soon as the accumulator goes
    /// disjoint.
    pub fn update(&mut self, cur: Relation) {
        match cur {
            Relation::Equal => {}
            Relation::Subset => {
                if *self == Relation::Equal {
                    *self = Relation::Subset;
                } else if *self == Relation::Superset {
                    *self = Relation::Intersect;
                }
            }
            Relation::Superset => {
                if *self == Relation::Equal {
                    *self = Relation::Superset;
                } else if *self == Relation::Subset {
                    *self = Relation::Intersect;
                }
            }
            Relation::Intersect => {
                if *self != Relation::Disjoint {
                    *self = Relation::Intersect;
                }
            }
            Relation::Disjoint => {
                *self = Relation::Disjoint;
            }
        }
    }

    /// The same relation as seen from the other operand.
    pub fn invert(self) -> Relation {
        match self {
            Relation::Subset => Relation::Superset,
            Relation::Superset => Relation::Subset,
            other => other,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relation::Equal => "equal",
            Relation::Subset => "subset",
            Relation::Superset => "superset",
            Relation::Intersect => "intersect",
            Relation::Disjoint => "disjoint",
        };
        write!(f, "{}", s)
    }
}
