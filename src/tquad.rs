// Copyright 2022 Oxide Computer Company

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TquadParseError;
use crate::relation::Relation;
use crate::tbit::Tbit;

/// Number of ternary positions held by one quad.
pub const TQUAD_BITS: usize = 32;

/// Thirty-two ternary positions packed into a single 64-bit word. The
/// low 32 bits hold the specified values and the high 32 bits hold the
/// mask: a set mask bit means the position is specified, a clear mask
/// bit means wildcard.
///
/// As a set, a quad stands for every 32-bit word `x` satisfying
/// `x & mask == bits`. Not every set of words is expressible; `{1, 2}`
/// for instance needs two quads. Construction forces the canonical form
/// `bits & !mask == 0`, so two quads are equal as values exactly when
/// they are equal as sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub struct Tquad(u64);

impl Tquad {
    /// Build a quad from specified bits and a mask, clearing any value
    /// bit in a wildcard position.
    pub fn new(bits: u32, mask: u32) -> Self {
        let bits = bits & mask;
        Self(u64::from(bits) | (u64::from(mask) << 32))
    }

    /// The specified values, low word.
    pub fn bits(self) -> u32 {
        self.0 as u32
    }

    /// The specified-position mask, high word.
    pub fn mask(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Extract the ternary bit at `index`.
    pub fn get(self, index: usize) -> Tbit {
        assert!(index < TQUAD_BITS);
        if (self.mask() >> index) & 1 == 1 {
            if (self.bits() >> index) & 1 == 1 {
                Tbit::One
            } else {
                Tbit::Zero
            }
        } else {
            Tbit::Star
        }
    }

    /// Assign the ternary bit at `index`, preserving canonical form.
    pub fn put(&mut self, index: usize, bit: Tbit) {
        assert!(index < TQUAD_BITS);
        let mut bits = self.bits();
        let mut mask = self.mask();
        match bit {
            Tbit::Zero => {
                bits &= !(1 << index);
                mask |= 1 << index;
            }
            Tbit::One => {
                bits |= 1 << index;
                mask |= 1 << index;
            }
            Tbit::Star => {
                bits &= !(1 << index);
                mask &= !(1 << index);
            }
        }
        *self = Self::new(bits, mask);
    }

    /// Whether `element` matches this quad.
    pub fn member(self, element: u32) -> bool {
        element & self.mask() == self.bits()
    }

    /// Number of 32-bit words matching this quad: two to the number of
    /// wildcard positions.
    pub fn cardinality(self) -> usize {
        1usize << (!self.mask()).count_ones()
    }

    /// Classify this quad against `other` as sets of 32-bit words.
    pub fn relation(self, other: Tquad) -> Relation {
        if self == other {
            return Relation::Equal;
        }

        let (bits1, mask1) = (self.bits(), self.mask());
        let (bits2, mask2) = (other.bits(), other.mask());

        if mask1 == mask2 {
            // Same positions specified, and by canonical form the values
            // must differ somewhere among them.
            return Relation::Disjoint;
        }

        if mask1 == mask1 & mask2 {
            // Self is less specified than other.
            if bits1 == bits2 & mask1 {
                return Relation::Superset;
            }
            return Relation::Disjoint;
        }

        if mask1 & mask2 == mask2 {
            // Self is more specified than other.
            if bits2 == bits1 & mask2 {
                return Relation::Subset;
            }
            return Relation::Disjoint;
        }

        // Each side specifies positions the other does not. Compare on
        // the positions both specify.
        let disc = mask1 & mask2;
        if bits1 & disc == bits2 & disc {
            Relation::Intersect
        } else {
            Relation::Disjoint
        }
    }
}

impl From<u64> for Tquad {
    fn from(word: u64) -> Self {
        Self::new(word as u32, (word >> 32) as u32)
    }
}

impl From<Tquad> for u64 {
    fn from(quad: Tquad) -> Self {
        quad.0
    }
}

impl fmt::Display for Tquad {
    /// Renders all 32 positions, most significant first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in (0..TQUAD_BITS).rev() {
            write!(f, "{}", self.get(index).to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Tquad {
    type Err = TquadParseError;

    /// Parses a 32-character string, most significant position first.
    /// Characters beyond the 32nd are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut result = Self::new(0, 0);
        let mut index = TQUAD_BITS;
        for c in s.chars() {
            if index == 0 {
                break;
            }
            index -= 1;
            result.put(index, Tbit::from_char(c)?);
        }
        if index > 0 {
            return Err(TquadParseError::Short(TQUAD_BITS - index));
        }
        Ok(result)
    }
}
