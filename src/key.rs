// Copyright 2022 Oxide Computer Company

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use num::bigint::BigUint;

use crate::relation::Relation;
use crate::tbit::{Base, Tbit};
use crate::tquad::{Tquad, TQUAD_BITS};
use crate::ttype::KeyType;

/// A ternary key stored sparsely: a map from 32-bit-group index to
/// [`Tquad`] where only groups deviating from the type's default bit are
/// present. A fresh key has an empty map and logically reads as the
/// default bit at every position.
///
/// The canonical-storage invariant is that the map never holds a quad
/// equal to the default quad; [`SparseKey::put`] deletes an entry the
/// moment its last non-default position is written back to the default.
/// Whole-key operations therefore cost in the number of explicit groups
/// rather than the logical length, which is what makes keys of a million
/// bits practical.
#[derive(Debug, Clone)]
pub struct SparseKey {
    ktype: Arc<KeyType>,
    map: HashMap<u32, Tquad>,
    bits: usize,
    quads: u32,
    dflt: Tbit,
    base: Base,
}

/// The quad a group index reads as when absent from the map: every
/// position carries the default bit.
pub(crate) fn default_quad(dflt: Tbit) -> Tquad {
    match dflt {
        Tbit::Zero => Tquad::new(0x0000_0000, 0xffff_ffff),
        Tbit::One => Tquad::new(0xffff_ffff, 0xffff_ffff),
        Tbit::Star => Tquad::new(0x0000_0000, 0x0000_0000),
    }
}

fn quad_count(bits: usize) -> u32 {
    let mut result = bits / TQUAD_BITS;
    if result * TQUAD_BITS != bits {
        result += 1;
    }
    result as u32
}

fn split_index(index: usize) -> (u32, usize) {
    ((index / TQUAD_BITS) as u32, index % TQUAD_BITS)
}

impl SparseKey {
    /// A fresh key under `ktype` with every bit at the default value.
    pub fn new(ktype: &Arc<KeyType>) -> Self {
        Self {
            ktype: Arc::clone(ktype),
            map: HashMap::new(),
            bits: ktype.size(),
            quads: quad_count(ktype.size()),
            dflt: ktype.dflt(),
            base: ktype.base(),
        }
    }

    /// The shared type this key was created under.
    pub fn ktype(&self) -> &Arc<KeyType> {
        &self.ktype
    }

    /// The ternary bit at `index`.
    pub fn get(&self, index: usize) -> Tbit {
        assert!(index < self.bits);
        let (quad_index, bit_index) = split_index(index);
        match self.map.get(&quad_index) {
            Some(quad) => quad.get(bit_index),
            None => self.dflt,
        }
    }

    /// Assign the ternary bit at `index`, materializing or retiring the
    /// containing group as needed to keep storage canonical.
    pub fn put(&mut self, index: usize, bit: Tbit) {
        assert!(index < self.bits);
        assert!(bit != Tbit::Star || self.base == Base::Ternary);

        let (quad_index, bit_index) = split_index(index);
        let dflt_quad = default_quad(self.dflt);

        let mut quad = match self.map.get(&quad_index) {
            Some(quad) => *quad,
            None => {
                if bit == self.dflt {
                    // The absent group already represents this value.
                    return;
                }
                dflt_quad
            }
        };

        if quad.get(bit_index) == bit {
            // Already assigned the target value.
            return;
        }

        quad.put(bit_index, bit);

        if quad == dflt_quad {
            // Default groups are never stored explicitly.
            self.map.remove(&quad_index);
        } else {
            self.map.insert(quad_index, quad);
        }
    }

    /// The quad at group index `quad_index`, or `None` out of range.
    /// Groups absent from the map read as the default quad.
    pub fn quad(&self, quad_index: u32) -> Option<Tquad> {
        if quad_index >= self.quads {
            return None;
        }
        Some(match self.map.get(&quad_index) {
            Some(quad) => *quad,
            None => default_quad(self.dflt),
        })
    }

    /// Assign bits from a string of `{0,1,*}` characters starting at
    /// index 0. Stops at the end of the string, the end of the key or
    /// the first invalid character, whichever comes first, and returns
    /// the number of positions assigned.
    pub fn assign_from_str(&mut self, s: &str) -> usize {
        let mut assigned = 0;
        for c in s.chars() {
            if assigned == self.bits {
                break;
            }
            match Tbit::from_char(c) {
                Ok(bit) => self.put(assigned, bit),
                Err(_) => break,
            }
            assigned += 1;
        }
        assigned
    }

    /// Number of binary words matching this key. Arbitrary precision:
    /// a fresh all-wildcard key of size L matches 2^L words.
    pub fn cardinality(&self) -> BigUint {
        let mut stars = 0usize;
        let mut covered = 0usize;
        for (&quad_index, quad) in &self.map {
            let first = quad_index as usize * TQUAD_BITS;
            let width = (self.bits - first).min(TQUAD_BITS);
            covered += width;
            for bit_index in 0..width {
                if quad.get(bit_index) == Tbit::Star {
                    stars += 1;
                }
            }
        }
        if self.dflt == Tbit::Star {
            stars += self.bits - covered;
        }
        BigUint::from(1u8) << stars
    }

    /// Classify this key against `other` as sets of binary words.
    ///
    /// The walk visits only explicit groups of either side, folding one
    /// per-quad relation per group plus a single fold for all the groups
    /// where both sides are default, and stops as soon as the
    /// accumulator goes disjoint.
    pub fn relation(&self, other: &SparseKey) -> Relation {
        if std::ptr::eq(self, other) {
            return Relation::Equal;
        }

        assert_eq!(self.bits, other.bits);

        let count1 = self.map.len();
        let count2 = other.map.len();

        if count1 == 0 && count2 == 0 {
            return if self.dflt == other.dflt {
                Relation::Equal
            } else if self.dflt == Tbit::Star {
                Relation::Superset
            } else if other.dflt == Tbit::Star {
                Relation::Subset
            } else {
                Relation::Disjoint
            };
        }

        let mut result = Relation::Equal;
        let dflt_quad1 = default_quad(self.dflt);
        let dflt_quad2 = default_quad(other.dflt);
        let quad_limit = self.quads as usize;

        if count1 == 0 {
            if count2 < quad_limit {
                result.update(dflt_quad1.relation(dflt_quad2));
                if result == Relation::Disjoint {
                    return result;
                }
            }
            for quad2 in other.map.values() {
                result.update(dflt_quad1.relation(*quad2));
                if result == Relation::Disjoint {
                    break;
                }
            }
            return result;
        }

        if count2 == 0 {
            if count1 < quad_limit {
                result.update(dflt_quad1.relation(dflt_quad2));
                if result == Relation::Disjoint {
                    return result;
                }
            }
            for quad1 in self.map.values() {
                result.update(quad1.relation(dflt_quad2));
                if result == Relation::Disjoint {
                    break;
                }
            }
            return result;
        }

        // Both sides carry explicit groups. Count how many groups were
        // explicit in both, explicit here only and explicit there only,
        // so the groups defaulted on both sides can be folded once at
        // the end.
        let mut expl_expl = 0usize;
        let mut expl_dflt = 0usize;
        let mut dflt_expl = 0usize;

        for (quad_index, quad1) in &self.map {
            let current = match other.map.get(quad_index) {
                Some(quad2) => {
                    expl_expl += 1;
                    quad1.relation(*quad2)
                }
                None => {
                    expl_dflt += 1;
                    quad1.relation(dflt_quad2)
                }
            };
            result.update(current);
            if result == Relation::Disjoint {
                return result;
            }
        }

        for (quad_index, quad2) in &other.map {
            if self.map.contains_key(quad_index) {
                // Already compared in the first pass.
                continue;
            }
            dflt_expl += 1;
            result.update(dflt_quad1.relation(*quad2));
            if result == Relation::Disjoint {
                return result;
            }
        }

        let dflt_dflt = quad_limit - (expl_expl + expl_dflt + dflt_expl);
        if dflt_dflt > 0 {
            result.update(dflt_quad1.relation(dflt_quad2));
        }

        result
    }

    pub(crate) fn map(&self) -> &HashMap<u32, Tquad> {
        &self.map
    }
}

impl fmt::Display for SparseKey {
    /// Renders every position from index 0 upward.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.bits {
            write!(f, "{}", self.get(index).to_char())?;
        }
        Ok(())
    }
}
