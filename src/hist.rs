// Copyright 2022 Oxide Computer Company

use std::collections::HashMap;
use std::sync::Arc;

use crate::key::SparseKey;
use crate::tbit::Tbit;
use crate::tquad::TQUAD_BITS;
use crate::ttype::KeyType;

/// Per-position distribution of ternary bit values across a multiset of
/// keys of one type, maintained incrementally as keys are added and
/// deleted.
///
/// Storage is default-relative: two maps keyed by bit index carry the
/// counts of the two non-default values at that index, and the count of
/// the default value is recovered as `count - c0 - c1`. Stored counts
/// are strictly positive; an entry decremented to zero is removed. A
/// position appearing in neither map therefore reads as "default in
/// every added key", which keeps the maps as sparse as the keys
/// themselves.
///
/// The histogram does not track which keys were added. Deleting a key
/// that was never added is a programming error the caller must prevent.
#[derive(Debug, Clone)]
pub struct Hist {
    ktype: Arc<KeyType>,
    dflt: Tbit,
    count: usize,
    map0: HashMap<u32, u32>,
    map1: HashMap<u32, u32>,
}

/// Expand a pair of stored counts into `[n0, n1, n*]` given the default
/// bit they are relative to.
fn spread(dflt: Tbit, c0: usize, c1: usize, n: usize) -> [usize; 3] {
    match dflt {
        Tbit::Zero => [n - (c0 + c1), c1, c0],
        Tbit::One => [c0, n - (c0 + c1), c1],
        Tbit::Star => [c0, c1, n - (c0 + c1)],
    }
}

/// Split cost of a candidate position. Heavy wildcard traffic is
/// penalized quadratically, balanced zero/one populations are rewarded,
/// and the reciprocal term orders the otherwise-flat splitless
/// candidates by population. Lower is better.
fn cost(n: usize, n0: usize, n1: usize, nstar: usize) -> f64 {
    let l = n0 as f64;
    let r = n1 as f64;
    let b = nstar as f64;
    let n2 = (n * n) as f64;

    b * b - l * r + 1.0 / (l * r + 1.0 / n2)
}

impl Hist {
    /// A fresh, empty histogram for keys of type `ktype`.
    pub fn new(ktype: &Arc<KeyType>) -> Self {
        Self {
            ktype: Arc::clone(ktype),
            dflt: ktype.dflt(),
            count: 0,
            map0: HashMap::new(),
            map1: HashMap::new(),
        }
    }

    /// The shared type this histogram was created under.
    pub fn ktype(&self) -> &Arc<KeyType> {
        &self.ktype
    }

    /// Number of keys added and not yet deleted.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Account a key into the histogram. The key must be of the same
    /// type instance and not currently accounted.
    pub fn add(&mut self, key: &SparseKey) {
        assert!(Arc::ptr_eq(&self.ktype, key.ktype()));

        self.count += 1;
        for (&quad_index, quad) in key.map() {
            let mut index = quad_index * TQUAD_BITS as u32;
            for bit_index in 0..TQUAD_BITS {
                let bit = quad.get(bit_index);
                if bit != self.dflt {
                    let map = self.map_for(bit);
                    *map.entry(index).or_insert(0) += 1;
                }
                index += 1;
            }
        }
    }

    /// Remove a previously added key from the histogram, the exact
    /// inverse of [`Hist::add`].
    pub fn del(&mut self, key: &SparseKey) {
        assert!(Arc::ptr_eq(&self.ktype, key.ktype()));
        assert!(self.count > 0);

        self.count -= 1;
        for (&quad_index, quad) in key.map() {
            let mut index = quad_index * TQUAD_BITS as u32;
            for bit_index in 0..TQUAD_BITS {
                let bit = quad.get(bit_index);
                if bit != self.dflt {
                    let map = self.map_for(bit);
                    let count = match map.get_mut(&index) {
                        Some(count) => count,
                        None => {
                            panic!("del of unaccounted key at bit {}", index)
                        }
                    };
                    *count -= 1;
                    if *count == 0 {
                        // Zero counts are never stored.
                        map.remove(&index);
                    }
                }
                index += 1;
            }
        }
    }

    /// The distribution `[n0, n1, n*]` at `index`, indexed by
    /// `Tbit as usize`.
    pub fn dist(&self, index: usize) -> [usize; 3] {
        assert!(index < self.ktype.size());
        let index = index as u32;
        let c0 = self.map0.get(&index).copied().unwrap_or(0) as usize;
        let c1 = self.map1.get(&index).copied().unwrap_or(0) as usize;
        spread(self.dflt, c0, c1, self.count)
    }

    /// Choose the bit index at which the accounted key set splits best,
    /// minimizing the cost function over every candidate position.
    /// Returns `None` when no position discriminates, i.e. the key set
    /// is irreducible.
    pub fn discriminate(&self) -> Option<usize> {
        let n = self.count;
        let size = self.ktype.size();

        let mut best_cost = f64::INFINITY;
        let mut best_index = size;
        let mut best_n0 = 0;
        let mut best_n1 = 0;

        // Candidates carried by the first map, consulting the second
        // for the companion count. Equal-cost ties fall to the smaller
        // index.
        for (&index, &c0) in &self.map0 {
            let c1 = self.map1.get(&index).copied().unwrap_or(0);
            let [n0, n1, nstar] = spread(self.dflt, c0 as usize, c1 as usize, n);
            let curr = cost(n, n0, n1, nstar);
            if curr < best_cost
                || (curr == best_cost && (index as usize) < best_index)
            {
                best_cost = curr;
                best_index = index as usize;
                best_n0 = n0;
                best_n1 = n1;
            }
        }

        // Candidates carried by the second map only.
        for (&index, &c1) in &self.map1 {
            if self.map0.contains_key(&index) {
                // Scanned in the first pass.
                continue;
            }
            let [n0, n1, nstar] = spread(self.dflt, 0, c1 as usize, n);
            let curr = cost(n, n0, n1, nstar);
            if curr < best_cost {
                best_cost = curr;
                best_index = index as usize;
                best_n0 = n0;
                best_n1 = n1;
            }
        }

        // Positions carried by neither map are all-default and share one
        // cost; the smallest such index represents the bucket.
        if let Some(index) = self.default_only_index() {
            let [n0, n1, nstar] = spread(self.dflt, 0, 0, n);
            let curr = cost(n, n0, n1, nstar);
            if curr < best_cost {
                best_index = index;
                best_n0 = n0;
                best_n1 = n1;
            }
        }

        // A position splits only if neither concrete value covers the
        // whole set and at least one key pins a concrete value there.
        if best_n0 < n && best_n1 < n && (best_n0 > 0 || best_n1 > 0) {
            Some(best_index)
        } else {
            None
        }
    }

    /// Smallest bit index present in neither map, if any.
    fn default_only_index(&self) -> Option<usize> {
        let size = self.ktype.size();
        let mut distinct = self.map0.len();
        for index in self.map1.keys() {
            if !self.map0.contains_key(index) {
                distinct += 1;
            }
        }
        if distinct >= size {
            return None;
        }
        (0..size).find(|&index| {
            let index = index as u32;
            !self.map0.contains_key(&index) && !self.map1.contains_key(&index)
        })
    }

    fn map_for(&mut self, bit: Tbit) -> &mut HashMap<u32, u32> {
        match (self.dflt, bit) {
            (Tbit::Zero, Tbit::Star) => &mut self.map0,
            (Tbit::Zero, Tbit::One) => &mut self.map1,
            (Tbit::One, Tbit::Zero) => &mut self.map0,
            (Tbit::One, Tbit::Star) => &mut self.map1,
            (Tbit::Star, Tbit::Zero) => &mut self.map0,
            (Tbit::Star, Tbit::One) => &mut self.map1,
            _ => panic!("count of the default bit is never stored"),
        }
    }
}
