// Copyright 2022 Oxide Computer Company

// Shared scaffolding for the randomized cross-check drivers.

#![allow(dead_code)]

use bitvec::prelude::*;
use slog::{o, Drain};
use ternkey::{Relation, Tbit};

/// A dense reference key: two parallel bit vectors holding every
/// position explicitly. Slow and simple on purpose, this is the model
/// the sparse implementation is checked against.
pub struct DenseKey {
    bits: BitVec<u32, Lsb0>,
    mask: BitVec<u32, Lsb0>,
}

impl DenseKey {
    pub fn new(size: usize, dflt: Tbit) -> Self {
        let mut bits = bitvec![u32, Lsb0; 0; size];
        let mut mask = bitvec![u32, Lsb0; 0; size];
        match dflt {
            Tbit::Zero => {
                mask.fill(true);
            }
            Tbit::One => {
                bits.fill(true);
                mask.fill(true);
            }
            Tbit::Star => {}
        }
        Self { bits, mask }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn get(&self, index: usize) -> Tbit {
        if self.mask[index] {
            if self.bits[index] {
                Tbit::One
            } else {
                Tbit::Zero
            }
        } else {
            Tbit::Star
        }
    }

    pub fn put(&mut self, index: usize, bit: Tbit) {
        match bit {
            Tbit::Zero => {
                self.bits.set(index, false);
                self.mask.set(index, true);
            }
            Tbit::One => {
                self.bits.set(index, true);
                self.mask.set(index, true);
            }
            Tbit::Star => {
                self.bits.set(index, false);
                self.mask.set(index, false);
            }
        }
    }

    /// The straightforward O(length) per-position relation fold.
    pub fn relation(&self, other: &DenseKey) -> Relation {
        assert_eq!(self.len(), other.len());
        let mut result = Relation::Equal;
        for index in 0..self.len() {
            let current = match (self.get(index), other.get(index)) {
                (a, b) if a == b => Relation::Equal,
                (Tbit::Star, _) => Relation::Superset,
                (_, Tbit::Star) => Relation::Subset,
                _ => Relation::Disjoint,
            };
            result.update(current);
            if result == Relation::Disjoint {
                break;
            }
        }
        result
    }

    pub fn render(&self) -> String {
        (0..self.len()).map(|i| self.get(i).to_char()).collect()
    }
}

/// Terminal logger for test progress reporting.
pub fn logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    slog::Logger::root(drain, o!())
}
