// Copyright 2022 Oxide Computer Company

// Randomized cross-check of the incremental histogram against counts
// recomputed from scratch, plus sanity on the discrimination choice.

mod common;

use std::sync::Arc;

use anyhow::Result;
use rand::prelude::*;
use slog::info;
use ternkey::{Base, Hist, KeyType, SparseKey, Tbit};

const SIZE: usize = 96;
const ROUNDS: usize = 200;

fn random_bit(rng: &mut StdRng) -> Tbit {
    match rng.gen_range(0..3) {
        0 => Tbit::Zero,
        1 => Tbit::One,
        _ => Tbit::Star,
    }
}

fn random_key(rng: &mut StdRng, ktype: &Arc<KeyType>) -> SparseKey {
    let mut key = SparseKey::new(ktype);
    for _ in 0..rng.gen_range(0..SIZE) {
        key.put(rng.gen_range(0..SIZE), random_bit(rng));
    }
    key
}

/// Recount the whole distribution from the key list.
fn reference_dist(keys: &[SparseKey]) -> Vec<[usize; 3]> {
    let mut dist = vec![[0usize; 3]; SIZE];
    for key in keys {
        for (index, d) in dist.iter_mut().enumerate() {
            d[key.get(index) as usize] += 1;
        }
    }
    dist
}

/// The cost function discriminate minimizes, recomputed independently.
fn cost(n: usize, d: &[usize; 3]) -> f64 {
    let l = d[Tbit::Zero as usize] as f64;
    let r = d[Tbit::One as usize] as f64;
    let b = d[Tbit::Star as usize] as f64;
    let n2 = (n * n) as f64;
    b * b - l * r + 1.0 / (l * r + 1.0 / n2)
}

#[test]
fn histogram_tracks_reference() -> Result<()> {
    let log = common::logger();
    let mut rng = StdRng::seed_from_u64(47);

    for dflt in [Tbit::Zero, Tbit::One, Tbit::Star] {
        let ktype =
            Arc::new(KeyType::new(Base::Ternary, SIZE, dflt, "crosscheck"));
        info!(log, "histogram cross-check"; "default" => ?dflt);

        let mut hist = Hist::new(&ktype);
        let mut keys: Vec<SparseKey> = Vec::new();

        for _ in 0..ROUNDS {
            if keys.is_empty() || rng.gen_bool(0.7) {
                let key = random_key(&mut rng, &ktype);
                hist.add(&key);
                keys.push(key);
            } else {
                let victim = rng.gen_range(0..keys.len());
                let key = keys.swap_remove(victim);
                hist.del(&key);
            }

            assert_eq!(hist.count(), keys.len());
            let reference = reference_dist(&keys);
            for (index, expect) in reference.iter().enumerate() {
                assert_eq!(hist.dist(index), *expect);
            }

            check_discrimination(&hist, &reference);
        }

        // Drain the histogram; every count must unwind to nothing.
        while let Some(key) = keys.pop() {
            hist.del(&key);
        }
        assert_eq!(hist.count(), 0);
        for index in 0..SIZE {
            assert_eq!(hist.dist(index), [0, 0, 0]);
        }
    }

    Ok(())
}

fn check_discrimination(hist: &Hist, reference: &[[usize; 3]]) {
    let n = hist.count();
    let min_cost = (0..SIZE)
        .map(|index| cost(n, &reference[index]))
        .fold(f64::INFINITY, f64::min);

    match hist.discriminate() {
        Some(best) => {
            // The chosen position carries the minimal cost and splits
            // the key set.
            let d = &reference[best];
            assert_eq!(cost(n, d), min_cost);
            let n0 = d[Tbit::Zero as usize];
            let n1 = d[Tbit::One as usize];
            assert!(n0 < n && n1 < n);
            assert!(n0 > 0 || n1 > 0);
        }
        None => {
            // Some minimal-cost position fails the split condition.
            let irreducible = (0..SIZE)
                .filter(|&index| cost(n, &reference[index]) == min_cost)
                .any(|index| {
                    let d = &reference[index];
                    let n0 = d[Tbit::Zero as usize];
                    let n1 = d[Tbit::One as usize];
                    !(n0 < n && n1 < n && (n0 > 0 || n1 > 0))
                });
            assert!(irreducible || n == 0);
        }
    }
}
