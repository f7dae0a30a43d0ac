// Copyright 2022 Oxide Computer Company

// Exhaustive cross-check of the quad relation against the sets the
// quads stand for, over a small prefix width. Quads restricted to the
// low nibble leave positions 4..32 wildcard on both sides, so the
// relation of the full sets is decided entirely by the low-nibble
// universe enumerated here.

use ternkey::{Relation, Tquad};

const WIDTH: u32 = 4;

fn set_relation(q1: Tquad, q2: Tquad) -> Relation {
    let mut only1 = false;
    let mut only2 = false;
    let mut both = false;

    for element in 0..(1u32 << WIDTH) {
        match (q1.member(element), q2.member(element)) {
            (true, true) => both = true,
            (true, false) => only1 = true,
            (false, true) => only2 = true,
            (false, false) => {}
        }
    }

    match (only1, only2) {
        (false, false) => Relation::Equal,
        (false, true) => Relation::Subset,
        (true, false) => Relation::Superset,
        (true, true) => {
            if both {
                Relation::Intersect
            } else {
                Relation::Disjoint
            }
        }
    }
}

#[test]
fn relation_matches_membership_sets() {
    let side = 1u32 << WIDTH;
    for bx in 0..side {
        for mx in 0..side {
            let q1 = Tquad::new(bx, mx);
            for by in 0..side {
                for my in 0..side {
                    let q2 = Tquad::new(by, my);
                    let expect = set_relation(q1, q2);
                    assert_eq!(
                        q1.relation(q2),
                        expect,
                        "{} vs {}",
                        q1,
                        q2
                    );
                    assert_eq!(q2.relation(q1), expect.invert());
                }
            }
        }
    }
}

#[test]
fn cardinality_matches_membership_count() {
    let side = 1u32 << WIDTH;
    for bits in 0..side {
        for mask in 0..side {
            let q = Tquad::new(bits, mask);
            let members =
                (0..side).filter(|&element| q.member(element)).count();
            // Positions above the nibble are wildcard and contribute a
            // factor of 2 each.
            assert_eq!(q.cardinality() >> (32 - WIDTH), members);
        }
    }
}

#[test]
fn string_round_trip() {
    let side = 1u32 << WIDTH;
    for bits in 0..side {
        for mask in 0..side {
            let q = Tquad::new(bits, mask);
            let s = q.to_string();
            assert_eq!(s.len(), 32);
            assert_eq!(s.parse::<Tquad>().unwrap(), q);
        }
    }
}
