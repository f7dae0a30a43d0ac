// Copyright 2022 Oxide Computer Company

//! Ternary keys and discrimination histograms.
//!
//! A ternary key is a fixed-length vector of three-valued bits: `0`, `1`
//! or `*` for "don't care". One key stands for the set of binary words
//! that match it, so a table of ternary keys is the software shape of a
//! TCAM. Consider the classic ternary table
//!
//! ```text
//! +--------+-------------+--------------+---------+
//! | Action | switch addr | ingress port | is icmp |
//! +--------+-------------+--------------+---------+
//! | a0     | 1           | ****         | 1       |
//! | a1     | 1           | ****         | 0       |
//! | a2     | *           | 0010         | *       |
//! +--------+-------------+--------------+---------+
//! ```
//!
//! Each row, flattened, is one ternary key. Building a decision tree over
//! rows like these requires answering two questions fast
//!
//! - How do two keys relate as sets? One of equal, subset, superset,
//!   intersect or disjoint - see [`Relation`].
//! - Given a pile of keys, which bit position splits the pile best? That
//!   is the job of the histogram's discriminate - see [`Hist`].
//!
//! Keys here can be very long (millions of bits) while deviating from a
//! per-type default bit in only a few places, so the representation is
//! sparse: a key stores a map from 32-bit-group index to [`Tquad`], a
//! 64-bit packed word holding 32 ternary positions, and groups equal to
//! the default are simply absent. All whole-key operations are linear in
//! the number of explicit groups, not in the logical length.
//!
//! Every key and histogram is created under a shared, immutable
//! [`KeyType`] describing base, length, default bit and a diagnostic
//! name.

pub mod error;
pub mod hist;
pub mod key;
pub mod relation;
pub mod tbit;
pub mod tquad;
pub mod ttype;

pub use hist::Hist;
pub use key::SparseKey;
pub use relation::Relation;
pub use tbit::{Base, Tbit};
pub use tquad::{Tquad, TQUAD_BITS};
pub use ttype::KeyType;
