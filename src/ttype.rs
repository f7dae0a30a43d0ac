// Copyright 2022 Oxide Computer Company

use serde::{Deserialize, Serialize};

use crate::tbit::{Base, Tbit};

/// Maximum ternary key/type size in bits. Keeps 32-bit group indices
/// sufficient everywhere.
pub const TTYPE_SIZE_MAX: usize = 0xffff_ffff;

/// Maximum number of characters retained from a type name.
pub const TTYPE_NAME_MAXLEN: usize = 31;

/// Immutable descriptor shared by every key and histogram of one shape:
/// base, length in bits, default bit value and a short diagnostic name.
///
/// Keys only interoperate when they were created under the same
/// descriptor instance, so descriptors are handed around as
/// `Arc<KeyType>` and checked by pointer identity. A descriptor must
/// outlive its keys and histograms, which the `Arc` enforces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyType {
    base: Base,
    size: usize,
    dflt: Tbit,
    name: String,
}

impl KeyType {
    /// Build a descriptor. A `Star` default requires a `Ternary` base,
    /// and names longer than [`TTYPE_NAME_MAXLEN`] are truncated.
    pub fn new(base: Base, size: usize, dflt: Tbit, name: &str) -> Self {
        assert!(dflt != Tbit::Star || base == Base::Ternary);
        assert!(size <= TTYPE_SIZE_MAX);
        let name = name.chars().take(TTYPE_NAME_MAXLEN).collect();
        Self { base, size, dflt, name }
    }

    /// Size in bits of keys of this type.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bit value every position of a fresh key assumes.
    pub fn dflt(&self) -> Tbit {
        self.dflt
    }

    /// Key base, binary or ternary.
    pub fn base(&self) -> Base {
        self.base
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
