// Copyright 2022 Oxide Computer Company

use serde::{Deserialize, Serialize};

use crate::error::TbitParseError;

/// A single ternary symbol: a concrete bit or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tbit {
    /// A cleared bit.
    Zero,
    /// A set bit.
    One,
    /// The wildcard, matching either concrete value.
    Star,
}

impl Tbit {
    pub fn to_char(self) -> char {
        match self {
            Tbit::Zero => '0',
            Tbit::One => '1',
            Tbit::Star => '*',
        }
    }

    pub fn from_char(c: char) -> Result<Self, TbitParseError> {
        match c {
            '0' => Ok(Tbit::Zero),
            '1' => Ok(Tbit::One),
            '*' => Ok(Tbit::Star),
            _ => Err(TbitParseError(c)),
        }
    }
}

/// Which symbols the keys of a type may carry. `Binary` keys are
/// restricted to concrete bits, `Ternary` keys admit the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    Binary,
    Ternary,
}
