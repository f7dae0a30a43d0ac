use std::fmt;

use colored::Colorize;

/// A character outside `{'0', '1', '*'}` where a ternary bit was
/// expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TbitParseError(pub char);

impl fmt::Display for TbitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid ternary bit character {}",
            format!("{:?}", self.0).as_str().bright_red(),
        )
    }
}

impl std::error::Error for TbitParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TquadParseError {
    /// A character outside `{'0', '1', '*'}`.
    BadChar(char),
    /// The string ended after this many characters, short of the 32 a
    /// quad requires.
    Short(usize),
}

impl fmt::Display for TquadParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadChar(c) => write!(
                f,
                "invalid ternary bit character {}",
                format!("{:?}", c).as_str().bright_red(),
            ),
            Self::Short(n) => write!(
                f,
                "quad string ended after {} of {} characters",
                format!("{}", n).as_str().bright_red(),
                crate::tquad::TQUAD_BITS,
            ),
        }
    }
}

impl std::error::Error for TquadParseError {}

impl From<TbitParseError> for TquadParseError {
    fn from(e: TbitParseError) -> Self {
        Self::BadChar(e.0)
    }
}
