use ark_ec::AffineRepr;
use ark_serialize::{Compress, Validate};
use std::{fmt, str::FromStr};

/// Determines if point compression should be used.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UseCompression {
    Yes,
    No,
}

impl fmt::Display for UseCompression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UseCompression::Yes => write!(f, "Yes"),
            UseCompression::No => write!(f, "No"),
        }
    }
}

impl FromStr for UseCompression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" | "true" | "compressed" => Ok(UseCompression::Yes),
            "no" | "false" | "uncompressed" => Ok(UseCompression::No),
            other => Err(format!("unknown compression mode: {}", other)),
        }
    }
}

impl From<UseCompression> for Compress {
    fn from(compression: UseCompression) -> Self {
        match compression {
            UseCompression::Yes => Compress::Yes,
            UseCompression::No => Compress::No,
        }
    }
}

/// Determines which checks are run on points as they are decoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CheckForCorrectness {
    Full,
    OnlyNonZero,
    OnlyInGroup,
    No,
}

impl CheckForCorrectness {
    /// Whether decoded points must be on the curve and in the prime order subgroup.
    pub fn validate(self) -> Validate {
        match self {
            CheckForCorrectness::Full | CheckForCorrectness::OnlyInGroup => Validate::Yes,
            CheckForCorrectness::OnlyNonZero | CheckForCorrectness::No => Validate::No,
        }
    }

    /// Whether decoded points must not be the point at infinity.
    pub fn non_zero(self) -> bool {
        matches!(self, CheckForCorrectness::Full | CheckForCorrectness::OnlyNonZero)
    }
}

impl fmt::Display for CheckForCorrectness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CheckForCorrectness::Full => write!(f, "Full"),
            CheckForCorrectness::OnlyNonZero => write!(f, "OnlyNonZero"),
            CheckForCorrectness::OnlyInGroup => write!(f, "OnlyInGroup"),
            CheckForCorrectness::No => write!(f, "No"),
        }
    }
}

/// The sections of an accumulator, in the order they appear in a stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementType {
    TauG1,
    TauG2,
    AlphaG1,
    BetaG1,
    BetaG2,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ElementType::TauG1 => write!(f, "TauG1"),
            ElementType::TauG2 => write!(f, "TauG2"),
            ElementType::AlphaG1 => write!(f, "AlphaG1"),
            ElementType::BetaG1 => write!(f, "BetaG1"),
            ElementType::BetaG2 => write!(f, "BetaG2"),
        }
    }
}

/// Size in bytes of a single encoded group element.
pub fn buffer_size<C: AffineRepr>(compression: UseCompression) -> usize {
    C::generator().serialized_size(compression.into())
}

/// Returns true if the point is on the curve and in the prime order subgroup.
pub fn is_valid_element<C: AffineRepr>(element: &C) -> bool {
    element.check().is_ok()
}
