use crate::bitmap::BitmapError;
use std::fmt;
use std::str::FromStr;

/// Bitwise OR of every member. Empty groups combine to 0.
///
/// Order-independent, and monotonic: a member's set bits always survive.
#[inline]
pub fn or_hash(group: &[u32]) -> u32 {
    group.iter().fold(0, |acc, &n| acc | n)
}

/// XOR of every member, with members at odd positions complemented first.
///
/// Since `a ^ !b == !(a ^ b)`, this equals the plain XOR of the group,
/// complemented iff `len / 2` is odd. It depends on the group's length and
/// members, never on their order.
#[inline]
pub fn m_hash(group: &[u32]) -> u32 {
    group
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &n)| if i % 2 == 1 { acc ^ !n } else { acc ^ n })
}

/// Reserved golden-ratio slot. Always 0, so every group lands in bucket 0.
#[inline]
pub fn phi_hash(_group: &[u32]) -> u32 {
    0
}

/// The combining function a bitmap reduces groups with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunction {
    OrHash,
    MHash,
    PhiHash,
}

impl HashFunction {
    pub const ALL: [HashFunction; 3] = [Self::OrHash, Self::MHash, Self::PhiHash];

    #[inline]
    pub fn combine(&self, group: &[u32]) -> u32 {
        match self {
            Self::OrHash => or_hash(group),
            Self::MHash => m_hash(group),
            Self::PhiHash => phi_hash(group),
        }
    }

    /// Name accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OrHash => "OrHash",
            Self::MHash => "MHash",
            Self::PhiHash => "PhiHash",
        }
    }
}

impl FromStr for HashFunction {
    type Err = BitmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| BitmapError::UnknownHashFunction(s.to_owned()))
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
