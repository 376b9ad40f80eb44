use crate::hash::HashFunction;
use crate::util::{PackedBits, WORD_BITS, checked_pow2, log2};
use thiserror::Error;

/// Fixed-size membership bitmap over groups of `u32`.
///
/// A group is reduced to one bucket with `hash(group) % bucket_count`, and its
/// presence is the bit at that bucket. Bits are populated in bulk from
/// per-bucket counts or set directly by index.
///
/// Storage holds `bit_count = pow2(log2(capacity))` bits, which is always
/// larger than `bucket_count` (except for capacity 1, where both are 1), so a
/// hashed lookup never falls outside the array.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBitmap")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    bits: PackedBits,
    bit_count: u32,
    bucket_count: u32,
    hash: HashFunction,
}

#[derive(Debug, Error)]
pub enum BitmapError {
    #[error("the hashing function {0} is not supported")]
    UnknownHashFunction(String),
    #[error("bit index {index} out of range for {bit_count} bits")]
    IndexOutOfRange { index: u64, bit_count: u32 },
    #[error("capacity must be non-zero")]
    ZeroCapacity,
    #[error("capacity {0} needs more than 2^31 bits")]
    CapacityTooLarge(u32),
    #[error("inconsistent bitmap layout: {0}")]
    InvalidLayout(&'static str),
}

/// Unchecked field layout of [`Bitmap`]; deserialization goes through here.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBitmap {
    bits: PackedBits,
    bit_count: u32,
    bucket_count: u32,
    hash: HashFunction,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBitmap> for Bitmap {
    type Error = BitmapError;

    fn try_from(raw: RawBitmap) -> Result<Self, Self::Error> {
        if raw.bit_count != bit_count_for(raw.bucket_count)? {
            return Err(BitmapError::InvalidLayout("bit count does not match capacity"));
        }
        if raw.bits.words().len() != PackedBits::words_for(raw.bit_count) {
            return Err(BitmapError::InvalidLayout("word count does not match bit count"));
        }
        Ok(Self {
            bits: raw.bits,
            bit_count: raw.bit_count,
            bucket_count: raw.bucket_count,
            hash: raw.hash,
        })
    }
}

/// Rounded storage size for `capacity` buckets.
fn bit_count_for(capacity: u32) -> Result<u32, BitmapError> {
    if capacity == 0 {
        return Err(BitmapError::ZeroCapacity);
    }
    checked_pow2(log2(capacity)).ok_or(BitmapError::CapacityTooLarge(capacity))
}

impl Bitmap {
    /// Creates an empty bitmap, selecting the combining function by name
    /// (`"OrHash"`, `"MHash"` or `"PhiHash"`).
    pub fn new(capacity: u32, hash: &str) -> Result<Self, BitmapError> {
        Self::with_hash(capacity, hash.parse()?)
    }

    pub fn with_hash(capacity: u32, hash: HashFunction) -> Result<Self, BitmapError> {
        let bit_count = bit_count_for(capacity)?;
        Ok(Self {
            bits: PackedBits::new(bit_count),
            bit_count,
            bucket_count: capacity,
            hash,
        })
    }

    /// Sets bit `index` to 1.
    #[inline]
    pub fn set(&mut self, index: u32) -> Result<(), BitmapError> {
        self.check(index as u64)?;
        self.bits.set(index);
        Ok(())
    }

    /// Raw bit at `index`, as 0 or 1, without hashing.
    #[inline]
    pub fn get_unhashed(&self, index: u32) -> Result<u32, BitmapError> {
        self.check(index as u64)?;
        Ok(self.bits.test(index) as u32)
    }

    /// Bit of the bucket `group` combines into, as 0 or 1.
    #[inline]
    pub fn get(&self, group: &[u32]) -> u32 {
        let idx = self.bucket_of(group);
        debug_assert!(idx < self.bit_count);
        self.bits.test(idx) as u32
    }

    #[inline]
    pub fn contains(&self, group: &[u32]) -> bool {
        self.get(group) == 1
    }

    /// Bucket index for `group`, in `[0, bucket_count)`.
    #[inline]
    pub fn bucket_of(&self, group: &[u32]) -> u32 {
        self.hash.combine(group) % self.bucket_count
    }

    /// Sets bit `i` for every `counts[i] >= support`.
    ///
    /// Indexes by position; the combining function is not involved. Fails
    /// without touching any bit if a qualifying position is out of range.
    pub fn populate(&mut self, counts: &[u32], support: u32) -> Result<(), BitmapError> {
        if let Some(last) = counts.iter().rposition(|&c| c >= support) {
            self.check(last as u64)?;
        }
        for (w, mask) in word_masks(counts, support).into_iter().enumerate() {
            if mask != 0 {
                self.bits.merge_word(w, mask);
            }
        }
        Ok(())
    }

    /// Resets every bit to 0. Geometry and combining function are unchanged.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn count_ones(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn words(&self) -> &[u32] {
        self.bits.words()
    }

    pub fn word_count(&self) -> usize {
        self.bits.words().len()
    }

    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    pub fn bucket_count(&self) -> u32 {
        self.bucket_count
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash
    }

    #[inline]
    fn check(&self, index: u64) -> Result<(), BitmapError> {
        if index < self.bit_count as u64 {
            Ok(())
        } else {
            Err(BitmapError::IndexOutOfRange {
                index,
                bit_count: self.bit_count,
            })
        }
    }
}

/// One mask per 32 counts; bit `b` of mask `w` marks `counts[w * 32 + b]`.
fn word_masks(counts: &[u32], support: u32) -> Vec<u32> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        counts
            .par_chunks(WORD_BITS as usize)
            .map(|chunk| word_mask(chunk, support))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        counts
            .chunks(WORD_BITS as usize)
            .map(|chunk| word_mask(chunk, support))
            .collect()
    }
}

#[inline]
fn word_mask(chunk: &[u32], support: u32) -> u32 {
    chunk
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c >= support)
        .fold(0, |mask, (b, _)| mask | (1 << b))
}
