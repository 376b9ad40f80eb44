use crate::bitmap::{Bitmap, BitmapError};
use crate::hash::HashFunction;

/// Construction parameters.
#[derive(Debug, Clone)]
pub struct BitmapConfig {
    /// Requested bucket count. Storage rounds past it to a power of two.
    pub capacity: u32,
    /// Combining function used by lookups.
    pub hash: HashFunction,
    /// Minimum count for a bucket to be marked present by `build_from_counts`.
    pub support: u32,
}

impl Default for BitmapConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            hash: HashFunction::OrHash,
            support: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Builder {
    cfg: BitmapConfig,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, cfg: BitmapConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.cfg.capacity = capacity;
        self
    }

    pub fn hash(mut self, hash: HashFunction) -> Self {
        self.cfg.hash = hash;
        self
    }

    pub fn support(mut self, support: u32) -> Self {
        self.cfg.support = support;
        self
    }

    /// Empty bitmap.
    pub fn build(self) -> Result<Bitmap, BitmapError> {
        Bitmap::with_hash(self.cfg.capacity, self.cfg.hash)
    }

    /// Bitmap seeded from per-bucket counts at the configured support.
    pub fn build_from_counts(self, counts: &[u32]) -> Result<Bitmap, BitmapError> {
        let support = self.cfg.support;
        let mut bm = self.build()?;
        bm.populate(counts, support)?;
        Ok(bm)
    }
}
