/// Bits per storage word.
pub const WORD_BITS: u32 = 32;

/// 2^n as a left shift. Only meaningful for `n` in `[0, 31]`.
#[inline]
pub const fn pow2(n: u32) -> u32 {
    debug_assert!(n < WORD_BITS, "pow2 shift overflow");
    1 << n
}

/// 2^n, or `None` when the shift would overflow a word.
#[inline]
pub const fn checked_pow2(n: u32) -> Option<u32> {
    if n < WORD_BITS { Some(1 << n) } else { None }
}

/// Position of the highest set bit, counted from 1.
///
/// Scans bit 31 down to bit 1 and returns `i + 1` for the first set bit `i`.
/// Bit 0 is never tested, so both `log2(0)` and `log2(1)` are 0. For any
/// `n >= 2` this is `floor(log2(n)) + 1`, so `pow2(log2(n)) > n`.
#[inline]
pub const fn log2(n: u32) -> u32 {
    // Masking out bit 0 keeps the scan range 31..=1.
    let n = n & !1;
    if n == 0 { 0 } else { WORD_BITS - n.leading_zeros() }
}

/// Packed bit storage over 32-bit words.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    words: Vec<u32>,
}

impl PackedBits {
    /// Storage for `n` bits; always at least one word.
    pub fn new(n: u32) -> Self {
        Self { words: vec![0; Self::words_for(n)] }
    }
    /// Words needed to store `n` bits.
    #[inline]
    pub fn words_for(n: u32) -> usize {
        n.div_ceil(WORD_BITS).max(1) as usize
    }
    #[inline]
    pub fn test(&self, idx: u32) -> bool {
        let (w, b) = locate(idx);
        (self.words[w] >> b) & 1 == 1
    }
    #[inline]
    pub fn set(&mut self, idx: u32) {
        let (w, b) = locate(idx);
        self.words[w] |= pow2(b);
    }
    /// ORs a whole mask into word `w`.
    #[inline]
    pub fn merge_word(&mut self, w: usize, mask: u32) {
        self.words[w] |= mask;
    }
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }
    pub fn clear(&mut self) {
        self.words.fill(0);
    }
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

/// Splits a bit index into (word, bit-in-word).
#[inline]
fn locate(idx: u32) -> (usize, u32) {
    ((idx / WORD_BITS) as usize, idx % WORD_BITS)
}
