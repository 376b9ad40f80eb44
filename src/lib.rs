//! group_bitmap — fixed-size membership bitmap over groups of `u32`.
//!
//! - Sized once: `capacity` buckets, stored as `pow2(log2(capacity))` bits in `u32` words.
//! - A group is combined into one key (`OrHash`, `MHash` or `PhiHash`) and reduced
//!   modulo the bucket count; its presence is the bit at that bucket.
//! - Populate in bulk from per-bucket counts and a support threshold.
//!
//! ```
//! use group_bitmap::Bitmap;
//!
//! let mut bm = Bitmap::new(4, "OrHash")?;
//! bm.populate(&[0, 5, 10, 2], 5)?;
//! assert_eq!(bm.get(&[1]), 1); // bucket 1
//! assert_eq!(bm.get(&[3]), 0); // bucket 3
//! # Ok::<(), group_bitmap::BitmapError>(())
//! ```

mod bitmap;
mod builder;
mod hash;
mod util;

pub use bitmap::{Bitmap, BitmapError};
pub use builder::{BitmapConfig, Builder};
pub use hash::{HashFunction, m_hash, or_hash, phi_hash};
pub use util::{checked_pow2, log2, pow2};
