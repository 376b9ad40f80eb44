use group_bitmap::{
    Bitmap, BitmapError, Builder, HashFunction, log2, m_hash, or_hash, phi_hash, pow2,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_group(rng: &mut StdRng, max_len: usize) -> Vec<u32> {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| rng.r#gen()).collect()
}

#[test]
fn word_count_follows_rounding_rule() {
    for c in [16u32, 17, 31, 32, 33, 100, 1000, 4096, 65_535] {
        let bm = Bitmap::new(c, "OrHash").unwrap();
        assert_eq!(bm.word_count(), (pow2(log2(c)) / 32) as usize, "capacity {c}");
        assert_eq!(bm.word_count() * 32, bm.bit_count() as usize);
        assert!(bm.bucket_count() < bm.bit_count());
        assert!(bm.words().iter().all(|&w| w == 0));
    }
}

#[test]
fn every_name_constructs() {
    for name in ["OrHash", "MHash", "PhiHash"] {
        let bm = Bitmap::new(64, name).unwrap();
        assert_eq!(bm.hash_function().name(), name);
    }
    for name in ["unknown", "ORHASH", "XorHash", " OrHash"] {
        assert!(matches!(
            Bitmap::new(16, name),
            Err(BitmapError::UnknownHashFunction(_))
        ));
    }
}

#[test]
fn or_hash_ignores_order() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let mut g = random_group(&mut rng, 8);
        let before = or_hash(&g);
        g.reverse();
        assert_eq!(or_hash(&g), before);
        // Splitting the group and OR-ing the halves gives the same key.
        let (a, b) = g.split_at(g.len() / 2);
        assert_eq!(or_hash(a) | or_hash(b), before);
    }
}

#[test]
fn m_hash_pairs() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let a: u32 = rng.r#gen();
        let b: u32 = rng.r#gen();
        assert_eq!(m_hash(&[a]), a);
        assert_eq!(m_hash(&[a, b]), a ^ !b);
        assert_eq!(phi_hash(&[a, b]), 0);
    }
}

#[test]
fn populated_buckets_are_found() {
    let mut rng = StdRng::seed_from_u64(42);
    for hash in [HashFunction::OrHash, HashFunction::MHash] {
        let capacity = 5000;
        let groups: Vec<Vec<u32>> = (0..2000).map(|_| random_group(&mut rng, 4)).collect();

        let mut counts = vec![0u32; capacity as usize];
        for g in &groups {
            counts[(hash.combine(g) % capacity) as usize] += 1;
        }
        let bm = Builder::new()
            .capacity(capacity)
            .hash(hash)
            .support(1)
            .build_from_counts(&counts)
            .unwrap();

        // No false negatives for groups that were counted.
        for g in &groups {
            assert_eq!(bm.get(g), 1, "{hash}: {g:?}");
        }
        let expected = counts.iter().filter(|&&c| c >= 1).count() as u32;
        assert_eq!(bm.count_ones(), expected);
    }
}

#[test]
fn support_filters_rare_buckets() {
    let mut counts = vec![0u32; 64];
    counts[3] = 1;
    counts[10] = 4;
    counts[40] = 9;
    let bm = Builder::new()
        .capacity(64)
        .support(4)
        .build_from_counts(&counts)
        .unwrap();
    assert_eq!(bm.get(&[3]), 0);
    assert_eq!(bm.get(&[10]), 1);
    assert_eq!(bm.get(&[8, 2]), 1); // 8 | 2 == 10
    assert_eq!(bm.get(&[40]), 1);
}

#[test]
fn get_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut bm = Bitmap::new(300, "MHash").unwrap();
    for i in (0..300).step_by(7) {
        bm.set(i).unwrap();
    }
    for _ in 0..500 {
        let g = random_group(&mut rng, 5);
        assert_eq!(bm.get(&g), bm.get(&g));
    }
}

#[test]
fn repeated_populate_only_adds_bits() {
    let mut bm = Bitmap::new(128, "OrHash").unwrap();
    bm.populate(&[1, 0, 1], 1).unwrap();
    let first = bm.words().to_vec();
    bm.populate(&[1, 0, 1], 1).unwrap();
    assert_eq!(bm.words(), first.as_slice());
    bm.populate(&[0, 1], 1).unwrap();
    assert_eq!(bm.words()[0], 0b111);
}

#[cfg(feature = "serde")]
#[test]
fn serde_derive_preserves_state() {
    let mut bm = Bitmap::new(96, "MHash").unwrap();
    bm.populate(&[2, 0, 3, 0, 5], 2).unwrap();
    let bytes = bincode::serialize(&bm).unwrap();
    let back: Bitmap = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, bm);
    assert_eq!(back.hash_function(), HashFunction::MHash);
}

#[cfg(feature = "serde")]
#[test]
fn tampered_bytes_are_rejected() {
    let bm = Bitmap::new(4, "OrHash").unwrap();
    let bytes = bincode::serialize(&bm).unwrap();
    // Trailing fields: bit_count, bucket_count, then the hash variant tag.
    let bucket = bytes.len() - 8;
    let bits = bytes.len() - 12;

    let mut zero_buckets = bytes.clone();
    zero_buckets[bucket..bucket + 4].copy_from_slice(&0u32.to_le_bytes());
    assert!(bincode::deserialize::<Bitmap>(&zero_buckets).is_err());

    let mut odd_bits = bytes.clone();
    odd_bits[bits..bits + 4].copy_from_slice(&12u32.to_le_bytes());
    assert!(bincode::deserialize::<Bitmap>(&odd_bits).is_err());

    let mut wide = bytes.clone();
    wide[bucket..bucket + 4].copy_from_slice(&100u32.to_le_bytes());
    assert!(bincode::deserialize::<Bitmap>(&wide).is_err());

    let back: Bitmap = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back.get(&[1]), 0);
}
