use group_bitmap::{BitmapConfig, BitmapError, Builder, HashFunction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

const CAPACITY: u32 = 1 << 20;
const N_GROUPS: usize = 2_000_000;
const SUPPORT: u32 = 3;
const GEN_SEED: u64 = 42;

fn main() -> Result<(), BitmapError> {
    println!("--- group_bitmap demo ---");
    println!("capacity = {CAPACITY}, groups = {N_GROUPS}, support = {SUPPORT}");

    // 1) Generate pairs from a skewed alphabet so some buckets repeat often.
    let t0 = Instant::now();
    let groups = gen_groups(N_GROUPS, GEN_SEED);
    let gen_s = t0.elapsed().as_secs_f64();
    println!("gen:      {:>8.3} s", gen_s);

    for hash in HashFunction::ALL {
        // 2) Count observations per bucket.
        let t1 = Instant::now();
        let mut counts = vec![0u32; CAPACITY as usize];
        for g in &groups {
            let b = hash.combine(g) % CAPACITY;
            counts[b as usize] += 1;
        }
        let count_s = t1.elapsed().as_secs_f64();

        // 3) Populate
        let t2 = Instant::now();
        let bm = Builder::new()
            .with_config(BitmapConfig {
                capacity: CAPACITY,
                hash,
                support: SUPPORT,
            })
            .build_from_counts(&counts)?;
        let pop_s = t2.elapsed().as_secs_f64();

        // 4) Query every group back.
        let t3 = Instant::now();
        let present = groups.iter().filter(|g| bm.contains(g.as_slice())).count();
        let query_s = t3.elapsed().as_secs_f64();

        println!("[{hash}]");
        println!(
            "  count:  {:>8.3} s   populate: {:>8.3} s   query: {:>8.3} s ({:.1} M/s)",
            count_s,
            pop_s,
            query_s,
            N_GROUPS as f64 / query_s / 1e6
        );
        println!(
            "  bits set: {} / {}   groups present: {} / {}",
            bm.count_ones(),
            bm.bit_count(),
            present,
            N_GROUPS
        );
    }

    Ok(())
}

fn gen_groups(n: usize, seed: u64) -> Vec<Vec<u32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let hot = rng.gen_bool(0.5);
            let range = if hot { 1 << 10 } else { 1 << 20 };
            vec![rng.gen_range(0..range), rng.gen_range(0..range)]
        })
        .collect()
}
