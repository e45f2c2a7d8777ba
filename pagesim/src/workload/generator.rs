use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng as CurRng;

use log::debug;

use super::AccessSequence;
use crate::config::{AccessPattern, Config};
use crate::error::Result;

/// Number of loop regions the loop pattern picks from.
pub const LOOP_REGIONS: usize = 5;
/// Length of a loop region in pages.
pub const LOOP_REGION_PAGES: usize = 3;
/// Largest step (in either direction) of the locality random walk.
pub const LOCALITY_STEP: i64 = 20;

/// Generates access sequences from a [`Config`] and a seed.
///
/// The generator owns its random stream, so two generators created with the
/// same config and seed produce identical sequences.
pub struct WorkloadGenerator<'a> {
    config: &'a Config,
    rng: CurRng,
}

impl<'a> WorkloadGenerator<'a> {
    pub fn new(config: &'a Config, seed: u64) -> Self {
        Self {
            config,
            rng: CurRng::seed_from_u64(seed),
        }
    }

    pub fn generate(mut self) -> Result<AccessSequence> {
        let len = self.config.sequence_length();
        let total = self.config.total_instructions();
        let page_size = self.config.page_size();

        let mut seq = Vec::new();
        seq.try_reserve_exact(len)?;

        debug!(
            "generating {} accesses with the {} pattern",
            len,
            self.config.access_pattern()
        );

        let rng = &mut self.rng;
        match self.config.access_pattern() {
            AccessPattern::Sequential => sequential(&mut seq, len, total),
            AccessPattern::Jump => jump(rng, &mut seq, len, total),
            AccessPattern::Branch => branch(rng, &mut seq, len, total, page_size),
            AccessPattern::Loop => looping(rng, &mut seq, len, total, page_size),
            AccessPattern::LocalityRandom => locality_random(
                rng,
                &mut seq,
                len,
                total,
                self.config.locality_factor(),
            ),
        }

        Ok(AccessSequence::from_generated(total, seq))
    }
}

/// Shorthand for `WorkloadGenerator::new(config, seed).generate()`.
pub fn generate(config: &Config, seed: u64) -> Result<AccessSequence> {
    WorkloadGenerator::new(config, seed).generate()
}

#[inline]
fn percent<R: Rng>(rng: &mut R, chance: u32) -> bool {
    rng.gen_range(0..100) < chance
}

fn sequential(seq: &mut Vec<usize>, len: usize, total: usize) {
    seq.extend((0..len).map(|i| i % total));
}

fn jump<R: Rng>(rng: &mut R, seq: &mut Vec<usize>, len: usize, total: usize) {
    let mut current = 0;
    for _ in 0..len {
        seq.push(current);
        current = if percent(rng, 70) {
            (current + 1) % total
        } else {
            (current + rng.gen_range(10..60)) % total
        };
    }
}

fn branch<R: Rng>(rng: &mut R, seq: &mut Vec<usize>, len: usize, total: usize, page_size: usize) {
    let pages = total / page_size;
    let mut current = 0;
    for _ in 0..len {
        seq.push(current);
        current = if percent(rng, 80) {
            // stay within the current page
            (current + 1) % page_size + (current / page_size) * page_size
        } else {
            rng.gen_range(0..pages) * page_size + rng.gen_range(0..page_size)
        };
        current %= total;
    }
}

/// Cycles through one of five loop regions of `3 * page_size` instructions.
///
/// Region starts are drawn independently, so regions may overlap.
fn looping<R: Rng>(rng: &mut R, seq: &mut Vec<usize>, len: usize, total: usize, page_size: usize) {
    let loop_size = (page_size * LOOP_REGION_PAGES).min(total);
    let span = total - loop_size;

    let mut starts = [0; LOOP_REGIONS];
    for start in starts.iter_mut() {
        *start = if span == 0 { 0 } else { rng.gen_range(0..span) };
    }

    let mut region = 0;
    let mut pos = 0;
    for _ in 0..len {
        seq.push(starts[region] + pos);
        pos = (pos + 1) % loop_size;

        if pos == 0 && percent(rng, 30) {
            region = rng.gen_range(0..LOOP_REGIONS);
        }
    }
}

fn locality_random<R: Rng>(
    rng: &mut R,
    seq: &mut Vec<usize>,
    len: usize,
    total: usize,
    locality_factor: f64,
) {
    let mut current = rng.gen_range(0..total);
    for _ in 0..len {
        seq.push(current);
        current = if rng.gen::<f64>() < locality_factor {
            let delta = rng.gen_range(-LOCALITY_STEP..=LOCALITY_STEP);
            (current as i64 + delta).rem_euclid(total as i64) as usize
        } else {
            rng.gen_range(0..total)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    fn config(pattern: AccessPattern) -> Config {
        ConfigBuilder::new()
            .page_size(10)
            .total_instructions(400)
            .sequence_length(400)
            .access_pattern(pattern)
            .build()
            .unwrap()
    }

    #[test]
    fn sequential_is_linear() {
        let config = config(AccessPattern::Sequential);
        for &seed in &[0, 1, 0xdead_beef] {
            let seq = generate(&config, seed).unwrap();
            assert!(seq.iter().enumerate().all(|(i, a)| i == a));
        }
    }

    #[test]
    fn sequences_stay_in_range() {
        for &pattern in AccessPattern::ALL.iter() {
            let config = config(pattern);
            for seed in 0..16 {
                let seq = generate(&config, seed).unwrap();
                assert_eq!(seq.len(), config.sequence_length());
                assert!(
                    seq.iter().all(|a| a < config.total_instructions()),
                    "{} produced an out of range access (seed {})",
                    pattern,
                    seed
                );
            }
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        for &pattern in AccessPattern::ALL.iter() {
            let config = config(pattern);
            let a = generate(&config, 0x3ffd_235c_5194_dedf).unwrap();
            let b = generate(&config, 0x3ffd_235c_5194_dedf).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let config = config(AccessPattern::LocalityRandom);
        let a = generate(&config, 1).unwrap();
        let b = generate(&config, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn jump_steps_forward() {
        let config = config(AccessPattern::Jump);
        let seq = generate(&config, 7).unwrap();
        assert_eq!(seq[0], 0);
        for w in seq.as_slice().windows(2) {
            let step = (w[1] + config.total_instructions() - w[0]) % config.total_instructions();
            assert!(step == 1 || (10..60).contains(&step), "step {}", step);
        }
    }

    #[test]
    fn branch_stays_in_page_or_jumps() {
        let config = config(AccessPattern::Branch);
        let seq = generate(&config, 11).unwrap();
        let page_size = config.page_size();
        let mut jumps = 0;
        for w in seq.as_slice().windows(2) {
            let in_page = w[1] / page_size == w[0] / page_size
                && w[1] % page_size == (w[0] % page_size + 1) % page_size;
            if !in_page {
                jumps += 1;
            }
        }
        // roughly 20% of the transitions jump away
        assert!(jumps > 0 && jumps < seq.len() / 2);
    }

    #[test]
    fn loop_walks_regions_in_order() {
        let config = config(AccessPattern::Loop);
        let seq = generate(&config, 3).unwrap();
        let loop_size = config.page_size() * LOOP_REGION_PAGES;

        for (i, w) in seq.as_slice().windows(2).enumerate() {
            if (i + 1) % loop_size != 0 {
                assert_eq!(w[1], w[0] + 1);
            }
        }
    }

    #[test]
    fn loop_handles_tiny_address_space() {
        let config = ConfigBuilder::new()
            .page_size(4)
            .total_instructions(8)
            .sequence_length(8)
            .access_pattern(AccessPattern::Loop)
            .build()
            .unwrap();
        let seq = generate(&config, 5).unwrap();
        assert_eq!(seq.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn full_locality_takes_small_steps() {
        let config = ConfigBuilder::new()
            .page_size(10)
            .total_instructions(1000)
            .sequence_length(500)
            .access_pattern(AccessPattern::LocalityRandom)
            .locality_factor(1.0)
            .build()
            .unwrap();
        let seq = generate(&config, 9).unwrap();
        let total = config.total_instructions() as i64;
        for w in seq.as_slice().windows(2) {
            let diff = (w[1] as i64 - w[0] as i64).rem_euclid(total);
            let dist = diff.min(total - diff);
            assert!(dist <= LOCALITY_STEP, "distance {}", dist);
        }
    }

    #[test]
    fn locality_in_small_space_wraps() {
        let config = ConfigBuilder::new()
            .page_size(1)
            .total_instructions(5)
            .sequence_length(5)
            .access_pattern(AccessPattern::LocalityRandom)
            .locality_factor(1.0)
            .build()
            .unwrap();
        for seed in 0..32 {
            let seq = generate(&config, seed).unwrap();
            assert!(seq.iter().all(|a| a < 5));
        }
    }
}
