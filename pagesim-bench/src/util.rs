use pagesim::prelude::v1::*;

use rand::prelude::*;
use rand_xorshift::XorShiftRng as CurRng;

pub fn bench_config(
    algorithm: Algorithm,
    pattern: AccessPattern,
    frames: usize,
    len: usize,
) -> Result<Config> {
    ConfigBuilder::new()
        .page_size(16)
        .frame_count(frames)
        .total_instructions(len.max(16 * 64) / 16 * 16)
        .sequence_length(len)
        .algorithm(algorithm)
        .access_pattern(pattern)
        .locality_factor(0.8)
        .build()
}

/// Seed that changes between benchmark processes but stays fixed within one.
pub fn bench_seed() -> u64 {
    CurRng::from_rng(thread_rng())
        .map(|mut rng| rng.gen())
        .unwrap_or(0x3ffd_235c_5194_dedf)
}

/// Runs `f` with library logging limited to errors.
///
/// Every simulation logs its summary at info level, which would end up
/// in the measured time.
pub fn quiet_logs<T>(f: impl FnOnce() -> T) -> T {
    let filter = log::max_level();
    log::set_max_level(log::Level::Error.to_level_filter());

    let ret = f();

    log::set_max_level(filter);
    ret
}
