//! Timing for the on-scroll skill counters.

use std::time::Duration;

/// A counter reaches its target in this many ticks.
pub const COUNT_STEPS: u32 = 20;
pub const COUNT_TICK: Duration = Duration::from_millis(60);

/// Delay before the `index`th bar starts, so bars fill one after another.
pub fn stagger_delay(index: usize) -> Duration {
    Duration::from_millis(100 + 150 * index as u64)
}

/// One tick of the percentage counter. Never overshoots `target`.
pub fn next_count(current: u32, target: u32) -> u32 {
    let step = target.div_ceil(COUNT_STEPS).max(1);
    current.saturating_add(step).min(target)
}
