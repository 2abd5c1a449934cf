//! thread blocking used when a generator runs out of sequence values
//!
//! sleeping alone can overshoot by more than a millisecond on some systems
//! so the last part of a wait yields and then spins.

use std::time::{Duration, Instant};

const SLEEP_THRESHOLD: Duration = Duration::from_micros(500);
const YIELD_THRESHOLD: Duration = Duration::from_micros(1);

/// blocks the current thread for the given duration by sleeping, yielding,
/// or spinning
pub fn block_duration(dur: &Duration) {
    let start = Instant::now();

    loop {
        let Some(diff) = dur.checked_sub(start.elapsed()) else {
            break;
        };

        if diff > SLEEP_THRESHOLD {
            std::thread::sleep(diff - SLEEP_THRESHOLD);
        } else if diff > YIELD_THRESHOLD {
            std::thread::yield_now();
        } else {
            std::hint::spin_loop();
        }
    }
}
