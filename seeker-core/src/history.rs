use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::Frequency;

/// Fixed-capacity history of the most recent `N` frequency samples.
///
/// Single producer (the sampler, possibly in interrupt context), single
/// consumer (the controller's scan). Appends overwrite the oldest entry.
/// Both sides take the same blocking mutex, so a full scan can never observe
/// a half-written append; with `CriticalSectionRawMutex` that is a short
/// interrupt-masked section, which is all the writer ever holds.
///
/// Slots start at `0` ("no detected frequency"), so an unfilled window reads
/// as out-of-band and cannot satisfy the channel predicate by accident.
pub struct History<M: RawMutex, const N: usize> {
    ring: Mutex<M, RefCell<Ring<N>>>,
}

struct Ring<const N: usize> {
    values: [Frequency; N],
    write: usize,
}

impl<M: RawMutex, const N: usize> History<M, N> {
    pub const fn new() -> Self {
        Self {
            ring: Mutex::new(RefCell::new(Ring {
                values: [0; N],
                write: 0,
            })),
        }
    }

    /// Append a sample, overwriting the oldest entry once full.
    pub fn push(&self, value: Frequency) {
        self.ring.lock(|ring| {
            let mut ring = ring.borrow_mut();
            let write = ring.write;
            ring.values[write] = value;
            ring.write = (write + 1) % N;
        });
    }

    /// A consistent copy of the window, oldest entry first.
    pub fn snapshot(&self) -> [Frequency; N] {
        self.ring.lock(|ring| {
            let ring = ring.borrow();
            let mut out = [0; N];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = ring.values[(ring.write + i) % N];
            }
            out
        })
    }

    /// Count of entries outside the inclusive `[min, max]` band, taken in
    /// one scan under the lock.
    pub fn out_of_band(&self, min: Frequency, max: Frequency) -> usize {
        self.ring.lock(|ring| {
            let ring = ring.borrow();
            ring.values.iter().filter(|&&v| v < min || v > max).count()
        })
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    type TestHistory<const N: usize> = History<CriticalSectionRawMutex, N>;

    #[test]
    fn empty_window_is_fully_out_of_band() {
        let history = TestHistory::<20>::new();
        assert_eq!(history.capacity(), 20);
        assert_eq!(history.out_of_band(14, 18), 20);
    }

    #[test]
    fn overwrites_oldest_first() {
        let history = TestHistory::<4>::new();
        for v in [1, 2, 3, 4, 5, 6] {
            history.push(v);
        }
        assert_eq!(history.snapshot(), [3, 4, 5, 6]);
    }

    #[test]
    fn partial_fill_keeps_zeroed_slots_oldest() {
        let history = TestHistory::<4>::new();
        history.push(7);
        history.push(8);
        assert_eq!(history.snapshot(), [0, 0, 7, 8]);
    }

    #[test]
    fn band_bounds_are_inclusive() {
        let history = TestHistory::<4>::new();
        for v in [14, 18, 13, 19] {
            history.push(v);
        }
        assert_eq!(history.out_of_band(14, 18), 2);
    }

    #[test]
    fn channel_predicate_worked_example() {
        // Window of 20, band 14..=18, tolerance 10.
        let history = TestHistory::<20>::new();
        for _ in 0..11 {
            history.push(16);
        }
        for _ in 0..9 {
            history.push(25);
        }
        // 9 outliers: within tolerance.
        assert!(history.out_of_band(14, 18) <= 10);
        // Two more outliers evict two in-band entries: 11 outliers, over.
        history.push(25);
        history.push(25);
        assert_eq!(history.out_of_band(14, 18), 11);
    }
}
