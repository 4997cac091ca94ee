//! Interval Timing
//!
//! Monotonic interval measurement over `std::time::Instant`, reported in
//! fractional milliseconds, with optional CPU pinning to reduce
//! scheduling noise on Linux.

use std::time::Instant;

/// Timer for measuring one benchmark pass
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since start, in fractional milliseconds
    #[inline(always)]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1_000.0
    }
}

/// Pin the current thread to a specific core.
///
/// Keeps successive interval readings on one core's clock.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// CPU pinning is not supported on this platform
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timer_measures_sleep() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();

        // At least 5ms, under 200ms accounting for scheduling
        assert!(elapsed >= 5.0);
        assert!(elapsed < 200.0);
    }

    #[test]
    fn test_timer_is_monotonic() {
        let timer = Timer::start();
        let a = timer.elapsed_ms();
        let b = timer.elapsed_ms();
        assert!(b >= a);
    }
}
