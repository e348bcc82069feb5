use {
    crate::error::{Result, SnowflakeError},
    std::time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Default epoch: 2024-01-01 00:00:00.000 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_704_067_200_000);

/// Where the generator reads the current time from, and how it waits for time
/// to catch up after exhausting a tick's sequence space.
///
/// [`SystemClock`] is the production implementation. Tests plug in a fake
/// clock to step through the generator's state machine deterministically.
pub trait TimeSource {
    /// Nanoseconds elapsed since the unix epoch.
    fn unix_nanos(&self) -> Result<u64>;

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// The host's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn unix_nanos(&self) -> Result<u64> {
        unix_nanos_of(SystemTime::now())
    }
}

pub(crate) fn unix_nanos_of(time: SystemTime) -> Result<u64> {
    time.duration_since(UNIX_EPOCH)
        .map_err(|_| SnowflakeError::ClockOutOfRange)?
        .as_nanos()
        .try_into()
        .map_err(|_| SnowflakeError::ClockOutOfRange)
}
