use {
    crate::{
        error::{Result, SnowflakeError},
        layout::{BitLayout, SnowflakeParts},
        time::{unix_nanos_of, SystemClock, TimeSource, DEFAULT_EPOCH},
    },
    std::{
        cmp::Ordering,
        fmt,
        sync::{Arc, Mutex},
        time::{Duration, SystemTime, UNIX_EPOCH},
    },
};

/// A Snowflake ID generator shared between threads.
///
/// Clones are cheap and draw from the same tick/sequence state, so any number
/// of threads can call [`next_id`](Snowflake::next_id) on their own clone and
/// still never see a duplicate.
pub struct Snowflake<T = SystemClock> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    layout: BitLayout,
    machine_id: u64,
    start_time: SystemTime,
    start_tick: u64, // The epoch, in ticks since the unix epoch
    time: T,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    tick: u64,     // Highest tick handed out so far, relative to start_tick
    sequence: u64, // The sequence within that tick
}

impl<T> Clone for Snowflake<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Snowflake<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snowflake")
            .field("layout", &self.inner.layout)
            .field("machine_id", &self.inner.machine_id)
            .field("start_time", &self.inner.start_time)
            .finish_non_exhaustive()
    }
}

impl Snowflake<SystemClock> {
    /// Creates a generator reading the system wall clock.
    ///
    /// # Errors
    ///
    /// See [`Snowflake::with_time_source`].
    pub fn new(layout: BitLayout, start_time: SystemTime, machine_id: u64) -> Result<Self> {
        Self::with_time_source(layout, start_time, machine_id, SystemClock)
    }

    /// Starts a [`SnowflakeBuilder`] with the default layout, the
    /// [`DEFAULT_EPOCH`] and machine id 0.
    pub fn builder() -> SnowflakeBuilder<SystemClock> {
        SnowflakeBuilder::default()
    }
}

impl<T: TimeSource> Snowflake<T> {
    /// Creates a generator that reads the current time from `time`.
    ///
    /// # Errors
    ///
    /// - [`InvalidStartTime`](SnowflakeError::InvalidStartTime) if
    ///   `start_time` is later than the current time, or before 1970.
    /// - [`InvalidLayout`](SnowflakeError::InvalidLayout) if the layout's
    ///   widths don't sum to 63 bits.
    /// - [`MachineIdOutOfRange`](SnowflakeError::MachineIdOutOfRange) if
    ///   `machine_id` doesn't fit in the layout's machine id field.
    #[tracing::instrument(level = "debug", skip(time), err)]
    pub fn with_time_source(layout: BitLayout, start_time: SystemTime, machine_id: u64, time: T) -> Result<Self> {
        let start_nanos = unix_nanos_of(start_time).map_err(|_| SnowflakeError::InvalidStartTime)?;
        if start_nanos > time.unix_nanos()? {
            return Err(SnowflakeError::InvalidStartTime);
        }

        layout.validate()?;

        let max = layout.max_machine_id();
        if machine_id > max {
            return Err(SnowflakeError::MachineIdOutOfRange { machine_id, max });
        }

        Ok(Self {
            inner: Arc::new(Inner {
                layout,
                machine_id,
                start_time,
                start_tick: start_nanos / layout.time_unit_nanos(),
                time,
                state: Mutex::new(State::default()),
            }),
        })
    }

    /// Generates the next ID.
    ///
    /// Calls are serialized. If the current tick's sequence space is used up,
    /// the generator moves its tick one step ahead of the clock and sleeps,
    /// while still holding the lock, until the clock catches up. A clock that
    /// moves backwards never rewinds the tick.
    ///
    /// # Errors
    ///
    /// - [`TimeOverflow`](SnowflakeError::TimeOverflow) once the tick no
    ///   longer fits in the time field. Every later call fails the same way.
    /// - [`ClockOutOfRange`](SnowflakeError::ClockOutOfRange) if the clock
    ///   can't be read as nanoseconds since the unix epoch.
    /// - [`LockPoisoned`](SnowflakeError::LockPoisoned) if another caller
    ///   panicked mid-generation.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn next_id(&self) -> Result<u64> {
        let inner = &*self.inner;
        let layout = &inner.layout;
        let mut state = inner.state.lock().map_err(|_| SnowflakeError::LockPoisoned)?;

        let observed = inner.observed_tick()?;
        match state.tick.cmp(&observed) {
            // First call in a tick
            Ordering::Less => {
                state.tick = observed;
                state.sequence = 0;
            }
            // Same tick, or the clock is behind our last tick
            Ordering::Equal | Ordering::Greater => {
                if state.sequence < layout.max_sequence() {
                    state.sequence += 1;
                } else {
                    state.tick += 1;
                    state.sequence = 0;
                    let wait = Duration::from_nanos((state.tick - observed).saturating_mul(layout.time_unit_nanos()));
                    tracing::debug!(tick = state.tick, ?wait, "sequence space exhausted, waiting for the clock");
                    inner.time.sleep(wait);
                }
            }
        }

        let max = layout.max_tick();
        if state.tick > max {
            tracing::error!(tick = state.tick, max, "time field exhausted");
            return Err(SnowflakeError::TimeOverflow { tick: state.tick, max });
        }

        Ok(layout.compose(state.tick, inner.machine_id, state.sequence))
    }

    pub fn decompose(&self, id: u64) -> SnowflakeParts {
        self.inner.layout.decompose(id)
    }

    /// The wall-clock instant at which the tick encoded in `id` began, or
    /// `None` if it isn't representable.
    pub fn timestamp_of(&self, id: u64) -> Option<SystemTime> {
        let inner = &*self.inner;
        let ticks = u128::from(inner.start_tick) + u128::from(self.decompose(id).tick);
        let nanos = ticks * u128::from(inner.layout.time_unit_nanos());
        let secs = u64::try_from(nanos / 1_000_000_000).ok()?;
        UNIX_EPOCH.checked_add(Duration::new(secs, (nanos % 1_000_000_000) as u32))
    }

    pub fn layout(&self) -> BitLayout {
        self.inner.layout
    }

    pub fn machine_id(&self) -> u64 {
        self.inner.machine_id
    }

    pub fn start_time(&self) -> SystemTime {
        self.inner.start_time
    }
}

impl<T: TimeSource> Inner<T> {
    // Ticks elapsed since the epoch. A clock set before the epoch reads as 0.
    fn observed_tick(&self) -> Result<u64> {
        let now = self.time.unix_nanos()?;
        Ok((now / self.layout.time_unit_nanos()).saturating_sub(self.start_tick))
    }
}

/// Builder for [`Snowflake`]. Field widths and the time unit are checked by
/// [`BitLayout::new`] when [`build`](SnowflakeBuilder::build) is called.
#[derive(Debug, Clone)]
pub struct SnowflakeBuilder<T = SystemClock> {
    time_bits: u8,
    machine_id_bits: u8,
    time_unit: Duration,
    start_time: SystemTime,
    machine_id: u64,
    time: T,
}

impl Default for SnowflakeBuilder<SystemClock> {
    fn default() -> Self {
        let layout = BitLayout::default();
        Self {
            time_bits: layout.time_bits(),
            machine_id_bits: layout.machine_id_bits(),
            time_unit: layout.time_unit(),
            start_time: UNIX_EPOCH + DEFAULT_EPOCH,
            machine_id: 0,
            time: SystemClock,
        }
    }
}

impl<T: TimeSource> SnowflakeBuilder<T> {
    pub fn with_time_bits(mut self, time_bits: u8) -> Self {
        self.time_bits = time_bits;
        self
    }

    pub fn with_machine_id_bits(mut self, machine_id_bits: u8) -> Self {
        self.machine_id_bits = machine_id_bits;
        self
    }

    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn with_start_time(mut self, start_time: SystemTime) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_machine_id(mut self, machine_id: u64) -> Self {
        self.machine_id = machine_id;
        self
    }

    pub fn with_time_source<U: TimeSource>(self, time: U) -> SnowflakeBuilder<U> {
        SnowflakeBuilder {
            time_bits: self.time_bits,
            machine_id_bits: self.machine_id_bits,
            time_unit: self.time_unit,
            start_time: self.start_time,
            machine_id: self.machine_id,
            time,
        }
    }

    pub fn build(self) -> Result<Snowflake<T>> {
        let layout = BitLayout::new(self.time_bits, self.machine_id_bits, self.time_unit)?;
        Snowflake::with_time_source(layout, self.start_time, self.machine_id, self.time)
    }
}
