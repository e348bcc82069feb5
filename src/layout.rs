use {
    crate::error::{Result, SnowflakeError},
    std::time::Duration,
};

/// Width of a generated ID. The top bit of the `u64` is always 0.
pub const TOTAL_BITS: u8 = 63;

const DEFAULT_TIME_BITS: u8 = 39;
const DEFAULT_MACHINE_ID_BITS: u8 = 8;
const DEFAULT_TIME_UNIT: Duration = Duration::from_millis(10);

/// How the 63 usable bits of an ID are split between time, machine id and
/// sequence, and how long one tick of the time field lasts.
///
/// Layout from most to least significant bit:
/// - **Sign bit**: Always 0.
/// - **Tick**: `time_bits`, ticks of `time_unit` since the generator's epoch.
/// - **Machine ID**: `machine_id_bits`.
/// - **Sequence**: whatever remains, counting IDs issued within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitLayout {
    time_bits: u8,
    machine_id_bits: u8,
    sequence_bits: u8,
    time_unit_nanos: u64,
}

/// The three fields of an ID, as recovered by [`BitLayout::decompose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnowflakeParts {
    pub tick: u64,
    pub machine_id: u64,
    pub sequence: u64,
}

impl Default for BitLayout {
    /// 39 time bits, 8 machine id bits, 16 sequence bits, 10 ms ticks.
    fn default() -> Self {
        Self {
            time_bits: DEFAULT_TIME_BITS,
            machine_id_bits: DEFAULT_MACHINE_ID_BITS,
            sequence_bits: TOTAL_BITS - DEFAULT_TIME_BITS - DEFAULT_MACHINE_ID_BITS,
            time_unit_nanos: DEFAULT_TIME_UNIT.as_nanos() as u64,
        }
    }
}

impl BitLayout {
    /// Builds a layout, deriving the sequence width as `63 - time_bits -
    /// machine_id_bits`.
    ///
    /// # Errors
    ///
    /// - [`InvalidLayout`](SnowflakeError::InvalidLayout) if any field would
    ///   be zero bits wide, including a non-positive derived sequence width.
    /// - [`InvalidTimeUnit`](SnowflakeError::InvalidTimeUnit) if `time_unit`
    ///   is zero or longer than `u64::MAX` nanoseconds.
    pub fn new(time_bits: u8, machine_id_bits: u8, time_unit: Duration) -> Result<Self> {
        let sequence_bits = i16::from(TOTAL_BITS) - i16::from(time_bits) - i16::from(machine_id_bits);
        if time_bits == 0 || machine_id_bits == 0 || sequence_bits <= 0 {
            return Err(SnowflakeError::InvalidLayout {
                time_bits,
                machine_id_bits,
                sequence_bits,
            });
        }

        let time_unit_nanos: u64 = time_unit
            .as_nanos()
            .try_into()
            .map_err(|_| SnowflakeError::InvalidTimeUnit)?;
        if time_unit_nanos == 0 {
            return Err(SnowflakeError::InvalidTimeUnit);
        }

        Ok(Self {
            time_bits,
            machine_id_bits,
            sequence_bits: sequence_bits as u8,
            time_unit_nanos,
        })
    }

    /// Re-checks that the three widths are non-zero and sum to [`TOTAL_BITS`].
    pub fn validate(&self) -> Result<()> {
        let sum = u16::from(self.time_bits) + u16::from(self.machine_id_bits) + u16::from(self.sequence_bits);
        if sum != u16::from(TOTAL_BITS) || self.time_bits == 0 || self.machine_id_bits == 0 || self.sequence_bits == 0
        {
            return Err(SnowflakeError::InvalidLayout {
                time_bits: self.time_bits,
                machine_id_bits: self.machine_id_bits,
                sequence_bits: i16::from(self.sequence_bits),
            });
        }
        if self.time_unit_nanos == 0 {
            return Err(SnowflakeError::InvalidTimeUnit);
        }
        Ok(())
    }

    pub fn time_bits(&self) -> u8 {
        self.time_bits
    }

    pub fn machine_id_bits(&self) -> u8 {
        self.machine_id_bits
    }

    pub fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    pub fn time_unit(&self) -> Duration {
        Duration::from_nanos(self.time_unit_nanos)
    }

    pub(crate) fn time_unit_nanos(&self) -> u64 {
        self.time_unit_nanos
    }

    pub fn max_tick(&self) -> u64 {
        max_value(self.time_bits)
    }

    pub fn max_machine_id(&self) -> u64 {
        max_value(self.machine_id_bits)
    }

    pub fn max_sequence(&self) -> u64 {
        max_value(self.sequence_bits)
    }

    /// Wall-clock span covered by the time field before it overflows.
    pub fn lifespan(&self) -> Duration {
        let nanos = u128::from(self.max_tick() + 1) * u128::from(self.time_unit_nanos);
        let secs = u64::try_from(nanos / 1_000_000_000).unwrap_or(u64::MAX);
        Duration::new(secs, (nanos % 1_000_000_000) as u32)
    }

    /// Packs the fields into an ID. Callers are responsible for keeping each
    /// field within its maximum.
    pub fn compose(&self, tick: u64, machine_id: u64, sequence: u64) -> u64 {
        debug_assert!(tick <= self.max_tick());
        debug_assert!(machine_id <= self.max_machine_id());
        debug_assert!(sequence <= self.max_sequence());
        (tick << self.tick_shift()) | (machine_id << self.sequence_bits) | sequence
    }

    pub fn decompose(&self, id: u64) -> SnowflakeParts {
        SnowflakeParts {
            tick: (id >> self.tick_shift()) & self.max_tick(),
            machine_id: (id >> self.sequence_bits) & self.max_machine_id(),
            sequence: id & self.max_sequence(),
        }
    }

    fn tick_shift(&self) -> u8 {
        self.sequence_bits + self.machine_id_bits
    }
}

// Integer shift keeps the bound exact for every width up to 63.
fn max_value(bits: u8) -> u64 {
    (1u64 << bits) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_sequence_bits() {
        let layout = BitLayout::new(39, 8, Duration::from_millis(10)).unwrap();
        assert_eq!(layout.sequence_bits(), 16);
        assert_eq!(layout, BitLayout::default());
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_capacity_boundary() {
        assert!(matches!(
            BitLayout::new(40, 23, Duration::from_millis(1)),
            Err(SnowflakeError::InvalidLayout { sequence_bits: 0, .. })
        ));
        assert!(matches!(
            BitLayout::new(60, 10, Duration::from_millis(1)),
            Err(SnowflakeError::InvalidLayout { sequence_bits: -7, .. })
        ));
        assert!(matches!(
            BitLayout::new(255, 255, Duration::from_millis(1)),
            Err(SnowflakeError::InvalidLayout { .. })
        ));
        assert!(BitLayout::new(40, 22, Duration::from_millis(1)).is_ok());
    }

    #[test]
    fn test_zero_width_fields() {
        assert!(matches!(
            BitLayout::new(0, 8, Duration::from_millis(1)),
            Err(SnowflakeError::InvalidLayout { .. })
        ));
        assert!(matches!(
            BitLayout::new(39, 0, Duration::from_millis(1)),
            Err(SnowflakeError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn test_invalid_time_unit() {
        assert_eq!(BitLayout::new(39, 8, Duration::ZERO), Err(SnowflakeError::InvalidTimeUnit));
        assert_eq!(BitLayout::new(39, 8, Duration::MAX), Err(SnowflakeError::InvalidTimeUnit));
    }

    #[test]
    fn test_bounds_are_exact_at_wide_fields() {
        let layout = BitLayout::new(61, 1, Duration::from_nanos(1)).unwrap();
        assert_eq!(layout.max_tick(), (1 << 61) - 1);
        assert_eq!(layout.max_machine_id(), 1);
        assert_eq!(layout.max_sequence(), 1);

        let layout = BitLayout::new(1, 1, Duration::from_nanos(1)).unwrap();
        assert_eq!(layout.max_sequence(), (1 << 61) - 1);
    }

    #[test]
    fn test_compose_decompose() {
        let layout = BitLayout::default();
        let id = layout.compose(123_456, 12, 65_535);
        assert!(id < 1 << 63);
        assert_eq!(
            layout.decompose(id),
            SnowflakeParts {
                tick: 123_456,
                machine_id: 12,
                sequence: 65_535
            }
        );

        let id = layout.compose(layout.max_tick(), layout.max_machine_id(), layout.max_sequence());
        assert_eq!(id, (1 << 63) - 1);
    }

    #[test]
    fn test_lifespan() {
        let layout = BitLayout::new(10, 8, Duration::from_millis(1)).unwrap();
        assert_eq!(layout.lifespan(), Duration::from_millis(1024));

        // 2^39 ticks of 10 ms is roughly 174 years.
        let years = BitLayout::default().lifespan().as_secs() / (365 * 24 * 3600);
        assert_eq!(years, 174);
    }
}
