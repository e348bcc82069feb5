pub type Result<T, E = SnowflakeError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SnowflakeError {
    #[error(
        "invalid bit layout: time(={time_bits}) + machine id(={machine_id_bits}) + sequence(={sequence_bits}) \
         bits must sum to 63 with every field at least 1 bit wide"
    )]
    InvalidLayout {
        time_bits: u8,
        machine_id_bits: u8,
        sequence_bits: i16,
    },
    #[error("time unit must be a non-zero duration representable in u64 nanoseconds")]
    InvalidTimeUnit,
    #[error("start time must not be later than the current time")]
    InvalidStartTime,
    #[error("invalid machine id(={machine_id}), expected machine id ∈ [0,{max}]")]
    MachineIdOutOfRange { machine_id: u64, max: u64 },
    #[error("time field exhausted: tick(={tick}) exceeds the maximum tick(={max})")]
    TimeOverflow { tick: u64, max: u64 },
    #[error("clock reports a time outside the range of u64 nanoseconds since the unix epoch")]
    ClockOutOfRange,
    #[error("generator lock poisoned by a panicking caller")]
    LockPoisoned,
}
