//! Snowflake is a unique ID generator that packs elapsed time, a machine ID,
//! and a sequence value into a 63-bit integer.
//!
//! IDs returned by one generator never repeat and never decrease:
//! - **Temporal Ordering**: The tick sits in the most significant bits, so IDs
//!   generated in later ticks are numerically larger.
//! - **Same Tick**: Within a tick the sequence number counts up. Once it is
//!   used up, the generator moves on to the next tick and waits for the clock
//!   to get there.
//! - **Clock Skew**: If the clock goes backward, the generator keeps issuing
//!   IDs from its last tick instead of rewinding.
//!
//! Default ID structure:
//! - **Sign bit**: Always 0.
//! - **Tick**: 39 bits, counting 10 ms ticks since a custom epoch.
//! - **Machine ID**: 8 bits, identifying the generator instance.
//! - **Sequence**: 16 bits, providing uniqueness within the same tick.
//! - **Total**: 64 bits.
//!
//! The time and machine ID widths and the tick length are configurable
//! through [`BitLayout`]. The sequence gets the remaining bits, and every
//! field must be at least 1 bit wide.
//!
//! # Examples
//!
//! ```
//! use snowflake::Snowflake;
//!
//! let snowflake = Snowflake::builder().with_machine_id(12).build().unwrap();
//!
//! let id = snowflake.next_id().unwrap();
//! assert_eq!(snowflake.decompose(id).machine_id, 12);
//! ```
//!
//! # Errors
//!
//! - [`InvalidLayout`](SnowflakeError::InvalidLayout) and
//!   [`InvalidTimeUnit`](SnowflakeError::InvalidTimeUnit): the bit layout
//!   can't be built.
//! - [`InvalidStartTime`](SnowflakeError::InvalidStartTime): the epoch lies
//!   in the future.
//! - [`MachineIdOutOfRange`](SnowflakeError::MachineIdOutOfRange): the machine
//!   ID doesn't fit its field.
//! - [`TimeOverflow`](SnowflakeError::TimeOverflow): the tick no longer fits
//!   its field. The generator is done and has to be rebuilt with a new layout
//!   or epoch.
//!
//! # Safety
//!
//! [`Snowflake`] is safe to share between threads. Clones share one lock, and
//! machine IDs must be kept distinct across generators by the caller.

mod error;
mod layout;
mod snowflake;
mod time;

pub use {
    error::{Result, SnowflakeError},
    layout::{BitLayout, SnowflakeParts, TOTAL_BITS},
    snowflake::{Snowflake, SnowflakeBuilder},
    time::{SystemClock, TimeSource, DEFAULT_EPOCH},
};
