use {
    snowflake::{BitLayout, Snowflake},
    std::{
        error::Error,
        time::{Duration, UNIX_EPOCH},
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let layout = BitLayout::new(41, 10, Duration::from_millis(1))?;
    let epoch = UNIX_EPOCH + Duration::from_millis(1609459200000); // 2021-01-01 00:00:00.000 UTC
    let snowflake = Snowflake::new(layout, epoch, 4)?;

    println!("Lifespan: {:?}", layout.lifespan());
    let sfid = snowflake.next_id()?;
    let parts = snowflake.decompose(sfid);
    println!(
        "Snowflake ID: {} (tick: {}, machine id: {}, sequence: {}, issued at: {:?})",
        sfid,
        parts.tick,
        parts.machine_id,
        parts.sequence,
        snowflake.timestamp_of(sfid)
    );
    Ok(())
}
