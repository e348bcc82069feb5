use snowflake::Snowflake;

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let machine_id = 1;
    let snowflake = Snowflake::builder().with_machine_id(machine_id).build().unwrap();

    let id1 = snowflake.next_id().unwrap();
    let id2 = snowflake.next_id().unwrap();
    let id3 = snowflake.next_id().unwrap();

    println!("id1: {}", id1);
    println!("id2: {}", id2);
    println!("id3: {}", id3);

    assert_ne!(id1, id2);
    assert_ne!(id1, id3);
    assert_ne!(id2, id3);
}
