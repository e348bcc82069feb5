use {
    snowflake::Snowflake,
    std::{error::Error, sync::mpsc, thread},
};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().init();

    let machine_id = 1;
    let snowflake = Snowflake::builder().with_machine_id(machine_id).build()?;
    let (tx, rx) = mpsc::channel();

    let handles: Vec<_> = (0 .. 10)
        .map(|_| {
            let snowflake = snowflake.clone();
            let tx = tx.clone();
            thread::spawn(move || match snowflake.next_id() {
                Ok(sfid) => {
                    let _ = tx.send(sfid);
                }
                Err(e) => {
                    println!("Generate error: {}", e);
                }
            })
        })
        .collect();
    drop(tx);

    for handle in handles {
        let _ = handle.join();
    }

    for sfid in rx {
        println!("Snowflake ID: {}", sfid);
    }

    Ok(())
}
