use super::{open_store, print_outcome};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let outcome = store.record_share().await;
    print_outcome(&outcome);
    println!("Compartido ({} en total)", outcome.stats.share_count);
    Ok(())
}
