//! Quotegen - terminal front end
//!
//! Shows quotes, takes line commands, and keeps the collection in sync
//! with the (simulated) server in the background.

mod command;
mod shell;

use std::sync::Arc;

use quote_core::{Config, QuoteBook};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quote_core::init_logging();

    let config = Config::load(&Config::data_dir())?;
    let book = Arc::new(QuoteBook::new(config)?);

    println!("{}", book.initialize()?);
    println!("Type 'help' for commands.");

    let banner = tokio::spawn(shell::watch_status(
        Arc::clone(&book),
        book.subscribe_status(),
    ));
    let sync = book.spawn_sync_loop();

    tracing::info!("Quotegen started");

    shell::run(&book).await?;

    sync.abort();
    banner.abort();
    tracing::info!("Quotegen stopped");

    Ok(())
}
