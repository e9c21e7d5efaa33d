//! Interactive shell: reads line commands from stdin and runs them
//! against the quote book.

use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use quote_core::{CategoryFilter, QuoteBook, SyncOutcome, SyncStatus, View};

use crate::command::{Command, HELP};

pub async fn run(book: &QuoteBook) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(e) = execute(book, command).await {
                    eprintln!("error: {}", e);
                }
            }
            Err(usage) if usage.is_empty() => {}
            Err(usage) => eprintln!("{}", usage),
        }
        prompt();
    }

    Ok(())
}

/// Print every status change as the sync banner, and redraw the quote and
/// categories when a sync replaced the collection.
pub async fn watch_status(book: Arc<QuoteBook>, mut status: watch::Receiver<SyncStatus>) {
    while status.changed().await.is_ok() {
        let current = status.borrow_and_update().clone();
        println!("\n[sync] {}", current);

        match book.refresh_after(&current) {
            Ok(Some(view)) => print_view(&view),
            Ok(None) => {}
            Err(e) => eprintln!("error: {}", e),
        }
        prompt();
    }
}

async fn execute(book: &QuoteBook, command: Command) -> quote_core::Result<()> {
    match command {
        Command::Show => println!("{}", book.show_random()?),
        Command::Categories => print_categories(&book.active_filter()?, &book.categories()),
        Command::Filter(name) => println!("{}", book.select_category(name.as_str())?),
        Command::Add { category, text } => {
            let is_new = !book.categories().contains(&category.trim().to_string());
            let quote = book.add_quote(&text, &category)?;
            println!("Added {}", quote);
            if is_new {
                println!("New category: {}", quote.category);
            }
        }
        Command::Export(dir) => {
            let path = book.export_to(dir.as_deref()).await?;
            println!("Exported {} quotes to {}", book.quotes().len(), path.display());
        }
        Command::Import(path) => {
            let imported = book.import_file(&path).await?;
            println!("Imported {} quotes. Syncing...", imported);
        }
        Command::Sync => match book.sync_now().await {
            SyncOutcome::Skipped => println!("A sync is already running."),
            outcome => tracing::debug!(?outcome, "Manual sync finished"),
        },
        Command::Status => println!("{}", book.sync_status()),
        Command::Clear => {
            book.clear()?;
            println!("All quotes and stored data cleared.");
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }

    Ok(())
}

fn print_view(view: &View) {
    println!("{}", view.rendered);
    print_categories(&view.filter, &view.categories);
}

fn print_categories(active: &CategoryFilter, categories: &[String]) {
    let marker = |filter: &CategoryFilter| if filter == active { "*" } else { " " };

    println!("{} all", marker(&CategoryFilter::All));
    for category in categories {
        let filter = CategoryFilter::Category(category.clone());
        println!("{} {}", marker(&filter), filter);
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
