//! Line commands
//!
//! - `show` / `n`: display a new random quote
//! - `categories`: list categories and the active filter
//! - `filter <category|all>`: change the active filter
//! - `add <category> | <text>`: add a quote
//! - `export [dir]` / `import <file>`: file transfer
//! - `sync`: run a reconciliation cycle now
//! - `clear`: wipe all quotes and stored state

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Categories,
    Filter(String),
    Add { category: String, text: String },
    Export(Option<PathBuf>),
    Import(PathBuf),
    Sync,
    Status,
    Clear,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  show | n                   show a new random quote
  categories                 list categories
  filter <category|all>      filter quotes by category
  add <category> | <text>    add a quote
  export [dir]               export quotes to quotes_export.json
  import <file>              append quotes from a JSON file
  sync                       sync with the server now
  status                     show the sync status
  clear                      remove all quotes and stored data
  help                       show this help
  quit                       exit";

impl Command {
    /// Parse one input line. `Err` carries a usage message.
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        let mut parts = input.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default().to_lowercase();
        let rest = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        match command.as_str() {
            "show" | "n" | "next" => Ok(Command::Show),
            "categories" | "cats" => Ok(Command::Categories),
            "filter" | "f" => rest
                .map(Command::Filter)
                .ok_or_else(|| "usage: filter <category|all>".to_string()),
            "add" | "a" => {
                let rest = rest.ok_or_else(|| "usage: add <category> | <text>".to_string())?;
                let (category, text) = rest
                    .split_once('|')
                    .ok_or_else(|| "usage: add <category> | <text>".to_string())?;
                Ok(Command::Add {
                    category: category.trim().to_string(),
                    text: text.trim().to_string(),
                })
            }
            "export" => Ok(Command::Export(rest.map(PathBuf::from))),
            "import" => rest
                .map(|p| Command::Import(PathBuf::from(p)))
                .ok_or_else(|| "usage: import <file>".to_string()),
            "sync" => Ok(Command::Sync),
            "status" => Ok(Command::Status),
            "clear" => Ok(Command::Clear),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(String::new()),
            other => Err(format!("unknown command '{}' (try 'help')", other)),
        }
    }
}
