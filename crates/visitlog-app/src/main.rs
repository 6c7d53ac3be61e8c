//! visitlog desktop entry point.
//!
//! A line-oriented shell standing in for the browser UI: each command is a
//! button press or a finished page load, and history output goes to stdout.
//! Pass a config file as the first argument or via `VISITLOG_CONFIG`.

mod commands;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use commands::CommandOutput;
use visitlog_browser::BrowserSession;
use visitlog_history::open_store;
use visitlog_types::config::HistoryConfig;

const HOME_URL: &str = "https://www.google.com";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("VISITLOG_CONFIG").ok())
    {
        Some(path) => {
            let path = PathBuf::from(path);
            HistoryConfig::load(&path)
                .with_context(|| format!("loading config {}", path.display()))?
        },
        None => HistoryConfig::default(),
    };
    log::info!("Starting visitlog ({} storage)", config.storage);

    let store = open_store(&config)?;
    let mut session = BrowserSession::new(HOME_URL, store);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match commands::execute(&line, &mut session) {
            Ok(CommandOutput::Text(text)) => println!("{text}"),
            Ok(CommandOutput::None) => {},
            Ok(CommandOutput::Quit) => break,
            Err(e) => println!("error: {e:#}"),
        }
        print!("> ");
        stdout.flush()?;
    }

    log::info!("visitlog exiting with {} history entries", session.history().len());
    Ok(())
}
