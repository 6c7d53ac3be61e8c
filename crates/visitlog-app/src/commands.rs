//! Shell commands driving a browser session.

use anyhow::{Context, Result, bail};
use visitlog_browser::BrowserSession;
use visitlog_history::Backend;

/// What a command produced.
#[derive(Debug, PartialEq)]
pub enum CommandOutput {
    Text(String),
    None,
    Quit,
}

pub const HELP: &str = "\
open <url> [title]   load a page (records a visit when it finishes)
back | forward       move through the navigation stacks
home | reload        load the home page / reload the current page
history [keyword]    list visited URLs with visit counts
go <row>             load the page of a history row
top <n>              most visited URLs
delete <row>         delete a history row
update <row> <url>   point a history row at another URL
clear                clear all history
html                 print the history page
quit                 exit";

/// Parse and run one command line against `session`.
pub fn execute<B: Backend>(line: &str, session: &mut BrowserSession<B>) -> Result<CommandOutput> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, rest)) = args.split_first() else {
        return Ok(CommandOutput::None);
    };

    match cmd {
        "open" => {
            let Some(&url) = rest.first() else {
                bail!("usage: open <url> [title]");
            };
            let title = rest[1..].join(" ");
            let target = session.open(url);
            Ok(load(session, &target, &title))
        },
        "back" => match session.back() {
            Some(url) => Ok(load(session, &url, "")),
            None => Ok(CommandOutput::Text("Nothing to go back to".into())),
        },
        "forward" => match session.forward() {
            Some(url) => Ok(load(session, &url, "")),
            None => Ok(CommandOutput::Text("Nothing to go forward to".into())),
        },
        "home" => {
            let url = session.home();
            Ok(load(session, &url, ""))
        },
        "reload" => match session.reload() {
            Some(url) => Ok(load(session, &url, "")),
            None => Ok(CommandOutput::Text("No page loaded".into())),
        },
        "history" => {
            // Row numbers stay those of the full list so `delete` can use them.
            let keyword = rest.first().copied().unwrap_or("");
            let lines: Vec<String> = session
                .history_rows(None)
                .iter()
                .enumerate()
                .filter(|(_, row)| row.url.contains(keyword))
                .map(|(i, row)| format!("{i:>3}  {row}"))
                .collect();
            if lines.is_empty() {
                return Ok(CommandOutput::Text("History is empty".into()));
            }
            Ok(CommandOutput::Text(lines.join("\n")))
        },
        "go" => {
            let index = parse_row(rest.first(), "go <row>")?;
            match session.open_row(index) {
                Some(url) => Ok(load(session, &url, "")),
                None => Ok(CommandOutput::Text(format!("No history row {index}"))),
            }
        },
        "top" => {
            let limit = match rest.first() {
                Some(n) => n.parse::<usize>().context("top: limit must be a number")?,
                None => 5,
            };
            let lines: Vec<String> = session
                .top_sites(limit)
                .iter()
                .map(ToString::to_string)
                .collect();
            Ok(CommandOutput::Text(lines.join("\n")))
        },
        "delete" => {
            let index = parse_row(rest.first(), "delete <row>")?;
            if session.delete_row(index) {
                Ok(CommandOutput::Text(format!("Deleted row {index}")))
            } else {
                Ok(CommandOutput::Text(format!("No history row {index}")))
            }
        },
        "update" => {
            let index = parse_row(rest.first(), "update <row> <url>")?;
            let Some(&url) = rest.get(1) else {
                bail!("usage: update <row> <url>");
            };
            if session.update_row(index, url) {
                Ok(CommandOutput::Text(format!("Row {index} now points at {url}")))
            } else {
                Ok(CommandOutput::Text(format!("No history row {index}")))
            }
        },
        "clear" => {
            session.clear_history();
            Ok(CommandOutput::Text("History cleared".into()))
        },
        "html" => Ok(CommandOutput::Text(session.history_page_html())),
        "help" => Ok(CommandOutput::Text(HELP.to_string())),
        "quit" | "exit" => Ok(CommandOutput::Quit),
        other => bail!("unknown command: {other} (try 'help')"),
    }
}

/// The shell has no web view, so every load completes immediately.
fn load<B: Backend>(session: &mut BrowserSession<B>, url: &str, title: &str) -> CommandOutput {
    let visits = session.page_finished(url, title);
    CommandOutput::Text(format!("Loaded {url} (visits: {visits})"))
}

fn parse_row(arg: Option<&&str>, usage: &str) -> Result<usize> {
    let Some(raw) = arg else {
        bail!("usage: {usage}");
    };
    raw.parse::<usize>()
        .with_context(|| format!("row must be a non-negative number, got {raw:?}"))
}
