//! Interactive customer list.
//!
//! Every stdin line that does not start with `:` is treated as the search
//! box's new content and goes through the debouncer, so pasting or typing
//! several lines in quick succession triggers one search. Lines starting
//! with `:` navigate immediately:
//!
//! - `:n` / `:p` - next / previous page
//! - `:g N` - go to page `N`
//! - `:q` - quit

use std::io::BufRead;
use std::time::Duration;

use tokio::sync::mpsc;

use clientele_desk::{CustomerApi, CustomersPage, DebouncedQueries};

use super::{CommandError, ConsoleNotifier, finish};
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Next,
    Previous,
    GoTo(usize),
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Query(String),
    Navigate(Navigation),
    Unknown(String),
}

fn parse_line(line: &str) -> Input {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Input::Query(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let mut parts = command.split_whitespace();
    let navigation = match (parts.next(), parts.next(), parts.next()) {
        (Some("n"), None, None) => Navigation::Next,
        (Some("p"), None, None) => Navigation::Previous,
        (Some("q"), None, None) => Navigation::Quit,
        (Some("g"), Some(page), None) => match page.parse() {
            Ok(page) => Navigation::GoTo(page),
            Err(_) => return Input::Unknown(line.trim().to_string()),
        },
        _ => return Input::Unknown(line.trim().to_string()),
    };
    Input::Navigate(navigation)
}

/// Read stdin on a plain thread; blocking reads cannot be cancelled and
/// must not hold up runtime shutdown.
fn spawn_reader(queries: mpsc::Sender<String>, navigation: mpsc::Sender<Navigation>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let delivered = match parse_line(&line) {
                Input::Query(query) => queries.blocking_send(query).is_ok(),
                Input::Navigate(nav) => navigation.blocking_send(nav).is_ok(),
                Input::Unknown(command) => {
                    tracing::warn!(command = %command, "Unknown browse command");
                    true
                }
            };
            if !delivered {
                break;
            }
        }
    });
}

fn render<A: CustomerApi>(page: &CustomersPage<A, ConsoleNotifier>) -> Result<(), CommandError> {
    let mut out = std::io::stdout().lock();
    output::write_listing(&mut out, &page.listing())?;
    Ok(())
}

/// Run the interactive list until `:q` or end of input.
pub async fn run(
    api: impl CustomerApi,
    page_size: usize,
    debounce: Duration,
) -> Result<(), CommandError> {
    let mut page = CustomersPage::new(api, ConsoleNotifier, page_size);
    finish(page.load().await)?;
    render(&page)?;

    let (query_tx, mut queries) = DebouncedQueries::channel(debounce, 64);
    let (nav_tx, mut navigation) = mpsc::channel(16);
    spawn_reader(query_tx, nav_tx);

    let mut navigation_open = true;
    loop {
        tokio::select! {
            query = queries.next() => {
                let Some(query) = query else { break };
                tracing::debug!(query = %query, "Applying search");
                page.search(query);
                render(&page)?;
            }
            nav = navigation.recv(), if navigation_open => match nav {
                Some(Navigation::Quit) => break,
                Some(Navigation::Next) => {
                    page.next_page();
                    render(&page)?;
                }
                Some(Navigation::Previous) => {
                    page.previous_page();
                    render(&page)?;
                }
                Some(Navigation::GoTo(n)) => {
                    page.go_to_page(n);
                    render(&page)?;
                }
                None => navigation_open = false,
            },
        }
    }
    Ok(())
}
