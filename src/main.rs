//! Line-oriented terminal front end.
//!
//! Reads commands from stdin, turns them into library events, and prints the list
//! whenever it changes. The fetch runs in the background; commands typed before
//! the list arrives are applied once it does.
//!
//! # Commands
//!
//! - `search <text>` or `/<text>`: prefix search by name (`search` alone clears)
//! - `sort name|population [asc|desc]`, `sort off`
//! - `filter <subregion>[, <subregion>...]`, `filter off`
//! - `show <country name>`: detail screen
//! - `back`: return to the list (replays the active criteria)
//! - `dialogs`: current sort and filter dialog state
//! - `list`: print the list again
//! - `quit`
//!
//! # Usage
//!
//! ```text
//! poi-countries [--config <path>]
//! ```

use poi_countries::app::{Event, Outcome, Session};
use poi_countries::ui::{self, CountryListDiff};
use poi_countries::{Config, CountryError, ListSnapshot, Result, SortFeature};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Event(Event),
    Dialogs,
    List,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Some(query) = line.strip_prefix('/') {
        return Ok(Some(Command::Event(Event::SearchQueryChanged(query.to_string()))));
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb.to_ascii_lowercase().as_str() {
        "search" => Command::Event(Event::SearchQueryChanged(rest.to_string())),
        "sort" => Command::Event(parse_sort(rest)?),
        "filter" => {
            let subregions = if rest.eq_ignore_ascii_case("off") {
                Vec::new()
            } else {
                rest.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
            };
            Command::Event(Event::FilterApplied(subregions))
        }
        "show" if !rest.is_empty() => Command::Event(Event::CountrySelected(rest.to_string())),
        "back" => Command::Event(Event::BecameVisible),
        "dialogs" => Command::Dialogs,
        "list" => Command::List,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CountryError::InvalidInput(format!("unknown command: {line}"))),
    };
    Ok(Some(command))
}

fn parse_sort(args: &str) -> Result<Event> {
    let mut words = args.split_whitespace();
    let Some(feature) = words.next() else {
        return Err(CountryError::InvalidInput("sort needs a feature or `off`".to_string()));
    };
    if feature.eq_ignore_ascii_case("off") {
        return Ok(Event::SortApplied {
            feature: None,
            descending: None,
        });
    }

    let feature: SortFeature = feature.parse()?;
    let descending = match words.next().map(str::to_ascii_lowercase).as_deref() {
        None | Some("asc") => false,
        Some("desc") => true,
        Some(other) => return Err(CountryError::InvalidInput(format!("unknown sort direction: {other}"))),
    };

    Ok(Event::SortApplied {
        feature: Some(feature),
        descending: Some(descending),
    })
}

fn load_config() -> Result<Config> {
    let mut args = std::env::args().skip(1);
    match (args.next().as_deref(), args.next()) {
        (Some("--config"), Some(path)) => Config::from_file(path),
        (None, _) => Config::load_default_location(),
        _ => Err(CountryError::InvalidInput("usage: poi-countries [--config <path>]".to_string())),
    }
}

fn print_list(session: &Session) {
    let mut out = String::new();
    if ui::render_list(&mut out, &session.state().compute_viewmodel()).is_ok() {
        print!("{out}");
    }
}

/// Prints the list if it changed since the last print.
fn refresh(session: &Session, snapshots: &mut watch::Receiver<ListSnapshot>, previous: &mut ListSnapshot) {
    if !snapshots.has_changed().unwrap_or(false) {
        return;
    }
    let current = snapshots.borrow_and_update().clone();
    let changes = CountryListDiff::compute(&previous.countries, &current.countries);
    tracing::debug!(
        inserted = changes.inserted.len(),
        removed = changes.removed.len(),
        changed = changes.changed.len(),
        reordered = changes.reordered,
        "list changed"
    );
    *previous = current;
    print_list(session);
}

fn show_outcome(outcome: &Outcome) {
    if let Some(details) = &outcome.details {
        let mut out = String::new();
        if ui::render_details(&mut out, details).is_ok() {
            print!("{out}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    let mut session = poi_countries::initialize(&config)?;

    tracing::info!(endpoint = %config.endpoint(), "terminal session started");

    let mut snapshots = session.subscribe();
    let mut previous = ListSnapshot::default();

    session.dispatch(&Event::Started)?;
    print_list(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Some(Command::Event(event))) => match session.dispatch(&event) {
                        Ok(outcome) => show_outcome(&outcome),
                        Err(e) => eprintln!("{e}"),
                    },
                    Ok(Some(Command::Dialogs)) => {
                        let mut out = String::new();
                        let state = session.state();
                        if ui::render_dialogs(&mut out, &state.sort_dialog(), &state.filter_dialog()).is_ok() {
                            print!("{out}");
                        }
                    }
                    Ok(Some(Command::List)) => print_list(&session),
                    Ok(Some(Command::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some(response) = session.next_response() => {
                session.dispatch(&Event::WorkerResponse(response))?;
            }
        }
        refresh(&session, &mut snapshots, &mut previous);
    }

    session.dispatch(&Event::TornDown)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> Event {
        match parse_command(line).unwrap() {
            Some(Command::Event(event)) => event,
            other => panic!("expected event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn search_forms() {
        assert_eq!(event("/fr"), Event::SearchQueryChanged("fr".to_string()));
        assert_eq!(event("search Ger"), Event::SearchQueryChanged("Ger".to_string()));
        assert_eq!(event("search"), Event::SearchQueryChanged(String::new()));
    }

    #[test]
    fn sort_forms() {
        assert_eq!(
            event("sort population desc"),
            Event::SortApplied {
                feature: Some(SortFeature::Population),
                descending: Some(true),
            }
        );
        assert_eq!(
            event("sort Name"),
            Event::SortApplied {
                feature: Some(SortFeature::Name),
                descending: Some(false),
            }
        );
        assert_eq!(
            event("sort off"),
            Event::SortApplied {
                feature: None,
                descending: None,
            }
        );
        assert!(parse_command("sort area").is_err());
        assert!(parse_command("sort name sideways").is_err());
    }

    #[test]
    fn filter_forms() {
        assert_eq!(
            event("filter Western Europe, Northern Europe"),
            Event::FilterApplied(vec!["Western Europe".to_string(), "Northern Europe".to_string()])
        );
        assert_eq!(event("filter off"), Event::FilterApplied(vec![]));
    }

    #[test]
    fn other_commands() {
        assert_eq!(event("show Czechia"), Event::CountrySelected("Czechia".to_string()));
        assert_eq!(event("back"), Event::BecameVisible);
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("   ").unwrap(), None);
        assert!(parse_command("fly").is_err());
    }
}
