//! The judging loop: present matchups, read verdicts, manage the roster.

use std::io::{self, BufRead, Write};

use duelrank_core::{ComparisonOutcome, RankingSession};

use crate::bail;

/// One parsed line of judge input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    PickFirst,
    PickSecond,
    Skip,
    Add(String),
    RemoveFirst,
    RemoveSecond,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix("a ") {
        let name = rest.trim();
        if name.is_empty() {
            return None;
        }
        return Some(Command::Add(name.to_string()));
    }
    match trimmed {
        "1" => Some(Command::PickFirst),
        "2" => Some(Command::PickSecond),
        "s" => Some(Command::Skip),
        "x 1" | "x1" => Some(Command::RemoveFirst),
        "x 2" | "x2" => Some(Command::RemoveSecond),
        "q" => Some(Command::Quit),
        "?" => Some(Command::Help),
        _ => None,
    }
}

const HELP: &str = "\
  1 / 2     pick the winner
  s         skip this matchup
  a <name>  add a new item
  x 1, x 2  remove the shown item
  q         stop judging and show results
  ?         this help";

/// Run the loop until the ranking is stable or the judge quits.
///
/// Prompts go to stderr so stdout stays clean for the final results.
pub fn run_judging_loop(mut session: RankingSession, verbose: bool) -> RankingSession {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    eprintln!("Judging: pick 1 or 2, ? for help.");

    while !session.is_stable() {
        let Some((first, second)) = session.next_pair() else {
            eprintln!("Not enough items left to compare.");
            break;
        };

        if verbose {
            eprintln!(
                "[{} of ~{} comparisons]",
                session.comparisons_recorded(),
                session.estimated_total_comparisons(),
            );
        }

        eprint!("  1) {}\n  2) {}\n> ", first.name(), second.name());
        io::stderr().flush().ok();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => bail(format!("Failed to read from stdin: {e}")),
            None => break, // EOF: finish with what we have
        };

        match parse_command(&line) {
            Some(Command::PickFirst) => record(&mut session, first.id(), second.id()),
            Some(Command::PickSecond) => record(&mut session, second.id(), first.id()),
            Some(Command::Skip) => {
                let _ = session.record_outcome(&ComparisonOutcome::Skipped);
            }
            Some(Command::Add(name)) => {
                if session.items().iter().any(|i| i.name().eq_ignore_ascii_case(&name)) {
                    eprintln!("  \"{name}\" is already being ranked.");
                } else {
                    session.add_item(name.clone());
                    eprintln!("  Added \"{name}\".");
                }
            }
            Some(Command::RemoveFirst) => remove(&mut session, first.id(), first.name()),
            Some(Command::RemoveSecond) => remove(&mut session, second.id(), second.name()),
            Some(Command::Quit) => break,
            Some(Command::Help) => eprintln!("{HELP}"),
            None => eprintln!("  Unrecognized input; ? for help."),
        }
    }

    if session.is_stable() {
        eprintln!("Ranking is stable.");
    }

    session
}

fn record(session: &mut RankingSession, winner_id: &str, loser_id: &str) {
    let outcome = ComparisonOutcome::Decided {
        winner_id: winner_id.to_string(),
        loser_id: loser_id.to_string(),
    };
    if let Err(e) = session.record_outcome(&outcome) {
        bail(e);
    }
}

fn remove(session: &mut RankingSession, id: &str, name: &str) {
    match session.remove_item(id) {
        Ok(_) => eprintln!("  Removed \"{name}\"."),
        Err(e) => bail(e),
    }
}
