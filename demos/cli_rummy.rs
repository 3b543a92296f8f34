//! CLI score keeper example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};

use rummy_score::{
    DangerTier, Game, GameOptions, GameState, JsonFileStore, Score, Session, Severity,
};

const SAVE_FILE: &str = "rummy-score.json";

fn main() {
    env_logger::init();
    println!("Rummy score keeper (type 'q' to quit)");

    let store = JsonFileStore::new(SAVE_FILE);
    let mut session = match Session::open(store, GameOptions::default()) {
        Ok(session) => session,
        Err(err) => {
            println!("Could not resume saved game: {err}");
            return;
        }
    };

    if session.game().state() != GameState::Setup {
        println!("Resumed saved game from {SAVE_FILE}.");
    }

    loop {
        if session.game().state() == GameState::Setup {
            let Some(names) = prompt_names() else {
                break;
            };
            if let Err(err) = session.start_game(&names) {
                println!("Start error: {err}");
            }
            session.dispatch(&mut print_notice);
            continue;
        }

        print_table(session.game());
        println!(
            "Commands: [<player> <score>] enter score  [e <round> <player> <score>] edit  [n]ext round  [new] game  [q]uit"
        );
        let input = prompt_line("> ");
        let parts: Vec<&str> = input.split_whitespace().collect();

        let result = match parts.as_slice() {
            ["q" | "quit"] => break,
            ["n" | "next"] => session.add_round().map(|_| ()),
            ["new"] => {
                if prompt_line("Start a new game? Current progress will be lost. (y/n): ") == "y" {
                    session.new_game()
                } else {
                    Ok(())
                }
            }
            ["e" | "edit", round, player, value] => match (parse_index(round), parse_index(player)) {
                (Some(round), Some(player)) => session.set_score(round, player, value).map(|_| ()),
                _ => {
                    println!("Round and player must be numbers starting at 1.");
                    continue;
                }
            },
            [player, value] => {
                let (Some(player), Some(round)) = (parse_index(player), session.game().open_round())
                else {
                    println!("Player must be a number starting at 1.");
                    continue;
                };
                session.set_score(round, player, value).map(|_| ())
            }
            [player] => {
                let (Some(player), Some(round)) = (parse_index(player), session.game().open_round())
                else {
                    println!("Unknown command.");
                    continue;
                };
                session.set_score(round, player, "").map(|_| ())
            }
            _ => {
                println!("Unknown command.");
                continue;
            }
        };

        if let Err(err) = result {
            log::debug!("command rejected: {err}");
        }
        session.dispatch(&mut print_notice);
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_names() -> Option<Vec<String>> {
    let count = loop {
        let input = prompt_line("Number of players (2-8): ");
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(count) if (2..=8).contains(&count) => break count,
            _ => println!("Please enter a number between 2 and 8."),
        }
    };

    let mut names = Vec::with_capacity(count);
    for index in 1..=count {
        print!("Player {index} name: ");
        let _ = io::stdout().flush();
        let mut name = String::new();
        if io::stdin().read_line(&mut name).is_err() {
            return None;
        }
        names.push(name.trim().to_string());
    }
    Some(names)
}

fn parse_index(text: &str) -> Option<usize> {
    text.parse::<usize>().ok()?.checked_sub(1)
}

fn print_notice(message: &str, severity: Severity) {
    let code = match severity {
        Severity::Info => "36",
        Severity::Success => "32",
        Severity::Warning => "33",
        Severity::Danger => "31",
    };
    println!("{}", colorize(message, code));
}

fn print_table(game: &Game) {
    println!("\nRound {}", game.round_number());

    let header: Vec<String> = (1..=game.round_count()).map(|round| format!("R{round:<3}")).collect();
    println!("{:<4}{:<16}{} Total", "#", "Player", header.join(""));

    let highlights = game.highlights();
    for (player, name) in game.players().iter().enumerate() {
        let eliminated = game.is_eliminated(player);
        let cells: Vec<String> = game
            .scores(player)
            .unwrap_or_default()
            .iter()
            .map(|score| format!("{:<4}", format_score(*score, eliminated)))
            .collect();

        let total = game.total(player).unwrap_or_default();
        let stars = "*".repeat(game.winner_count(player).unwrap_or_default());
        let label = if eliminated {
            format!("{name} (OUT)")
        } else {
            format!("{name} {stars}")
        };
        let total_text = if eliminated {
            "OUT".to_string()
        } else {
            total.to_string()
        };

        let code = match game.tier(player).unwrap_or(DangerTier::Normal) {
            DangerTier::Eliminated => "90",
            DangerTier::Danger => "31",
            DangerTier::Warning => "33",
            DangerTier::Normal if highlights.leaders.contains(&player) => "32",
            DangerTier::Normal if highlights.at_risk.contains(&player) => "35",
            DangerTier::Normal => "0",
        };

        println!(
            "{:<4}{}{} {}",
            player + 1,
            colorize(&format!("{label:<16}"), code),
            cells.join(""),
            colorize(&total_text, code)
        );
    }
    println!();
}

fn format_score(score: Score, eliminated: bool) -> String {
    match score {
        Score::Empty if eliminated => "OUT".to_string(),
        Score::Empty => "-".to_string(),
        other => other.to_string(),
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
