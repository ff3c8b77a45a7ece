//! Line-oriented game loop.
//!
//! Each input line is a command or a guess. Guesses list one color per
//! slot, by palette name or index, separated by spaces or commas.

use derive_more::{Display, Error};
use serde::Serialize;
use std::io::{BufRead, Write};
use strictly_mastermind::{
    Color, GameError, Guess, Mastermind, Move, ResultClassifier, SessionView, Status,
};
use tracing::{debug, info, instrument, warn};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Submit these colors as a guess.
    Guess(Vec<Color>),
    /// Resubmit the previous guess.
    Again,
    /// Give up and reveal the secret.
    Resign,
    /// Start a new session.
    New,
    /// Print the board so far.
    Show,
    /// Print the command summary.
    Help,
    /// Leave the loop.
    Quit,
}

/// Input line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// Blank line.
    #[display("Nothing entered; type 'help' for commands")]
    Empty,

    /// Token is neither a command, a color name nor an index.
    #[display("Unknown color '{token}'")]
    UnknownColor {
        /// The offending token.
        token: String,
    },
}

const HELP: &str = "\
Commands:
  <colors>  guess, e.g. 'red blue green yellow' or '4 1 2 3'
  again     resubmit the previous guess
  resign    give up and reveal the code
  new       start a new game
  show      print the board
  help      print this summary
  quit      leave";

/// Parses one input line.
pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }

    match line.to_lowercase().as_str() {
        "again" => return Ok(Input::Again),
        "resign" => return Ok(Input::Resign),
        "new" => return Ok(Input::New),
        "show" => return Ok(Input::Show),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        _ => {}
    }

    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            Color::from_label_or_number(token).ok_or_else(|| InputError::UnknownColor {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Input::Guess)
}

/// A line of output that is not a session view.
///
/// In JSON mode it is written as `{"error": "..."}` or `{"help": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Notice {
    Error(String),
    Help(String),
}

/// Runs commands from `input` against `table` until `quit` or end of input.
///
/// With `json` set, no prompt is written and every output line is a JSON
/// object: a session view for accepted commands, an error or help notice
/// otherwise.
#[instrument(skip(table, input, out))]
pub fn run(
    table: &mut Mastermind,
    mut input: impl BufRead,
    mut out: impl Write,
    json: bool,
) -> anyhow::Result<()> {
    let config = *table.session().config();
    if !json {
        writeln!(
            out,
            "Break the code: {} distinct colors out of {}, {} guesses. Type 'help' for commands.",
            config.slot_count(),
            config.color_count(),
            config.max_moves()
        )?;
    }

    let mut line = String::new();
    loop {
        if !json {
            write!(out, "> ")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("End of input");
            break;
        }

        let command = match parse_input(&line) {
            Ok(command) => command,
            Err(e) => {
                notify(&mut out, json, Notice::Error(e.to_string()))?;
                continue;
            }
        };
        debug!(?command, "Parsed input");

        let result = match command {
            Input::Quit => break,
            Input::Help => {
                notify(&mut out, json, Notice::Help(HELP.to_string()))?;
                continue;
            }
            Input::Show => {
                let view = table.view();
                render(&mut out, table.classifier(), &view, json, true)?;
                continue;
            }
            Input::New => {
                info!("Starting new session");
                let view = table.start();
                render(&mut out, table.classifier(), &view, json, true)?;
                continue;
            }
            Input::Guess(colors) => table.submit_guess(&Guess::from_colors(colors)),
            Input::Again => match table.session().previous_guess().cloned() {
                Some(guess) => table.submit_guess(&guess),
                None => {
                    let message = "No previous guess to repeat".to_string();
                    notify(&mut out, json, Notice::Error(message))?;
                    continue;
                }
            },
            Input::Resign => table.resign(),
        };

        match result {
            Ok(view) => render(&mut out, table.classifier(), &view, json, false)?,
            Err(e) => report_rejection(&mut out, json, &e)?,
        }
    }

    Ok(())
}

fn report_rejection(out: &mut impl Write, json: bool, error: &GameError) -> anyhow::Result<()> {
    warn!(%error, "Command rejected");
    let hint = match error {
        GameError::SessionNotActive => " (type 'new' to play again)",
        _ => "",
    };
    notify(out, json, Notice::Error(format!("Rejected: {}{}", error, hint)))
}

fn notify(out: &mut impl Write, json: bool, notice: Notice) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(&notice)?)?;
    } else {
        match notice {
            Notice::Error(text) | Notice::Help(text) => writeln!(out, "{}", text)?,
        }
    }
    Ok(())
}

/// Writes a session view: JSON, or the latest row (or every row) and a
/// status line.
fn render(
    out: &mut impl Write,
    classifier: &ResultClassifier,
    view: &SessionView,
    json: bool,
    full_board: bool,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(view)?)?;
        return Ok(());
    }

    let rows = if full_board {
        &view.moves[..]
    } else {
        &view.moves[view.moves.len().saturating_sub(1)..]
    };
    let first_row = view.moves.len() - rows.len();
    for (offset, played) in rows.iter().enumerate() {
        writeln!(out, "{}", format_row(classifier, first_row + offset + 1, played))?;
    }

    let secret = view
        .secret
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_default();
    match view.status {
        Status::InProgress => writeln!(out, "Guess #{}", view.moves.len() + 1)?,
        Status::Won => writeln!(out, "Solved in {}! The code was {}.", view.moves.len(), secret)?,
        Status::Lost => writeln!(out, "Out of guesses. The code was {}.", secret)?,
        Status::Resigned => writeln!(out, "Resigned. The code was {}.", secret)?,
    }
    Ok(())
}

fn format_row(classifier: &ResultClassifier, number: usize, played: &Move) -> String {
    let class = classifier
        .classify_score(played.score())
        .map(|c| format!(" [class {}]", c))
        .unwrap_or_default();
    format!("{:>2}. {}{}", number, played, class)
}

/// Writes the result class table for `slots` pegs.
pub fn write_class_table(out: &mut impl Write, slots: usize) -> anyhow::Result<()> {
    let classifier = ResultClassifier::new(slots);
    writeln!(out, "{} result classes for {} slots", classifier.total_classes(), slots)?;
    writeln!(out, " id  exact  color")?;
    for (class, result) in classifier.classes() {
        writeln!(out, "{:>3}  {:>5}  {:>5}", class.index(), result.exact, result.color_only)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_mastermind::GameConfig;

    fn play(table: &mut Mastermind, script: &str, json: bool) -> String {
        let mut out = Vec::new();
        run(table, script.as_bytes(), &mut out, json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_named_and_numbered_colors() {
        assert_eq!(
            parse_input("Red, blue 2  3\n"),
            Ok(Input::Guess(vec![
                Color::new(4),
                Color::new(1),
                Color::new(2),
                Color::new(3)
            ]))
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input("HELP"), Ok(Input::Help));
        assert_eq!(parse_input(" again "), Ok(Input::Again));
        assert_eq!(parse_input("exit"), Ok(Input::Quit));
        assert_eq!(parse_input("   "), Err(InputError::Empty));
    }

    #[test]
    fn test_parse_unknown_color() {
        assert_eq!(
            parse_input("red purple"),
            Err(InputError::UnknownColor {
                token: "purple".to_string()
            })
        );
    }

    #[test]
    fn test_resign_before_guess_is_rejected() {
        let mut table = Mastermind::seeded(GameConfig::default(), 11).unwrap();
        let output = play(&mut table, "resign\n", false);
        assert!(output.contains("Rejected: Cannot resign"));
        assert_eq!(table.view().status, Status::InProgress);
    }

    #[test]
    fn test_guess_then_resign_reveals_code() {
        let mut table = Mastermind::seeded(GameConfig::default(), 11).unwrap();
        let output = play(&mut table, "black black black black\nagain\nresign\n", false);

        assert!(output.contains(" 1. Black Black Black Black -> "));
        assert!(output.contains(" 2. Black Black Black Black -> "));
        assert!(output.contains("[class "));
        assert!(output.contains("Resigned. The code was "));
        assert_eq!(table.view().moves.len(), 2);
    }

    #[test]
    fn test_running_out_of_guesses() {
        let config = GameConfig::new(6, 4, 1).unwrap();
        let mut table = Mastermind::seeded(config, 3).unwrap();
        let output = play(&mut table, "0 0 0 0\n1 1 1 1\n", false);

        assert!(output.contains("Out of guesses."));
        assert!(output.contains("type 'new' to play again"));
        assert_eq!(table.view().status, Status::Lost);
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut table = Mastermind::seeded(GameConfig::default(), 4).unwrap();
        play(&mut table, "quit\nred red red red\n", false);
        assert!(table.view().moves.is_empty());
    }

    #[test]
    fn test_json_views() {
        let mut table = Mastermind::seeded(GameConfig::default(), 5).unwrap();
        let output = play(&mut table, "0 1 1 0\nresign\nnew\n", true);

        let views = output
            .lines()
            .map(|l| serde_json::from_str::<SessionView>(l).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].status, Status::InProgress);
        assert!(views[0].secret.is_none());
        assert_eq!(views[1].status, Status::Resigned);
        assert!(views[1].secret.is_some());
        assert!(views[2].moves.is_empty());
    }

    #[test]
    fn test_json_mode_writes_only_json() {
        let mut table = Mastermind::seeded(GameConfig::default(), 5).unwrap();
        let output = play(&mut table, "purple\nagain\nresign\nhelp\n0 0 1 1\n", true);

        let lines = output
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0]["error"], "Unknown color 'purple'");
        assert_eq!(lines[1]["error"], "No previous guess to repeat");
        assert!(lines[2]["error"].as_str().unwrap().starts_with("Rejected: "));
        assert!(lines[3]["help"].as_str().unwrap().starts_with("Commands:"));
        assert_eq!(lines[4]["status"], "InProgress");
    }

    #[test]
    fn test_class_table() {
        let mut out = Vec::new();
        write_class_table(&mut out, 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("15 result classes for 4 slots"));
        assert!(text.contains(" 11      2      2"));
    }
}
