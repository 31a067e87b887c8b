// src/input.rs
// Keyboard handling for the console: single key presses in raw mode for the common
// actions, plain line input for numbers, cells and custom mode names.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::defs::{Number, TEMPLATE_SIZE};
use crate::error::{BingoError, Result};
use crate::events::{BulkSelection, ConsoleEvent};
use crate::pattern::PatternMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleKey {
    Draw,
    Bulk(BulkSelection),
    TapNumber,
    PickMode,
    ToggleCell,
    Reset,
    Quit,
}

pub fn map_key(code: KeyCode) -> Option<ConsoleKey> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(ConsoleKey::Draw),
        KeyCode::Char('o') => Some(ConsoleKey::Bulk(BulkSelection::Odds)),
        KeyCode::Char('e') => Some(ConsoleKey::Bulk(BulkSelection::Evens)),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            Some(ConsoleKey::Bulk(BulkSelection::Ending(c as u8 - b'0')))
        }
        KeyCode::Char('n') => Some(ConsoleKey::TapNumber),
        KeyCode::Char('m') => Some(ConsoleKey::PickMode),
        KeyCode::Char('t') => Some(ConsoleKey::ToggleCell),
        KeyCode::Char('r') => Some(ConsoleKey::Reset),
        KeyCode::Esc | KeyCode::Char('q') => Some(ConsoleKey::Quit),
        _ => None,
    }
}

/// Block until a key we know about is pressed.
pub fn read_key() -> Result<ConsoleKey> {
    enable_raw_mode()?;
    let result = wait_for_key();
    restore_after(result, disable_raw_mode)
}

/// Run `restore` whatever `result` holds, then hand the result back.
fn restore_after<T>(result: Result<T>, restore: impl FnOnce() -> io::Result<()>) -> Result<T> {
    restore()?;
    result
}

fn wait_for_key() -> Result<ConsoleKey> {
    // Clear any pending events in the buffer
    while event::poll(Duration::from_millis(0))? {
        event::read()?;
    }

    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                if let Some(key) = map_key(key_event.code) {
                    return Ok(key);
                }
            }
        }
    }
}

/// Print a prompt and read one line, without its line terminator.
pub fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn parse_number(text: &str) -> Result<Number> {
    let text = text.trim();
    text.parse::<Number>()
        .map_err(|_| BingoError::InvalidInput(format!("'{text}' is not a ball number")))
}

/// Parse a template cell given as "row col" (or "row,col"), both 0-based.
pub fn parse_cell(text: &str) -> Result<(usize, usize)> {
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let invalid = || {
        BingoError::InvalidInput(format!(
            "'{}' is not a cell, expected 'row col' in 0..{TEMPLATE_SIZE}",
            text.trim()
        ))
    };
    match parts.as_slice() {
        [row, col] => {
            let row = row.parse::<usize>().map_err(|_| invalid())?;
            let col = col.parse::<usize>().map_err(|_| invalid())?;
            Ok((row, col))
        }
        _ => Err(invalid()),
    }
}

/// Resolve what the operator typed at the mode prompt: an entry number from the
/// list, or any other non-empty text taken verbatim as the mode name.
pub fn parse_mode(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    match text.trim().parse::<usize>() {
        Ok(index) if (1..=PatternMode::ALL.len()).contains(&index) => {
            Some(PatternMode::ALL[index - 1].name().to_string())
        }
        _ => Some(text.to_string()),
    }
}

pub fn mode_menu() -> String {
    let mut menu = String::from("Choose or enter game mode:\n");
    for (index, mode) in PatternMode::ALL.iter().enumerate() {
        menu.push_str(&format!("  {:2}. {}\n", index + 1, mode.name()));
    }
    menu
}

/// Turn a key press into an operator event, asking for details where needed.
/// `Ok(None)` means nothing to do (empty prompt) or, for `Quit`, the caller's exit.
pub fn key_to_event(key: ConsoleKey) -> Result<Option<ConsoleEvent>> {
    let event = match key {
        ConsoleKey::Draw => Some(ConsoleEvent::DrawBall),
        ConsoleKey::Bulk(selection) => Some(ConsoleEvent::Bulk(selection)),
        ConsoleKey::Reset => Some(ConsoleEvent::Reset),
        ConsoleKey::Quit => None,
        ConsoleKey::TapNumber => {
            let line = prompt_line("\nNumber to tap: ")?;
            if line.trim().is_empty() {
                None
            } else {
                Some(ConsoleEvent::NumberTapped(parse_number(&line)?))
            }
        }
        ConsoleKey::PickMode => {
            print!("\n{}", mode_menu());
            parse_mode(&prompt_line("Mode: ")?).map(ConsoleEvent::ModeSelected)
        }
        ConsoleKey::ToggleCell => {
            let line = prompt_line("\nTemplate cell (row col): ")?;
            if line.trim().is_empty() {
                None
            } else {
                let (row, col) = parse_cell(&line)?;
                Some(ConsoleEvent::CellClicked { row, col })
            }
        }
    };
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_raw_mode_is_left_after_a_read_error() {
        let restored = Cell::new(false);
        let failed: Result<ConsoleKey> = Err(io::Error::other("tty gone").into());
        let result = restore_after(failed, || {
            restored.set(true);
            Ok(())
        });
        assert!(restored.get());
        assert!(matches!(result, Err(BingoError::Io(_))));

        let result = restore_after(Ok(ConsoleKey::Draw), || Ok(()));
        assert_eq!(result.unwrap(), ConsoleKey::Draw);
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(KeyCode::Enter), Some(ConsoleKey::Draw));
        assert_eq!(
            map_key(KeyCode::Char('7')),
            Some(ConsoleKey::Bulk(BulkSelection::Ending(7)))
        );
        assert_eq!(
            map_key(KeyCode::Char('o')),
            Some(ConsoleKey::Bulk(BulkSelection::Odds))
        );
        assert_eq!(map_key(KeyCode::Esc), Some(ConsoleKey::Quit));
        assert_eq!(map_key(KeyCode::Char('z')), None);
        assert_eq!(map_key(KeyCode::Tab), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 42 ").unwrap(), 42);
        // Range checking belongs to the board; parsing only rejects non-numbers.
        assert_eq!(parse_number("90").unwrap(), 90);
        assert!(matches!(parse_number("B12"), Err(BingoError::InvalidInput(_))));
        assert!(parse_number("-1").is_err());
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("1 3").unwrap(), (1, 3));
        assert_eq!(parse_cell("4,0").unwrap(), (4, 0));
        assert_eq!(parse_cell(" 2 ,  2 ").unwrap(), (2, 2));
        assert_eq!(parse_cell("7 9").unwrap(), (7, 9));
        assert!(parse_cell("1").is_err());
        assert!(parse_cell("a b").is_err());
        assert!(parse_cell("1 2 3").is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("1"), Some("Single Bingo".to_string()));
        assert_eq!(parse_mode("11"), Some("Blackout".to_string()));
        assert_eq!(parse_mode("12"), Some("12".to_string()));
        assert_eq!(parse_mode("Crazy T"), Some("Crazy T".to_string()));
        assert_eq!(parse_mode("   "), None);
        assert_eq!(parse_mode(""), None);
    }

    #[test]
    fn test_mode_menu_lists_all_modes() {
        let menu = mode_menu();
        for mode in PatternMode::ALL {
            assert!(menu.contains(mode.name()));
        }
        assert!(menu.contains("11. Blackout"));
    }
}
