// src/terminal.rs
// This module draws the master call sheet, the pattern card and the ball panels
// on the terminal.

use std::io::{self, Write};

use crate::defs::{Column, FREE_SPACE, Number, TEMPLATE_SIZE};
use crate::events::DisplaySurface;
use crate::game::SessionSnapshot;
use crate::logging::log_error;

const RESET: &str = "\x1b[0m";
const HIGHLIGHT: &str = "\x1b[1;30;48;5;208m"; // bold black on orange
const DIM: &str = "\x1b[90m";

fn ball_style(column: Column) -> &'static str {
    match column {
        Column::B => "\x1b[1;97;44m",
        Column::I => "\x1b[1;97;41m",
        Column::N => "\x1b[1;30;47m",
        Column::G => "\x1b[1;97;42m",
        Column::O => "\x1b[1;30;43m",
    }
}

pub fn ball_label(number: Number) -> String {
    match Column::of(number) {
        Some(column) => format!("{column} {number}"),
        None => number.to_string(),
    }
}

fn paint(text: &str, style: &str, colors: bool) -> String {
    if colors {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// The 5 x 15 master call sheet, one letter per row.
pub fn render_call_sheet(snapshot: &SessionSnapshot, colors: bool) -> String {
    let mut out = String::new();
    for column in Column::ALL {
        out.push_str(&paint(&format!(" {column} "), ball_style(column), colors));
        out.push(' ');
        for number in column.numbers() {
            let lit = snapshot.lit.contains(&number);
            let cell = match (lit, colors) {
                (true, true) if column.has_border() => format!("[{number:2}]"),
                (true, true) => format!(" {number:2} "),
                (true, false) => format!("[{number:2}]"),
                (false, _) => format!(" {number:2} "),
            };
            if lit {
                out.push_str(&paint(&cell, ball_style(column), colors));
            } else {
                out.push_str(&paint(&cell, DIM, colors));
            }
        }
        out.push('\n');
    }
    out
}

/// The pattern card with its mode label.
pub fn render_template(snapshot: &SessionSnapshot, colors: bool, show_card: bool) -> String {
    let mut out = format!("Game: {}\n", snapshot.mode.as_deref().unwrap_or(""));
    for column in Column::ALL {
        out.push_str(&paint(&format!("  {column}   "), ball_style(column), colors));
    }
    out.push('\n');

    for row in 0..TEMPLATE_SIZE {
        for col in 0..TEMPLATE_SIZE {
            let text = if (row, col) == FREE_SPACE {
                "FREE".to_string()
            } else {
                match snapshot.card.get(row).and_then(|cells| cells.get(col)).copied().flatten() {
                    Some(number) if show_card => format!("{number:^4}"),
                    _ => "    ".to_string(),
                }
            };
            let highlighted = snapshot.highlighted.contains(&(row, col));
            let cell = match (highlighted, colors) {
                (true, true) => paint(&format!(" {text} "), HIGHLIGHT, true),
                (true, false) => format!("<{text}>"),
                (false, _) => format!(" {text} "),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

/// Current ball, recent balls and the "up next" column.
pub fn render_ball_panel(snapshot: &SessionSnapshot, colors: bool) -> String {
    let current = match snapshot.current.and_then(|n| Column::of(n).map(|c| (n, c))) {
        Some((number, column)) => paint(&format!(" {} ", ball_label(number)), ball_style(column), colors),
        None => " BINGO ".to_string(),
    };

    let recent: Vec<String> = snapshot.history.iter().map(|&n| ball_label(n)).collect();

    let up_next = match snapshot.next_column {
        Some(column) => paint(&format!(" {column} ({}) ", column.color()), ball_style(column), colors),
        None => " - ".to_string(),
    };

    format!(
        "Current ball: {current}\nRecent: {}\nUP NEXT: {up_next}\nRemaining: {}\n",
        recent.join(", "),
        snapshot.remaining
    )
}

pub const KEY_HELP: &str = "ENTER draw | o odds | e evens | 0-9 wild | n number | m mode | t cell | r reset | ESC quit";

pub fn render_screen(snapshot: &SessionSnapshot, colors: bool, show_card: bool) -> String {
    format!(
        "{}\n{}\n{}\n{}\n",
        render_call_sheet(snapshot, colors),
        render_template(snapshot, colors, show_card),
        render_ball_panel(snapshot, colors),
        KEY_HELP
    )
}

/// Clears the terminal and redraws everything on each refresh.
pub struct TerminalSurface {
    pub colors: bool,
    pub show_card: bool,
}

impl TerminalSurface {
    fn draw<W: Write>(&self, out: &mut W, snapshot: &SessionSnapshot) -> io::Result<()> {
        // Clear the screen
        write!(out, "\x1Bc{}", render_screen(snapshot, self.colors, self.show_card))?;
        out.flush()
    }
}

impl DisplaySurface for TerminalSurface {
    fn refresh(&mut self, snapshot: &SessionSnapshot) {
        if let Err(e) = self.draw(&mut io::stdout(), snapshot) {
            log_error(&format!("Failed to refresh the terminal: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn test_ball_label() {
        assert_eq!(ball_label(12), "B 12");
        assert_eq!(ball_label(45), "N 45");
        assert_eq!(ball_label(75), "O 75");
    }

    #[test]
    fn test_call_sheet_plain() {
        let mut game = Game::seeded(1);
        game.mark_manual(16).unwrap();
        let sheet = render_call_sheet(&game.snapshot(), false);
        let lines: Vec<&str> = sheet.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with(" B "));
        assert!(lines[1].contains("[16]"));
        assert!(lines[1].contains(" 17 "));
        assert!(!sheet.contains('\x1b'));
    }

    #[test]
    fn test_template_plain_marks_highlights() {
        let mut game = Game::seeded(2);
        game.apply_mode("Four Corners");
        let card = render_template(&game.snapshot(), false, false);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines[0], "Game: Four Corners");
        assert_eq!(lines.len(), 2 + TEMPLATE_SIZE);
        assert_eq!(lines[2].matches('<').count(), 2);
        assert_eq!(lines[3].matches('<').count(), 0);
        assert!(lines[4].contains("FREE"));
    }

    #[test]
    fn test_ball_panel() {
        let mut game = Game::seeded(3);
        let panel = render_ball_panel(&game.snapshot(), false);
        assert!(panel.contains("Current ball:  BINGO"));
        assert!(panel.contains("UP NEXT:  - "));

        let number = game.draw_next().unwrap();
        let panel = render_ball_panel(&game.snapshot(), false);
        assert!(panel.contains(&ball_label(number)));
        assert!(panel.contains("Remaining: 74"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_surface_draw_clears_then_renders() {
        let game = Game::seeded(4);
        let surface = TerminalSurface {
            colors: false,
            show_card: true,
        };
        let mut out = Vec::new();
        surface.draw(&mut out, &game.snapshot()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1Bc"));
        assert!(text.ends_with(&render_screen(&game.snapshot(), false, true)));

        let err = surface.draw(&mut BrokenPipe, &game.snapshot()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
