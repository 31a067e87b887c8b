// src/defs.rs
// Shared constants and the column model of the 75-ball bingo game.

use serde::{Deserialize, Serialize};

pub type Number = u8;

pub const FIRSTNUMBER: Number = 1;
pub const NUMBERSPERCOLUMN: Number = 15;
pub const COLUMNS: usize = 5;
pub const LASTNUMBER: Number = FIRSTNUMBER + NUMBERSPERCOLUMN * COLUMNS as Number - 1;

pub const TEMPLATE_SIZE: usize = 5;
pub const FREE_SPACE: (usize, usize) = (2, 2);
pub const HISTORY_SIZE: usize = 5;

/// One of the five letter columns of the call sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    B,
    I,
    N,
    G,
    O,
}

impl Column {
    pub const ALL: [Column; COLUMNS] = [Column::B, Column::I, Column::N, Column::G, Column::O];

    pub fn of(number: Number) -> Option<Column> {
        if !is_valid_number(number) {
            return None;
        }
        Some(Self::ALL[((number - FIRSTNUMBER) / NUMBERSPERCOLUMN) as usize])
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Column::B => 'B',
            Column::I => 'I',
            Column::N => 'N',
            Column::G => 'G',
            Column::O => 'O',
        }
    }

    pub fn first(self) -> Number {
        FIRSTNUMBER + self.index() as Number * NUMBERSPERCOLUMN
    }

    pub fn last(self) -> Number {
        self.first() + NUMBERSPERCOLUMN - 1
    }

    pub fn numbers(self) -> std::ops::RangeInclusive<Number> {
        self.first()..=self.last()
    }

    /// Ball colour name for this column.
    pub fn color(self) -> &'static str {
        match self {
            Column::B => "blue",
            Column::I => "red",
            Column::N => "white",
            Column::G => "green",
            Column::O => "yellow",
        }
    }

    /// Light balls (N and O) carry dark text.
    pub fn text_color(self) -> &'static str {
        match self {
            Column::N | Column::O => "black",
            _ => "white",
        }
    }

    // White cells would vanish on a light sheet without a frame.
    pub fn has_border(self) -> bool {
        self == Column::N
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

pub fn is_valid_number(number: Number) -> bool {
    (FIRSTNUMBER..=LASTNUMBER).contains(&number)
}
