// src/pattern.rs
// Win-pattern templates: the table of named game modes and the 5x5 highlight card
// shown next to the call sheet.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::defs::{Column, FREE_SPACE, Number, TEMPLATE_SIZE};
use crate::error::{BingoError, Result};

pub type Cell = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternMode {
    SingleBingo,
    DoubleBingo,
    TripleBingo,
    LetterX,
    CornerPictureFrame,
    CheckMark,
    FourCorners,
    Heart,
    PostageStamp,
    BlockOf8,
    Blackout,
}

const SINGLE_BINGO: &[Cell] = &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)];

const DOUBLE_BINGO: &[Cell] = &[
    (0, 0), (1, 0), (2, 0), (3, 0), (4, 0), // B column
    (0, 1), (0, 2), (0, 3), (0, 4), // top row
];

const TRIPLE_BINGO: &[Cell] = &[
    (0, 0), (1, 0), (2, 0), (3, 0), (4, 0), // B column
    (0, 2), (1, 2), (2, 2), (3, 2), (4, 2), // N column
    (1, 1), (3, 3), (4, 4), // rest of the diagonal
];

const LETTER_X: &[Cell] = &[
    (0, 0), (1, 1), (2, 2), (3, 3), (4, 4),
    (0, 4), (1, 3), (3, 1), (4, 0),
];

const CORNER_PICTURE_FRAME: &[Cell] = &[
    (0, 0), (1, 0), (3, 0), (4, 0), // B column
    (0, 4), (1, 4), (3, 4), (4, 4), // O column
    (0, 1), (4, 1), // I top and bottom
    (0, 3), (4, 3), // G top and bottom
];

const CHECK_MARK: &[Cell] = &[
    (4, 0), (3, 1), (2, 2), (1, 3), (0, 4),
    (2, 0), (3, 0),
];

const FOUR_CORNERS: &[Cell] = &[(0, 0), (0, 4), (4, 0), (4, 4)];

const HEART: &[Cell] = &[
    (1, 0), (2, 0),
    (0, 1), (3, 1),
    (1, 2), (4, 2),
    (0, 3), (3, 3),
    (1, 4), (2, 4),
];

const POSTAGE_STAMP: &[Cell] = &[
    (0, 0), (0, 1), (1, 0), (1, 1),
    (3, 3), (3, 4), (4, 3), (4, 4),
];

const BLOCK_OF_8: &[Cell] = &[
    (1, 1), (2, 1),
    (1, 2), (2, 2),
    (1, 3), (2, 3),
    (1, 4), (2, 4),
];

const BLACKOUT: &[Cell] = &[
    (0, 0), (0, 1), (0, 2), (0, 3), (0, 4),
    (1, 0), (1, 1), (1, 2), (1, 3), (1, 4),
    (2, 0), (2, 1), (2, 2), (2, 3), (2, 4),
    (3, 0), (3, 1), (3, 2), (3, 3), (3, 4),
    (4, 0), (4, 1), (4, 2), (4, 3), (4, 4),
];

impl PatternMode {
    pub const ALL: [PatternMode; 11] = [
        PatternMode::SingleBingo,
        PatternMode::DoubleBingo,
        PatternMode::TripleBingo,
        PatternMode::LetterX,
        PatternMode::CornerPictureFrame,
        PatternMode::CheckMark,
        PatternMode::FourCorners,
        PatternMode::Heart,
        PatternMode::PostageStamp,
        PatternMode::BlockOf8,
        PatternMode::Blackout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternMode::SingleBingo => "Single Bingo",
            PatternMode::DoubleBingo => "Double Bingo",
            PatternMode::TripleBingo => "Triple Bingo",
            PatternMode::LetterX => "Letter X",
            PatternMode::CornerPictureFrame => "Corner Picture Frame",
            PatternMode::CheckMark => "Check Mark",
            PatternMode::FourCorners => "Four Corners",
            PatternMode::Heart => "Heart",
            PatternMode::PostageStamp => "Postage Stamp",
            PatternMode::BlockOf8 => "Block of 8",
            PatternMode::Blackout => "Blackout",
        }
    }

    /// Exact, case-sensitive lookup of a mode by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }

    pub fn coordinates(self) -> &'static [Cell] {
        match self {
            PatternMode::SingleBingo => SINGLE_BINGO,
            PatternMode::DoubleBingo => DOUBLE_BINGO,
            PatternMode::TripleBingo => TRIPLE_BINGO,
            PatternMode::LetterX => LETTER_X,
            PatternMode::CornerPictureFrame => CORNER_PICTURE_FRAME,
            PatternMode::CheckMark => CHECK_MARK,
            PatternMode::FourCorners => FOUR_CORNERS,
            PatternMode::Heart => HEART,
            PatternMode::PostageStamp => POSTAGE_STAMP,
            PatternMode::BlockOf8 => BLOCK_OF_8,
            PatternMode::Blackout => BLACKOUT,
        }
    }

    /// Column called in full as soon as the mode is picked.
    pub fn auto_call(self) -> Option<Column> {
        match self {
            PatternMode::LetterX | PatternMode::CornerPictureFrame => Some(Column::N),
            _ => None,
        }
    }
}

/// A mode picked by the operator: one of the table entries or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Named(PatternMode),
    Custom(String),
}

impl GameMode {
    pub fn resolve(name: &str) -> Self {
        match PatternMode::from_name(name) {
            Some(mode) => GameMode::Named(mode),
            None => GameMode::Custom(name.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GameMode::Named(mode) => mode.name(),
            GameMode::Custom(name) => name,
        }
    }

    pub fn coordinates(&self) -> &'static [Cell] {
        match self {
            GameMode::Named(mode) => mode.coordinates(),
            GameMode::Custom(_) => &[],
        }
    }

    pub fn auto_call(&self) -> Option<Column> {
        match self {
            GameMode::Named(mode) => mode.auto_call(),
            GameMode::Custom(_) => None,
        }
    }
}

/// Result of switching the game mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ModeOutcome {
    pub highlighted: BTreeSet<Cell>,
    pub auto_called: Vec<Number>,
}

// The pattern card. Highlights from the mode table and from operator clicks share
// one flag per cell.
#[derive(Debug, Clone)]
pub struct Template {
    mode: Option<GameMode>,
    highlights: [[bool; TEMPLATE_SIZE]; TEMPLATE_SIZE],
    card: [[Option<Number>; TEMPLATE_SIZE]; TEMPLATE_SIZE],
}

impl Template {
    pub fn new() -> Self {
        Template {
            mode: None,
            highlights: [[false; TEMPLATE_SIZE]; TEMPLATE_SIZE],
            card: [[None; TEMPLATE_SIZE]; TEMPLATE_SIZE],
        }
    }

    /// Fill the card with sample numbers, each column from its own letter range.
    pub fn deal_card<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for column in Column::ALL {
            let numbers: Vec<Number> = column.numbers().collect();
            let picks: Vec<Number> = numbers.choose_multiple(rng, TEMPLATE_SIZE).copied().collect();
            for (row, number) in picks.into_iter().enumerate() {
                self.card[row][column.index()] = if (row, column.index()) == FREE_SPACE {
                    None
                } else {
                    Some(number)
                };
            }
        }
    }

    /// Switch to the mode called `name` and highlight its pattern.
    ///
    /// Unknown names become custom modes with no pattern. The returned outcome lists
    /// the numbers the mode wants called; marking them is up to the caller.
    pub fn apply_mode(&mut self, name: &str) -> ModeOutcome {
        let mode = GameMode::resolve(name);
        self.clear();

        for &(row, col) in mode.coordinates() {
            self.highlights[row][col] = !self.highlights[row][col];
        }

        let auto_called: Vec<Number> = mode
            .auto_call()
            .map(|column| column.numbers().collect())
            .unwrap_or_default();
        self.mode = Some(mode);

        ModeOutcome {
            highlighted: self.highlighted(),
            auto_called,
        }
    }

    /// Flip one cell and return its new state.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool> {
        let cell = self
            .highlights
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .ok_or(BingoError::CellOutOfRange { row, col })?;
        *cell = !*cell;
        Ok(*cell)
    }

    pub fn is_highlighted(&self, row: usize, col: usize) -> bool {
        self.highlights
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn highlighted(&self) -> BTreeSet<Cell> {
        let mut cells = BTreeSet::new();
        for (row, cells_in_row) in self.highlights.iter().enumerate() {
            for (col, &lit) in cells_in_row.iter().enumerate() {
                if lit {
                    cells.insert((row, col));
                }
            }
        }
        cells
    }

    pub fn mode(&self) -> Option<&GameMode> {
        self.mode.as_ref()
    }

    pub fn label(&self) -> &str {
        self.mode.as_ref().map(GameMode::label).unwrap_or("")
    }

    /// Sample number printed in a cell; `None` for the free space or an undealt card.
    pub fn card_number(&self, row: usize, col: usize) -> Option<Number> {
        self.card.get(row).and_then(|cells| cells.get(col)).copied().flatten()
    }

    /// Drop every highlight. The mode label is kept.
    pub fn clear(&mut self) {
        self.highlights = [[false; TEMPLATE_SIZE]; TEMPLATE_SIZE];
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}
