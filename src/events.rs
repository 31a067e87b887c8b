// src/events.rs
// Operator actions and what they produced. The console turns key presses into
// `ConsoleEvent`s and hands them to `Game::dispatch`; display surfaces subscribe to
// the resulting snapshots instead of reaching into the engines.

use serde::{Deserialize, Serialize};

use crate::defs::{FIRSTNUMBER, LASTNUMBER, Number};
use crate::error::{BingoError, Result};
use crate::game::SessionSnapshot;
use crate::pattern::ModeOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    NumberTapped(Number),
    DrawBall,
    Bulk(BulkSelection),
    ModeSelected(String),
    CellClicked { row: usize, col: usize },
    Reset,
}

/// Groups of numbers the operator can tap in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulkSelection {
    Odds,
    Evens,
    /// Every number whose last decimal digit is the given one ("wild" number).
    Ending(u8),
}

impl BulkSelection {
    pub fn matches(self, number: Number) -> bool {
        match self {
            BulkSelection::Odds => number % 2 == 1,
            BulkSelection::Evens => number % 2 == 0,
            BulkSelection::Ending(digit) => number % 10 == digit,
        }
    }

    pub fn numbers(self) -> Result<Vec<Number>> {
        if let BulkSelection::Ending(digit) = self {
            if digit > 9 {
                return Err(BingoError::InvalidDigit(digit));
            }
        }
        Ok((FIRSTNUMBER..=LASTNUMBER).filter(|&n| self.matches(n)).collect())
    }
}

/// Result of tapping one number on the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tap {
    pub number: Number,
    pub newly_called: bool,
    /// Display state after the tap.
    pub lit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// `None` once every ball is out.
    Drawn(Option<Number>),
    Tapped(Tap),
    BulkTapped(Vec<Tap>),
    ModeChanged(ModeOutcome),
    CellToggled { row: usize, col: usize, highlighted: bool },
    Reset,
}

/// A render target fed after every handled event.
pub trait DisplaySurface {
    fn refresh(&mut self, snapshot: &SessionSnapshot);
}
