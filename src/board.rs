// src/board.rs
// This module holds the master call sheet: which of the 75 numbers have been called,
// and what each number looks like on the display surfaces.

use crate::defs::{Column, FIRSTNUMBER, LASTNUMBER, Number};
use crate::error::{BingoError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
struct NumberEntry {
    number: Number,
    // Monotonic until reset; this is what the ball draw reads.
    is_called: bool,
    // Flipped on every tap of the number; this is what the call sheet shows.
    is_lit: bool,
}

/// Visual state of one number on the call sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Uncalled,
    Called(Column),
}

// This struct represents the master call sheet of the bingo game.
#[derive(Clone)]
pub struct Board(Vec<NumberEntry>);

impl Board {
    pub fn new() -> Self {
        Board(
            (FIRSTNUMBER..=LASTNUMBER)
                .map(|number| NumberEntry {
                    number,
                    is_called: false,
                    is_lit: false,
                })
                .collect(),
        )
    }

    fn entry(&self, number: Number) -> Result<&NumberEntry> {
        self.0
            .get(index_of(number)?)
            .ok_or(BingoError::NumberOutOfRange(number))
    }

    fn entry_mut(&mut self, number: Number) -> Result<&mut NumberEntry> {
        self.0
            .get_mut(index_of(number)?)
            .ok_or(BingoError::NumberOutOfRange(number))
    }

    /// Add a number to the called set. Returns true if it was not called before.
    pub fn mark(&mut self, number: Number) -> Result<bool> {
        let entry = self.entry_mut(number)?;
        let newly_called = !entry.is_called;
        entry.is_called = true;
        Ok(newly_called)
    }

    /// Flip the display state of a number and return the new state.
    pub fn toggle(&mut self, number: Number) -> Result<bool> {
        let entry = self.entry_mut(number)?;
        entry.is_lit = !entry.is_lit;
        Ok(entry.is_lit)
    }

    pub fn is_called(&self, number: Number) -> bool {
        self.entry(number).map(|entry| entry.is_called).unwrap_or(false)
    }

    pub fn is_lit(&self, number: Number) -> bool {
        self.entry(number).map(|entry| entry.is_lit).unwrap_or(false)
    }

    pub fn cell_state(&self, number: Number) -> Result<CellState> {
        let entry = self.entry(number)?;
        match (entry.is_lit, Column::of(entry.number)) {
            (true, Some(column)) => Ok(CellState::Called(column)),
            _ => Ok(CellState::Uncalled),
        }
    }

    /// Numbers of a column that have not been called yet.
    pub fn pool(&self, column: Column) -> Vec<Number> {
        column.numbers().filter(|&number| !self.is_called(number)).collect()
    }

    pub fn remaining(&self, column: Column) -> usize {
        column.numbers().filter(|&number| !self.is_called(number)).count()
    }

    pub fn remaining_total(&self) -> usize {
        self.0.iter().filter(|entry| !entry.is_called).count()
    }

    pub fn available_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|&column| self.remaining(column) > 0)
            .collect()
    }

    pub fn called_numbers(&self) -> Vec<Number> {
        self.0
            .iter()
            .filter(|entry| entry.is_called)
            .map(|entry| entry.number)
            .collect()
    }

    pub fn lit_numbers(&self) -> Vec<Number> {
        self.0
            .iter()
            .filter(|entry| entry.is_lit)
            .map(|entry| entry.number)
            .collect()
    }

    pub fn called_count(&self) -> usize {
        self.0.iter().filter(|entry| entry.is_called).count()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_total() == 0
    }

    pub fn clear(&mut self) {
        for entry in &mut self.0 {
            entry.is_called = false;
            entry.is_lit = false;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn index_of(number: Number) -> Result<usize> {
    if (FIRSTNUMBER..=LASTNUMBER).contains(&number) {
        Ok((number - FIRSTNUMBER) as usize)
    } else {
        Err(BingoError::NumberOutOfRange(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.called_count(), 0);
        assert_eq!(board.remaining_total(), 75);
        assert_eq!(board.available_columns(), Column::ALL.to_vec());
        for number in FIRSTNUMBER..=LASTNUMBER {
            assert!(!board.is_called(number));
            assert_eq!(board.cell_state(number).unwrap(), CellState::Uncalled);
        }
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut board = Board::new();
        assert!(board.mark(31).unwrap());
        assert!(!board.mark(31).unwrap());
        assert!(board.is_called(31));
        assert_eq!(board.called_numbers(), vec![31]);
        assert_eq!(board.remaining(Column::N), 14);
    }

    #[test]
    fn test_toggle_is_independent_from_called() {
        let mut board = Board::new();
        board.mark(12).unwrap();
        assert!(board.toggle(12).unwrap());
        assert_eq!(board.cell_state(12).unwrap(), CellState::Called(Column::B));
        assert!(!board.toggle(12).unwrap());
        assert_eq!(board.cell_state(12).unwrap(), CellState::Uncalled);
        assert!(board.is_called(12));
    }

    #[test]
    fn test_out_of_range_numbers_are_rejected() {
        let mut board = Board::new();
        assert!(matches!(board.mark(0), Err(BingoError::NumberOutOfRange(0))));
        assert!(matches!(board.mark(76), Err(BingoError::NumberOutOfRange(76))));
        assert!(board.toggle(200).is_err());
        assert!(board.cell_state(0).is_err());
        assert!(!board.is_called(76));
    }

    #[test]
    fn test_pool_excludes_called_numbers() {
        let mut board = Board::new();
        for number in Column::G.numbers() {
            board.mark(number).unwrap();
        }
        board.mark(1).unwrap();
        assert!(board.pool(Column::G).is_empty());
        assert_eq!(board.pool(Column::B), (2..=15).collect::<Vec<Number>>());
        assert_eq!(
            board.available_columns(),
            vec![Column::B, Column::I, Column::N, Column::O]
        );
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new();
        board.mark(5).unwrap();
        board.toggle(5).unwrap();
        board.clear();
        assert!(!board.is_called(5));
        assert!(!board.is_lit(5));
        assert!(board.lit_numbers().is_empty());
    }
}
