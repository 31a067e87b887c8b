// src/pouch.rs
// The ball draw: picks the column of the next ball ahead of time, then draws a
// random uncalled number from it.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::defs::{Column, HISTORY_SIZE, Number};
use crate::error::Result;

pub struct Pouch<R: Rng = StdRng> {
    rng: R,
    next_column: Option<Column>,
    // Most recent first.
    history: VecDeque<Number>,
    history_size: usize,
}

impl Pouch<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng(), HISTORY_SIZE)
    }

    /// A pouch whose draw sequence is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), HISTORY_SIZE)
    }
}

impl Default for Pouch<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Pouch<R> {
    pub fn with_rng(rng: R, history_size: usize) -> Self {
        Pouch {
            rng,
            next_column: None,
            history: VecDeque::with_capacity(history_size),
            history_size,
        }
    }

    /// Draw the next ball and mark it on the board.
    ///
    /// Returns `None` once all 75 numbers have been called; that is the end of the
    /// game, not an error, and every later call returns `None` as well.
    pub fn extract(&mut self, board: &mut Board) -> Option<Number> {
        let available = board.available_columns();
        if available.is_empty() {
            self.next_column = None;
            return None;
        }

        // Manual marks may have emptied the announced column since the last draw.
        let column = match self.next_column {
            Some(column) if available.contains(&column) => column,
            _ => *available.choose(&mut self.rng)?,
        };

        let extracted = *board.pool(column).choose(&mut self.rng)?;
        // The pool only holds uncalled numbers, so this always succeeds.
        board.mark(extracted).ok()?;

        self.next_column = board.available_columns().choose(&mut self.rng).copied();

        self.history.push_front(extracted);
        self.history.truncate(self.history_size);

        Some(extracted)
    }

    /// Call a number tapped by the operator. Leaves the look-ahead and the history alone.
    pub fn mark_manual(&mut self, board: &mut Board, number: Number) -> Result<bool> {
        board.mark(number)
    }

    /// Column announced as "up next".
    ///
    /// Taps can empty the announced column between draws; it is then reported as
    /// undefined until the next draw picks a live one.
    pub fn next_column(&self, board: &Board) -> Option<Column> {
        self.next_column.filter(|&column| board.remaining(column) > 0)
    }

    pub fn history(&self) -> Vec<Number> {
        self.history.iter().copied().collect()
    }

    /// The ball currently on display.
    pub fn current(&self) -> Option<Number> {
        self.history.front().copied()
    }

    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn reset(&mut self, board: &mut Board) {
        board.clear();
        self.history.clear();
        self.next_column = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{FIRSTNUMBER, LASTNUMBER};
    use std::collections::HashSet;

    #[test]
    fn test_draws_every_number_once() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(7);
        let mut seen = HashSet::new();

        for _ in FIRSTNUMBER..=LASTNUMBER {
            let number = pouch.extract(&mut board).expect("pouch should not be empty yet");
            assert!(seen.insert(number), "number {number} drawn twice");
        }

        assert_eq!(seen.len(), 75);
        assert!(board.is_complete());
        assert_eq!(pouch.extract(&mut board), None);
        assert_eq!(pouch.extract(&mut board), None);
        assert_eq!(pouch.next_column(&board), None);
    }

    #[test]
    fn test_draw_follows_announced_column() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(42);

        // Nothing announced before the first draw.
        assert_eq!(pouch.next_column(&board), None);
        pouch.extract(&mut board).unwrap();

        while let Some(announced) = pouch.next_column(&board) {
            let number = pouch.extract(&mut board).unwrap();
            assert_eq!(Column::of(number), Some(announced));
        }
        assert!(board.is_complete());
    }

    #[test]
    fn test_look_ahead_skips_exhausted_column() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(3);
        pouch.extract(&mut board).unwrap();

        let announced = pouch.next_column(&board).unwrap();
        for number in announced.numbers() {
            pouch.mark_manual(&mut board, number).unwrap();
        }

        let number = pouch.extract(&mut board).unwrap();
        assert_ne!(Column::of(number), Some(announced));
        if let Some(next) = pouch.next_column(&board) {
            assert!(board.remaining(next) > 0);
        }
    }

    #[test]
    fn test_announced_column_emptied_by_taps_is_not_reported() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(2);
        pouch.extract(&mut board).unwrap();

        let announced = pouch.next_column(&board).unwrap();
        for number in announced.numbers() {
            pouch.mark_manual(&mut board, number).unwrap();
        }
        assert_eq!(board.remaining(announced), 0);
        assert_eq!(pouch.next_column(&board), None);

        // The next draw still comes from a live column and announces another one.
        let number = pouch.extract(&mut board).unwrap();
        assert_ne!(Column::of(number), Some(announced));
        if let Some(next) = pouch.next_column(&board) {
            assert!(board.remaining(next) > 0);
        }
    }

    #[test]
    fn test_no_column_announced_once_all_numbers_are_tapped() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(1);
        pouch.extract(&mut board).unwrap();
        assert!(pouch.next_column(&board).is_some());

        for number in FIRSTNUMBER..=LASTNUMBER {
            pouch.mark_manual(&mut board, number).unwrap();
        }
        assert!(board.is_complete());
        assert_eq!(pouch.next_column(&board), None);
        assert_eq!(pouch.extract(&mut board), None);
    }

    #[test]
    fn test_history_is_bounded_and_most_recent_first() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(11);
        let mut drawn = Vec::new();
        for _ in 0..8 {
            drawn.push(pouch.extract(&mut board).unwrap());
        }

        let expected: Vec<Number> = drawn.iter().rev().take(5).copied().collect();
        assert_eq!(pouch.history(), expected);
        assert_eq!(pouch.current(), drawn.last().copied());
    }

    #[test]
    fn test_mark_manual_does_not_touch_draw_state() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(5);
        pouch.extract(&mut board).unwrap();
        let announced = pouch.next_column(&board);
        let history = pouch.history();

        let free = (FIRSTNUMBER..=LASTNUMBER).find(|&n| !board.is_called(n)).unwrap();
        assert!(pouch.mark_manual(&mut board, free).unwrap());
        assert!(!pouch.mark_manual(&mut board, free).unwrap());

        assert_eq!(pouch.next_column(&board), announced);
        assert_eq!(pouch.history(), history);
        assert!(pouch.mark_manual(&mut board, 76).is_err());
    }

    #[test]
    fn test_manual_marks_are_never_drawn() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(9);
        for number in (1..=75).step_by(2) {
            pouch.mark_manual(&mut board, number).unwrap();
        }
        while let Some(number) = pouch.extract(&mut board) {
            assert_eq!(number % 2, 0);
        }
        assert!(board.is_complete());
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        let mut pouch = Pouch::seeded(1);
        for _ in 0..75 {
            pouch.extract(&mut board);
        }
        pouch.reset(&mut board);

        assert_eq!(pouch.next_column(&board), None);
        assert!(pouch.history().is_empty());
        assert_eq!(pouch.current(), None);
        for number in FIRSTNUMBER..=LASTNUMBER {
            assert!(!board.is_called(number));
        }
        assert!(pouch.extract(&mut board).is_some());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let draw_all = |seed| {
            let mut board = Board::new();
            let mut pouch = Pouch::seeded(seed);
            std::iter::from_fn(|| pouch.extract(&mut board)).collect::<Vec<Number>>()
        };
        assert_eq!(draw_all(123), draw_all(123));
    }

    #[test]
    fn test_history_size_zero() {
        let mut board = Board::new();
        let mut pouch = Pouch::with_rng(StdRng::seed_from_u64(2), 0);
        pouch.extract(&mut board).unwrap();
        assert!(pouch.history().is_empty());
    }
}
