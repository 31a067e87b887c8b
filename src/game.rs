// src/game.rs
// One bingo session: the call sheet, the ball draw and the pattern card, driven by
// operator events in the order they arrive.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Board, CellState};
use crate::config::ConsoleConfig;
use crate::defs::{Column, Number, TEMPLATE_SIZE};
use crate::error::Result;
use crate::events::{BulkSelection, ConsoleEvent, DisplaySurface, EventOutcome, Tap};
use crate::logging::{log_info, log_warning};
use crate::pattern::{Cell, ModeOutcome, Template};
use crate::pouch::Pouch;

/// Everything a render surface needs, detached from the engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub called: Vec<Number>,
    pub lit: Vec<Number>,
    pub remaining: usize,
    pub remaining_by_column: Vec<(Column, usize)>,
    pub next_column: Option<Column>,
    pub current: Option<Number>,
    pub history: Vec<Number>,
    pub mode: Option<String>,
    pub highlighted: Vec<Cell>,
    pub card: Vec<Vec<Option<Number>>>,
}

pub struct Game<R: Rng = StdRng> {
    board: Board,
    pouch: Pouch<R>,
    template: Template,
    surfaces: Vec<Box<dyn DisplaySurface>>,
}

impl Game<StdRng> {
    /// Build a session from the console configuration; a configured seed makes
    /// the whole draw sequence and the sample card reproducible.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng, config.history_size)
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_config(&ConsoleConfig {
            seed: Some(seed),
            ..ConsoleConfig::default()
        })
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(rng: R, history_size: usize) -> Self {
        let mut game = Game {
            board: Board::new(),
            pouch: Pouch::with_rng(rng, history_size),
            template: Template::new(),
            surfaces: Vec::new(),
        };
        game.template.deal_card(game.pouch.rng_mut());
        game
    }

    pub fn subscribe(&mut self, surface: Box<dyn DisplaySurface>) {
        self.surfaces.push(surface);
    }

    /// Route one operator action to its engine, then refresh every display surface.
    pub fn dispatch(&mut self, event: ConsoleEvent) -> Result<EventOutcome> {
        let outcome = match event {
            ConsoleEvent::NumberTapped(number) => self.mark_manual(number).map(EventOutcome::Tapped),
            ConsoleEvent::DrawBall => Ok(EventOutcome::Drawn(self.draw_next())),
            ConsoleEvent::Bulk(selection) => self.mark_bulk(selection).map(EventOutcome::BulkTapped),
            ConsoleEvent::ModeSelected(name) => Ok(EventOutcome::ModeChanged(self.apply_mode(&name))),
            ConsoleEvent::CellClicked { row, col } => {
                self.toggle_cell(row, col)
                    .map(|highlighted| EventOutcome::CellToggled { row, col, highlighted })
            }
            ConsoleEvent::Reset => {
                self.reset();
                Ok(EventOutcome::Reset)
            }
        };

        match &outcome {
            Ok(_) => self.notify(),
            Err(e) => log_warning(&format!("Rejected operator input: {e}")),
        }
        outcome
    }

    fn notify(&mut self) {
        if self.surfaces.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for surface in &mut self.surfaces {
            surface.refresh(&snapshot);
        }
    }

    /// Draw the next ball, or `None` when the game is complete.
    pub fn draw_next(&mut self) -> Option<Number> {
        match self.pouch.extract(&mut self.board) {
            Some(number) => {
                // A drawn number was never tapped, so this lights it.
                if let Err(e) = self.board.toggle(number) {
                    log_warning(&format!("Could not light {number}: {e}"));
                }
                let column = Column::of(number).map(|c| c.letter()).unwrap_or('?');
                let up_next = self
                    .pouch
                    .next_column(&self.board)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string());
                log_info(&format!("Drawn {column} {number}, up next: {up_next}"));
                Some(number)
            }
            None => {
                log_info("All 75 numbers have been called");
                None
            }
        }
    }

    /// Operator tap on the control panel: calls the number and flips how it is shown.
    ///
    /// Calling is idempotent; the display flips on every tap, so tapping a called
    /// number again dims it on the sheet while it stays out of the draw.
    pub fn mark_manual(&mut self, number: Number) -> Result<Tap> {
        let newly_called = self.pouch.mark_manual(&mut self.board, number)?;
        let lit = self.board.toggle(number)?;
        log_info(&format!(
            "Tapped {number} ({}, {})",
            if newly_called { "called" } else { "already called" },
            if lit { "shown" } else { "hidden" }
        ));
        Ok(Tap { number, newly_called, lit })
    }

    pub fn mark_bulk(&mut self, selection: BulkSelection) -> Result<Vec<Tap>> {
        let numbers = selection.numbers()?;
        log_info(&format!("Bulk tap {selection:?}: {} numbers", numbers.len()));
        numbers.into_iter().map(|number| self.mark_manual(number)).collect()
    }

    /// Switch game mode; frame modes also tap every number of their auto-called column.
    pub fn apply_mode(&mut self, name: &str) -> ModeOutcome {
        let outcome = self.template.apply_mode(name);
        for &number in &outcome.auto_called {
            if let Err(e) = self.mark_manual(number) {
                log_warning(&format!("Auto-call of {number} failed: {e}"));
            }
        }
        log_info(&format!(
            "Game mode '{}': {} cells highlighted, {} numbers auto-called",
            name,
            outcome.highlighted.len(),
            outcome.auto_called.len()
        ));
        outcome
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool> {
        let highlighted = self.template.toggle_cell(row, col)?;
        log_info(&format!("Template cell ({row}, {col}) highlighted: {highlighted}"));
        Ok(highlighted)
    }

    /// Start over: every number back in the pouch, highlights gone, a fresh sample card.
    pub fn reset(&mut self) {
        self.pouch.reset(&mut self.board);
        self.template.clear();
        self.template.deal_card(self.pouch.rng_mut());
        log_info("Game reset");
    }

    pub fn is_called(&self, number: Number) -> bool {
        self.board.is_called(number)
    }

    pub fn cell_state(&self, number: Number) -> Result<CellState> {
        self.board.cell_state(number)
    }

    pub fn next_column(&self) -> Option<Column> {
        self.pouch.next_column(&self.board)
    }

    pub fn history(&self) -> Vec<Number> {
        self.pouch.history()
    }

    pub fn current(&self) -> Option<Number> {
        self.pouch.current()
    }

    pub fn is_highlighted(&self, row: usize, col: usize) -> bool {
        self.template.is_highlighted(row, col)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            called: self.board.called_numbers(),
            lit: self.board.lit_numbers(),
            remaining: self.board.remaining_total(),
            remaining_by_column: Column::ALL
                .into_iter()
                .map(|column| (column, self.board.remaining(column)))
                .collect(),
            next_column: self.pouch.next_column(&self.board),
            current: self.pouch.current(),
            history: self.pouch.history(),
            mode: self.template.mode().map(|mode| mode.label().to_string()),
            highlighted: self.template.highlighted().into_iter().collect(),
            card: (0..TEMPLATE_SIZE)
                .map(|row| {
                    (0..TEMPLATE_SIZE)
                        .map(|col| self.template.card_number(row, col))
                        .collect()
                })
                .collect(),
        }
    }
}
