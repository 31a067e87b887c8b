// src/error.rs
// Error type shared by the engines, the config loader and the console.

use crate::defs::{FIRSTNUMBER, LASTNUMBER, Number, TEMPLATE_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum BingoError {
    #[error("number {0} is outside {first}..={last}", first = FIRSTNUMBER, last = LASTNUMBER)]
    NumberOutOfRange(Number),

    #[error("template cell ({row}, {col}) is outside the {size}x{size} card", size = TEMPLATE_SIZE)]
    CellOutOfRange { row: usize, col: usize },

    #[error("wild digit {0} is not a single decimal digit")]
    InvalidDigit(u8),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BingoError>;
