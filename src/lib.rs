// lib.rs
// Library modules for the bingo game master console

pub mod defs;
pub mod error;
pub mod logging;
pub mod config;
pub mod board;
pub mod pouch;
pub mod pattern;
pub mod events;
pub mod game;
pub mod terminal;
pub mod input;
