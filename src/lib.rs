//! Reads and writes HYDRUS-2D input decks.
//!
//! A [`Parameters`] value describes one simulation case. [`write_deck`]
//! renders it to the fixed-column text files the solver reads, and
//! [`read_deck`] parses such a directory back. The layout of every file is
//! computed by [`schema::resolve`] from the active feature flags, so both
//! directions agree on which sections exist.

#[cfg(test)]
mod test;
#[cfg(test)]
mod utils;

pub mod catalog;
pub mod constants;
pub mod deck;
pub mod error;
pub mod mesh;
pub mod parameters;
pub mod schema;

pub use {
    deck::{read_deck, render_deck, write_deck},
    error::{DeckError, ParseErrorKind, Result},
    parameters::Parameters,
};
