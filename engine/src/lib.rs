//! Dice rolling and reference-text paging for a tabletop RPG chat bot.
//!
//! The two engines, [`dice`] and [`chunk`], are pure. [`monster`], [`spell`],
//! [`cache`] and [`config`] are the lookup plumbing around them.

pub mod cache;
pub mod chunk;
pub mod config;
pub mod content;
pub mod dice;
pub mod error;
pub mod monster;
pub mod roll;
pub mod spell;
pub mod weapon;

pub use chunk::{chunk, ChunkOptions, TextBlock};
pub use dice::{evaluate, parse, AdMode, Dice, DiceExpression, DiceTerm, RollOutcome, TermOutcome};
pub use error::{ContentKind, LookupError, ParseError};
pub use roll::{Breakdown, RollReply};

/// D&D ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_mod(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}
