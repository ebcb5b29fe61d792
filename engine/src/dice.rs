//! Dice expressions such as `2d6+3`, `A1d20-1d4` or `4d8G`.
//!
//! An expression is a list of [`DiceTerm`]s separated by `+` and `-`. A term is
//! either a constant or `[A|D][count]d<faces>[G]`: `A`/`D` roll every die twice
//! and keep the higher/lower result, `G` replaces rolling with the per-die
//! average `faces / 2 + 1`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Largest dice count a single term may ask for.
pub const MAX_DICE: i32 = 1000;

static DICE_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([AD])?([0-9]*)d([0-9]+)(G)?$").expect("valid dice term regex"));

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl AdMode {
    /// The draw that survives a pair. `Normal` keeps the first.
    pub fn keep(self, first: u32, second: u32) -> u32 {
        match self {
            AdMode::Normal => first,
            AdMode::Advantage => first.max(second),
            AdMode::Disadvantage => first.min(second),
        }
    }
}

/// Source of die rolls.
///
/// The default generator is the operating system CSPRNG. It holds no state, so
/// every caller can own a `Dice` without sharing or locking anything.
pub struct Dice<R = OsRng> {
    rng: R,
}

impl Dice<OsRng> {
    pub fn secure() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for Dice<OsRng> {
    fn default() -> Self {
        Self::secure()
    }
}

impl Dice<ChaCha8Rng> {
    /// Reproducible roller for tests and replays.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> Dice<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform roll in `1..=faces`. `faces` must be positive.
    pub fn die(&mut self, faces: u32) -> u32 {
        self.rng.gen_range(1..=faces)
    }

    /// Both draws of an advantage/disadvantage pair.
    pub fn pair(&mut self, faces: u32) -> (u32, u32) {
        let a = self.die(faces);
        let b = self.die(faces);
        (a, b)
    }

    pub fn die_with(&mut self, faces: u32, mode: AdMode) -> u32 {
        match mode {
            AdMode::Normal => self.die(faces),
            AdMode::Advantage | AdMode::Disadvantage => {
                let (a, b) = self.pair(faces);
                mode.keep(a, b)
            }
        }
    }
}

/// One signed component of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceTerm {
    /// Signed number of dice; zero makes this a constant term.
    pub multiplier: i32,
    /// Faces per die. A zero-faced dice term rolls nothing.
    pub dice_value: u32,
    /// Flat offset, only read when `multiplier` is zero.
    pub constant: i32,
    pub mode: AdMode,
    pub with_average: bool,
}

impl DiceTerm {
    pub fn constant(value: i32) -> Self {
        Self {
            multiplier: 0,
            dice_value: 0,
            constant: value,
            mode: AdMode::Normal,
            with_average: false,
        }
    }

    pub fn dice(multiplier: i32, dice_value: u32) -> Self {
        Self {
            multiplier,
            dice_value,
            constant: 0,
            mode: AdMode::Normal,
            with_average: false,
        }
    }

    pub fn with_mode(mut self, mode: AdMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn averaged(mut self) -> Self {
        self.with_average = true;
        self
    }

    pub fn is_constant(&self) -> bool {
        self.multiplier == 0
    }

    pub fn advantage(&self) -> bool {
        self.mode == AdMode::Advantage
    }

    pub fn disadvantage(&self) -> bool {
        self.mode == AdMode::Disadvantage
    }

    /// `"MdV"` for dice terms, `"None"` for constants.
    pub fn label(&self) -> String {
        if self.is_constant() {
            "None".to_string()
        } else {
            format!("{}d{}", self.multiplier, self.dice_value)
        }
    }

    pub fn modifier_label(&self) -> &'static str {
        if self.is_constant() {
            return "None";
        }
        if self.with_average {
            return "Average";
        }
        match self.mode {
            AdMode::Normal => "None",
            AdMode::Advantage => "Advantage",
            AdMode::Disadvantage => "Disadvantage",
        }
    }

    /// Value of the term with every die replaced by `faces / 2 + 1`.
    pub fn average(&self) -> i64 {
        if self.is_constant() {
            return i64::from(self.constant);
        }
        i64::from(self.dice_value / 2 + 1) * i64::from(self.multiplier)
    }

    pub fn evaluate<R: RngCore>(&self, dice: &mut Dice<R>) -> i64 {
        if self.is_constant() || self.with_average {
            return self.average();
        }
        if self.dice_value == 0 {
            return 0;
        }
        let sum: i64 = (0..self.multiplier.unsigned_abs())
            .map(|_| i64::from(dice.die_with(self.dice_value, self.mode)))
            .sum();
        sum * i64::from(self.multiplier.signum())
    }

    pub fn roll<R: RngCore>(&self, dice: &mut Dice<R>) -> TermOutcome {
        let mut outcome = TermOutcome {
            label: self.label(),
            modifier: self.modifier_label(),
            rolls: Vec::new(),
            value: 0,
        };
        if self.is_constant() || self.with_average {
            outcome.value = self.average();
            return outcome;
        }
        if self.dice_value == 0 {
            return outcome;
        }

        outcome.rolls = (0..self.multiplier.unsigned_abs())
            .map(|_| dice.die_with(self.dice_value, self.mode))
            .collect();
        let sum: i64 = outcome.rolls.iter().map(|&r| i64::from(r)).sum();
        outcome.value = sum * i64::from(self.multiplier.signum());
        outcome
    }
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_constant() {
            return write!(f, "{}", self.constant);
        }
        if self.multiplier < 0 {
            f.write_str("-")?;
        }
        match self.mode {
            AdMode::Normal => {}
            AdMode::Advantage => f.write_str("A")?,
            AdMode::Disadvantage => f.write_str("D")?,
        }
        write!(f, "{}d{}", self.multiplier.unsigned_abs(), self.dice_value)?;
        if self.with_average {
            f.write_str("G")?;
        }
        Ok(())
    }
}

/// Result of rolling a single term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermOutcome {
    pub label: String,
    pub modifier: &'static str,
    /// Kept die values in roll order; empty for constant and averaged terms.
    pub rolls: Vec<u32>,
    pub value: i64,
}

impl TermOutcome {
    /// Kept values carrying the sign of the term.
    pub fn signed_rolls(&self) -> impl Iterator<Item = i64> + '_ {
        let sign = if self.value < 0 { -1 } else { 1 };
        self.rolls.iter().map(move |&r| sign * i64::from(r))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    pub terms: Vec<TermOutcome>,
    pub total: i64,
}

impl RollOutcome {
    pub fn rolls(&self) -> impl Iterator<Item = i64> + '_ {
        self.terms.iter().flat_map(|t| t.signed_rolls())
    }
}

/// A parsed, non-empty list of terms. Order does not affect the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    terms: Vec<DiceTerm>,
}

impl DiceExpression {
    pub fn new(terms: Vec<DiceTerm>) -> Result<Self, ParseError> {
        if terms.is_empty() {
            return Err(ParseError::Malformed);
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[DiceTerm] {
        &self.terms
    }

    pub fn evaluate<R: RngCore>(&self, dice: &mut Dice<R>) -> i64 {
        self.terms.iter().map(|t| t.evaluate(dice)).sum()
    }

    pub fn evaluate_detailed<R: RngCore>(&self, dice: &mut Dice<R>) -> RollOutcome {
        let terms: Vec<TermOutcome> = self.terms.iter().map(|t| t.roll(dice)).collect();
        let total = terms.iter().map(|t| t.value).sum();
        RollOutcome { terms, total }
    }

    pub fn average(&self) -> i64 {
        self.terms.iter().map(DiceTerm::average).sum()
    }

    /// Smallest and largest totals reachable by rolling.
    pub fn bounds(&self) -> (i64, i64) {
        self.terms.iter().fold((0, 0), |(lo, hi), t| {
            if t.is_constant() || t.with_average || t.dice_value == 0 {
                let v = t.average();
                return (lo + v, hi + v);
            }
            let count = i64::from(t.multiplier);
            let faces = i64::from(t.dice_value);
            if count > 0 {
                (lo + count, hi + count * faces)
            } else {
                (lo + count * faces, hi + count)
            }
        })
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            let text = term.to_string();
            if i > 0 && !text.starts_with('-') {
                f.write_str("+")?;
            }
            f.write_str(&text)?;
        }
        Ok(())
    }
}

impl FromStr for DiceExpression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse an expression. Whitespace is ignored.
///
/// The input is split on `+` first and each group on `-`. Inside a group only
/// the first piece keeps its own sign, so `2d6-1d4-3` is `2d6 - 1d4 - 3`. A
/// group that starts with `-` makes its first piece negative too.
pub fn parse(input: &str) -> Result<DiceExpression, ParseError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let mut terms = Vec::new();
    for group in compact.split('+').filter(|g| !g.is_empty()) {
        let leading_minus = group.starts_with('-');
        for (j, piece) in group.split('-').filter(|p| !p.is_empty()).enumerate() {
            let sign = if j > 0 || leading_minus { -1 } else { 1 };
            terms.push(parse_term(piece, sign)?);
        }
    }
    DiceExpression::new(terms)
}

pub fn evaluate<R: RngCore>(expr: &DiceExpression, dice: &mut Dice<R>) -> i64 {
    expr.evaluate(dice)
}

fn parse_term(piece: &str, sign: i32) -> Result<DiceTerm, ParseError> {
    if let Ok(value) = piece.parse::<i32>() {
        return Ok(DiceTerm::constant(value * sign));
    }

    let caps = DICE_TERM.captures(piece).ok_or(ParseError::Malformed)?;
    let mode = match caps.get(1).map(|m| m.as_str()) {
        Some("A") => AdMode::Advantage,
        Some("D") => AdMode::Disadvantage,
        _ => AdMode::Normal,
    };
    let count = match &caps[2] {
        "" => 1,
        digits => digits.parse::<i32>().map_err(|_| ParseError::Malformed)?,
    };
    if count > MAX_DICE {
        return Err(ParseError::Malformed);
    }
    let faces = caps[3]
        .parse::<u32>()
        .map_err(|_| ParseError::Malformed)?;
    if faces == 0 {
        return Err(ParseError::Malformed);
    }

    let mut term = DiceTerm::dice(count * sign, faces).with_mode(mode);
    term.with_average = caps.get(4).is_some();
    Ok(term)
}
