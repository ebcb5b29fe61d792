use std::fmt;

use serde::Serialize;

use crate::dice::{RollOutcome, TermOutcome};

/// Reply to a plain roll command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollReply {
    /// Every kept die, signed like its term.
    pub rolls: Vec<i64>,
    /// Everything in the total that was not rolled: constants and averages.
    pub offset: i64,
    pub total: i64,
}

impl RollReply {
    pub fn from_outcome(outcome: &RollOutcome) -> Self {
        let rolls: Vec<i64> = outcome.rolls().collect();
        let rolled: i64 = rolls.iter().sum();
        Self {
            offset: outcome.total - rolled,
            total: outcome.total,
            rolls,
        }
    }
}

impl fmt::Display for RollReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rolls.as_slice() {
            [] => write!(f, "Result: {}", self.total),
            [only] if self.offset != 0 => {
                write!(f, "Roll: {}{:+} = {}", only, self.offset, self.total)
            }
            [only] => write!(f, "Roll: {}", only),
            many => {
                let joined = many
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Rolls: {}\nSum: {}", joined, self.total)
            }
        }
    }
}

/// Per-term table for the structured roll command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub rows: Vec<TermOutcome>,
    pub total: i64,
}

const HEADERS: [&str; 3] = ["Values", "Modifiers", "Results"];

impl Breakdown {
    pub fn from_outcome(outcome: RollOutcome) -> Self {
        Self {
            rows: outcome.terms,
            total: outcome.total,
        }
    }

    /// `(values, modifiers, results)` columns, top to bottom.
    pub fn columns(&self) -> [Vec<String>; 3] {
        let values = self.rows.iter().map(|r| r.label.clone()).collect();
        let modifiers = self.rows.iter().map(|r| r.modifier.to_string()).collect();
        let results = self.rows.iter().map(|r| r.value.to_string()).collect();
        [values, modifiers, results]
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.columns();
        let widths: Vec<usize> = HEADERS
            .iter()
            .zip(columns.iter())
            .map(|(h, col)| col.iter().map(String::len).chain([h.len()]).max().unwrap_or(0))
            .collect();

        writeln!(
            f,
            "{:<w0$} | {:<w1$} | {}",
            HEADERS[0],
            HEADERS[1],
            HEADERS[2],
            w0 = widths[0],
            w1 = widths[1]
        )?;
        for i in 0..self.rows.len() {
            writeln!(
                f,
                "{:<w0$} | {:<w1$} | {}",
                columns[0][i],
                columns[1][i],
                columns[2][i],
                w0 = widths[0],
                w1 = widths[1]
            )?;
        }
        write!(f, "Total: {}", self.total)
    }
}
