//! Projection of a scraped spell page (its inner text, one paragraph per line).
//!
//! Page layout: source line, school/level line, four `Label: value` stat lines,
//! then description paragraphs. Two marker paragraphs are pulled out of the
//! description: the higher-level casting note and the class list.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::chunk::{chunk, ChunkOptions, TextBlock};
use crate::error::{ContentKind, LookupError};

const MISSING_PAGE_MARKER: &str = "does not exist";
const HIGHER_LEVELS_MARKER: &str = "At Higher Levels.";
const SPELL_LISTS_MARKER: &str = "Spell Lists.";
const STATS_START: usize = 2;
const DESCRIPTION_START: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub source: String,
    pub school: String,
    /// Stat label to value, in page order.
    pub stats: IndexMap<String, String>,
    pub description: Vec<String>,
    pub higher_levels: Option<String>,
    pub classes: Vec<String>,
}

impl Spell {
    pub fn from_page_text(name: &str, text: &str) -> Result<Self, LookupError> {
        if text.contains(MISSING_PAGE_MARKER) {
            return Err(LookupError::not_found(ContentKind::Spell, name));
        }
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() < DESCRIPTION_START {
            return Err(LookupError::unexpected_shape(ContentKind::Spell, name));
        }

        let stats: IndexMap<String, String> = lines[STATS_START..DESCRIPTION_START]
            .iter()
            .map(|line| match line.split_once(':') {
                Some((label, value)) => (label.trim().to_string(), value.trim().to_string()),
                None => (line.to_string(), String::new()),
            })
            .collect();

        let rest = &lines[DESCRIPTION_START..];
        let higher_levels = rest
            .iter()
            .find_map(|l| after_marker(l, HIGHER_LEVELS_MARKER))
            .map(str::to_string);
        let classes: Vec<String> = rest
            .iter()
            .find_map(|l| after_marker(l, SPELL_LISTS_MARKER))
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let description: Vec<String> = rest
            .iter()
            .filter(|l| !l.contains(HIGHER_LEVELS_MARKER) && !l.contains(SPELL_LISTS_MARKER))
            .map(|l| l.to_string())
            .collect();

        Ok(Self {
            name: name.to_string(),
            source: lines[0].to_string(),
            school: lines[1].to_string(),
            stats,
            description,
            higher_levels,
            classes,
        })
    }

    pub fn stats_text(&self) -> String {
        let mut lines: Vec<String> = self
            .stats
            .iter()
            .map(|(label, value)| {
                if value.is_empty() {
                    label.clone()
                } else {
                    format!("{}: {}", label, value)
                }
            })
            .collect();
        if !self.classes.is_empty() {
            lines.push(format!("Available to Classes: {}", self.classes.join(", ")));
        }
        lines.join("\n")
    }

    pub fn card(&self, options: &ChunkOptions) -> SpellCard {
        SpellCard {
            name: self.name.clone(),
            school: self.school.clone(),
            stats: self.stats_text(),
            blocks: chunk(&self.description, options),
            higher_levels: self.higher_levels.clone(),
        }
    }
}

fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker)
        .map(|at| line[at + marker.len()..].trim_start())
}

/// Display-ready spell, stored in the cache as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCard {
    pub name: String,
    pub school: String,
    pub stats: String,
    pub blocks: Vec<TextBlock>,
    pub higher_levels: Option<String>,
}

impl fmt::Display for SpellCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.school)?;
        writeln!(f)?;
        writeln!(f, "{}", self.stats)?;
        for block in &self.blocks {
            writeln!(f)?;
            if !block.is_continuation() {
                writeln!(f, "[{}]", block.title)?;
            }
            writeln!(f, "{}", block.body)?;
        }
        if let Some(higher) = &self.higher_levels {
            writeln!(f)?;
            writeln!(f, "[At Higher Levels]")?;
            writeln!(f, "{}", higher)?;
        }
        Ok(())
    }
}
