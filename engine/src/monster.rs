//! Typed projection of 5e.tools bestiary JSON.
//!
//! Only the fields the bot shows are modelled. Entries that do not fit the
//! model are skipped when a bestiary is loaded instead of failing the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ability_mod;
use crate::content::builtin_bestiaries;
use crate::dice::{self, DiceExpression};
use crate::error::{ContentKind, LookupError, ParseError};

pub const IMAGE_HOST: &str = "https://5e.tools/img";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Size {
    One(String),
    Many(Vec<String>),
}

impl Size {
    fn letter(&self) -> Option<&str> {
        match self {
            Size::One(s) => Some(s.as_str()),
            Size::Many(v) => v.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatureType {
    Plain(String),
    Tagged {
        #[serde(rename = "type")]
        kind: TypeName,
        #[serde(default)]
        tags: Vec<TypeTag>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeName {
    Plain(String),
    Choice { choose: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeTag {
    Plain(String),
    Prefixed {
        tag: String,
        #[serde(default)]
        prefix: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlignmentEntry {
    Letter(String),
    Weighted { alignment: Vec<String> },
    Special { special: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChallengeRating {
    Plain(String),
    Detailed { cr: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArmorClass {
    Plain(i32),
    Detailed {
        ac: i32,
        #[serde(default)]
        from: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitPoints {
    #[serde(default)]
    pub average: Option<i32>,
    #[serde(default)]
    pub formula: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(rename = "type", default)]
    pub creature_type: Option<CreatureType>,
    #[serde(default)]
    pub alignment: Vec<AlignmentEntry>,
    #[serde(default)]
    pub ac: Vec<ArmorClass>,
    #[serde(default)]
    pub hp: Option<HitPoints>,
    #[serde(default)]
    pub cr: Option<ChallengeRating>,
    #[serde(rename = "str", default)]
    pub strength: Option<i32>,
    #[serde(rename = "dex", default)]
    pub dexterity: Option<i32>,
    #[serde(rename = "con", default)]
    pub constitution: Option<i32>,
    #[serde(rename = "int", default)]
    pub intelligence: Option<i32>,
    #[serde(rename = "wis", default)]
    pub wisdom: Option<i32>,
    #[serde(rename = "cha", default)]
    pub charisma: Option<i32>,
}

impl Monster {
    pub fn size_name(&self) -> &str {
        let Some(letter) = self.size.as_ref().and_then(Size::letter) else {
            return "Unknown";
        };
        match letter {
            "T" => "Tiny",
            "S" => "Small",
            "M" => "Medium",
            "L" => "Large",
            "H" => "Huge",
            "G" => "Gargantuan",
            other => other,
        }
    }

    pub fn type_text(&self) -> String {
        match &self.creature_type {
            None => "Creature".to_string(),
            Some(CreatureType::Plain(kind)) => capitalize_first(kind),
            Some(CreatureType::Tagged { kind, tags }) => {
                let mut text = match kind {
                    TypeName::Plain(k) => capitalize_first(k),
                    TypeName::Choice { choose } => choose
                        .iter()
                        .map(|k| capitalize_first(k))
                        .collect::<Vec<_>>()
                        .join(" or "),
                };
                if !tags.is_empty() {
                    let tags = tags
                        .iter()
                        .map(|t| match t {
                            TypeTag::Plain(tag) => capitalize_first(tag),
                            TypeTag::Prefixed { tag, prefix: Some(prefix) } => {
                                format!("{} {}", capitalize_first(prefix), tag)
                            }
                            TypeTag::Prefixed { tag, prefix: None } => capitalize_first(tag),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    text.push_str(&format!(" ({})", tags));
                }
                text
            }
        }
    }

    pub fn alignment_text(&self) -> String {
        let letters: Vec<&str> = self
            .alignment
            .iter()
            .flat_map(|a| match a {
                AlignmentEntry::Letter(l) => vec![l.as_str()],
                AlignmentEntry::Weighted { alignment } => {
                    alignment.iter().map(String::as_str).collect()
                }
                AlignmentEntry::Special { .. } => vec![],
            })
            .collect();

        if letters.is_empty() {
            let special = self.alignment.iter().find_map(|a| match a {
                AlignmentEntry::Special { special } => Some(special.clone()),
                _ => None,
            });
            return special.unwrap_or_else(|| "Unaligned".to_string());
        }

        if letters.len() > 2 {
            let mix = letters.concat();
            return ['G', 'E', 'L', 'C', 'N']
                .into_iter()
                .find(|c| !mix.contains(*c))
                .map(|c| format!("Any Non-{} Alignment", alignment_word(c)))
                .unwrap_or_else(|| "Any Alignment".to_string());
        }

        letters
            .iter()
            .filter_map(|l| l.chars().next())
            .map(alignment_word)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `"Small Humanoid (Goblinoid), Neutral Evil"`.
    pub fn summary_line(&self) -> String {
        format!(
            "{} {}, {}",
            self.size_name(),
            self.type_text(),
            self.alignment_text()
        )
    }

    pub fn challenge_rating(&self) -> Option<&str> {
        self.cr.as_ref().map(|cr| match cr {
            ChallengeRating::Plain(s) => s.as_str(),
            ChallengeRating::Detailed { cr } => cr.as_str(),
        })
    }

    pub fn xp(&self) -> Option<u32> {
        self.challenge_rating().and_then(xp_for_cr)
    }

    pub fn armor_class(&self) -> Option<i32> {
        self.ac.first().map(|ac| match ac {
            ArmorClass::Plain(v) => *v,
            ArmorClass::Detailed { ac, .. } => *ac,
        })
    }

    /// Hit dice from the hit point formula, e.g. `7d10 + 21`.
    pub fn hit_dice(&self) -> Result<Option<DiceExpression>, ParseError> {
        self.hp
            .as_ref()
            .and_then(|hp| hp.formula.as_deref())
            .map(dice::parse)
            .transpose()
    }

    /// `(label, score, modifier)` for each ability the entry lists.
    pub fn abilities(&self) -> Vec<(&'static str, i32, i32)> {
        [
            ("STR", self.strength),
            ("DEX", self.dexterity),
            ("CON", self.constitution),
            ("INT", self.intelligence),
            ("WIS", self.wisdom),
            ("CHA", self.charisma),
        ]
        .into_iter()
        .filter_map(|(label, score)| score.map(|s| (label, s, ability_mod(s))))
        .collect()
    }

    pub fn image_url(&self) -> String {
        format!(
            "{}/{}/{}.png",
            IMAGE_HOST,
            self.source,
            self.name.replace(' ', "%20")
        )
    }
}

/// Experience points awarded for a challenge rating.
pub fn xp_for_cr(cr: &str) -> Option<u32> {
    let xp = match cr {
        "0" => 10,
        "1/8" => 25,
        "1/4" => 50,
        "1/2" => 100,
        "1" => 200,
        "2" => 450,
        "3" => 700,
        "4" => 1100,
        "5" => 1800,
        "6" => 2300,
        "7" => 2900,
        "8" => 3900,
        "9" => 5000,
        "10" => 5900,
        "11" => 7200,
        "12" => 8400,
        "13" => 10000,
        "14" => 11500,
        "15" => 13000,
        "16" => 15000,
        "17" => 18000,
        "18" => 20000,
        "19" => 22000,
        "20" => 25000,
        "21" => 33000,
        "22" => 41000,
        "23" => 50000,
        "24" => 62000,
        "25" => 75000,
        "26" => 90000,
        "27" => 105000,
        "28" => 120000,
        "29" => 135000,
        "30" => 155000,
        _ => return None,
    };
    Some(xp)
}

fn alignment_word(c: char) -> &'static str {
    match c {
        'N' => "Neutral",
        'L' => "Lawful",
        'G' => "Good",
        'C' => "Chaotic",
        'E' => "Evil",
        'A' => "Any",
        'U' => "Unaligned",
        _ => "Unknown",
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Exact (case-insensitive) name match scores 2, substring match 1.
pub fn match_score(name: &str, fragment: &str) -> u8 {
    let name = name.to_lowercase();
    let fragment = fragment.to_lowercase();
    if name == fragment {
        2
    } else if name.contains(&fragment) {
        1
    } else {
        0
    }
}

#[derive(Deserialize)]
struct BestiaryFile {
    #[serde(default)]
    monster: Vec<serde_json::Value>,
}

/// In-memory monster index built from one or more bestiary files.
#[derive(Debug, Clone, Default)]
pub struct Bestiary {
    monsters: Vec<Monster>,
}

impl Bestiary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self> {
        let mut bestiary = Self::new();
        let mut sources: Vec<_> = builtin_bestiaries().into_iter().collect();
        sources.sort_by_key(|(id, _)| *id);
        for (id, text) in sources {
            bestiary
                .extend_from_json(text)
                .with_context(|| format!("failed to parse builtin bestiary: {}", id))?;
        }
        Ok(bestiary)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let mut bestiary = Self::new();
        bestiary.extend_from_json(text)?;
        Ok(bestiary)
    }

    /// Add every monster in `text`; returns how many were projected.
    pub fn extend_from_json(&mut self, text: &str) -> Result<usize> {
        let file: BestiaryFile =
            serde_json::from_str(text).context("bestiary is not a monster list")?;
        let mut added = 0;
        for raw in file.monster {
            match serde_json::from_value::<Monster>(raw) {
                Ok(monster) => {
                    self.monsters.push(monster);
                    added += 1;
                }
                Err(e) => warn!("skipping bestiary entry: {}", e),
            }
        }
        debug!(added, total = self.monsters.len(), "bestiary extended");
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Best match for `fragment`; exact matches win, then the first partial match.
    pub fn find(&self, fragment: &str) -> Result<&Monster, LookupError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(LookupError::not_found(ContentKind::Monster, fragment));
        }
        let mut best: Option<(&Monster, u8)> = None;
        for monster in &self.monsters {
            let score = match_score(&monster.name, fragment);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((monster, score));
            }
        }
        best.map(|(m, _)| m)
            .ok_or_else(|| LookupError::not_found(ContentKind::Monster, fragment))
    }
}
