use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dice::{self, DiceExpression};
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Str,
    Dex,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponInput {
    pub dice: String,
    pub dex_mod: i32,
    pub str_mod: i32,
    #[serde(default)]
    pub finesse: bool,
    #[serde(default)]
    pub ranged: bool,
    /// Proficiency bonus, when the wielder is proficient.
    #[serde(default)]
    pub proficiency: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeaponBonuses {
    pub dice: DiceExpression,
    pub ability: Ability,
    pub attack: i32,
    pub damage: i32,
}

/// Choose the better of STR or DEX; ties go to STR.
pub fn best_of_str_dex(str_mod: i32, dex_mod: i32) -> (Ability, i32) {
    if dex_mod > str_mod {
        (Ability::Dex, dex_mod)
    } else {
        (Ability::Str, str_mod)
    }
}

/// Attack and damage bonus for a weapon: ranged uses DEX, finesse the better
/// of STR/DEX, anything else STR.
pub fn weapon_bonuses(input: &WeaponInput) -> Result<WeaponBonuses, ParseError> {
    let dice = dice::parse(&input.dice)?;
    let (ability, ability_mod) = if input.ranged {
        (Ability::Dex, input.dex_mod)
    } else if input.finesse {
        best_of_str_dex(input.str_mod, input.dex_mod)
    } else {
        (Ability::Str, input.str_mod)
    };
    Ok(WeaponBonuses {
        dice,
        ability,
        attack: ability_mod + input.proficiency.unwrap_or(0),
        damage: ability_mod,
    })
}

pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        format!("-{}", modifier.abs())
    }
}

impl fmt::Display for WeaponBonuses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ATK BONUS: {}", format_modifier(self.attack))?;
        write!(f, "Damage/Type: {}", self.dice)?;
        if self.damage != 0 {
            write!(f, "{}", format_modifier(self.damage))?;
        }
        Ok(())
    }
}
