use dragonbot::weapon::{best_of_str_dex, format_modifier, weapon_bonuses, Ability, WeaponInput};
use dragonbot::ParseError;

fn input(dice: &str, dex_mod: i32, str_mod: i32) -> WeaponInput {
    WeaponInput {
        dice: dice.to_string(),
        dex_mod,
        str_mod,
        ..Default::default()
    }
}

#[test]
fn melee_uses_strength() {
    let b = weapon_bonuses(&input("1d8", 4, 3)).unwrap();
    assert_eq!(b.ability, Ability::Str);
    assert_eq!((b.attack, b.damage), (3, 3));
}

#[test]
fn proficiency_adds_to_attack_only() {
    let b = weapon_bonuses(&WeaponInput {
        proficiency: Some(2),
        ..input("1d8", 1, 3)
    })
    .unwrap();
    assert_eq!((b.attack, b.damage), (5, 3));
    assert_eq!(b.to_string(), "ATK BONUS: +5\nDamage/Type: 1d8+3");
}

#[test]
fn finesse_takes_the_better_ability() {
    let finesse = |dex, str_| {
        weapon_bonuses(&WeaponInput {
            finesse: true,
            ..input("1d6", dex, str_)
        })
        .unwrap()
    };
    assert_eq!(finesse(4, 1).ability, Ability::Dex);
    assert_eq!(finesse(1, 4).ability, Ability::Str);
    assert_eq!(finesse(2, 2).ability, Ability::Str);
}

#[test]
fn ranged_always_uses_dexterity() {
    let b = weapon_bonuses(&WeaponInput {
        ranged: true,
        ..input("1d8", 1, 4)
    })
    .unwrap();
    assert_eq!(b.ability, Ability::Dex);
    assert_eq!(b.damage, 1);
}

#[test]
fn zero_and_negative_damage_bonus_rendering() {
    assert_eq!(
        weapon_bonuses(&input("1d4", 0, 0)).unwrap().to_string(),
        "ATK BONUS: +0\nDamage/Type: 1d4"
    );
    assert_eq!(
        weapon_bonuses(&input("1d6", 0, -1)).unwrap().to_string(),
        "ATK BONUS: -1\nDamage/Type: 1d6-1"
    );
}

#[test]
fn bad_dice_are_rejected() {
    assert_eq!(weapon_bonuses(&input("1dd8", 0, 0)), Err(ParseError::Malformed));
}

#[test]
fn helpers() {
    assert_eq!(best_of_str_dex(1, 3), (Ability::Dex, 3));
    assert_eq!(format_modifier(0), "+0");
    assert_eq!(format_modifier(-2), "-2");
}
