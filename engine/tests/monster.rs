use dragonbot::ability_mod;
use dragonbot::monster::{match_score, xp_for_cr, Bestiary};
use dragonbot::{ContentKind, LookupError};

fn srd() -> Bestiary {
    Bestiary::builtin().unwrap()
}

#[test]
fn ability_mod_rounds_down() {
    assert_eq!(ability_mod(8), -1);
    assert_eq!(ability_mod(9), -1);
    assert_eq!(ability_mod(10), 0);
    assert_eq!(ability_mod(11), 0);
    assert_eq!(ability_mod(12), 1);
}

#[test]
fn builtin_bestiary_loads() {
    assert_eq!(srd().len(), 5);
}

#[test]
fn exact_match_beats_partial() {
    let b = srd();
    assert_eq!(b.find("goblin").unwrap().name, "Goblin");
    assert_eq!(b.find("GOBLIN").unwrap().name, "Goblin");
    assert_eq!(b.find("boss").unwrap().name, "Goblin Boss");
    assert_eq!(b.find("red").unwrap().name, "Adult Red Dragon");
}

#[test]
fn unknown_monster_is_not_found() {
    let b = srd();
    assert_eq!(
        b.find("beholder").unwrap_err(),
        LookupError::not_found(ContentKind::Monster, "beholder")
    );
    assert!(b.find("   ").is_err());
}

#[test]
fn match_scores() {
    assert_eq!(match_score("Goblin", "goblin"), 2);
    assert_eq!(match_score("Goblin Boss", "goblin"), 1);
    assert_eq!(match_score("Owlbear", "goblin"), 0);
}

#[test]
fn summary_lines() {
    let b = srd();
    assert_eq!(
        b.find("goblin").unwrap().summary_line(),
        "Small Humanoid (Goblinoid), Neutral Evil"
    );
    assert_eq!(
        b.find("owlbear").unwrap().summary_line(),
        "Large Monstrosity, Unaligned"
    );
    assert_eq!(
        b.find("bandit").unwrap().summary_line(),
        "Medium Humanoid (Any race), Any Non-Lawful Alignment"
    );
    assert_eq!(
        b.find("adult red dragon").unwrap().summary_line(),
        "Huge Dragon, Chaotic Evil"
    );
}

#[test]
fn challenge_rating_and_xp() {
    let b = srd();
    let goblin = b.find("goblin").unwrap();
    assert_eq!(goblin.challenge_rating(), Some("1/4"));
    assert_eq!(goblin.xp(), Some(50));
    assert_eq!(b.find("dragon").unwrap().xp(), Some(18000));
    assert_eq!(xp_for_cr("0"), Some(10));
    assert_eq!(xp_for_cr("18"), Some(20000));
    assert_eq!(xp_for_cr("30"), Some(155000));
    assert_eq!(xp_for_cr("31"), None);
}

#[test]
fn hit_dice_come_from_the_formula() {
    let b = srd();
    let owlbear = b.find("owlbear").unwrap();
    let hit_dice = owlbear.hit_dice().unwrap().unwrap();
    assert_eq!(hit_dice.to_string(), "7d10+21");
    assert_eq!(hit_dice.bounds(), (28, 91));
    assert_eq!(owlbear.armor_class(), Some(13));
}

#[test]
fn abilities_carry_modifiers() {
    let b = srd();
    let abilities = b.find("goblin").unwrap().abilities();
    assert_eq!(abilities[0], ("STR", 8, -1));
    assert_eq!(abilities[1], ("DEX", 14, 2));
    assert_eq!(abilities.len(), 6);
}

#[test]
fn image_url_escapes_spaces() {
    let b = srd();
    assert_eq!(
        b.find("goblin boss").unwrap().image_url(),
        "https://5e.tools/img/MM/Goblin%20Boss.png"
    );
}

#[test]
fn entries_that_do_not_fit_are_skipped() {
    let json = r#"{"monster": [
        {"name": "Plain", "size": "M", "type": "beast", "alignment": ["A"]},
        {"size": "M"},
        {"name": "Special", "alignment": [{"special": "as its creator"}]},
        {"name": "Weighted", "type": {"type": {"choose": ["fiend", "undead"]}}, "alignment": [{"alignment": ["L", "E"], "chance": 50}]}
    ]}"#;
    let b = Bestiary::from_json(json).unwrap();
    assert_eq!(b.len(), 3);
    assert_eq!(b.find("plain").unwrap().summary_line(), "Medium Beast, Any");
    assert_eq!(b.find("special").unwrap().alignment_text(), "as its creator");
    let weighted = b.find("weighted").unwrap();
    assert_eq!(weighted.type_text(), "Fiend or Undead");
    assert_eq!(weighted.alignment_text(), "Lawful Evil");
}

#[test]
fn non_bestiary_json_is_an_error() {
    assert!(Bestiary::from_json("not json").is_err());
}
