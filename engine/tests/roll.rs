use dragonbot::{parse, Breakdown, Dice, RollReply};

fn reply(expr: &str, seed: u64) -> RollReply {
    let outcome = parse(expr)
        .unwrap()
        .evaluate_detailed(&mut Dice::from_seed(seed));
    RollReply::from_outcome(&outcome)
}

#[test]
fn several_dice_list_rolls_and_sum() {
    for seed in 0..50 {
        let r = reply("3d6+2", seed);
        assert_eq!(r.rolls.len(), 3);
        assert!(r.rolls.iter().all(|v| (1..=6).contains(v)));
        assert_eq!(r.offset, 2);
        assert_eq!(r.total, r.rolls.iter().sum::<i64>() + 2);

        let text = r.to_string();
        let joined = r
            .rolls
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        assert_eq!(text, format!("Rolls: {}\nSum: {}", joined, r.total));
    }
}

#[test]
fn single_die_without_offset_has_no_offset_part() {
    let r = reply("1d20", 7);
    assert_eq!(r.rolls.len(), 1);
    assert!((1..=20).contains(&r.rolls[0]));
    assert_eq!(r.offset, 0);
    assert_eq!(r.to_string(), format!("Roll: {}", r.rolls[0]));
}

#[test]
fn single_die_with_offset_shows_the_sign() {
    let up = reply("1d20+3", 11);
    assert_eq!(
        up.to_string(),
        format!("Roll: {}+3 = {}", up.rolls[0], up.rolls[0] + 3)
    );
    let down = reply("1d20-3", 11);
    assert_eq!(
        down.to_string(),
        format!("Roll: {}-3 = {}", down.rolls[0], down.rolls[0] - 3)
    );
}

#[test]
fn constant_only_reports_the_result() {
    let r = reply("-5", 0);
    assert!(r.rolls.is_empty());
    assert_eq!(r.total, -5);
    assert_eq!(r.to_string(), "Result: -5");
}

#[test]
fn averaged_terms_count_as_offset() {
    let r = reply("1d4+2d6G", 3);
    assert_eq!(r.rolls.len(), 1);
    assert_eq!(r.offset, 8);
}

#[test]
fn subtracted_dice_are_listed_negative() {
    let r = reply("1d6-1d4", 5);
    assert_eq!(r.rolls.len(), 2);
    assert!(r.rolls[0] > 0);
    assert!(r.rolls[1] < 0);
    assert_eq!(r.total, r.rolls[0] + r.rolls[1]);
}

#[test]
fn breakdown_has_three_columns_and_a_total() {
    let outcome = parse("2d6G+A1d20-3")
        .unwrap()
        .evaluate_detailed(&mut Dice::from_seed(42));
    let d20 = outcome.terms[1].value;
    let breakdown = Breakdown::from_outcome(outcome);

    let [values, modifiers, results] = breakdown.columns();
    assert_eq!(values, ["2d6", "1d20", "None"]);
    assert_eq!(modifiers, ["Average", "Advantage", "None"]);
    assert_eq!(results, ["8".to_string(), d20.to_string(), "-3".to_string()]);
    assert_eq!(breakdown.total, 8 + d20 - 3);

    let text = breakdown.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Values | Modifiers | Results");
    assert_eq!(lines[1], format!("{:<6} | {:<9} | {}", "2d6", "Average", 8));
    assert_eq!(lines[2], format!("{:<6} | {:<9} | {}", "1d20", "Advantage", d20));
    assert_eq!(lines[4], format!("Total: {}", breakdown.total));
}
