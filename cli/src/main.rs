use std::{fs, path::Path, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dragonbot::cache::ReferenceCache;
use dragonbot::config::BotConfig;
use dragonbot::monster::{Bestiary, Monster};
use dragonbot::spell::{Spell, SpellCard};
use dragonbot::weapon::{weapon_bonuses, WeaponInput};
use dragonbot::{chunk, Breakdown, ContentKind, Dice, DiceExpression, RollOutcome, RollReply};
use encoding_rs::Encoding;
use tracing::{debug, info, level_filters::LevelFilter, warn};

#[derive(Subcommand)]
enum Cmd {
    /// Roll a dice expression, e.g. `3d6+2` or `A1d20-1`
    Roll {
        #[arg(allow_hyphen_values = true)]
        expr: String,
        /// RNG seed for a reproducible roll (OS randomness otherwise)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Roll an expression and show the per-term breakdown
    Droll {
        #[arg(allow_hyphen_values = true)]
        expr: String,
        /// RNG seed for a reproducible roll (OS randomness otherwise)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Pack a text file (one fragment per line) into display blocks, as JSON
    Chunk {
        file: PathBuf,
        /// Block capacity in characters
        #[arg(long)]
        capacity: Option<usize>,
        /// Fragments shorter than this form enumeration runs
        #[arg(long)]
        threshold: Option<usize>,
    },
    /// Show a spell from a saved page text
    Spell {
        name: String,
        /// Inner text of the spell page
        #[arg(long)]
        page: Option<PathBuf>,
    },
    /// Look up a monster by (partial) name
    Monster {
        name: String,
        /// Bestiary JSON file(s); overrides the config
        #[arg(long)]
        bestiary: Vec<PathBuf>,
    },
    /// Attack and damage bonus for a weapon
    Weapon {
        /// Damage dice, e.g. 1d8
        dice: String,
        /// Dexterity modifier
        #[arg(allow_hyphen_values = true)]
        dex: i32,
        /// Strength modifier
        #[arg(allow_hyphen_values = true)]
        str_: i32,
        #[arg(long)]
        finesse: bool,
        #[arg(long)]
        ranged: bool,
        /// Proficiency bonus, if proficient
        #[arg(long)]
        proficiency: Option<i32>,
    },
}

#[derive(Parser)]
#[command(name = "dragonbot")]
#[command(about = "Dice and reference lookups for tabletop sessions")]
struct Cli {
    /// YAML or JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the configured cache directory
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cfg = BotConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.cache_dir {
        cfg.cache_dir = dir;
    }

    match cli.cmd {
        Cmd::Roll { expr, seed } => {
            let outcome = roll(&expr, seed)?;
            println!("{}", RollReply::from_outcome(&outcome));
        }
        Cmd::Droll { expr, seed } => {
            let outcome = roll(&expr, seed)?;
            println!("{}", Breakdown::from_outcome(outcome));
        }
        Cmd::Chunk {
            file,
            capacity,
            threshold,
        } => {
            let mut options = cfg.chunk_options();
            if let Some(c) = capacity {
                options.capacity = c;
            }
            if let Some(t) = threshold {
                options.array_threshold = t;
            }
            let text = read_text_auto(&file)?;
            let blocks = chunk(text.lines().map(str::trim), &options);
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        Cmd::Spell { name, page } => {
            let card = spell_card(&cfg, &name, page.as_deref())?;
            print!("{}", card);
        }
        Cmd::Monster { name, bestiary } => {
            let paths = if bestiary.is_empty() {
                cfg.bestiary.clone()
            } else {
                bestiary
            };
            let monster = lookup_monster(&cfg, &name, &paths)?;
            print_monster(&monster);
        }
        Cmd::Weapon {
            dice,
            dex,
            str_,
            finesse,
            ranged,
            proficiency,
        } => {
            let bonuses = weapon_bonuses(&WeaponInput {
                dice,
                dex_mod: dex,
                str_mod: str_,
                finesse,
                ranged,
                proficiency,
            })?;
            println!("{}", bonuses);
        }
    }
    Ok(())
}

fn roll(expr: &str, seed: Option<u64>) -> anyhow::Result<RollOutcome> {
    let parsed: DiceExpression = expr.parse().inspect_err(|e| {
        debug!(expr, "rejected dice expression: {}", e);
    })?;
    let outcome = match seed {
        Some(seed) => parsed.evaluate_detailed(&mut Dice::from_seed(seed)),
        None => parsed.evaluate_detailed(&mut Dice::secure()),
    };
    Ok(outcome)
}

fn spell_card(cfg: &BotConfig, name: &str, page: Option<&Path>) -> anyhow::Result<SpellCard> {
    let cache = ReferenceCache::open(&cfg.cache_dir)?;
    if let Some(card) = cache.load::<SpellCard>(ContentKind::Spell, name)? {
        return Ok(card);
    }
    let page = page.with_context(|| format!("spell '{}' is not cached; pass --page", name))?;
    let text = read_text_auto(page)?;
    let card = Spell::from_page_text(name, &text)?.card(&cfg.chunk_options());
    if let Err(e) = cache.store(ContentKind::Spell, name, &card) {
        warn!("could not cache spell '{}': {:#}", name, e);
    }
    Ok(card)
}

fn lookup_monster(cfg: &BotConfig, name: &str, paths: &[PathBuf]) -> anyhow::Result<Monster> {
    let cache = ReferenceCache::open(&cfg.cache_dir)?;
    if let Some(monster) = cache.load::<Monster>(ContentKind::Monster, name)? {
        return Ok(monster);
    }

    let bestiary = if paths.is_empty() {
        Bestiary::builtin()?
    } else {
        let mut bestiary = Bestiary::new();
        for path in paths {
            let text = read_text_auto(path)?;
            let added = bestiary
                .extend_from_json(&text)
                .with_context(|| format!("failed to load bestiary: {}", path.display()))?;
            info!(path = %path.display(), added, "bestiary loaded");
        }
        bestiary
    };

    let found = bestiary.find(name)?.clone();
    if let Err(e) = cache.store(ContentKind::Monster, &found.name, &found) {
        warn!("could not cache monster '{}': {:#}", found.name, e);
    }
    Ok(found)
}

fn print_monster(monster: &Monster) {
    println!("{}", monster.name);
    println!("{}", monster.summary_line());
    if let Some(ac) = monster.armor_class() {
        println!("Armor Class: {}", ac);
    }
    if let Some(hp) = &monster.hp {
        match (hp.average, hp.formula.as_deref()) {
            (Some(avg), Some(formula)) => println!("Hit Points: {} ({})", avg, formula),
            (Some(avg), None) => println!("Hit Points: {}", avg),
            (None, Some(formula)) => println!("Hit Points: {}", formula),
            (None, None) => {}
        }
    }
    let abilities = monster
        .abilities()
        .iter()
        .map(|(label, score, modifier)| format!("{} {} ({:+})", label, score, modifier))
        .collect::<Vec<_>>();
    if !abilities.is_empty() {
        println!("{}", abilities.join("  "));
    }
    if let Some(cr) = monster.challenge_rating() {
        match monster.xp() {
            Some(xp) => println!("Challenge: {} ({} XP)", cr, xp),
            None => println!("Challenge: {}", cr),
        }
    }
    println!("{}", monster.image_url());
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}
