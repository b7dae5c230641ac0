use arena_engine::{Archetype, BattleEvent, CombatantSnapshot};
use crossterm::style::Stylize;

const RULE: &str = "========================================";
const THIN_RULE: &str = "----------------------------------------";

pub fn banner(title: &str) {
    println!("{}", RULE.magenta());
    println!("{}", format!("{:^40}", title).magenta().bold());
    println!("{}", RULE.magenta());
}

pub fn turn_header(turn: u32, name: &str) {
    println!();
    println!("{}", RULE.blue());
    println!("{}", format!("{:^40}", format!("Turn {}", turn + 1)).blue());
    println!("{}", RULE.blue());
    println!("{}'s move!", name);
}

pub fn stats(s: &CombatantSnapshot) {
    println!("{}", THIN_RULE.green());
    println!("{}", format!("  {}'s Stats", s.name).green());
    println!("{}", THIN_RULE.green());
    println!("  Health: {}", s.health.to_string().red());
    println!("  Attack: {}", s.attack.to_string().yellow());
    println!("  Defense: {}", s.defense.to_string().blue());
    if s.special_ready {
        println!("  Special ready? {}", "Yes".green());
    } else {
        println!(
            "  Special ready? {}",
            format!("No ({} turn(s))", s.cooldown).red()
        );
    }
    if s.evasive {
        println!("  {}", "Hidden".cyan());
    }
}

pub fn event(e: &BattleEvent) {
    if let Some(flavor) = e.flavor() {
        match e {
            BattleEvent::Hit {
                archetype: Archetype::Legendary,
                ..
            }
            | BattleEvent::Healed { .. } => println!("{}", flavor.magenta()),
            _ => println!("{}", flavor.yellow()),
        }
    }
    let line = e.to_string();
    match e {
        BattleEvent::Hit { .. } | BattleEvent::Smash { .. } => println!("{}", line.yellow()),
        BattleEvent::Hiding { .. } | BattleEvent::Vanish { .. } | BattleEvent::Dodged { .. } => {
            println!("{}", line.cyan())
        }
        BattleEvent::Healed { .. } => println!("{}", line.magenta()),
        BattleEvent::SpecialNotReady { .. } => println!("{}", line.red()),
        BattleEvent::Attacked { fallback: true, .. } => {
            println!("{}", "Invalid! Attacking anyway.".red())
        }
        BattleEvent::Victory { winner } => {
            println!();
            println!("{}", RULE.green());
            println!("{}", format!("{:^40}", format!("{} wins!", winner)).green().bold());
            println!("{}", RULE.green());
        }
        // Summary lines stay in the report only.
        BattleEvent::Attacked { .. }
        | BattleEvent::SpecialUsed { .. }
        | BattleEvent::BattleStarted { .. }
        | BattleEvent::FirstMover { .. } => {}
    }
}

pub fn report<'a>(entries: impl IntoIterator<Item = &'a str>) {
    println!();
    println!("{}", RULE.blue());
    println!("{}", format!("{:^40}", "BATTLE REPORT").blue());
    println!("{}", RULE.blue());
    for entry in entries {
        println!("{}", format!(" - {}", entry).cyan());
    }
    println!("{}", RULE.blue());
}
