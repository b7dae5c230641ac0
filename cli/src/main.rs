mod render;

use anyhow::{bail, Context};
use arena_engine::api::{
    load_builtin_duel, parse_duel_config, simulate_duel, ConfigFormat, DuelConfig, DuelResult,
};
use arena_engine::content::builtin_duels;
use arena_engine::{
    Action, ActionSource, Arena, ArenaKind, Archetype, Battle, Combatant, Side, TurnReport,
    TurnView,
};
use clap::{Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use std::io::{self, BufRead, Write};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Copy, Clone, ValueEnum)]
enum ArenaArg {
    Fire,
    Ice,
    Jungle,
}

#[derive(Subcommand)]
enum Cmd {
    /// Play a duel interactively on stdin
    Play {
        /// Arena the fight takes place in
        #[arg(long, value_enum, default_value_t = ArenaArg::Fire)]
        arena: ArenaArg,
        /// Override the arena's display name
        #[arg(long)]
        arena_name: Option<String>,
    },
    /// Run a scripted duel from a JSON/YAML config or a built-in preset
    Duel {
        /// Path to a duel config (.json, .yaml, .yml)
        #[arg(long, conflicts_with = "preset")]
        file: Option<PathBuf>,
        /// Built-in preset id (see `presets`)
        #[arg(long)]
        preset: Option<String>,
        /// Print the result as JSON instead of a report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Serialize the base stats of every archetype to JSON (stdout)
    Roster {
        /// Pretty-print JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
    /// List built-in duel presets
    Presets,
}

#[derive(Parser)]
#[command(name = "arena-cli")]
#[command(about = "Arena duel CLI harness")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_kind(a: ArenaArg) -> ArenaKind {
    match a {
        ArenaArg::Fire => ArenaKind::Fire,
        ArenaArg::Ice => ArenaKind::Ice,
        ArenaArg::Jungle => ArenaKind::Jungle,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    arena_engine::logging::init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Play { arena, arena_name } => {
            let stdin = io::stdin();
            play(stdin.lock(), to_kind(arena), arena_name)?;
        }
        Cmd::Duel { file, preset, json } => {
            let cfg = match (file, preset) {
                (Some(path), _) => load_config_file(&path)?,
                (None, Some(id)) => load_builtin_duel(&id)?,
                (None, None) => bail!("pass either --file or --preset"),
            };
            let res = simulate_duel(cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                print_result(&res);
            }
        }
        Cmd::Roster { pretty } => {
            let roster: Vec<_> = Archetype::ALL
                .iter()
                .map(|&a| Combatant::new(a.default_name(Side::PlayerOne), a).snapshot())
                .collect();
            if pretty {
                println!("{}", serde_json::to_string_pretty(&roster)?);
            } else {
                println!("{}", serde_json::to_string(&roster)?);
            }
        }
        Cmd::Presets => {
            for id in builtin_duels().keys() {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

/// Read a config file, stripping a UTF-8/UTF-16 BOM if one is present.
fn load_config_file(path: &std::path::Path) -> anyhow::Result<DuelConfig> {
    let format = ConfigFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "loading duel config");
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        debug!(encoding = enc.name(), "stripping BOM");
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        cow.into_owned()
    } else {
        String::from_utf8(bytes).with_context(|| format!("{} is not UTF-8", path.display()))?
    };
    parse_duel_config(&text, format).with_context(|| format!("invalid duel config: {}", path.display()))
}

fn print_result(res: &DuelResult) {
    render::stats(&res.player_one);
    render::stats(&res.player_two);
    match &res.winner {
        Some(name) => println!("{} wins after {} turns", name, res.turns),
        None => println!("no winner after {} turns", res.turns),
    }
    render::report(res.log.iter().map(String::as_str));
}

/// Reads one integer choice per line. Unparseable input and EOF come back as 0,
/// which every menu treats as its fallback.
struct Console<R> {
    input: R,
}

impl<R: BufRead> Console<R> {
    fn ask(&mut self, prompt: &str) -> i64 {
        print!("{}", prompt);
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => 0,
            Ok(_) => line.trim().parse().unwrap_or(0),
        }
    }

    fn pick_archetype(&mut self, heading: &str) -> Archetype {
        println!("{}", heading);
        println!("  [1] Warrior");
        println!("  [2] Caster");
        println!("  [3] Legendary");
        Archetype::from_choice(self.ask("Enter choice: "))
    }
}

impl<R: BufRead> ActionSource for Console<R> {
    fn next_action(&mut self, view: &TurnView<'_>) -> i64 {
        render::turn_header(view.turn, view.actor.name());
        println!("Options:");
        println!("  [{}] Attack", Action::ATTACK_CODE);
        println!("  [{}] Use Special", Action::SPECIAL_CODE);
        self.ask("Choose: ")
    }

    fn observe(&mut self, report: &TurnReport) {
        for e in &report.events {
            render::event(e);
        }
        if report.winner.is_none() {
            for snapshot in &report.after {
                render::stats(snapshot);
            }
        }
    }
}

fn play<R: BufRead>(input: R, kind: ArenaKind, arena_name: Option<String>) -> anyhow::Result<()> {
    let mut console = Console { input };

    render::banner("Character Selection");
    let one = console.pick_archetype("Choose your character:");
    println!();
    let two = console.pick_archetype("Choose opponent:");

    let mut arena = match arena_name {
        Some(name) => Arena::new(name, kind),
        None => Arena::of_kind(kind),
    };
    arena.register(Combatant::new(one.default_name(Side::PlayerOne), one));
    arena.register(Combatant::new(two.default_name(Side::PlayerTwo), two));

    println!();
    render::banner("Welcome to Fantasy Arena");
    println!("Select your character:");
    let [one, two] = arena.fighters() else {
        bail!("arena should hold two fighters");
    };
    println!("  [1] {}", one);
    println!("  [2] {}", two);
    println!("Combined attack: {}", one.combo_attack(two));
    if one.stat_total() == two.stat_total() {
        println!("An even match!");
    }
    let first = Side::from_choice(console.ask("Enter 1 or 2: "));

    let mut battle = Battle::new(arena, first)?;
    println!("\nBattle starts in {}!", battle.arena_name());
    render::stats(&battle.snapshot(Side::PlayerOne));
    render::stats(&battle.snapshot(Side::PlayerTwo));

    battle.run(&mut console);

    render::stats(&battle.snapshot(Side::PlayerOne));
    render::stats(&battle.snapshot(Side::PlayerTwo));
    render::report(battle.log().entries());
    Ok(())
}
