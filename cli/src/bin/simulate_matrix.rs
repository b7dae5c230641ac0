use arena_engine::api::{simulate_matrix, MatrixRow, Policy};
use arena_engine::{Archetype, ArenaKind, Side};
use clap::Parser;

#[derive(Parser)]
#[command(name = "simulate-matrix")]
#[command(about = "Run every archetype pairing in every arena under one policy")]
struct Args {
    /// Policy: attack | special
    #[arg(long, default_value = "attack")]
    policy: String,

    /// Safety cap on turns per duel
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Only print rows for this arena: fire | ice | jungle
    #[arg(long)]
    arena: Option<String>,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn to_policy(s: &str) -> Policy {
    match s.to_lowercase().as_str() {
        "special" | "special_when_ready" => Policy::SpecialWhenReady,
        _ => Policy::AlwaysAttack,
    }
}

fn to_arena(s: &str) -> anyhow::Result<ArenaKind> {
    match s.to_lowercase().as_str() {
        "fire" => Ok(ArenaKind::Fire),
        "ice" => Ok(ArenaKind::Ice),
        "jungle" => Ok(ArenaKind::Jungle),
        _ => anyhow::bail!("unknown arena '{}', expected fire | ice | jungle", s),
    }
}

fn label(a: Archetype) -> &'static str {
    match a {
        Archetype::Warrior => "warrior",
        Archetype::Caster => "caster",
        Archetype::Legendary => "legendary",
    }
}

fn describe(row: &MatrixRow) -> String {
    match row.winner_side {
        Some(Side::PlayerOne) => format!("{} (p1)", label(row.player_one)),
        Some(Side::PlayerTwo) => format!("{} (p2)", label(row.player_two)),
        None => "stalemate".to_string(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    arena_engine::logging::init_tracing(args.verbose);

    if args.max_turns == 0 {
        anyhow::bail!("--max-turns must be at least 1");
    }
    let only = args.arena.as_deref().map(to_arena).transpose()?;
    let policy = to_policy(&args.policy);
    let summary = simulate_matrix(policy, args.max_turns)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("simulate-matrix results");
    println!("-----------------------");
    println!("policy:             {:?}", summary.policy);
    println!("duels:              {}", summary.duels);
    println!("unfinished:         {}", summary.unfinished);
    println!();
    println!(
        "{:<8} {:<10} {:<10} {:<16} {:>5} {:>6} {:>6}",
        "arena", "p1", "p2", "winner", "turns", "p1 hp", "p2 hp"
    );
    for row in summary
        .rows
        .iter()
        .filter(|r| only.map_or(true, |k| r.arena == k))
    {
        println!(
            "{:<8} {:<10} {:<10} {:<16} {:>5} {:>6} {:>6}",
            format!("{:?}", row.arena).to_lowercase(),
            label(row.player_one),
            label(row.player_two),
            describe(row),
            row.turns,
            row.player_one_hp_end,
            row.player_two_hp_end
        );
    }
    println!();
    for (archetype, wins) in &summary.wins {
        println!("{:<19} {}", format!("{} wins:", label(*archetype)), wins);
    }

    Ok(())
}
