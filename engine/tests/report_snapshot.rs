use arena_engine::api::{simulate_duel, DuelConfig, Policy};
use arena_engine::{Archetype, Side};

#[test]
fn legend_vs_caster_report() {
    let cfg = DuelConfig {
        policy: Policy::SpecialWhenReady,
        ..DuelConfig::new(Archetype::Legendary, Archetype::Caster)
    };
    let res = simulate_duel(cfg).unwrap();
    assert_eq!(res.winner_side, Some(Side::PlayerOne));
    assert_eq!(res.turns, 15);
    assert_eq!(res.player_one.health, 150);
    insta::assert_snapshot!(res.log.join("\n"), @r"
Battle starts in Fire Arena!
Player selected Draco the Legend
Draco the Legend uses special on Enemy Caster
Enemy Caster uses special on Draco the Legend
Draco the Legend attacks Enemy Caster
Enemy Caster dodged attack
Enemy Caster attacks Draco the Legend
Draco the Legend attacks Enemy Caster
Enemy Caster attacks Draco the Legend
Draco the Legend uses special on Enemy Caster
Enemy Caster uses special on Draco the Legend
Draco the Legend attacks Enemy Caster
Enemy Caster dodged attack
Enemy Caster attacks Draco the Legend
Draco the Legend attacks Enemy Caster
Enemy Caster attacks Draco the Legend
Draco the Legend uses special on Enemy Caster
Enemy Caster uses special on Draco the Legend
Draco the Legend attacks Enemy Caster
Enemy Caster dodged attack
Draco the Legend wins the battle!
");
}
