use arena_engine::api::{
    load_builtin_duel, load_duel_config, parse_duel_config, simulate_duel, simulate_matrix,
    ConfigError, ConfigFormat, DuelConfig, Policy,
};
use arena_engine::content::builtin_duels;
use arena_engine::{Archetype, ArenaKind, Side};

#[test]
fn default_config_runs_fire_warriors() {
    let res = simulate_duel(DuelConfig::new(Archetype::Warrior, Archetype::Warrior)).unwrap();
    assert!(res.finished);
    assert_eq!(res.winner.as_deref(), Some("Bob the Warrior"));
    assert_eq!(res.winner_side, Some(Side::PlayerOne));
    assert_eq!(res.turns, 17);
    assert_eq!(res.arena, "Fire Arena");
    assert_eq!(res.player_two.health, 0);
    assert_eq!(res.player_one.attack, 22);
}

#[test]
fn scripted_actions_are_consumed_in_turn_order() {
    let cfg = DuelConfig {
        actions: vec![2, 9],
        max_turns: 2,
        ..DuelConfig::new(Archetype::Warrior, Archetype::Caster)
    };
    let res = simulate_duel(cfg).unwrap();
    assert!(!res.finished);
    assert_eq!(res.winner, None);
    assert_eq!(
        res.log[2..],
        [
            "Bob the Warrior uses special on Enemy Caster",
            "Enemy Caster attacks (default) Bob the Warrior",
        ]
    );
    // Smash for 44 through 10 defense.
    assert_eq!(res.player_two.health, 66);
}

#[test]
fn builtin_presets_all_parse_and_finish() {
    for id in builtin_duels().keys() {
        let cfg = load_builtin_duel(id).unwrap();
        let res = simulate_duel(cfg).unwrap();
        assert!(res.finished, "preset {id} did not finish");
    }
}

#[test]
fn jungle_preset_heals_legend_back_under_cap() {
    let res = simulate_duel(load_builtin_duel("jungle_legend_vs_caster").unwrap()).unwrap();
    assert_eq!(res.winner_side, Some(Side::PlayerOne));
    assert_eq!(res.turns, 18);
    assert_eq!(res.log[1], "Player selected Enemy Caster");
    assert_eq!(res.player_one.health, 145);
    assert_eq!(res.player_one.max_health, 150);
}

#[test]
fn unknown_preset_is_a_config_error() {
    let err = load_builtin_duel("nope").unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::UnknownPreset("nope".into()))
    );
}

#[test]
fn yaml_and_json_configs_agree() {
    let yaml = "player_one: caster\nplayer_two: legendary\narena: ice\nfirst: player_two\npolicy: special_when_ready\n";
    let json = r#"{"player_one":"caster","player_two":"legendary","arena":"ice","first":"player_two","policy":"special_when_ready"}"#;
    let a = parse_duel_config(yaml, ConfigFormat::Yaml).unwrap();
    let b = parse_duel_config(json, ConfigFormat::Json).unwrap();
    assert_eq!(a.arena, ArenaKind::Ice);
    assert_eq!(a.max_turns, 200);
    assert_eq!(a.policy, Policy::SpecialWhenReady);
    let ra = simulate_duel(a).unwrap();
    let rb = simulate_duel(b).unwrap();
    assert_eq!(ra.log, rb.log);
    assert_eq!(ra.turns, rb.turns);
}

#[test]
fn zero_turn_limit_is_rejected() {
    let err = parse_duel_config(
        r#"{"player_one":"warrior","player_two":"warrior","max_turns":0}"#,
        ConfigFormat::Json,
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::ZeroTurnLimit)
    );
}

#[test]
fn unknown_archetype_fails_to_parse() {
    assert!(parse_duel_config(
        r#"{"player_one":"paladin","player_two":"warrior"}"#,
        ConfigFormat::Json
    )
    .is_err());
}

#[test]
fn load_from_file_uses_extension() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("arena_duel_{}.yaml", std::process::id()));
    std::fs::write(
        &path,
        "player_one: legendary\nplayer_two: warrior\narena_name: Old Colosseum\n",
    )
    .unwrap();
    let cfg = load_duel_config(&path).unwrap();
    std::fs::remove_file(&path).ok();
    let res = simulate_duel(cfg).unwrap();
    assert_eq!(res.arena, "Old Colosseum");
    assert_eq!(res.log[0], "Battle starts in Old Colosseum!");
}

#[test]
fn missing_file_reports_path() {
    let err = load_duel_config("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.json"));
}

#[test]
fn matrix_covers_every_pairing() {
    let summary = simulate_matrix(Policy::AlwaysAttack, 300).unwrap();
    assert_eq!(summary.duels, 27);
    assert_eq!(summary.rows.len(), 27);
    assert_eq!(summary.unfinished, 0);
    assert_eq!(summary.wins.values().sum::<u32>(), 27);
    let order: Vec<_> = summary.wins.keys().copied().collect();
    assert_eq!(order, Archetype::ALL.to_vec());
}

#[test]
fn healing_legends_can_stall_each_other() {
    let summary = simulate_matrix(Policy::SpecialWhenReady, 300).unwrap();
    assert_eq!(summary.wins.values().sum::<u32>() + summary.unfinished, 27);
    let mirror = |arena| {
        summary
            .rows
            .iter()
            .find(|r| {
                r.arena == arena
                    && r.player_one == Archetype::Legendary
                    && r.player_two == Archetype::Legendary
            })
            .unwrap()
    };
    // Two hits of 14 a cycle never outpace a 30 point heal.
    assert_eq!(mirror(ArenaKind::Ice).winner_side, None);
    assert_eq!(mirror(ArenaKind::Ice).turns, 300);
    assert!(mirror(ArenaKind::Fire).winner_side.is_some());
}
