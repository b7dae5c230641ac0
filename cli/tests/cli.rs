use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn presets_lists_builtins() {
    Command::cargo_bin("arena-cli")
        .unwrap()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("fire_warriors"))
        .stdout(predicate::str::contains("ice_caster_mirror"));
}

#[test]
fn duel_preset_prints_json_result() {
    Command::cargo_bin("arena-cli")
        .unwrap()
        .args(["duel", "--preset", "fire_warriors", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"winner\": \"Bob the Warrior\""))
        .stdout(predicate::str::contains("\"turns\": 17"));
}

#[test]
fn duel_needs_a_source() {
    Command::cargo_bin("arena-cli")
        .unwrap()
        .arg("duel")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file or --preset"));
}

#[test]
fn unknown_preset_fails() {
    Command::cargo_bin("arena-cli")
        .unwrap()
        .args(["duel", "--preset", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown duel preset 'nope'"));
}

#[test]
fn duel_file_with_bom_is_accepted() {
    let path = std::env::temp_dir().join(format!("arena_cli_{}.json", std::process::id()));
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(br#"{"player_one":"legendary","player_two":"caster","arena":"ice"}"#);
    std::fs::write(&path, bytes).unwrap();
    let assert = Command::cargo_bin("arena-cli")
        .unwrap()
        .args(["duel", "--json", "--file"])
        .arg(&path)
        .assert();
    std::fs::remove_file(&path).ok();
    assert
        .success()
        .stdout(predicate::str::contains("\"arena\": \"Ice Arena\""));
}

#[test]
fn interactive_play_runs_to_a_winner_on_eof() {
    // Warrior vs warrior, player one first, then stdin closes and every
    // turn falls back to a basic attack.
    Command::cargo_bin("arena-cli")
        .unwrap()
        .arg("play")
        .write_stdin("1\n1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("BATTLE REPORT"))
        .stdout(predicate::str::contains("Bob the Warrior wins the battle!"))
        .stdout(predicate::str::contains("Invalid! Attacking anyway."))
        .stdout(predicate::str::contains("[1] Bob the Warrior (HP: 100, ATK: 20, DEF: 10)"))
        .stdout(predicate::str::contains("An even match!"))
        .stdout(predicate::str::contains("Enemy Warrior swings a sword!"));
}

#[test]
fn roster_dumps_all_archetypes() {
    Command::cargo_bin("arena-cli")
        .unwrap()
        .arg("roster")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"archetype\": \"legendary\""))
        .stdout(predicate::str::contains("\"health\": 150"));
}

#[test]
fn matrix_reports_every_duel() {
    Command::cargo_bin("simulate-matrix")
        .unwrap()
        .args(["--policy", "attack", "--arena", "ice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("duels:              27"))
        .stdout(predicate::str::contains("unfinished:         0"));
}

#[test]
fn matrix_rejects_unknown_arena() {
    Command::cargo_bin("simulate-matrix")
        .unwrap()
        .args(["--arena", "desert"])
        .assert()
        .failure();
}
