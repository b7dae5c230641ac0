use arena_engine::api::{simulate_duel, simulate_matrix, DuelConfig, Policy};
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde::Deserialize;
use serde_json::json;

pub const VERSION: &str = "arena-ffi 0.1.0";
const DEFAULT_MATRIX_TURNS: u32 = 200;

#[derive(Debug, Deserialize)]
struct MatrixRequest {
    #[serde(default)]
    policy: Policy,
    #[serde(default)]
    max_turns: Option<u32>,
}

fn envelope_ok(value: serde_json::Value) -> String {
    json!({ "ok": true, "result": value }).to_string()
}

fn envelope_err(e: impl std::fmt::Display) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

fn to_jstring(env: &JNIEnv, payload: String) -> jstring {
    match env.new_string(payload) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// JSON `DuelConfig` in, `{"ok":..}` envelope out. Usable without a JVM.
pub fn simulate_duel_json(input: &str) -> String {
    let cfg: DuelConfig = match serde_json::from_str(input) {
        Ok(c) => c,
        Err(e) => return envelope_err(format!("invalid_config: {}", e)),
    };
    match simulate_duel(cfg).and_then(|res| Ok(serde_json::to_value(res)?)) {
        Ok(value) => envelope_ok(value),
        Err(e) => envelope_err(format!("{:#}", e)),
    }
}

/// `{"policy": "...", "max_turns": N}` in, matrix summary envelope out.
pub fn simulate_matrix_json(input: &str) -> String {
    let req: MatrixRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => return envelope_err(format!("invalid_config: {}", e)),
    };
    let max_turns = req.max_turns.unwrap_or(DEFAULT_MATRIX_TURNS);
    if max_turns == 0 {
        return envelope_err("invalid_config: max_turns must be at least 1");
    }
    match simulate_matrix(req.policy, max_turns).and_then(|s| Ok(serde_json::to_value(s)?)) {
        Ok(value) => envelope_ok(value),
        Err(e) => envelope_err(format!("{:#}", e)),
    }
}

fn read_input(env: &mut JNIEnv, json: &JString) -> Result<String, String> {
    env.get_string(json)
        .map(Into::into)
        .map_err(envelope_err)
}

#[no_mangle]
pub extern "system" fn Java_com_arenaduel_Ffi_version(env: JNIEnv, _class: JClass) -> jstring {
    to_jstring(&env, VERSION.to_string())
}

#[no_mangle]
pub extern "system" fn Java_com_arenaduel_Ffi_simulateDuelJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let payload = match read_input(&mut env, &json) {
        Ok(input) => simulate_duel_json(&input),
        Err(e) => e,
    };
    to_jstring(&env, payload)
}

#[no_mangle]
pub extern "system" fn Java_com_arenaduel_Ffi_simulateMatrixJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let payload = match read_input(&mut env, &json) {
        Ok(input) => simulate_matrix_json(&input),
        Err(e) => e,
    };
    to_jstring(&env, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> serde_json::Value {
        serde_json::from_str(s).expect("envelope is JSON")
    }

    #[test]
    fn duel_json_round_trip() {
        let out = parse(&simulate_duel_json(
            r#"{"player_one":"warrior","player_two":"warrior"}"#,
        ));
        assert_eq!(out["ok"], true);
        assert_eq!(out["result"]["winner"], "Bob the Warrior");
        assert_eq!(out["result"]["turns"], 17);
    }

    #[test]
    fn bad_duel_json_is_an_error_envelope() {
        let out = parse(&simulate_duel_json("{not json"));
        assert_eq!(out["ok"], false);
        assert!(out["error"].as_str().unwrap().starts_with("invalid_config"));
    }

    #[test]
    fn zero_turn_limit_surfaces_config_error() {
        let out = parse(&simulate_duel_json(
            r#"{"player_one":"warrior","player_two":"caster","max_turns":0}"#,
        ));
        assert_eq!(out["ok"], false);
        assert!(out["error"].as_str().unwrap().contains("max_turns"));
    }

    #[test]
    fn matrix_defaults_to_attack_policy() {
        let out = parse(&simulate_matrix_json("{}"));
        assert_eq!(out["ok"], true);
        assert_eq!(out["result"]["policy"], "always_attack");
        assert_eq!(out["result"]["duels"], 27);
    }
}
