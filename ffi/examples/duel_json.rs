// Drives the JSON entry points the JNI exports wrap, without a JVM.
fn main() {
    println!("FFI Version: {}", arena_ffi::VERSION);

    let duel = r#"{"player_one":"legendary","player_two":"caster","arena":"jungle","policy":"special_when_ready"}"#;
    println!("simulate_duel_json:\n{}", arena_ffi::simulate_duel_json(duel));

    let matrix = r#"{"policy":"special_when_ready","max_turns":150}"#;
    println!("simulate_matrix_json:\n{}", arena_ffi::simulate_matrix_json(matrix));

    println!("bad input:\n{}", arena_ffi::simulate_duel_json("{}"));
}
