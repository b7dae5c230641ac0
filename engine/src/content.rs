use indexmap::IndexMap;

/// Built-in duel presets (JSON `DuelConfig`s), in listing order.
pub fn builtin_duels() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        (
            "fire_warriors",
            include_str!("../content/duels/fire_warriors.json"),
        ),
        (
            "jungle_legend_vs_caster",
            include_str!("../content/duels/jungle_legend_vs_caster.json"),
        ),
        (
            "ice_caster_mirror",
            include_str!("../content/duels/ice_caster_mirror.json"),
        ),
    ])
}
