//! Shared fixtures for integration tests: a full element registry and a
//! small rule set covering every pass.

#![allow(dead_code)]

use terraspiel::{ElementRegistry, RuleRegistry};

pub fn elements() -> ElementRegistry {
    ElementRegistry::from_json(
        r#"[
            {"name": "SOIL", "color": "#6b4423", "density": 1.5, "state": "solid",
             "fluidity": {"resistance": 0.1, "spread": 0.0}},
            {"name": "SAND", "color": "#d8c17a", "density": 2.2, "state": "solid",
             "fluidity": {"resistance": 0.05, "spread": 0.2}},
            {"name": "WATER", "color": "#3070ff", "density": 1.0, "state": "liquid",
             "fluidity": {"resistance": 0.0, "spread": 0.8}},
            {"name": "MUD", "color": "#4a3220", "density": 1.8, "state": "liquid",
             "fluidity": {"resistance": 0.4, "spread": 0.3}},
            {"name": "PEAT", "color": "#2e2417", "density": 1.3, "state": "solid",
             "fluidity": {"resistance": 0.2, "spread": 0.1}, "isFlammable": true},
            {"name": "FERTILE_SOIL", "color": "#5a3a1a", "density": 1.4, "state": "solid",
             "fluidity": {"resistance": 0.1, "spread": 0.1}, "isFlammable": true},
            {"name": "CLAY", "color": "#a86b4f", "density": 1.9, "state": "solid",
             "fluidity": {"resistance": 0.3, "spread": 0.05}},
            {"name": "STONE", "color": "#808080", "density": 3.0, "state": "solid", "isStatic": true},
            {"name": "MAGMA", "color": "#ff4500", "density": 3.2, "state": "liquid",
             "fluidity": {"resistance": 0.2, "spread": 0.3}},
            {"name": "CLOUD", "color": "#dddddd", "density": 0.1, "state": "gas"},
            {"name": "CRYSTAL", "color": "#9b59ff", "density": 2.6, "state": "solid",
             "fluidity": {"resistance": 0.3, "spread": 0.0}},
            {"name": "RUBY", "color": "#e0115f", "density": 2.6, "state": "solid", "isStatic": true},
            {"name": "PLANT", "color": "#228b22", "density": 0.9, "state": "solid",
             "fluidity": {"resistance": 0.0, "spread": 0.0}, "isFlammable": true,
             "partColors": {"stem": "#228b22", "leaf": "#2ecc40", "flower": "#ff69b4", "withered": "#8b7355", "ground_cover": "#3c7a3c"}},
            {"name": "OIL", "color": "#1a1a1a", "density": 0.8, "state": "liquid",
             "fluidity": {"resistance": 0.05, "spread": 0.6}, "isFlammable": true},
            {"name": "FIRE", "color": "#ff5500", "density": 0.05, "state": "particle"},
            {"name": "SEED", "color": "#c2a15b", "density": 1.2, "state": "solid",
             "fluidity": {"resistance": 0.1, "spread": 0.1}}
        ]"#,
    )
    .expect("fixture element registry must parse")
}

pub fn rules() -> RuleRegistry {
    RuleRegistry::from_json(
        r#"[
            {"type": "particle_interaction", "particle": "ETHER", "from": "SOIL", "to": "FERTILE_SOIL", "probability": 1.0}
        ]"#,
    )
    .expect("fixture rule registry must parse")
}

pub fn empty_rules() -> RuleRegistry {
    RuleRegistry::default()
}
