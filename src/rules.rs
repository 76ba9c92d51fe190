//! Transformation and particle-interaction rules, parsed from the rule
//! registry.

use serde::Deserialize;
use tracing::warn;

use crate::element::CellKind;
use crate::error::TerraspielError;

fn kind_of(name: &str) -> Result<CellKind, TerraspielError> {
    CellKind::from_name(name)
        .ok_or_else(|| TerraspielError::UnknownElement(name.to_string()))
}

/// A bound on a Moore-neighbourhood count, or a radius-bounded
/// presence/absence check.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RawCondition {
    Surrounding {
        of: String,
        min: Option<u32>,
        max: Option<u32>,
    },
    Environment {
        of: String,
        radius: u32,
        present: bool,
    },
    SurroundingAttribute {
        attribute: String,
        value: bool,
        min: Option<u32>,
        max: Option<u32>,
    },
}

/// Resolved condition, element names already validated against the
/// registry.
#[derive(Debug, Clone)]
pub enum Condition {
    Surrounding {
        of: CellKind,
        min: u32,
        max: u32,
    },
    Environment {
        of: CellKind,
        radius: u32,
        present: bool,
    },
    SurroundingAttribute {
        attribute: Attribute,
        value: bool,
        min: u32,
        max: u32,
    },
}

/// Element-definition attributes a `surroundingAttribute` condition may
/// match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    IsFlammable,
    IsStatic,
    HasColorVariation,
}

impl Attribute {
    fn parse(s: &str) -> Result<Self, TerraspielError> {
        Ok(match s {
            "isFlammable" => Attribute::IsFlammable,
            "isStatic" => Attribute::IsStatic,
            "hasColorVariation" => Attribute::HasColorVariation,
            other => {
                return Err(TerraspielError::InvalidAsset(format!(
                    "unknown attribute {other:?}"
                )))
            }
        })
    }
}

fn resolve_condition(raw: RawCondition) -> Result<Condition, TerraspielError> {
    Ok(match raw {
        RawCondition::Surrounding { of, min, max } => Condition::Surrounding {
            of: kind_of(&of)?,
            min: min.unwrap_or(0),
            max: max.unwrap_or(8),
        },
        RawCondition::Environment {
            of,
            radius,
            present,
        } => Condition::Environment {
            of: kind_of(&of)?,
            radius,
            present,
        },
        RawCondition::SurroundingAttribute {
            attribute,
            value,
            min,
            max,
        } => Condition::SurroundingAttribute {
            attribute: Attribute::parse(&attribute)?,
            value,
            min: min.unwrap_or(0),
            max: max.unwrap_or(8),
        },
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransformRule {
    from: String,
    to: String,
    probability: f32,
    threshold: u32,
    #[serde(default)]
    conditions: Vec<RawCondition>,
    #[serde(default)]
    consumes: Option<String>,
    #[serde(default)]
    spawn_particle: Option<String>,
}

/// A transformation rule: a candidate `from -> to` conversion gated by
/// conditions and a probability/threshold counter.
#[derive(Debug, Clone)]
pub struct TransformRule {
    pub from: CellKind,
    pub to: CellKind,
    pub probability: f32,
    pub threshold: u32,
    pub conditions: Vec<Condition>,
    pub consumes: Option<CellKind>,
    pub spawn_particle: Option<crate::particle::ParticleKind>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParticleInteractionRule {
    particle: String,
    from: String,
    to: String,
    probability: f32,
}

/// Describes how a drifting particle of `particle` kind deepens a cell of
/// type `from` into `to`. Used exclusively by the ether pass.
#[derive(Debug, Clone)]
pub struct ParticleInteractionRule {
    pub particle: ParticleRuleKind,
    pub from: CellKind,
    pub to: CellKind,
    pub probability: f32,
}

/// The particle kinds a particle-interaction rule may name; narrower than
/// [`crate::particle::ParticleKind`] since scattered material particles
/// don't drive deepening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleRuleKind {
    Ether,
    Thunder,
    Fire,
}

impl ParticleRuleKind {
    fn parse(s: &str) -> Result<Self, TerraspielError> {
        Ok(match s {
            "ETHER" => ParticleRuleKind::Ether,
            "THUNDER" => ParticleRuleKind::Thunder,
            "FIRE" => ParticleRuleKind::Fire,
            other => {
                return Err(TerraspielError::InvalidAsset(format!(
                    "unknown particle kind {other:?}"
                )))
            }
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawRule {
    ParticleInteraction(RawParticleInteractionRule),
    #[serde(untagged)]
    Transform(RawTransformRule),
}

/// Parsed, validated rule set: transformation rules grouped for lookup by
/// origin kind, plus the flat particle-interaction list.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    transform_rules: Vec<TransformRule>,
    particle_rules: Vec<ParticleInteractionRule>,
}

impl RuleRegistry {
    pub fn from_json(json: &str) -> Result<Self, TerraspielError> {
        let raw: Vec<RawRule> = serde_json::from_str(json)
            .map_err(|e| TerraspielError::InvalidAsset(format!("rule registry: {e}")))?;
        let mut transform_rules = Vec::new();
        let mut particle_rules = Vec::new();
        for entry in raw {
            match entry {
                RawRule::ParticleInteraction(p) => match build_particle_rule(p) {
                    Ok(rule) => particle_rules.push(rule),
                    Err(TerraspielError::UnknownElement(name)) => {
                        warn!(element = %name, "dropping particle-interaction rule: unknown element");
                    }
                    Err(other) => return Err(other),
                },
                RawRule::Transform(t) => match build_transform_rule(t) {
                    Ok(rule) => transform_rules.push(rule),
                    Err(TerraspielError::UnknownElement(name)) => {
                        warn!(element = %name, "dropping transformation rule: unknown element");
                    }
                    Err(other) => return Err(other),
                },
            }
        }
        Ok(RuleRegistry {
            transform_rules,
            particle_rules,
        })
    }

    /// Transformation rules whose `from` matches `kind`, in registry order
    /// (the transformation engine commits the first whose conditions hold).
    pub fn transforms_from(&self, kind: CellKind) -> impl Iterator<Item = &TransformRule> {
        self.transform_rules.iter().filter(move |r| r.from == kind)
    }

    pub fn particle_rules(&self) -> &[ParticleInteractionRule] {
        &self.particle_rules
    }
}

fn build_particle_rule(p: RawParticleInteractionRule) -> Result<ParticleInteractionRule, TerraspielError> {
    let particle = ParticleRuleKind::parse(&p.particle)?;
    let from = kind_of(&p.from)?;
    let to = kind_of(&p.to)?;
    Ok(ParticleInteractionRule {
        particle,
        from,
        to,
        probability: p.probability,
    })
}

fn build_transform_rule(t: RawTransformRule) -> Result<TransformRule, TerraspielError> {
    let from = kind_of(&t.from)?;
    let to = kind_of(&t.to)?;
    let conditions = t
        .conditions
        .into_iter()
        .map(resolve_condition)
        .collect::<Result<Vec<_>, _>>()?;
    let consumes = t.consumes.as_deref().map(kind_of).transpose()?;
    let spawn_particle = t
        .spawn_particle
        .as_deref()
        .map(parse_spawn_particle)
        .transpose()?;
    Ok(TransformRule {
        from,
        to,
        probability: t.probability,
        threshold: t.threshold,
        conditions,
        consumes,
        spawn_particle,
    })
}

fn parse_spawn_particle(s: &str) -> Result<crate::particle::ParticleKind, TerraspielError> {
    use crate::particle::ParticleKind;
    Ok(match s {
        "ETHER" => ParticleKind::Ether,
        "THUNDER" => ParticleKind::Thunder,
        "FIRE" => ParticleKind::Fire,
        other => return Err(TerraspielError::InvalidAsset(format!(
            "unknown spawnParticle {other:?}"
        ))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_with_unknown_element_is_dropped_not_fatal() {
        let json = r#"[
            {"type": "transform", "from": "SOIL", "to": "MUD", "probability": 0.5, "threshold": 1},
            {"type": "transform", "from": "UNOBTAINIUM", "to": "MUD", "probability": 0.5, "threshold": 1}
        ]"#;
        let registry = RuleRegistry::from_json(json).unwrap();
        assert_eq!(registry.transforms_from(CellKind::Soil).count(), 1);
    }

    #[test]
    fn particle_rule_with_unknown_element_is_dropped_not_fatal() {
        let json = r#"[
            {"type": "particle_interaction", "particle": "ETHER", "from": "UNOBTAINIUM", "to": "MUD", "probability": 0.5}
        ]"#;
        let registry = RuleRegistry::from_json(json).unwrap();
        assert!(registry.particle_rules().is_empty());
    }

    #[test]
    fn malformed_rule_json_is_still_fatal() {
        assert!(RuleRegistry::from_json("{ not json").is_err());
    }
}
