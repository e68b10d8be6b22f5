use serde::{Deserialize, Serialize};

use super::{ClassStats, HeroId, HeroState};

/// Class name rendered for heroes whose class row is missing.
pub const UNKNOWN_CLASS: &str = "Unknown";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    Ability,
    Maneuver,
    Perk,
    #[serde(rename = "Ancestry Feature")]
    AncestryFeature,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeroSummary {
    pub id: HeroId,
    pub name: String,
    pub level: u32,
    pub class: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub level: u32,
    pub class: String,
    pub state: HeroState,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Hero {
    pub fn summary(&self) -> HeroSummary {
        HeroSummary {
            id: self.id,
            name: self.name.clone(),
            level: self.level,
            class: self.class.clone(),
        }
    }

    pub fn class_stats(&self) -> ClassStats {
        ClassStats::for_class(&self.class)
    }

    pub fn max_stamina(&self) -> u32 {
        self.class_stats().max_stamina(self.level)
    }

    /// Negative once damage exceeds max stamina.
    pub fn current_stamina(&self) -> i64 {
        i64::from(self.max_stamina()) - i64::from(self.state.stamina_damage)
    }

    pub fn recoveries_remaining(&self) -> u32 {
        self.class_stats()
            .recoveries
            .saturating_sub(self.state.recoveries_used)
    }
}
