use serde::{Deserialize, Serialize};

/// Mutable combat counters of a hero.
///
/// `stamina_damage` is damage taken, not remaining stamina.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroState {
    pub stamina_damage: u32,
    pub recoveries_used: u32,
    pub victories: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeroStateField {
    StaminaDamage,
    RecoveriesUsed,
    Victories,
}

impl HeroState {
    pub fn get(&self, field: HeroStateField) -> u32 {
        match field {
            HeroStateField::StaminaDamage => self.stamina_damage,
            HeroStateField::RecoveriesUsed => self.recoveries_used,
            HeroStateField::Victories => self.victories,
        }
    }

    pub fn with(mut self, field: HeroStateField, value: u32) -> Self {
        match field {
            HeroStateField::StaminaDamage => self.stamina_damage = value,
            HeroStateField::RecoveriesUsed => self.recoveries_used = value,
            HeroStateField::Victories => self.victories = value,
        }
        self
    }

    /// Applies `delta` to one counter, clamping at zero.
    pub fn adjusted(self, field: HeroStateField, delta: i64) -> Self {
        let next = i64::from(self.get(field))
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        // clamped into u32 range above
        self.with(field, next as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjusted_clamps_at_zero() {
        let state = HeroState {
            stamina_damage: 2,
            recoveries_used: 0,
            victories: 5,
        };

        assert_eq!(state.adjusted(HeroStateField::StaminaDamage, -5).stamina_damage, 0);
        assert_eq!(state.adjusted(HeroStateField::StaminaDamage, -1).stamina_damage, 1);
        assert_eq!(state.adjusted(HeroStateField::RecoveriesUsed, -1).recoveries_used, 0);
        assert_eq!(state.adjusted(HeroStateField::Victories, 3).victories, 8);
        assert_eq!(
            state.adjusted(HeroStateField::Victories, i64::MAX).victories,
            u32::MAX
        );
    }

    #[test]
    fn test_adjusted_extreme_deltas() {
        let state = HeroState {
            stamina_damage: u32::MAX,
            recoveries_used: 1,
            victories: 0,
        };
        assert_eq!(
            state.adjusted(HeroStateField::StaminaDamage, i64::MAX).stamina_damage,
            u32::MAX
        );
        assert_eq!(
            state.adjusted(HeroStateField::StaminaDamage, i64::MIN).stamina_damage,
            0
        );
        assert_eq!(
            state.adjusted(HeroStateField::RecoveriesUsed, i64::MIN).recoveries_used,
            0
        );
    }

    #[test]
    fn test_adjusted_leaves_other_fields() {
        let state = HeroState {
            stamina_damage: 4,
            recoveries_used: 1,
            victories: 2,
        };
        let next = state.adjusted(HeroStateField::RecoveriesUsed, 1);
        assert_eq!(
            next,
            HeroState {
                stamina_damage: 4,
                recoveries_used: 2,
                victories: 2,
            }
        );
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let state: HeroState = serde_json::from_str(r#"{"victories": 3}"#).unwrap();
        assert_eq!(
            state,
            HeroState {
                stamina_damage: 0,
                recoveries_used: 0,
                victories: 3,
            }
        );

        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"staminaDamage": 0, "recoveriesUsed": 0, "victories": 3})
        );
    }

    #[test]
    fn test_negative_counter_is_rejected() {
        assert!(serde_json::from_str::<HeroState>(r#"{"staminaDamage": -1}"#).is_err());
    }
}
