//! Stat presets for every archetype and melee variant.
//!
//! All combat constants (hit point ceilings, damage, magazine size, speed,
//! reach) live here in one [`StatTable`] instead of being scattered through
//! the fighter code. A [`Loadout`] is the slice of the table injected into a
//! fighter when it is built.
//!
//! | Preset        | Max HP | Damage | Magazine | Speed | Reach |
//! |---------------|--------|--------|----------|-------|-------|
//! | Ranged        | 110    | 10     | 6        | -     | -     |
//! | Melee Young   | 100    | 40     | -        | 14    | 1     |
//! | Melee Trained | 120    | 40     | -        | 12    | 1     |
//! | Melee Old     | 150    | 40     | -        | 8     | 1     |

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Archetype;
use crate::error::{Result, SkirmishError};

/// Stats shared by every ranged fighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangedProfile {
    /// Hit point ceiling (and starting hit points).
    pub max_hit_points: u32,
    /// Rounds held by a full magazine.
    pub magazine: u32,
    /// Damage dealt per shot.
    pub damage: u32,
}

impl RangedProfile {
    /// The standard ranged preset.
    pub const STANDARD: Self = Self {
        max_hit_points: 110,
        magazine: 6,
        damage: 10,
    };

    fn validate(&self) -> Result<()> {
        if self.max_hit_points == 0 {
            return Err(SkirmishError::InvalidStatTable(
                "ranged max_hit_points must be positive".into(),
            ));
        }
        if self.magazine == 0 {
            return Err(SkirmishError::InvalidStatTable(
                "ranged magazine must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RangedProfile {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Stats for one melee variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeleeProfile {
    /// Hit point ceiling (and starting hit points).
    pub max_hit_points: u32,
    /// Distance covered per round when advancing.
    pub speed: f64,
    /// A slash connects only when the target is strictly closer than this.
    pub reach: f64,
    /// Damage dealt per slash.
    pub damage: u32,
}

impl MeleeProfile {
    /// Damage of every standard melee preset.
    pub const STANDARD_DAMAGE: u32 = 40;
    /// Reach of every standard melee preset.
    pub const STANDARD_REACH: f64 = 1.0;

    /// Young: fast, fragile.
    pub const YOUNG: Self = Self {
        max_hit_points: 100,
        speed: 14.0,
        reach: Self::STANDARD_REACH,
        damage: Self::STANDARD_DAMAGE,
    };

    /// Trained: balanced.
    pub const TRAINED: Self = Self {
        max_hit_points: 120,
        speed: 12.0,
        reach: Self::STANDARD_REACH,
        damage: Self::STANDARD_DAMAGE,
    };

    /// Old: slow, durable.
    pub const OLD: Self = Self {
        max_hit_points: 150,
        speed: 8.0,
        reach: Self::STANDARD_REACH,
        damage: Self::STANDARD_DAMAGE,
    };

    fn validate(&self, variant: MeleeVariant) -> Result<()> {
        if self.max_hit_points == 0 {
            return Err(SkirmishError::InvalidStatTable(format!(
                "{variant} max_hit_points must be positive"
            )));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(SkirmishError::InvalidStatTable(format!(
                "{variant} speed must be finite and non-negative, got {}",
                self.speed
            )));
        }
        // A zero reach would leave a co-located melee fighter unable to
        // either slash or advance.
        if !self.reach.is_finite() || self.reach <= 0.0 {
            return Err(SkirmishError::InvalidStatTable(format!(
                "{variant} reach must be finite and positive, got {}",
                self.reach
            )));
        }
        Ok(())
    }
}

/// Named melee statistics preset.
///
/// The variant is a label for identity and reporting. Behavior is the same for
/// all three; only the stats in the matching [`MeleeProfile`] differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeleeVariant {
    /// Fast, fragile.
    Young,
    /// Balanced.
    Trained,
    /// Slow, durable.
    Old,
}

impl MeleeVariant {
    /// All variants in declaration order.
    pub const ALL: [Self; 3] = [Self::Young, Self::Trained, Self::Old];
}

impl fmt::Display for MeleeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Young => write!(f, "Young"),
            Self::Trained => write!(f, "Trained"),
            Self::Old => write!(f, "Old"),
        }
    }
}

/// The complete configuration table, keyed by archetype and melee variant.
///
/// # Example
///
/// ```
/// use skirmish_core::fighter::{MeleeVariant, StatTable};
///
/// let table = StatTable::standard();
/// assert_eq!(table.ranged.magazine, 6);
/// assert_eq!(table.melee(MeleeVariant::Old).max_hit_points, 150);
///
/// let tweaked = StatTable::from_json(r#"{
///     "ranged":  { "max_hit_points": 90, "magazine": 8, "damage": 12 },
///     "young":   { "max_hit_points": 100, "speed": 14.0, "reach": 1.0, "damage": 40 },
///     "trained": { "max_hit_points": 120, "speed": 12.0, "reach": 1.0, "damage": 40 },
///     "old":     { "max_hit_points": 150, "speed": 8.0,  "reach": 1.0, "damage": 40 }
/// }"#).unwrap();
/// assert_eq!(tweaked.ranged.magazine, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatTable {
    /// Ranged archetype stats.
    pub ranged: RangedProfile,
    /// Young melee stats.
    pub young: MeleeProfile,
    /// Trained melee stats.
    pub trained: MeleeProfile,
    /// Old melee stats.
    pub old: MeleeProfile,
}

impl StatTable {
    /// The standard table.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            ranged: RangedProfile::STANDARD,
            young: MeleeProfile::YOUNG,
            trained: MeleeProfile::TRAINED,
            old: MeleeProfile::OLD,
        }
    }

    /// Parses and validates a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SkirmishError::InvalidStatTable`] if the JSON is malformed or
    /// any profile fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)
            .map_err(|e| SkirmishError::InvalidStatTable(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Checks every profile in the table.
    ///
    /// # Errors
    ///
    /// Returns [`SkirmishError::InvalidStatTable`] naming the first bad profile.
    pub fn validate(&self) -> Result<()> {
        self.ranged.validate()?;
        for variant in MeleeVariant::ALL {
            self.melee(variant).validate(variant)?;
        }
        Ok(())
    }

    /// Looks up the profile for a melee variant.
    #[must_use]
    pub const fn melee(&self, variant: MeleeVariant) -> MeleeProfile {
        match variant {
            MeleeVariant::Young => self.young,
            MeleeVariant::Trained => self.trained,
            MeleeVariant::Old => self.old,
        }
    }

    /// Ranged loadout drawn from this table.
    #[must_use]
    pub const fn ranged_loadout(&self) -> Loadout {
        Loadout::Ranged(self.ranged)
    }

    /// Melee loadout for `variant` drawn from this table.
    #[must_use]
    pub const fn melee_loadout(&self, variant: MeleeVariant) -> Loadout {
        Loadout::Melee {
            variant,
            profile: self.melee(variant),
        }
    }
}

impl Default for StatTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// The preset a fighter is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Loadout {
    /// A ranged fighter.
    Ranged(RangedProfile),
    /// A melee fighter of the given variant.
    Melee {
        /// Reporting label.
        variant: MeleeVariant,
        /// Stats for this fighter.
        profile: MeleeProfile,
    },
}

impl Loadout {
    /// The archetype this loadout builds.
    #[must_use]
    pub const fn archetype(&self) -> Archetype {
        match self {
            Self::Ranged(_) => Archetype::Ranged,
            Self::Melee { .. } => Archetype::Melee,
        }
    }

    /// Hit point ceiling for this loadout.
    #[must_use]
    pub const fn max_hit_points(&self) -> u32 {
        match self {
            Self::Ranged(profile) => profile.max_hit_points,
            Self::Melee { profile, .. } => profile.max_hit_points,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Ranged(profile) => profile.validate(),
            Self::Melee { variant, profile } => profile.validate(*variant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod table_tests {
        use super::*;

        #[test]
        fn standard_matches_presets() {
            let table = StatTable::standard();
            assert_eq!(table.ranged, RangedProfile::STANDARD);
            assert_eq!(table.melee(MeleeVariant::Young), MeleeProfile::YOUNG);
            assert_eq!(table.melee(MeleeVariant::Trained), MeleeProfile::TRAINED);
            assert_eq!(table.melee(MeleeVariant::Old), MeleeProfile::OLD);
        }

        #[test]
        fn standard_is_valid() {
            assert!(StatTable::standard().validate().is_ok());
        }

        #[test]
        fn variants_differ_only_in_hp_and_speed() {
            let table = StatTable::standard();
            for variant in MeleeVariant::ALL {
                let profile = table.melee(variant);
                assert_eq!(profile.damage, 40);
                assert_eq!(profile.reach, 1.0);
            }
        }

        #[test]
        fn json_roundtrip() {
            let table = StatTable::standard();
            let json = serde_json::to_string(&table).unwrap();
            assert_eq!(StatTable::from_json(&json).unwrap(), table);
        }

        #[test]
        fn malformed_json_is_rejected() {
            let err = StatTable::from_json("{ not json").unwrap_err();
            assert!(matches!(err, SkirmishError::InvalidStatTable(_)));
        }

        #[test]
        fn zero_reach_is_rejected() {
            let mut table = StatTable::standard();
            table.trained.reach = 0.0;
            let json = serde_json::to_string(&table).unwrap();
            let err = StatTable::from_json(&json).unwrap_err();
            assert!(err.to_string().contains("Trained reach"));
        }

        #[test]
        fn negative_speed_is_rejected() {
            let mut table = StatTable::standard();
            table.old.speed = -1.0;
            assert!(table.validate().is_err());
        }

        #[test]
        fn empty_magazine_is_rejected() {
            let mut table = StatTable::standard();
            table.ranged.magazine = 0;
            assert!(table.validate().is_err());
        }
    }

    mod loadout_tests {
        use super::*;

        #[test]
        fn archetype_matches_variant() {
            let table = StatTable::standard();
            assert_eq!(table.ranged_loadout().archetype(), Archetype::Ranged);
            assert_eq!(
                table.melee_loadout(MeleeVariant::Young).archetype(),
                Archetype::Melee
            );
        }

        #[test]
        fn max_hit_points_reads_profile() {
            let table = StatTable::standard();
            assert_eq!(table.ranged_loadout().max_hit_points(), 110);
            assert_eq!(table.melee_loadout(MeleeVariant::Trained).max_hit_points(), 120);
        }
    }
}
