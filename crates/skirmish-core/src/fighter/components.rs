//! Archetype-specific state carried inside a [`Fighter`](super::Fighter).
//!
//! Each component struct pairs the immutable profile injected at construction
//! with whatever mutable state the archetype needs.

use serde::Serialize;

use super::profile::{MeleeProfile, MeleeVariant, RangedProfile};

/// Components for ranged fighters.
///
/// Ranged fighters carry a magazine bounded by `[0, profile.magazine]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangedComponents {
    pub(crate) profile: RangedProfile,
    pub(crate) ammo: u32,
}

impl RangedComponents {
    /// Fresh components with a full magazine.
    #[must_use]
    pub const fn new(profile: RangedProfile) -> Self {
        Self {
            profile,
            ammo: profile.magazine,
        }
    }

    /// The profile these components were built from.
    #[must_use]
    pub const fn profile(&self) -> &RangedProfile {
        &self.profile
    }

    /// Returns `true` if at least one round is left.
    #[must_use]
    pub const fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    /// Rounds left in the magazine.
    #[must_use]
    pub const fn remaining_ammo(&self) -> u32 {
        self.ammo
    }

    /// Damage per shot.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.profile.damage
    }

    /// Refills the magazine. Idempotent.
    pub fn reload(&mut self) {
        self.ammo = self.profile.magazine;
    }
}

/// Components for melee fighters.
///
/// Melee state is entirely static: the variant label and its stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeleeComponents {
    pub(crate) variant: MeleeVariant,
    pub(crate) profile: MeleeProfile,
}

impl MeleeComponents {
    /// Components for `variant` with the given stats.
    #[must_use]
    pub const fn new(variant: MeleeVariant, profile: MeleeProfile) -> Self {
        Self { variant, profile }
    }

    /// Reporting label.
    #[must_use]
    pub const fn variant(&self) -> MeleeVariant {
        self.variant
    }

    /// The profile these components were built from.
    #[must_use]
    pub const fn profile(&self) -> &MeleeProfile {
        &self.profile
    }

    /// Distance covered per round.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.profile.speed
    }

    /// Strike distance (exclusive).
    #[must_use]
    pub const fn reach(&self) -> f64 {
        self.profile.reach
    }

    /// Damage per slash.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.profile.damage
    }

    /// Returns `true` if a target at `distance` can be struck.
    #[must_use]
    pub fn in_reach(&self, distance: f64) -> bool {
        distance < self.profile.reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranged_starts_full() {
        let ranged = RangedComponents::new(RangedProfile::STANDARD);
        assert!(ranged.has_ammo());
        assert_eq!(ranged.remaining_ammo(), 6);
    }

    #[test]
    fn reload_refills_empty_magazine() {
        let mut ranged = RangedComponents::new(RangedProfile::STANDARD);
        ranged.ammo = 0;
        assert!(!ranged.has_ammo());
        ranged.reload();
        assert_eq!(ranged.remaining_ammo(), 6);
    }

    #[test]
    fn reload_is_idempotent() {
        let mut ranged = RangedComponents::new(RangedProfile::STANDARD);
        ranged.reload();
        ranged.reload();
        assert_eq!(ranged.remaining_ammo(), 6);
    }

    #[test]
    fn reach_is_strict() {
        let melee = MeleeComponents::new(MeleeVariant::Young, MeleeProfile::YOUNG);
        assert!(melee.in_reach(0.0));
        assert!(melee.in_reach(0.999));
        assert!(!melee.in_reach(1.0));
    }

    #[test]
    fn component_structs_serialize_their_state() {
        let melee = MeleeComponents::new(MeleeVariant::Old, MeleeProfile::OLD);
        let value = serde_json::to_value(&melee).unwrap();
        assert_eq!(value["variant"], "Old");
        assert_eq!(value["profile"]["reach"], 1.0);

        let mut ranged = RangedComponents::new(RangedProfile::STANDARD);
        ranged.ammo = 2;
        assert_eq!(serde_json::to_value(&ranged).unwrap()["ammo"], 2);
    }
}
