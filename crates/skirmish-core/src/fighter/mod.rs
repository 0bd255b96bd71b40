//! Fighter model for squad combat.
//!
//! This module provides the fighter types used by squads and the resolver:
//! - [`Archetype`]: Behavioral category (ranged or melee)
//! - [`FighterInner`]: Type-safe storage for archetype-specific components
//! - [`FighterFlags`]: Roster membership and leadership bits
//! - [`Fighter`]: The complete fighter
//! - [`Action`]: What a fighter did with its turn
//!
//! # Architecture
//!
//! Archetype behavior is dispatched through the [`FighterInner`] enum. Melee
//! variants are not separate types; they are stat presets (see
//! [`profile`]) chosen when the fighter is built, so nothing ever branches on
//! a variant label.
//!
//! # Example
//!
//! ```
//! use skirmish_core::fighter::{Fighter, MeleeVariant};
//! use skirmish_core::geometry::Point;
//!
//! let mut gunner = Fighter::ranged("Bart", Point::new(0.0, 0.0)?)?;
//! let mut blade = Fighter::melee("Kenji", Point::new(3.0, 4.0)?, MeleeVariant::Young)?;
//!
//! gunner.shoot(&mut blade)?;
//! assert_eq!(blade.hit_points(), 90);
//! assert_eq!(gunner.remaining_ammo(), Some(5));
//! # Ok::<(), skirmish_core::error::SkirmishError>(())
//! ```

pub mod components;
pub mod profile;

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkirmishError};
use crate::geometry::{self, Point};

pub use components::{MeleeComponents, RangedComponents};
pub use profile::{Loadout, MeleeProfile, MeleeVariant, RangedProfile, StatTable};

/// Behavioral category of a fighter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Shoots from any distance, limited by ammunition.
    Ranged,
    /// Must close to within reach before striking.
    Melee,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranged => write!(f, "ranged"),
            Self::Melee => write!(f, "melee"),
        }
    }
}

bitflags! {
    /// Roster bookkeeping bits, maintained by the owning squad.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FighterFlags: u8 {
        /// The fighter has been admitted to a squad.
        const ROSTERED = 1 << 0;
        /// The fighter is its squad's current leader.
        const LEADER = 1 << 1;
    }
}

/// Type-safe storage for archetype-specific components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FighterInner {
    /// Ranged components (profile, magazine)
    Ranged(RangedComponents),
    /// Melee components (variant, profile)
    Melee(MeleeComponents),
}

impl FighterInner {
    fn from_loadout(loadout: Loadout) -> Self {
        match loadout {
            Loadout::Ranged(profile) => Self::Ranged(RangedComponents::new(profile)),
            Loadout::Melee { variant, profile } => {
                Self::Melee(MeleeComponents::new(variant, profile))
            }
        }
    }

    /// Returns the archetype of this storage.
    #[must_use]
    pub const fn archetype(&self) -> Archetype {
        match self {
            Self::Ranged(_) => Archetype::Ranged,
            Self::Melee(_) => Archetype::Melee,
        }
    }

    /// Hit point ceiling from the stored profile.
    #[must_use]
    pub const fn max_hit_points(&self) -> u32 {
        match self {
            Self::Ranged(ranged) => ranged.profile.max_hit_points,
            Self::Melee(melee) => melee.profile.max_hit_points,
        }
    }
}

/// Outcome of a single fighter turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Fired one round at the target.
    Shot {
        /// Damage applied.
        damage: u32,
    },
    /// Refilled the magazine instead of attacking.
    Reloaded,
    /// Struck the target in melee.
    Slashed {
        /// Damage applied.
        damage: u32,
    },
    /// Closed distance on the target.
    Advanced {
        /// Location before the move.
        from: Point,
        /// Location after the move.
        to: Point,
    },
}

/// A single combatant.
///
/// # Invariants
///
/// - `name` is non-empty and never changes
/// - `hit_points` stays within `[0, max_hit_points]`
/// - a ranged fighter's ammunition stays within `[0, magazine]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFighter")]
pub struct Fighter {
    name: String,
    location: Point,
    hit_points: u32,
    flags: FighterFlags,
    inner: FighterInner,
}

/// Unvalidated wire form of a [`Fighter`].
#[derive(Deserialize)]
struct RawFighter {
    name: String,
    location: Point,
    hit_points: u32,
    flags: FighterFlags,
    inner: RawInner,
}

/// Wire form of [`FighterInner`].
#[derive(Deserialize)]
enum RawInner {
    Ranged {
        profile: RangedProfile,
        ammo: u32,
    },
    Melee {
        variant: MeleeVariant,
        profile: MeleeProfile,
    },
}

impl TryFrom<RawFighter> for Fighter {
    type Error = SkirmishError;

    fn try_from(raw: RawFighter) -> Result<Self> {
        let (loadout, ammo) = match raw.inner {
            RawInner::Ranged { profile, ammo } => (Loadout::Ranged(profile), Some(ammo)),
            RawInner::Melee { variant, profile } => (Loadout::Melee { variant, profile }, None),
        };
        let mut fighter = Self::with_hit_points(raw.name, raw.location, loadout, raw.hit_points)?;
        if let Some(ammo) = ammo {
            fighter.set_remaining_ammo(ammo)?;
        }
        fighter.flags = raw.flags;
        Ok(fighter)
    }
}

impl Fighter {
    /// Builds a fighter at full health from a loadout.
    ///
    /// # Errors
    ///
    /// - [`SkirmishError::EmptyName`] if `name` is empty
    /// - [`SkirmishError::InvalidStatTable`] if the loadout's profile is invalid
    pub fn new(name: impl Into<String>, location: Point, loadout: Loadout) -> Result<Self> {
        let max = loadout.max_hit_points();
        Self::with_hit_points(name, location, loadout, max)
    }

    /// Builds a fighter with explicit starting hit points.
    ///
    /// # Errors
    ///
    /// As [`Fighter::new`], plus [`SkirmishError::HitPointsOutOfRange`] if
    /// `hit_points` exceeds the loadout's maximum.
    pub fn with_hit_points(
        name: impl Into<String>,
        location: Point,
        loadout: Loadout,
        hit_points: u32,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SkirmishError::EmptyName);
        }
        loadout.validate()?;
        let max = loadout.max_hit_points();
        if hit_points > max {
            return Err(SkirmishError::HitPointsOutOfRange {
                value: hit_points,
                max,
            });
        }

        Ok(Self {
            name,
            location,
            hit_points,
            flags: FighterFlags::empty(),
            inner: FighterInner::from_loadout(loadout),
        })
    }

    /// Builds a standard ranged fighter.
    ///
    /// # Errors
    ///
    /// [`SkirmishError::EmptyName`] if `name` is empty.
    pub fn ranged(name: impl Into<String>, location: Point) -> Result<Self> {
        Self::new(name, location, StatTable::standard().ranged_loadout())
    }

    /// Builds a standard melee fighter of the given variant.
    ///
    /// # Errors
    ///
    /// [`SkirmishError::EmptyName`] if `name` is empty.
    pub fn melee(name: impl Into<String>, location: Point, variant: MeleeVariant) -> Result<Self> {
        Self::new(name, location, StatTable::standard().melee_loadout(variant))
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current location.
    #[must_use]
    pub const fn location(&self) -> Point {
        self.location
    }

    /// Moves the fighter to `location`.
    pub fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    /// Current hit points.
    #[must_use]
    pub const fn hit_points(&self) -> u32 {
        self.hit_points
    }

    /// Hit point ceiling for this fighter's archetype preset.
    #[must_use]
    pub const fn max_hit_points(&self) -> u32 {
        self.inner.max_hit_points()
    }

    /// Returns `true` while hit points are above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Roster bookkeeping bits.
    #[must_use]
    pub const fn flags(&self) -> FighterFlags {
        self.flags
    }

    /// Returns `true` once a squad has admitted this fighter.
    #[must_use]
    pub const fn is_rostered(&self) -> bool {
        self.flags.contains(FighterFlags::ROSTERED)
    }

    /// Returns `true` if this fighter currently leads its squad.
    #[must_use]
    pub const fn is_leader(&self) -> bool {
        self.flags.contains(FighterFlags::LEADER)
    }

    pub(crate) fn set_flag(&mut self, flag: FighterFlags, value: bool) {
        self.flags.set(flag, value);
    }

    /// Behavioral category.
    #[must_use]
    pub const fn archetype(&self) -> Archetype {
        self.inner.archetype()
    }

    /// Archetype-specific components.
    #[must_use]
    pub const fn inner(&self) -> &FighterInner {
        &self.inner
    }

    /// Ranged components, if this is a ranged fighter.
    #[must_use]
    pub const fn as_ranged(&self) -> Option<&RangedComponents> {
        match &self.inner {
            FighterInner::Ranged(ranged) => Some(ranged),
            FighterInner::Melee(_) => None,
        }
    }

    /// Melee components, if this is a melee fighter.
    #[must_use]
    pub const fn as_melee(&self) -> Option<&MeleeComponents> {
        match &self.inner {
            FighterInner::Melee(melee) => Some(melee),
            FighterInner::Ranged(_) => None,
        }
    }

    /// Melee variant label, if this is a melee fighter.
    #[must_use]
    pub fn variant(&self) -> Option<MeleeVariant> {
        self.as_melee().map(MeleeComponents::variant)
    }

    /// Returns `true` if this is a ranged fighter with at least one round left.
    #[must_use]
    pub fn has_ammo(&self) -> bool {
        self.as_ranged().is_some_and(RangedComponents::has_ammo)
    }

    /// Rounds left, or `None` for melee fighters.
    #[must_use]
    pub fn remaining_ammo(&self) -> Option<u32> {
        self.as_ranged().map(RangedComponents::remaining_ammo)
    }

    /// Euclidean distance between this fighter and `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Fighter) -> f64 {
        geometry::distance(self.location, other.location)
    }

    /// Applies `amount` damage, flooring hit points at zero.
    pub fn hit(&mut self, amount: u32) {
        self.hit_points = self.hit_points.saturating_sub(amount);
    }

    /// Sets hit points directly.
    ///
    /// # Errors
    ///
    /// [`SkirmishError::HitPointsOutOfRange`] if `value` exceeds the maximum.
    pub fn set_hit_points(&mut self, value: u32) -> Result<()> {
        let max = self.max_hit_points();
        if value > max {
            return Err(SkirmishError::HitPointsOutOfRange { value, max });
        }
        self.hit_points = value;
        Ok(())
    }

    /// Sets a ranged fighter's ammunition directly.
    ///
    /// # Errors
    ///
    /// - [`SkirmishError::WrongArchetype`] for melee fighters
    /// - [`SkirmishError::AmmoOutOfRange`] if `value` exceeds the magazine
    pub fn set_remaining_ammo(&mut self, value: u32) -> Result<()> {
        let ranged = self.ranged_mut()?;
        let capacity = ranged.profile.magazine;
        if value > capacity {
            return Err(SkirmishError::AmmoOutOfRange { value, capacity });
        }
        ranged.ammo = value;
        Ok(())
    }

    /// Fires one round at `target`.
    ///
    /// Returns the damage applied.
    ///
    /// # Errors
    ///
    /// - [`SkirmishError::WrongArchetype`] if this is not a ranged fighter
    /// - [`SkirmishError::ActorDown`] if the shooter is dead
    /// - [`SkirmishError::OutOfAmmo`] if the magazine is empty
    /// - [`SkirmishError::TargetDown`] if the target is dead
    pub fn shoot(&mut self, target: &mut Fighter) -> Result<u32> {
        let ranged = self
            .as_ranged()
            .ok_or_else(|| self.wrong_archetype(Archetype::Ranged))?;
        if !self.is_alive() {
            return Err(SkirmishError::ActorDown {
                name: self.name.clone(),
            });
        }
        if !ranged.has_ammo() {
            return Err(SkirmishError::OutOfAmmo {
                name: self.name.clone(),
            });
        }
        if !target.is_alive() {
            return Err(SkirmishError::TargetDown {
                name: target.name.clone(),
            });
        }

        let damage = ranged.damage();
        self.ranged_mut()?.ammo -= 1;
        target.hit(damage);
        Ok(damage)
    }

    /// Refills a ranged fighter's magazine. Idempotent.
    ///
    /// # Errors
    ///
    /// [`SkirmishError::WrongArchetype`] if this is not a ranged fighter.
    pub fn reload(&mut self) -> Result<()> {
        self.ranged_mut()?.reload();
        Ok(())
    }

    /// Moves a melee fighter towards `target` by `min(speed, distance)`.
    ///
    /// Dead fighters do not move. Returns the fighter's location afterwards.
    ///
    /// # Errors
    ///
    /// - [`SkirmishError::WrongArchetype`] if this is not a melee fighter
    /// - [`SkirmishError::AlreadyAtTarget`] if both fighters share a location
    pub fn advance_towards(&mut self, target: &Fighter) -> Result<Point> {
        let speed = self.melee_components()?.speed();
        if !self.is_alive() {
            return Ok(self.location);
        }
        let distance = self.distance_to(target);
        if distance == 0.0 {
            return Err(SkirmishError::AlreadyAtTarget {
                name: self.name.clone(),
            });
        }

        self.location = geometry::move_towards(self.location, target.location, speed.min(distance))?;
        Ok(self.location)
    }

    /// Strikes `target` if it is strictly within reach.
    ///
    /// Returns the damage applied, or `None` if the target was out of reach
    /// (nothing happens in that case).
    ///
    /// # Errors
    ///
    /// - [`SkirmishError::WrongArchetype`] if this is not a melee fighter
    /// - [`SkirmishError::ActorDown`] if the attacker is dead
    pub fn slash(&mut self, target: &mut Fighter) -> Result<Option<u32>> {
        let melee = self.melee_components()?;
        if !self.is_alive() {
            return Err(SkirmishError::ActorDown {
                name: self.name.clone(),
            });
        }
        if !melee.in_reach(self.distance_to(target)) {
            return Ok(None);
        }

        let damage = melee.damage();
        target.hit(damage);
        Ok(Some(damage))
    }

    /// Takes one combat turn against `target`.
    ///
    /// Ranged fighters shoot if they have ammunition and reload otherwise.
    /// Melee fighters slash if the target is within reach and advance
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`SkirmishError::ActorDown`] if this fighter is dead, plus whatever the
    /// chosen action can return.
    pub fn act(&mut self, target: &mut Fighter) -> Result<Action> {
        if !self.is_alive() {
            return Err(SkirmishError::ActorDown {
                name: self.name.clone(),
            });
        }

        match self.archetype() {
            Archetype::Ranged => {
                if self.has_ammo() {
                    let damage = self.shoot(target)?;
                    Ok(Action::Shot { damage })
                } else {
                    self.reload()?;
                    Ok(Action::Reloaded)
                }
            }
            Archetype::Melee => {
                if let Some(damage) = self.slash(target)? {
                    return Ok(Action::Slashed { damage });
                }
                let from = self.location;
                let to = self.advance_towards(target)?;
                Ok(Action::Advanced { from, to })
            }
        }
    }

    fn ranged_mut(&mut self) -> Result<&mut RangedComponents> {
        match &mut self.inner {
            FighterInner::Ranged(ranged) => Ok(ranged),
            FighterInner::Melee(_) => Err(SkirmishError::WrongArchetype {
                name: self.name.clone(),
                expected: Archetype::Ranged,
            }),
        }
    }

    fn melee_components(&self) -> Result<&MeleeComponents> {
        self.as_melee()
            .ok_or_else(|| self.wrong_archetype(Archetype::Melee))
    }

    fn wrong_archetype(&self, expected: Archetype) -> SkirmishError {
        SkirmishError::WrongArchetype {
            name: self.name.clone(),
            expected,
        }
    }
}

impl fmt::Display for Fighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self.archetype() {
            Archetype::Ranged => 'R',
            Archetype::Melee => 'M',
        };
        if self.is_alive() {
            write!(f, "{code} {} {} {}", self.name, self.hit_points, self.location)
        } else {
            write!(f, "[{code} {}]", self.name)
        }
    }
}
