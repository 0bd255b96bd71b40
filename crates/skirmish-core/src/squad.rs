//! Squad module: an owning roster of fighters with one leader.
//!
//! A [`Squad`] stores its fighters by value, so a fighter's lifetime is the
//! squad's lifetime and no fighter can sit in two rosters. Callers refer to
//! members through [`FighterId`] handles instead of holding borrows.
//!
//! # Ordering
//!
//! Roster order is admission order and never changes. The resolver walks the
//! roster in this order every round, so it is part of the observable
//! behavior.
//!
//! # Example
//!
//! ```
//! use skirmish_core::fighter::{Fighter, MeleeVariant};
//! use skirmish_core::geometry::Point;
//! use skirmish_core::squad::Squad;
//!
//! let mut squad = Squad::new(Fighter::ranged("Bart", Point::ORIGIN)?)?;
//! let kenji = squad.add(Fighter::melee("Kenji", Point::new(1.0, 1.0)?, MeleeVariant::Old)?)?;
//!
//! assert_eq!(squad.size(), 2);
//! assert_eq!(squad.leader().name(), "Bart");
//!
//! squad.set_leader(kenji)?;
//! assert_eq!(squad.leader().name(), "Kenji");
//! # Ok::<(), skirmish_core::error::SkirmishError>(())
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkirmishError};
use crate::fighter::{Archetype, Fighter, FighterFlags};
use crate::resolver::{self, BattleReport, EngagementConfig};
use crate::targeting;

/// Source of process-unique squad identifiers.
static NEXT_SQUAD_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a squad within this process.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SquadId(u64);

impl SquadId {
    fn next() -> Self {
        Self(NEXT_SQUAD_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SquadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SquadId({})", self.0)
    }
}

impl fmt::Display for SquadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a fighter: the owning squad plus the roster slot.
///
/// Handles are issued by [`Squad::new`] and [`Squad::add`] and stay valid for
/// the squad's lifetime, since fighters are never removed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FighterId {
    squad: SquadId,
    slot: usize,
}

impl FighterId {
    /// Builds a handle from its parts.
    ///
    /// A handle built this way is only useful if the slot exists in `squad`;
    /// lookups of anything else fail.
    #[must_use]
    pub const fn new(squad: SquadId, slot: usize) -> Self {
        Self { squad, slot }
    }

    /// The owning squad.
    #[must_use]
    pub const fn squad(self) -> SquadId {
        self.squad
    }

    /// Position in the roster.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.slot
    }
}

impl fmt::Debug for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FighterId({}:{})", self.squad.0, self.slot)
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.squad.0, self.slot)
    }
}

/// An owning roster of up to [`Squad::CAPACITY`] fighters with one leader.
///
/// # Invariants
///
/// - the roster is never empty and never exceeds [`Squad::CAPACITY`]
/// - `leader` always indexes a roster member
/// - exactly the leader carries [`FighterFlags::LEADER`]
/// - every member carries [`FighterFlags::ROSTERED`]
#[derive(Debug)]
pub struct Squad {
    id: SquadId,
    leader: usize,
    fighters: Vec<Fighter>,
}

impl Squad {
    /// Maximum roster size.
    pub const CAPACITY: usize = 10;

    /// Creates a squad whose first member and leader is `leader`.
    ///
    /// # Errors
    ///
    /// [`SkirmishError::AlreadyRostered`] if `leader` was already admitted to a
    /// squad (for instance a clone of a rostered fighter).
    pub fn new(mut leader: Fighter) -> Result<Self> {
        Self::check_free(&leader)?;
        leader.set_flag(FighterFlags::ROSTERED | FighterFlags::LEADER, true);

        let mut fighters = Vec::with_capacity(Self::CAPACITY);
        fighters.push(leader);
        Ok(Self {
            id: SquadId::next(),
            leader: 0,
            fighters,
        })
    }

    /// This squad's identifier.
    #[must_use]
    pub const fn id(&self) -> SquadId {
        self.id
    }

    /// Admits `fighter` at the end of the roster.
    ///
    /// # Errors
    ///
    /// - [`SkirmishError::SquadFull`] if the roster already holds
    ///   [`Squad::CAPACITY`] fighters; the roster is left unchanged
    /// - [`SkirmishError::AlreadyRostered`] if `fighter` belongs to a squad
    pub fn add(&mut self, mut fighter: Fighter) -> Result<FighterId> {
        if self.is_full() {
            return Err(SkirmishError::SquadFull {
                squad: self.id,
                capacity: Self::CAPACITY,
            });
        }
        Self::check_free(&fighter)?;

        fighter.set_flag(FighterFlags::ROSTERED, true);
        self.fighters.push(fighter);
        Ok(self.fighter_id(self.fighters.len() - 1))
    }

    /// Makes the fighter behind `id` the leader.
    ///
    /// # Errors
    ///
    /// - [`SkirmishError::NotAMember`] if `id` belongs to another squad
    /// - [`SkirmishError::UnknownFighter`] if the slot does not exist
    pub fn set_leader(&mut self, id: FighterId) -> Result<()> {
        let slot = self.resolve(id)?;
        self.promote(slot);
        Ok(())
    }

    /// The current leader.
    #[must_use]
    pub fn leader(&self) -> &Fighter {
        &self.fighters[self.leader]
    }

    /// Handle of the current leader.
    #[must_use]
    pub const fn leader_id(&self) -> FighterId {
        self.fighter_id(self.leader)
    }

    /// Read-only roster view in roster order.
    #[must_use]
    pub fn fighters(&self) -> &[Fighter] {
        &self.fighters
    }

    /// Looks up a member by handle.
    ///
    /// Returns `None` for handles of other squads or missing slots.
    #[must_use]
    pub fn get(&self, id: FighterId) -> Option<&Fighter> {
        if id.squad != self.id {
            return None;
        }
        self.fighters.get(id.slot)
    }

    /// Handles of every member in roster order.
    pub fn ids(&self) -> impl Iterator<Item = FighterId> + '_ {
        (0..self.fighters.len()).map(|slot| self.fighter_id(slot))
    }

    /// Members paired with their handles, in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (FighterId, &Fighter)> + '_ {
        self.fighters
            .iter()
            .enumerate()
            .map(|(slot, fighter)| (self.fighter_id(slot), fighter))
    }

    /// Number of members, living or dead.
    #[must_use]
    pub fn size(&self) -> usize {
        self.fighters.len()
    }

    /// Returns `true` when no more fighters can be admitted.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.fighters.len() >= Self::CAPACITY
    }

    /// Number of members still alive.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.fighters.iter().filter(|f| f.is_alive()).count()
    }

    /// Returns `true` once every member is dead.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.fighters.iter().all(|f| !f.is_alive())
    }

    /// Runs leader succession if the leader is dead.
    ///
    /// The living member nearest the fallen leader's location is promoted.
    /// Returns the handle of the (possibly new) leader, or `None` if nobody
    /// is left alive; in that case the leader is left pointing at the fallen
    /// one.
    pub fn ensure_living_leader(&mut self) -> Option<FighterId> {
        if self.leader().is_alive() {
            return Some(self.leader_id());
        }
        let slot = targeting::find_closest(self.leader().location(), &self.fighters)?;
        self.promote(slot);
        Some(self.leader_id())
    }

    /// Attacks `enemy` with the default [`EngagementConfig`].
    ///
    /// See [`resolver::attack`] for the protocol.
    ///
    /// # Errors
    ///
    /// Whatever [`resolver::attack`] returns.
    pub fn attack(&mut self, enemy: &mut Squad) -> Result<BattleReport> {
        resolver::attack(self, enemy, &EngagementConfig::default())
    }

    /// Attacks `enemy` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Whatever [`resolver::attack`] returns.
    pub fn attack_with(
        &mut self,
        enemy: &mut Squad,
        config: &EngagementConfig,
    ) -> Result<BattleReport> {
        resolver::attack(self, enemy, config)
    }

    pub(crate) fn fighter_mut(&mut self, slot: usize) -> &mut Fighter {
        &mut self.fighters[slot]
    }

    pub(crate) const fn fighter_id(&self, slot: usize) -> FighterId {
        FighterId::new(self.id, slot)
    }

    fn resolve(&self, id: FighterId) -> Result<usize> {
        if id.squad != self.id {
            return Err(SkirmishError::NotAMember { id, squad: self.id });
        }
        if id.slot >= self.fighters.len() {
            return Err(SkirmishError::UnknownFighter(id));
        }
        Ok(id.slot)
    }

    fn promote(&mut self, slot: usize) {
        self.fighters[self.leader].set_flag(FighterFlags::LEADER, false);
        self.leader = slot;
        self.fighters[slot].set_flag(FighterFlags::LEADER, true);
    }

    fn check_free(fighter: &Fighter) -> Result<()> {
        if fighter.is_rostered() {
            return Err(SkirmishError::AlreadyRostered {
                name: fighter.name().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Squad {
    /// Ranged members first, then melee, then the leader.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Squad {} ({}/{} alive)", self.id, self.alive_count(), self.size())?;
        for archetype in [Archetype::Ranged, Archetype::Melee] {
            for fighter in self.fighters.iter().filter(|x| x.archetype() == archetype) {
                writeln!(f, "  {fighter}")?;
            }
        }
        write!(f, "  leader: {}", self.leader())
    }
}

// =============================================================================
// Tests
// =============================================================================
