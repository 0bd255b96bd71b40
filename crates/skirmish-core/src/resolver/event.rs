//! Combat events recorded while a battle is resolved.
//!
//! The resolver appends one [`CombatEvent`] per observable change, in the
//! order the changes happen. The log is purely informational: replaying it is
//! not required to reconstruct squad state, but it is enough to explain every
//! hit point lost and every step taken.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::squad::{FighterId, SquadId};

/// Something that happened during `attack`.
///
/// Every variant carries the round it happened in. Round `0` covers the
/// bookkeeping done before the first round (leader succession and initial
/// target acquisition).
///
/// # Variants
///
/// - `LeaderPromoted`: succession replaced a fallen leader
/// - `TargetAcquired`: the squad picked a new focus target
/// - `Shot` / `Reloaded`: ranged turns
/// - `Slashed` / `Advanced`: melee turns
/// - `Killed`: a target dropped to zero hit points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A new leader was promoted.
    LeaderPromoted {
        /// Round of the promotion
        round: u32,
        /// Squad whose leader changed
        squad: SquadId,
        /// The new leader
        leader: FighterId,
    },
    /// The attacking squad focused a new target.
    TargetAcquired {
        /// Round of the acquisition
        round: u32,
        /// The enemy now being attacked
        target: FighterId,
    },
    /// A ranged fighter fired.
    Shot {
        /// Round of the shot
        round: u32,
        /// Fighter that fired
        attacker: FighterId,
        /// Fighter that was hit
        target: FighterId,
        /// Damage applied
        damage: u32,
    },
    /// A ranged fighter refilled its magazine.
    Reloaded {
        /// Round of the reload
        round: u32,
        /// Fighter that reloaded
        fighter: FighterId,
    },
    /// A melee fighter struck.
    Slashed {
        /// Round of the strike
        round: u32,
        /// Fighter that struck
        attacker: FighterId,
        /// Fighter that was hit
        target: FighterId,
        /// Damage applied
        damage: u32,
    },
    /// A melee fighter closed distance.
    Advanced {
        /// Round of the move
        round: u32,
        /// Fighter that moved
        fighter: FighterId,
        /// Location before the move
        from: Point,
        /// Location after the move
        to: Point,
    },
    /// A target was incapacitated.
    Killed {
        /// Round of the kill
        round: u32,
        /// Fighter that dealt the final blow
        attacker: FighterId,
        /// Fighter that died
        target: FighterId,
    },
}

impl CombatEvent {
    /// Round this event happened in.
    #[must_use]
    pub const fn round(&self) -> u32 {
        match self {
            Self::LeaderPromoted { round, .. }
            | Self::TargetAcquired { round, .. }
            | Self::Shot { round, .. }
            | Self::Reloaded { round, .. }
            | Self::Slashed { round, .. }
            | Self::Advanced { round, .. }
            | Self::Killed { round, .. } => *round,
        }
    }

    /// Returns the fighter the event is mainly about.
    ///
    /// That is the actor for turns, the victim for kills, and the new focus
    /// or leader for bookkeeping events.
    #[must_use]
    pub const fn primary_fighter(&self) -> FighterId {
        match self {
            Self::LeaderPromoted { leader, .. } => *leader,
            Self::TargetAcquired { target, .. } | Self::Killed { target, .. } => *target,
            Self::Shot { attacker, .. } | Self::Slashed { attacker, .. } => *attacker,
            Self::Reloaded { fighter, .. } | Self::Advanced { fighter, .. } => *fighter,
        }
    }

    /// Damage applied by this event, if any.
    #[must_use]
    pub const fn damage(&self) -> Option<u32> {
        match self {
            Self::Shot { damage, .. } | Self::Slashed { damage, .. } => Some(*damage),
            _ => None,
        }
    }
}

/// Append-only, ordered record of [`CombatEvent`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<CombatEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn record(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total damage carried by the recorded events.
    #[must_use]
    pub fn total_damage(&self) -> u64 {
        self.events
            .iter()
            .filter_map(CombatEvent::damage)
            .map(u64::from)
            .sum()
    }

    /// Consumes the log, returning its events in order.
    #[must_use]
    pub fn into_events(self) -> Vec<CombatEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(slot: usize) -> FighterId {
        FighterId::new(SquadId::from_raw(1), slot)
    }

    mod event_tests {
        use super::*;

        #[test]
        fn round_reads_every_variant() {
            let events = [
                CombatEvent::TargetAcquired { round: 0, target: id(0) },
                CombatEvent::Reloaded { round: 3, fighter: id(1) },
                CombatEvent::Killed { round: 7, attacker: id(1), target: id(2) },
            ];
            let rounds: Vec<_> = events.iter().map(CombatEvent::round).collect();
            assert_eq!(rounds, vec![0, 3, 7]);
        }

        #[test]
        fn primary_fighter_is_victim_for_kills() {
            let event = CombatEvent::Killed { round: 1, attacker: id(0), target: id(4) };
            assert_eq!(event.primary_fighter(), id(4));
        }

        #[test]
        fn only_hits_carry_damage() {
            let shot = CombatEvent::Shot { round: 1, attacker: id(0), target: id(1), damage: 10 };
            let reload = CombatEvent::Reloaded { round: 1, fighter: id(0) };
            assert_eq!(shot.damage(), Some(10));
            assert_eq!(reload.damage(), None);
        }

        #[test]
        fn events_are_serializable() {
            let event = CombatEvent::Advanced {
                round: 2,
                fighter: id(3),
                from: Point::new(0.0, 0.0).unwrap(),
                to: Point::new(2.0, 0.0).unwrap(),
            };
            let json = serde_json::to_string(&event).unwrap();
            let back: CombatEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, back);
        }
    }

    mod log_tests {
        use super::*;

        #[test]
        fn new_log_is_empty() {
            let log = EventLog::new();
            assert!(log.is_empty());
            assert_eq!(log.len(), 0);
            assert_eq!(log.total_damage(), 0);
        }

        #[test]
        fn record_keeps_order() {
            let mut log = EventLog::new();
            log.record(CombatEvent::Reloaded { round: 1, fighter: id(0) });
            log.record(CombatEvent::Reloaded { round: 1, fighter: id(1) });
            assert_eq!(log.events()[0].primary_fighter(), id(0));
            assert_eq!(log.into_events()[1].primary_fighter(), id(1));
        }

        #[test]
        fn total_damage_sums_hits() {
            let mut log = EventLog::new();
            log.record(CombatEvent::Shot { round: 1, attacker: id(0), target: id(1), damage: 10 });
            log.record(CombatEvent::Slashed { round: 1, attacker: id(2), target: id(1), damage: 40 });
            log.record(CombatEvent::Killed { round: 1, attacker: id(2), target: id(1) });
            assert_eq!(log.total_damage(), 50);
        }
    }
}
