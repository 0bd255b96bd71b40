//! Combat resolver: runs one squad's attack on another to completion.
//!
//! # Protocol
//!
//! Each call to [`attack`]:
//! 1. runs leader succession on the friendly squad if its leader is dead
//! 2. focuses the enemy closest to the friendly leader; if there is none the
//!    battle is already decided and no round runs
//! 3. repeats rounds while both squads have a living member, each round being
//!    one pass over the friendly roster in roster order
//!
//! Only the friendly squad acts. Every living friendly fighter takes one turn
//! per round against the shared focus target (see
//! [`Fighter::act`](crate::fighter::Fighter::act)). When the target dies, the
//! next one is the living enemy closest to the friendly *leader*, not to the
//! fighter that landed the blow.
//!
//! # Termination
//!
//! The pass stops as soon as reacquisition finds no living enemy. A round cap
//! from [`EngagementConfig`] bounds configurations that cannot make progress
//! (for instance melee fighters with zero speed); reaching it ends the battle
//! as [`Outcome::Stalemate`].
//!
//! # Determinism
//!
//! There is no randomness: identical squads and configuration always produce
//! the same report and the same final state.

pub mod event;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::fighter::Action;
use crate::squad::Squad;
use crate::targeting;

pub use event::{CombatEvent, EventLog};

/// Tunables for [`attack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// Rounds after which an undecided battle is called a stalemate.
    pub max_rounds: u32,
}

impl EngagementConfig {
    /// Default round cap.
    pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;

    /// Config with the given round cap.
    #[must_use]
    pub const fn with_max_rounds(max_rounds: u32) -> Self {
        Self { max_rounds }
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }
}

/// How a battle ended, from the friendly squad's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every enemy is incapacitated.
    Victory,
    /// The friendly squad had nobody alive when the attack began.
    Defeat,
    /// The round cap was reached with both sides standing.
    Stalemate,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
            Self::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Result of a single [`attack`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    /// How the battle ended.
    pub outcome: Outcome,
    /// Rounds executed.
    pub rounds: u32,
    /// Everything that happened, in order.
    pub events: Vec<CombatEvent>,
}

impl BattleReport {
    /// Returns `true` for [`Outcome::Victory`].
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.outcome == Outcome::Victory
    }

    /// Events that happened in `round`.
    pub fn events_in_round(&self, round: u32) -> impl Iterator<Item = &CombatEvent> + '_ {
        self.events.iter().filter(move |e| e.round() == round)
    }
}

/// Resolves `friendly`'s attack on `enemy` until one side is incapacitated
/// or the round cap is hit.
///
/// Both squads are exclusively borrowed for the whole call, so nothing else
/// can observe or change them mid-battle. The enemy never acts.
///
/// # Errors
///
/// Propagates any error from a fighter's turn. With squads built through the
/// public API none is expected, since the resolver only hands living
/// fighters a living target.
///
/// # Example
///
/// ```
/// use skirmish_core::fighter::{Fighter, StatTable};
/// use skirmish_core::geometry::Point;
/// use skirmish_core::resolver::{attack, EngagementConfig, Outcome};
/// use skirmish_core::squad::Squad;
///
/// let mut friendly = Squad::new(Fighter::ranged("Bart", Point::ORIGIN)?)?;
/// let loadout = StatTable::standard().ranged_loadout();
/// let mut enemy = Squad::new(Fighter::with_hit_points("Lisa", Point::new(8.0, 0.0)?, loadout, 60)?)?;
///
/// let report = attack(&mut friendly, &mut enemy, &EngagementConfig::default())?;
/// assert_eq!(report.outcome, Outcome::Victory);
/// assert_eq!(enemy.leader().hit_points(), 0);
/// # Ok::<(), skirmish_core::error::SkirmishError>(())
/// ```
pub fn attack(
    friendly: &mut Squad,
    enemy: &mut Squad,
    config: &EngagementConfig,
) -> Result<BattleReport> {
    let mut log = EventLog::new();
    debug!(
        friendly = %friendly.id(),
        enemy = %enemy.id(),
        friendly_alive = friendly.alive_count(),
        enemy_alive = enemy.alive_count(),
        "battle started"
    );

    let previous_leader = friendly.leader_id();
    let Some(leader) = friendly.ensure_living_leader() else {
        info!(squad = %friendly.id(), "no living fighter to attack with");
        return Ok(finish(Outcome::Defeat, 0, log));
    };
    if leader != previous_leader {
        debug!(squad = %friendly.id(), %leader, "leader promoted");
        log.record(CombatEvent::LeaderPromoted {
            round: 0,
            squad: friendly.id(),
            leader,
        });
    }

    let Some(mut target) = targeting::find_closest(friendly.leader().location(), enemy.fighters())
    else {
        info!(enemy = %enemy.id(), "enemy already incapacitated");
        return Ok(finish(Outcome::Victory, 0, log));
    };
    log.record(CombatEvent::TargetAcquired {
        round: 0,
        target: enemy.fighter_id(target),
    });

    let mut round = 0;
    'battle: while friendly.alive_count() > 0 && !enemy.is_defeated() {
        if round >= config.max_rounds {
            warn!(
                max_rounds = config.max_rounds,
                enemy_alive = enemy.alive_count(),
                "round cap reached"
            );
            return Ok(finish(Outcome::Stalemate, round, log));
        }
        round += 1;

        for slot in 0..friendly.size() {
            let attacker_id = friendly.fighter_id(slot);
            let target_id = enemy.fighter_id(target);

            let attacker = friendly.fighter_mut(slot);
            if !attacker.is_alive() {
                continue;
            }
            let victim = enemy.fighter_mut(target);
            let action = attacker.act(victim)?;
            trace!(round, attacker = %attacker_id, target = %target_id, ?action, "turn");
            let killed = !victim.is_alive();

            log.record(match action {
                Action::Shot { damage } => CombatEvent::Shot {
                    round,
                    attacker: attacker_id,
                    target: target_id,
                    damage,
                },
                Action::Reloaded => CombatEvent::Reloaded {
                    round,
                    fighter: attacker_id,
                },
                Action::Slashed { damage } => CombatEvent::Slashed {
                    round,
                    attacker: attacker_id,
                    target: target_id,
                    damage,
                },
                Action::Advanced { from, to } => CombatEvent::Advanced {
                    round,
                    fighter: attacker_id,
                    from,
                    to,
                },
            });

            if killed {
                log.record(CombatEvent::Killed {
                    round,
                    attacker: attacker_id,
                    target: target_id,
                });
                match targeting::find_closest(friendly.leader().location(), enemy.fighters()) {
                    Some(next) => {
                        target = next;
                        debug!(round, target = %enemy.fighter_id(next), "target reacquired");
                        log.record(CombatEvent::TargetAcquired {
                            round,
                            target: enemy.fighter_id(next),
                        });
                    }
                    None => break 'battle,
                }
            }
        }
    }

    Ok(finish(Outcome::Victory, round, log))
}

fn finish(outcome: Outcome, rounds: u32, log: EventLog) -> BattleReport {
    info!(%outcome, rounds, events = log.len(), "battle finished");
    BattleReport {
        outcome,
        rounds,
        events: log.into_events(),
    }
}
