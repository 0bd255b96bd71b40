//! # Skirmish Core
//!
//! Deterministic squad-versus-squad combat resolution.
//!
//! Fighters stand on a continuous 2D plane and belong to squads of up to ten.
//! A squad attacks another squad and the [`resolver`] plays out rounds until
//! one side is incapacitated.
//!
//! ## Architecture
//!
//! - **Geometry** ([`geometry`]): finite points, distance, bounded movement
//! - **Fighters** ([`fighter`]): ranged and melee archetypes built from the
//!   stat presets in [`fighter::profile`]
//! - **Squads** ([`squad`]): owning rosters with leader succession
//! - **Targeting** ([`targeting`]): nearest-living-fighter selection
//! - **Resolver** ([`resolver`]): the round loop and its event log
//! - **Battles** ([`battle`]): independent engagements resolved in parallel
//!
//! ## Usage
//!
//! ```
//! use skirmish_core::fighter::{Fighter, MeleeVariant};
//! use skirmish_core::geometry::Point;
//! use skirmish_core::resolver::Outcome;
//! use skirmish_core::squad::Squad;
//!
//! let mut friendly = Squad::new(Fighter::ranged("Bart", Point::ORIGIN)?)?;
//! friendly.add(Fighter::melee("Kenji", Point::new(1.0, 0.0)?, MeleeVariant::Trained)?)?;
//!
//! let mut enemy = Squad::new(Fighter::melee("Ivan", Point::new(30.0, 0.0)?, MeleeVariant::Old)?)?;
//!
//! let report = friendly.attack(&mut enemy)?;
//! assert_eq!(report.outcome, Outcome::Victory);
//! assert!(enemy.is_defeated());
//! # Ok::<(), skirmish_core::error::SkirmishError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod battle;
pub mod error;
pub mod fighter;
pub mod geometry;
pub mod resolver;
pub mod squad;
pub mod targeting;

pub use battle::{resolve_all, Engagement};
pub use error::{ErrorKind, Result, SkirmishError};
pub use fighter::{Archetype, Fighter, MeleeVariant, StatTable};
pub use geometry::Point;
pub use resolver::{attack, BattleReport, CombatEvent, EngagementConfig, Outcome};
pub use squad::{FighterId, Squad, SquadId};

#[cfg(test)]
mod tests;
