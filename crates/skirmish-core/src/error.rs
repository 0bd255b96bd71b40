//! Error types for the combat engine.
//!
//! Every public operation validates its preconditions before touching any
//! state, so an `Err` always means nothing was mutated.
//!
//! Variants are grouped into coarse buckets through [`ErrorKind`], which is
//! what callers usually match on.

use std::fmt;

use thiserror::Error;

use crate::fighter::Archetype;
use crate::geometry::Point;
use crate::squad::{FighterId, SquadId};

/// Result type alias using [`SkirmishError`].
pub type Result<T> = std::result::Result<T, SkirmishError>;

/// Coarse classification of a [`SkirmishError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input (empty name, non-finite coordinate, negative step).
    Validation,
    /// A value lies outside an archetype-defined bound.
    Range,
    /// The squad roster is already full.
    Capacity,
    /// A handle does not resolve to a fighter.
    Reference,
    /// The operation is invalid for the current state of a fighter or squad.
    State,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Range => write!(f, "range"),
            Self::Capacity => write!(f, "capacity"),
            Self::Reference => write!(f, "reference"),
            Self::State => write!(f, "state"),
        }
    }
}

/// Top-level error type for the combat engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkirmishError {
    /// Fighter names must be non-empty.
    #[error("fighter name cannot be empty")]
    EmptyName,

    /// A coordinate was NaN or infinite.
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate {
        /// X component as supplied.
        x: f64,
        /// Y component as supplied.
        y: f64,
    },

    /// A step length was negative or not finite.
    #[error("step length {0} must be a finite non-negative number")]
    InvalidStep(f64),

    /// Direction is undefined between two identical points.
    #[error("cannot step from {0} towards itself")]
    CoincidentPoints(Point),

    /// A stat profile or stat table failed validation.
    #[error("invalid stat table: {0}")]
    InvalidStatTable(String),

    /// Requested hit points exceed the archetype maximum.
    #[error("hit points {value} exceed maximum {max}")]
    HitPointsOutOfRange {
        /// Requested value.
        value: u32,
        /// Archetype maximum.
        max: u32,
    },

    /// Requested ammunition exceeds the magazine.
    #[error("ammunition {value} exceeds magazine capacity {capacity}")]
    AmmoOutOfRange {
        /// Requested value.
        value: u32,
        /// Magazine capacity.
        capacity: u32,
    },

    /// The squad already holds the maximum number of fighters.
    #[error("squad {squad} is full ({capacity} fighters)")]
    SquadFull {
        /// The full squad.
        squad: SquadId,
        /// Roster capacity.
        capacity: usize,
    },

    /// A fighter handle names a slot that does not exist.
    #[error("fighter {0} does not exist")]
    UnknownFighter(FighterId),

    /// A fighter handle belongs to a different squad.
    #[error("fighter {id} is not a member of squad {squad}")]
    NotAMember {
        /// The offending handle.
        id: FighterId,
        /// The squad that was asked.
        squad: SquadId,
    },

    /// The fighter is already rostered to a squad.
    #[error("{name} already belongs to a squad")]
    AlreadyRostered {
        /// Fighter name.
        name: String,
    },

    /// The acting fighter is dead.
    #[error("{name} is dead and cannot act")]
    ActorDown {
        /// Fighter name.
        name: String,
    },

    /// The target is already dead.
    #[error("target {name} is already dead")]
    TargetDown {
        /// Target name.
        name: String,
    },

    /// A ranged fighter tried to shoot with an empty magazine.
    #[error("{name} is out of ammunition")]
    OutOfAmmo {
        /// Fighter name.
        name: String,
    },

    /// An archetype-specific operation was called on the wrong archetype.
    #[error("{name} is not a {expected} fighter")]
    WrongArchetype {
        /// Fighter name.
        name: String,
        /// Archetype the operation requires.
        expected: Archetype,
    },

    /// A melee fighter tried to advance onto a target it already shares a point with.
    #[error("{name} is already at its target's location")]
    AlreadyAtTarget {
        /// Fighter name.
        name: String,
    },
}

impl SkirmishError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyName
            | Self::NonFiniteCoordinate { .. }
            | Self::InvalidStep(_)
            | Self::CoincidentPoints(_)
            | Self::InvalidStatTable(_) => ErrorKind::Validation,
            Self::HitPointsOutOfRange { .. } | Self::AmmoOutOfRange { .. } => ErrorKind::Range,
            Self::SquadFull { .. } => ErrorKind::Capacity,
            Self::UnknownFighter(_) => ErrorKind::Reference,
            Self::NotAMember { .. }
            | Self::AlreadyRostered { .. }
            | Self::ActorDown { .. }
            | Self::TargetDown { .. }
            | Self::OutOfAmmo { .. }
            | Self::WrongArchetype { .. }
            | Self::AlreadyAtTarget { .. } => ErrorKind::State,
        }
    }
}
