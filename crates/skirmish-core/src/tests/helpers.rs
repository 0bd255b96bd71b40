//! Test helper functions for building fighters, squads and battles.
//!
//! Factory functions here panic on invalid input; tests only pass them
//! literal, known-good values.

use tracing_subscriber::EnvFilter;

use crate::fighter::{Fighter, Loadout, MeleeProfile, MeleeVariant, StatTable};
use crate::geometry::Point;
use crate::resolver::{BattleReport, CombatEvent};
use crate::squad::{FighterId, Squad};

/// Installs a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Fighter Factory Functions
// =============================================================================

/// Point shorthand.
pub fn at(x: f64, y: f64) -> Point {
    Point::new(x, y).unwrap()
}

/// Standard ranged fighter.
pub fn ranged(name: &str, x: f64, y: f64) -> Fighter {
    Fighter::ranged(name, at(x, y)).unwrap()
}

/// Standard ranged fighter starting with `hp` hit points.
pub fn ranged_with_hp(name: &str, x: f64, y: f64, hp: u32) -> Fighter {
    let loadout = StatTable::standard().ranged_loadout();
    Fighter::with_hit_points(name, at(x, y), loadout, hp).unwrap()
}

/// Standard melee fighter of the given variant.
pub fn melee(name: &str, x: f64, y: f64, variant: MeleeVariant) -> Fighter {
    Fighter::melee(name, at(x, y), variant).unwrap()
}

/// Melee fighter with custom speed and reach.
pub fn custom_melee(name: &str, x: f64, y: f64, speed: f64, reach: f64) -> Fighter {
    let loadout = Loadout::Melee {
        variant: MeleeVariant::Trained,
        profile: MeleeProfile {
            speed,
            reach,
            ..MeleeProfile::TRAINED
        },
    };
    Fighter::new(name, at(x, y), loadout).unwrap()
}

// =============================================================================
// Squad Setup
// =============================================================================

/// Builds a squad; the first fighter leads.
///
/// # Panics
///
/// Panics if `fighters` is empty or holds more than a full roster.
pub fn squad_of(fighters: Vec<Fighter>) -> Squad {
    let mut fighters = fighters.into_iter();
    let mut squad = Squad::new(fighters.next().expect("at least one fighter")).unwrap();
    for fighter in fighters {
        squad.add(fighter).unwrap();
    }
    squad
}

/// Ten fighters in two columns at `x`, ranged on even slots.
#[allow(clippy::cast_precision_loss)]
pub fn full_squad(prefix: &str, x: f64) -> Squad {
    let fighters = (0..Squad::CAPACITY)
        .map(|i| {
            let y = (i / 2) as f64 * 3.0;
            let x = x + (i % 2) as f64;
            let name = format!("{prefix}-{i}");
            if i % 2 == 0 {
                ranged(&name, x, y)
            } else {
                melee(&name, x, y, MeleeVariant::ALL[i % 3])
            }
        })
        .collect();
    squad_of(fighters)
}

// =============================================================================
// Report Queries
// =============================================================================

/// Victims in kill order.
pub fn kills(report: &BattleReport) -> Vec<FighterId> {
    report
        .events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::Killed { target, .. } => Some(*target),
            _ => None,
        })
        .collect()
}

/// Rounds in which `fighter` advanced, in order.
pub fn advance_rounds(report: &BattleReport, fighter: FighterId) -> Vec<u32> {
    report
        .events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::Advanced { round, fighter: f, .. } if *f == fighter => Some(*round),
            _ => None,
        })
        .collect()
}

/// Round of the first strike landed by `fighter`, if any.
pub fn first_slash_round(report: &BattleReport, fighter: FighterId) -> Option<u32> {
    report.events.iter().find_map(|e| match e {
        CombatEvent::Slashed { round, attacker, .. } if *attacker == fighter => Some(*round),
        _ => None,
    })
}

/// Sum of hit points across a roster.
pub fn total_hit_points(squad: &Squad) -> u64 {
    squad.fighters().iter().map(|f| u64::from(f.hit_points())).sum()
}
