//! Independent battles resolved in parallel.
//!
//! An [`Engagement`] owns the two squads of one battle. Because a fighter
//! lives inside exactly one squad and a squad inside at most one engagement,
//! a slice of engagements is a set of disjoint battles that can be resolved
//! on separate threads with no locking.
//!
//! # Example
//!
//! ```
//! use skirmish_core::battle::{resolve_all, Engagement};
//! use skirmish_core::fighter::{Fighter, MeleeVariant};
//! use skirmish_core::geometry::Point;
//! use skirmish_core::resolver::EngagementConfig;
//! use skirmish_core::squad::Squad;
//!
//! let mut engagements = Vec::new();
//! for i in 0..4 {
//!     let friendly = Squad::new(Fighter::ranged(format!("gun-{i}"), Point::ORIGIN)?)?;
//!     let enemy = Squad::new(Fighter::melee(format!("blade-{i}"), Point::new(20.0, 0.0)?, MeleeVariant::Young)?)?;
//!     engagements.push(Engagement::new(friendly, enemy));
//! }
//!
//! let reports = resolve_all(&mut engagements, &EngagementConfig::default());
//! assert_eq!(reports.len(), 4);
//! assert!(reports.iter().all(|r| r.as_ref().is_ok_and(|r| r.is_victory())));
//! # Ok::<(), skirmish_core::error::SkirmishError>(())
//! ```

use rayon::prelude::*;

use crate::error::Result;
use crate::resolver::{self, BattleReport, EngagementConfig};
use crate::squad::Squad;

/// One battle: a friendly squad attacking an enemy squad.
#[derive(Debug)]
pub struct Engagement {
    friendly: Squad,
    enemy: Squad,
}

impl Engagement {
    /// Pairs two squads.
    #[must_use]
    pub const fn new(friendly: Squad, enemy: Squad) -> Self {
        Self { friendly, enemy }
    }

    /// The attacking squad.
    #[must_use]
    pub const fn friendly(&self) -> &Squad {
        &self.friendly
    }

    /// The defending squad.
    #[must_use]
    pub const fn enemy(&self) -> &Squad {
        &self.enemy
    }

    /// Runs the friendly squad's attack.
    ///
    /// # Errors
    ///
    /// Whatever [`resolver::attack`] returns.
    pub fn resolve(&mut self, config: &EngagementConfig) -> Result<BattleReport> {
        resolver::attack(&mut self.friendly, &mut self.enemy, config)
    }

    /// Gives the squads back.
    #[must_use]
    pub fn into_squads(self) -> (Squad, Squad) {
        (self.friendly, self.enemy)
    }
}

/// Resolves every engagement on the rayon pool.
///
/// Reports come back in the same order as `engagements`. Each battle is
/// deterministic on its own, so the results do not depend on scheduling.
pub fn resolve_all(
    engagements: &mut [Engagement],
    config: &EngagementConfig,
) -> Vec<Result<BattleReport>> {
    engagements
        .par_iter_mut()
        .map(|engagement| engagement.resolve(config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fighter::{Fighter, MeleeVariant};
    use crate::geometry::Point;
    use crate::resolver::Outcome;

    fn engagement(distance: f64) -> Engagement {
        let friendly = Squad::new(
            Fighter::melee("blade", Point::ORIGIN, MeleeVariant::Trained).unwrap(),
        )
        .unwrap();
        let enemy = Squad::new(Fighter::ranged("gun", Point::new(distance, 0.0).unwrap()).unwrap())
            .unwrap();
        Engagement::new(friendly, enemy)
    }

    #[test]
    fn parallel_matches_sequential() {
        let distances = [1.0, 13.0, 40.0, 75.5, 200.0];
        let config = EngagementConfig::default();

        let mut parallel: Vec<_> = distances.iter().map(|&d| engagement(d)).collect();
        let parallel_reports: Vec<_> = resolve_all(&mut parallel, &config)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        for (i, &d) in distances.iter().enumerate() {
            let mut single = engagement(d);
            let report = single.resolve(&config).unwrap();
            assert_eq!(report.outcome, parallel_reports[i].outcome);
            assert_eq!(report.rounds, parallel_reports[i].rounds);
            assert_eq!(report.events.len(), parallel_reports[i].events.len());
        }
    }

    #[test]
    fn engagements_keep_their_squads() {
        let mut battles = vec![engagement(5.0)];
        let reports = resolve_all(&mut battles, &EngagementConfig::default());
        assert_eq!(reports[0].as_ref().unwrap().outcome, Outcome::Victory);

        let (friendly, enemy) = battles.remove(0).into_squads();
        assert!(friendly.leader().is_alive());
        assert!(enemy.is_defeated());
    }

    #[test]
    fn empty_batch() {
        assert!(resolve_all(&mut [], &EngagementConfig::default()).is_empty());
    }
}
