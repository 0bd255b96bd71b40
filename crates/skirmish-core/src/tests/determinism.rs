//! Determinism verification tests.
//!
//! The resolver has no randomness, so these tests check that:
//! - Identical setups produce identical reports and final rosters
//! - Parallel batch resolution matches one-at-a-time resolution
//!
//! Squad ids differ between runs, so events are compared by slot.

use crate::battle::{resolve_all, Engagement};
use crate::fighter::{Fighter, MeleeVariant};
use crate::resolver::{BattleReport, EngagementConfig};
use crate::squad::Squad;

use super::helpers::{full_squad, init_tracing, melee, ranged, squad_of};

/// Event stream with squad ids stripped.
fn fingerprint(report: &BattleReport) -> Vec<(u32, usize, Option<u32>)> {
    report
        .events
        .iter()
        .map(|e| (e.round(), e.primary_fighter().slot(), e.damage()))
        .collect()
}

fn mixed_battle() -> (Squad, Squad) {
    let friendly = squad_of(vec![
        ranged("a", 0.0, 0.0),
        melee("b", -3.0, 2.0, MeleeVariant::Young),
        melee("c", 4.0, -1.0, MeleeVariant::Old),
        ranged("d", 1.5, 7.25),
    ]);
    let enemy = squad_of(vec![
        melee("w", 40.0, 10.0, MeleeVariant::Trained),
        ranged("x", 35.5, -12.0),
        melee("y", 60.0, 0.0, MeleeVariant::Old),
        ranged("z", 38.0, 9.0),
    ]);
    (friendly, enemy)
}

fn roster(squad: &Squad) -> Vec<Fighter> {
    squad.fighters().to_vec()
}

#[test]
fn same_setup_same_battle() {
    init_tracing();
    let (mut f1, mut e1) = mixed_battle();
    let (mut f2, mut e2) = mixed_battle();

    let r1 = f1.attack(&mut e1).unwrap();
    let r2 = f2.attack(&mut e2).unwrap();

    assert_eq!(r1.outcome, r2.outcome);
    assert_eq!(r1.rounds, r2.rounds);
    assert_eq!(fingerprint(&r1), fingerprint(&r2));
    assert_eq!(roster(&f1), roster(&f2));
    assert_eq!(roster(&e1), roster(&e2));
}

#[test]
fn repeated_full_battles_agree() {
    let runs: Vec<_> = (0..5)
        .map(|_| {
            let mut friendly = full_squad("blue", 0.0);
            let mut enemy = full_squad("red", 45.0);
            let report = friendly.attack(&mut enemy).unwrap();
            (fingerprint(&report), roster(&friendly), roster(&enemy))
        })
        .collect();

    for run in &runs[1..] {
        assert_eq!(run, &runs[0]);
    }
}

#[test]
fn parallel_batch_matches_sequential() {
    init_tracing();
    let offsets = [10.0, 25.0, 45.0, 80.0, 120.0, 333.3];
    let config = EngagementConfig::default();

    let mut batch: Vec<_> = offsets
        .iter()
        .map(|&x| Engagement::new(full_squad("blue", 0.0), full_squad("red", x)))
        .collect();
    let parallel = resolve_all(&mut batch, &config);

    for (i, &x) in offsets.iter().enumerate() {
        let mut friendly = full_squad("blue", 0.0);
        let mut enemy = full_squad("red", x);
        let sequential = friendly.attack_with(&mut enemy, &config).unwrap();
        let from_batch = parallel[i].as_ref().unwrap();

        assert_eq!(sequential.outcome, from_batch.outcome);
        assert_eq!(fingerprint(&sequential), fingerprint(from_batch));
        assert_eq!(roster(&enemy), roster(batch[i].enemy()));
        assert_eq!(roster(&friendly), roster(batch[i].friendly()));
    }
}

#[test]
fn report_serializes_stably() {
    let mut friendly = squad_of(vec![ranged("a", 0.0, 0.0), ranged("b", 2.0, 0.0)]);
    let mut enemy = squad_of(vec![ranged("x", 9.0, 9.0), melee("y", 12.0, 0.0, MeleeVariant::Old)]);
    let report = friendly.attack(&mut enemy).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: BattleReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report, back);
    assert_eq!(serde_json::to_string(&back).unwrap(), json);
}
