// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Synchronisation Order
// ─────────────────────────────────────────────────────────────────────
//! Order metrics over a phase vector:
//!
//!   global:  R = |⟨e^{iθ}⟩| ∈ [0, 1]
//!   local:   ⟨exp(-|θ_j - θ_i|)⟩ over connected pairs (i, j)
//!
//! Phase differences are taken on the circle, in [0, π].

use std::f64::consts::TAU;

use syncnet_types::SyncDynamic;

/// Shortest angular distance between two phases.
#[inline]
pub fn phase_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

/// Kuramoto order parameter R = |⟨e^{iθ}⟩|.
pub fn global_order(phases: &[f64]) -> f64 {
    let n = phases.len() as f64;
    if n < 1.0 {
        return 0.0;
    }
    let (sum_sin, sum_cos) = phases
        .iter()
        .fold((0.0, 0.0), |(s, c), &th| (s + th.sin(), c + th.cos()));
    let r = ((sum_sin / n).powi(2) + (sum_cos / n).powi(2)).sqrt();
    r.clamp(0.0, 1.0)
}

/// Mean phase agreement over every directed edge; 0 without edges.
pub fn local_order(phases: &[f64], neighbors: &[Vec<usize>]) -> f64 {
    let mut amount = 0.0;
    let mut edges = 0usize;
    for (i, row) in neighbors.iter().enumerate() {
        for &j in row {
            amount += (-phase_distance(phases[j], phases[i])).exp();
            edges += 1;
        }
    }
    if edges == 0 {
        return 0.0;
    }
    amount / edges as f64
}

/// Global order of every snapshot in a dynamic.
pub fn order_series(dynamic: &SyncDynamic) -> Vec<f64> {
    dynamic
        .snapshots
        .iter()
        .map(|s| global_order(&s.phases))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syncnet_types::{SyncSnapshot, Termination};

    #[test]
    fn test_global_order_sync() {
        let r = global_order(&[0.5; 8]);
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_global_order_desync() {
        let phases: Vec<f64> = (0..4).map(|i| i as f64 * TAU / 4.0).collect();
        assert!(global_order(&phases) < 1e-9);
    }

    #[test]
    fn test_global_order_empty() {
        assert_eq!(global_order(&[]), 0.0);
    }

    #[test]
    fn test_phase_distance_wraps() {
        assert!((phase_distance(0.1, TAU - 0.1) - 0.2).abs() < 1e-12);
        assert!((phase_distance(3.0 * TAU + 1.0, 1.0)).abs() < 1e-9);
        assert!(phase_distance(0.0, std::f64::consts::PI) <= std::f64::consts::PI + 1e-12);
    }

    #[test]
    fn test_local_order() {
        let neighbors = vec![vec![1], vec![0], vec![]];
        assert!((local_order(&[1.0, 1.0, 3.0], &neighbors) - 1.0).abs() < 1e-12);
        let spread = local_order(&[0.0, 1.0, 3.0], &neighbors);
        assert!((spread - (-1.0f64).exp()).abs() < 1e-12);
        assert_eq!(local_order(&[0.0, 1.0], &[vec![], vec![]]), 0.0);
    }

    #[test]
    fn test_order_series() {
        let dynamic = SyncDynamic {
            snapshots: vec![
                SyncSnapshot::new(0.0, vec![0.0, std::f64::consts::PI]),
                SyncSnapshot::new(0.1, vec![1.0, 1.0]),
            ],
            termination: Termination::Converged,
            steps: 1,
            order: 1.0,
        };
        let series = order_series(&dynamic);
        assert!(series[0] < 1e-9);
        assert!((series[1] - 1.0).abs() < 1e-9);
    }
}
