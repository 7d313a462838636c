// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Sync Ensembles
// ─────────────────────────────────────────────────────────────────────
//! Groups of oscillators whose final phases agree within a tolerance.
//! Both extractors are deterministic: groups are listed by their lowest
//! member and members are ascending.

use std::collections::VecDeque;

use crate::order::phase_distance;

/// Phase-only grouping: each oscillator joins the first group that
/// already holds a member within `tolerance`, else starts a new one.
pub fn sync_ensembles(phases: &[f64], tolerance: f64) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, &theta) in phases.iter().enumerate() {
        let home = groups.iter_mut().find(|group| {
            group
                .iter()
                .any(|&m| phase_distance(phases[m], theta) < tolerance)
        });
        match home {
            Some(group) => group.push(i),
            None => groups.push(vec![i]),
        }
    }
    groups
}

/// Graph-aware grouping: oscillators are joined along edges whose
/// endpoints differ by less than `tolerance`.
pub fn connected_ensembles(
    phases: &[f64],
    neighbors: &[Vec<usize>],
    tolerance: f64,
) -> Vec<Vec<usize>> {
    let n = phases.len();
    let mut visited = vec![false; n];
    let mut groups = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);
        let mut group = Vec::new();

        while let Some(u) = queue.pop_front() {
            group.push(u);
            for &v in neighbors.get(u).map_or(&[][..], |row| row.as_slice()) {
                if !visited[v] && phase_distance(phases[u], phases[v]) < tolerance {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }

        group.sort_unstable();
        groups.push(group);
    }
    groups
}
