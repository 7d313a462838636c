// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Point Distances
// ─────────────────────────────────────────────────────────────────────
//! Euclidean helpers over input feature vectors.

use syncnet_types::{SyncError, SyncResult};

/// Squared Euclidean distance. Both points must share a dimension.
#[inline]
pub fn euclidean_distance_square(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    euclidean_distance_square(a, b).sqrt()
}

/// Check that `points` is non-empty, rectangular and finite. Returns the
/// dimension.
pub fn validate_points(points: &[Vec<f64>]) -> SyncResult<usize> {
    let first = points
        .first()
        .ok_or_else(|| SyncError::Validation("no input points".to_string()))?;
    let dim = first.len();
    if dim == 0 {
        return Err(SyncError::Validation("points have no coordinates".to_string()));
    }
    for (i, p) in points.iter().enumerate() {
        if p.len() != dim {
            return Err(SyncError::Validation(format!(
                "point {i} has {} coordinates, expected {dim}",
                p.len()
            )));
        }
        if p.iter().any(|v| !v.is_finite()) {
            return Err(SyncError::Validation(format!(
                "point {i} has a non-finite coordinate"
            )));
        }
    }
    Ok(dim)
}

/// Every distinct distance between two points, ascending. Empty with
/// fewer than two points.
pub fn distinct_pairwise_distances(points: &[Vec<f64>]) -> Vec<f64> {
    let n = points.len();
    let mut distances = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            distances.push(euclidean_distance(&points[i], &points[j]));
        }
    }
    distances.sort_unstable_by(f64::total_cmp);
    distances.dedup();
    distances
}

/// Mean distance from each point to its `k` nearest neighbours.
pub fn average_neighbor_distance(points: &[Vec<f64>], k: usize) -> SyncResult<f64> {
    let n = points.len();
    if k == 0 || k >= n {
        return Err(SyncError::Config(format!(
            "neighbour count {k} must be in [1, {})",
            n
        )));
    }

    let mut total = 0.0;
    let mut row = Vec::with_capacity(n - 1);
    for (i, p) in points.iter().enumerate() {
        row.clear();
        row.extend(
            points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, q)| euclidean_distance(p, q)),
        );
        row.sort_unstable_by(f64::total_cmp);
        total += row[..k].iter().sum::<f64>();
    }
    Ok(total / (k * n) as f64)
}
