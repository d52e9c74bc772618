//! Force fields over particle buffers
//!
//! Pure functions over caller-owned packed xyz buffers. Each call rewrites
//! targets (or current positions, for damping) in place.

use std::collections::HashMap;

use nalgebra::Vector3;

use super::particles::{read_point, write_point};

/// Mean base position per category index
pub type Centroids = HashMap<u32, Vector3<f32>>;

/// Below this distance the outward direction is undefined; push along +Y
const MIN_REPEL_DISTANCE: f32 = 1e-3;

/// Linear falloff: `strength` at the centre, zero at `radius` and beyond
pub fn repel_force(distance: f32, radius: f32, strength: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    strength * (1.0 - distance.max(0.0) / radius)
}

/// Push particles inside `radius` of `hand` outward; everything else
/// springs back to base.
pub fn apply_repel(
    current: &[f32],
    target: &mut [f32],
    base: &[f32],
    hand: &Vector3<f32>,
    radius: f32,
    strength: f32,
) {
    let count = current.len() / 3;
    for i in 0..count {
        let p = read_point(current, i);
        let offset = p - hand;
        let distance = offset.norm();
        let force = repel_force(distance, radius, strength);

        if force > 0.0 {
            let direction = if distance > MIN_REPEL_DISTANCE {
                offset / distance
            } else {
                Vector3::y()
            };
            write_point(target, i, &(p + direction * force));
        } else {
            write_point(target, i, &read_point(base, i));
        }
    }
}

/// Pull every particle to its category centroid, or to the origin when no
/// categories are known.
pub fn apply_collapse(target: &mut [f32], categories: Option<(&Centroids, &[u32])>) {
    let count = target.len() / 3;
    for i in 0..count {
        let dest = categories
            .and_then(|(centroids, indices)| indices.get(i).and_then(|c| centroids.get(c)))
            .copied()
            .unwrap_or_else(Vector3::zeros);
        write_point(target, i, &dest);
    }
}

/// Targets return to the rest layout
pub fn apply_spring_back(target: &mut [f32], rest: &[f32]) {
    if target.len() == rest.len() {
        target.copy_from_slice(rest);
    }
}

/// Frame-rate independent damping:
/// `current += (target - current) * (1 - e^(-lambda * dt))`
pub fn damp_positions(current: &mut [f32], target: &[f32], dt: f32, lambda: f32) {
    if dt <= 0.0 {
        return;
    }
    let factor = 1.0 - (-lambda * dt).exp();
    for (c, t) in current.iter_mut().zip(target) {
        *c += (t - *c) * factor;
    }
}

/// Closest particle to `point` within `max_distance`, brute force
pub fn find_nearest(positions: &[f32], point: &Vector3<f32>, max_distance: f32) -> Option<usize> {
    let mut best = None;
    let mut best_dist = max_distance * max_distance;
    for i in 0..positions.len() / 3 {
        let d2 = (read_point(positions, i) - point).norm_squared();
        if d2 < best_dist {
            best_dist = d2;
            best = Some(i);
        }
    }
    best
}

/// Single pass: per-category sums and counts, then means
pub fn compute_centroids(base: &[f32], categories: &[u32]) -> Centroids {
    let mut sums: HashMap<u32, (Vector3<f32>, u32)> = HashMap::new();
    let count = (base.len() / 3).min(categories.len());
    for i in 0..count {
        let entry = sums
            .entry(categories[i])
            .or_insert_with(|| (Vector3::zeros(), 0));
        entry.0 += read_point(base, i);
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(cat, (sum, n))| (cat, sum / n as f32))
        .collect()
}
