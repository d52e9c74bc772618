//! Hub-and-spoke layout
//!
//! The best-connected node moves to the origin; every other node sits on a
//! Fibonacci sphere around it and links only to the hub.

use nalgebra::Vector3;

use super::sphere::fibonacci_point;
use super::types::{GraphEdge, LayoutResult};
use crate::config::LayoutConfig;
use crate::physics::{read_point, write_point};

/// Highest-degree node; ties go to the lowest index
fn highest_degree(count: usize, edges: &[GraphEdge]) -> Option<usize> {
    let mut degree = vec![0u32; count];
    for e in edges {
        if e.source < count && e.target < count {
            degree[e.source] += 1;
            degree[e.target] += 1;
        }
    }
    let mut best: Option<(usize, u32)> = None;
    for (i, &d) in degree.iter().enumerate() {
        if d > 0 && best.map_or(true, |(_, bd)| d > bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Node closest to the mean position
fn nearest_to_centroid(base: &[f32], count: usize) -> usize {
    let centroid = (0..count)
        .map(|i| read_point(base, i))
        .fold(Vector3::zeros(), |acc, p| acc + p)
        / count as f32;

    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for i in 0..count {
        let d = (read_point(base, i) - centroid).norm_squared();
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

pub fn pick_hub(base: &[f32], edges: &[GraphEdge]) -> Option<usize> {
    let count = base.len() / 3;
    if count == 0 {
        return None;
    }
    Some(highest_degree(count, edges).unwrap_or_else(|| nearest_to_centroid(base, count)))
}

pub fn centralized_layout(base: &[f32], edges: &[GraphEdge], cfg: &LayoutConfig) -> LayoutResult {
    let count = base.len() / 3;
    let Some(hub) = pick_hub(base, edges) else {
        return LayoutResult::empty();
    };

    let radius = cfg.hub_radius();
    let spokes = count - 1;
    let mut positions = vec![0.0; count * 3];
    let mut star = Vec::with_capacity(spokes);

    for (slot, i) in (0..count).filter(|&i| i != hub).enumerate() {
        write_point(&mut positions, i, &fibonacci_point(slot, spokes, radius));
        star.push(GraphEdge::new(hub, i, cfg.star_weight));
    }

    LayoutResult {
        positions,
        edges: star,
        hub: Some(hub),
        ..LayoutResult::default()
    }
}
