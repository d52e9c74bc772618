//! k-nearest-neighbour edges, brute force

use std::collections::HashSet;

use super::types::GraphEdge;
use crate::physics::read_point;

/// Squared distances from node `i` to every other node, nearest first
pub(crate) fn sorted_neighbors(positions: &[f32], i: usize, candidates: &[usize]) -> Vec<(usize, f32)> {
    let p = read_point(positions, i);
    let mut dists: Vec<(usize, f32)> = candidates
        .iter()
        .filter(|&&j| j != i)
        .map(|&j| (j, (read_point(positions, j) - p).norm_squared()))
        .collect();
    dists.sort_by(|a, b| a.1.total_cmp(&b.1));
    dists
}

/// Each node linked to its `k` nearest neighbours; symmetric pairs appear once.
/// Weight is `1 / (1 + distance)`.
pub fn compute_knn_edges(positions: &[f32], k: usize) -> Vec<GraphEdge> {
    let count = positions.len() / 3;
    if count < 2 || k == 0 {
        return Vec::new();
    }
    let k = k.min(count - 1);
    let all: Vec<usize> = (0..count).collect();

    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for i in 0..count {
        for (j, d2) in sorted_neighbors(positions, i, &all).into_iter().take(k) {
            let edge = GraphEdge::new(i, j, 1.0 / (1.0 + d2.sqrt()));
            if seen.insert(edge.key()) {
                edges.push(edge);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<f32> {
        (0..n).flat_map(|i| [i as f32, 0.0, 0.0]).collect()
    }

    #[test]
    fn edges_are_deduplicated_and_ordered() {
        let edges = compute_knn_edges(&line(6), 2);
        let keys: HashSet<_> = edges.iter().map(|e| e.key()).collect();
        assert_eq!(keys.len(), edges.len());
        assert!(edges.iter().all(|e| e.source < e.target));
    }

    #[test]
    fn mutual_neighbours_share_one_edge() {
        // Two points: each finds the other
        let edges = compute_knn_edges(&[0.0, 0.0, 0.0, 3.0, 0.0, 0.0], 4);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].key(), (0, 1));
        assert!((edges[0].weight - 0.25).abs() < 1e-6);
    }

    #[test]
    fn weights_in_unit_interval() {
        let edges = compute_knn_edges(&line(10), 3);
        assert!(edges.iter().all(|e| e.weight > 0.0 && e.weight <= 1.0));
        // Coincident points get full weight
        let edges = compute_knn_edges(&[1.0; 6], 1);
        assert_eq!(edges[0].weight, 1.0);
    }

    #[test]
    fn degenerate_inputs_produce_nothing() {
        assert!(compute_knn_edges(&[], 4).is_empty());
        assert!(compute_knn_edges(&[0.0; 3], 4).is_empty());
        assert!(compute_knn_edges(&line(5), 0).is_empty());
    }

    #[test]
    fn line_neighbours_are_adjacent() {
        let edges = compute_knn_edges(&line(5), 1);
        for e in &edges {
            assert_eq!(e.target - e.source, 1);
        }
    }
}
