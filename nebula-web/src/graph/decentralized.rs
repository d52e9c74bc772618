//! Clustered layout
//!
//! One cluster per category, centres on a Fibonacci sphere. Members coil
//! outward from their centre by rank. Dense edges inside a cluster, one
//! bridge between every pair of clusters.

use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;

use nalgebra::Vector3;

use super::knn::sorted_neighbors;
use super::palette::category_hex;
use super::sphere::fibonacci_point;
use super::types::{ClusterLabel, GraphEdge, LayoutResult};
use crate::config::LayoutConfig;
use crate::physics::{read_point, write_point};

/// Members of one category, in node order
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub category: u32,
    pub center: Vector3<f32>,
    pub members: Vec<usize>,
}

/// Group nodes by category in first-seen order. Missing indices count as 0.
pub fn group_by_category(count: usize, categories: &[u32]) -> Vec<(u32, Vec<usize>)> {
    let mut slot: HashMap<u32, usize> = HashMap::new();
    let mut groups: Vec<(u32, Vec<usize>)> = Vec::new();
    for i in 0..count {
        let cat = categories.get(i).copied().unwrap_or(0);
        let g = *slot.entry(cat).or_insert_with(|| {
            groups.push((cat, Vec::new()));
            groups.len() - 1
        });
        groups[g].1.push(i);
    }
    groups
}

/// Offset of the member ranked `rank` of `size` from its cluster centre.
/// Angle and radius both grow with rank: a widening coil, never random.
fn coil_offset(rank: usize, size: usize, spread: f32) -> Vector3<f32> {
    let size = size.max(1) as f32;
    let m = rank as f32;
    let azimuth = m / size * 2.0 * PI;
    let polar = ((m * 0.618) % 1.0) * PI;
    let r = spread * (0.2 + 0.8 * (m / size).sqrt());
    Vector3::new(
        r * polar.sin() * azimuth.cos(),
        r * polar.sin() * azimuth.sin(),
        r * polar.cos(),
    )
}

struct EdgeSet {
    seen: HashSet<(usize, usize)>,
    edges: Vec<GraphEdge>,
}

impl EdgeSet {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            edges: Vec::new(),
        }
    }

    fn add(&mut self, a: usize, b: usize, weight: f32) {
        let edge = GraphEdge::new(a, b, weight);
        if a != b && self.seen.insert(edge.key()) {
            self.edges.push(edge);
        }
    }
}

/// Closest pair between two clusters, looking at the first `sample` members of each
fn closest_pair(positions: &[f32], a: &[usize], b: &[usize], sample: usize) -> Option<(usize, usize)> {
    let mut best = None;
    let mut best_dist = f32::INFINITY;
    for &na in a.iter().take(sample) {
        let pa = read_point(positions, na);
        for &nb in b.iter().take(sample) {
            let d = (read_point(positions, nb) - pa).norm_squared();
            if d < best_dist {
                best_dist = d;
                best = Some((na, nb));
            }
        }
    }
    best
}

/// Cluster centres and member positions
pub fn place_clusters(count: usize, categories: &[u32], cfg: &LayoutConfig) -> (Vec<f32>, Vec<Cluster>) {
    let groups = group_by_category(count, categories);
    let total = groups.len();
    let spread = cfg.cluster_spread();
    let mut positions = vec![0.0; count * 3];

    let clusters = groups
        .into_iter()
        .enumerate()
        .map(|(g, (category, members))| {
            let center = fibonacci_point(g, total, cfg.cluster_radius());
            let size = members.len();
            for (rank, &node) in members.iter().enumerate() {
                write_point(&mut positions, node, &(center + coil_offset(rank, size, spread)));
            }
            Cluster {
                category,
                center,
                members,
            }
        })
        .collect();

    (positions, clusters)
}

pub fn decentralized_layout(
    count: usize,
    categories: &[u32],
    names: &[String],
    cfg: &LayoutConfig,
) -> LayoutResult {
    if count == 0 {
        return LayoutResult::empty();
    }

    let (positions, clusters) = place_clusters(count, categories, cfg);
    let mut edges = EdgeSet::new();

    // Intra-cluster: a few nearest members each
    for cluster in &clusters {
        for &node in &cluster.members {
            for (other, _) in sorted_neighbors(&positions, node, &cluster.members)
                .into_iter()
                .take(cfg.intra_cluster_neighbors)
            {
                edges.add(node, other, cfg.intra_weight);
            }
        }
    }

    // One bridge per cluster pair
    for (a, ca) in clusters.iter().enumerate() {
        for cb in &clusters[a + 1..] {
            if let Some((na, nb)) =
                closest_pair(&positions, &ca.members, &cb.members, cfg.bridge_sample_size.max(1))
            {
                edges.add(na, nb, cfg.bridge_weight);
            }
        }
    }

    let lift = Vector3::new(0.0, cfg.cluster_spread() * 0.8, 0.0);
    let cluster_labels = clusters
        .iter()
        .map(|c| {
            let anchor = c.center + lift;
            ClusterLabel {
                text: names
                    .get(c.category as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("Cluster {}", c.category)),
                position: [anchor.x, anchor.y, anchor.z],
                color: category_hex(c.category).to_string(),
            }
        })
        .collect();

    LayoutResult {
        positions,
        edges: edges.edges,
        cluster_labels,
        ..LayoutResult::default()
    }
}
