//! k-NN network layout: positions unchanged, neighbour edges recomputed

use super::knn::compute_knn_edges;
use super::types::{EdgeLabel, GraphEdge, LayoutResult};
use crate::config::LayoutConfig;

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// "A — B" labels for the strongest edges, capped at `max_labels`.
/// Edges with an empty label on either end are skipped.
pub fn edge_labels(
    edges: &[GraphEdge],
    labels: &[String],
    max_labels: usize,
    max_chars: usize,
) -> Vec<EdgeLabel> {
    let mut ranked: Vec<&GraphEdge> = edges.iter().collect();
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    ranked
        .into_iter()
        .take(max_labels)
        .filter_map(|e| {
            let src = labels.get(e.source)?;
            let tgt = labels.get(e.target)?;
            if src.is_empty() || tgt.is_empty() {
                return None;
            }
            Some(EdgeLabel {
                source: e.source,
                target: e.target,
                text: format!(
                    "{} \u{2014} {}",
                    truncate_chars(src, max_chars),
                    truncate_chars(tgt, max_chars)
                ),
            })
        })
        .collect()
}

/// Keep `base`, link k nearest neighbours. Labels need one entry per node.
pub fn distributed_layout(base: &[f32], labels: Option<&[String]>, cfg: &LayoutConfig) -> LayoutResult {
    let count = base.len() / 3;
    if count == 0 {
        return LayoutResult::empty();
    }

    let edges = compute_knn_edges(base, cfg.distributed_k);
    let edge_labels = match labels {
        Some(labels) if labels.len() >= count => {
            edge_labels(&edges, labels, cfg.max_edge_labels, cfg.edge_label_chars)
        }
        _ => Vec::new(),
    };

    LayoutResult {
        positions: base.to_vec(),
        edges,
        edge_labels,
        ..LayoutResult::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> Vec<f32> {
        (0..n)
            .flat_map(|i| [(i % 10) as f32, (i / 10) as f32 * 1.5, 0.0])
            .collect()
    }

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("node-{i}")).collect()
    }

    #[test]
    fn positions_are_unchanged() {
        let base = grid(30);
        let result = distributed_layout(&base, None, &LayoutConfig::default());
        assert_eq!(result.positions, base);
        assert!(!result.edges.is_empty());
        assert!(result.edge_labels.is_empty());
        assert!(result.hub.is_none());
    }

    #[test]
    fn labels_capped_and_formatted() {
        let base = grid(100);
        let labels = names(100);
        let cfg = LayoutConfig::default();
        let result = distributed_layout(&base, Some(&labels), &cfg);
        assert_eq!(result.edge_labels.len(), cfg.max_edge_labels);
        let first = &result.edge_labels[0];
        assert_eq!(
            first.text,
            format!("node-{} \u{2014} node-{}", first.source, first.target)
        );
    }

    #[test]
    fn strongest_edges_are_labelled_first() {
        let edges = vec![
            GraphEdge::new(0, 1, 0.2),
            GraphEdge::new(1, 2, 0.9),
            GraphEdge::new(0, 2, 0.5),
        ];
        let labels = names(3);
        let out = edge_labels(&edges, &labels, 2, 12);
        let keys: Vec<_> = out.iter().map(|l| (l.source, l.target)).collect();
        assert_eq!(keys, vec![(1, 2), (0, 2)]);
    }

    #[test]
    fn long_and_empty_labels() {
        let edges = vec![GraphEdge::new(0, 1, 0.5), GraphEdge::new(1, 2, 0.4)];
        let labels = vec![
            "abcdefghijklmnop".to_string(),
            "ünïcödé-ñämé-long".to_string(),
            String::new(),
        ];
        let out = edge_labels(&edges, &labels, 40, 12);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "abcdefghijkl \u{2014} ünïcödé-ñämé");
    }

    #[test]
    fn short_label_list_produces_no_labels() {
        let base = grid(10);
        let labels = names(5);
        let result = distributed_layout(&base, Some(&labels), &LayoutConfig::default());
        assert!(result.edge_labels.is_empty());
    }
}
