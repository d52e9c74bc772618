//! Graph data passed to the renderer

use serde::Serialize;

/// Undirected edge, `source < target`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
    /// (0, 1], higher = closer
    pub weight: f32,
}

impl GraphEdge {
    /// Orders the endpoints so the pair is canonical
    pub fn new(a: usize, b: usize, weight: f32) -> Self {
        Self {
            source: a.min(b),
            target: a.max(b),
            weight,
        }
    }

    pub fn key(&self) -> (usize, usize) {
        (self.source, self.target)
    }
}

/// "A — B" text drawn at an edge midpoint
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeLabel {
    pub source: usize,
    pub target: usize,
    pub text: String,
}

/// Category name floating above a cluster
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterLabel {
    pub text: String,
    pub position: [f32; 3],
    /// CSS hex
    pub color: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologyMode {
    Centralized,
    Decentralized,
    #[default]
    Distributed,
}

impl TopologyMode {
    pub const ALL: [TopologyMode; 3] = [
        TopologyMode::Centralized,
        TopologyMode::Decentralized,
        TopologyMode::Distributed,
    ];

    /// Centralized -> Decentralized -> Distributed -> Centralized
    pub fn next(self) -> Self {
        match self {
            TopologyMode::Centralized => TopologyMode::Decentralized,
            TopologyMode::Decentralized => TopologyMode::Distributed,
            TopologyMode::Distributed => TopologyMode::Centralized,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TopologyMode::Centralized => TopologyMode::Distributed,
            TopologyMode::Decentralized => TopologyMode::Centralized,
            TopologyMode::Distributed => TopologyMode::Decentralized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopologyMode::Centralized => "centralized",
            TopologyMode::Decentralized => "decentralized",
            TopologyMode::Distributed => "distributed",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Output of one layout pass. Fields a mode does not produce stay empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutResult {
    /// Packed xyz, one triple per node
    pub positions: Vec<f32>,
    pub edges: Vec<GraphEdge>,
    /// Centralized only
    pub hub: Option<usize>,
    /// Decentralized only
    pub cluster_labels: Vec<ClusterLabel>,
    /// Distributed only
    pub edge_labels: Vec<EdgeLabel>,
}

impl LayoutResult {
    pub fn empty() -> Self {
        Self::default()
    }
}
