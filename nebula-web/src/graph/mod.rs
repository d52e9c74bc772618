//! Graph module - k-NN edges and the three topology layouts
//!
//! Re-exports only. Each layout is a pure function from base positions
//! (plus categories / labels) to a `LayoutResult`.

mod centralized;
mod decentralized;
mod distributed;
mod knn;
mod palette;
mod sphere;
mod types;

pub use centralized::{centralized_layout, pick_hub};
pub use decentralized::{decentralized_layout, group_by_category, place_clusters, Cluster};
pub use distributed::{distributed_layout, edge_labels};
pub use knn::compute_knn_edges;
pub use palette::{category_hex, hex_to_rgb, TABLEAU_10};
pub use sphere::{fibonacci_point, GOLDEN_ANGLE};
pub use types::{ClusterLabel, EdgeLabel, GraphEdge, LayoutResult, TopologyMode};
