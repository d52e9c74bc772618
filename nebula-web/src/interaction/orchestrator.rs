//! Simulation - the single owner of per-frame state
//!
//! One `frame(dt)` call per rendered frame reads the latest landmark
//! snapshot, classifies it, maps the hand into the scene, runs the behaviour
//! for the current gesture and damps particles toward their targets.
//! Topology switches go through a deadline-based transition.

use std::collections::HashSet;

use nalgebra::Vector3;
use serde::Serialize;

use super::feedback::{fade_scales, highlight_category, restore_colors, topology_colors};
use super::strategy::{apply_behavior, behavior_for, Behavior, Scene};
use super::transition::Transition;
use crate::classifier::{Gesture, GestureClassifier, GestureReading, HandFrame};
use crate::config::EngineConfig;
use crate::constants::DEFAULT_SIZE;
use crate::data::{place_embedding, rows_from_flat, DataTable};
use crate::error::{NebulaError, Result, TrackingError};
use crate::graph::{
    centralized_layout, compute_knn_edges, decentralized_layout, distributed_layout, ClusterLabel,
    EdgeLabel, GraphEdge, TopologyMode,
};
use crate::physics::{
    compute_centroids, damp_positions, default_colors, Centroids, OneEuroFilter3D, ParticleSet,
};
use crate::tracking::{TrackingSession, TrackingState};
use crate::world::{hand_to_world, CameraProjection};

/// What the renderer and UI need after a frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameOutput {
    pub gesture: Gesture,
    pub confidence: f32,
    /// Filtered palm position, normalized image space
    pub smoothed: [f32; 3],
    /// Hand on the scene plane
    pub world: [f32; 3],
    pub hand_detected: bool,
    pub selected: Option<usize>,
    pub highlighted: Option<u32>,
    pub topology: TopologyMode,
    pub transitioning: bool,
    pub tracking: TrackingState,
}

pub struct Simulation {
    config: EngineConfig,
    pub particles: ParticleSet,

    // Data mapping
    categories: Vec<u32>,
    category_names: Vec<String>,
    labels: Option<Vec<String>>,
    hidden: HashSet<u32>,

    // Hand pipeline
    tracking: TrackingSession,
    classifier: GestureClassifier,
    filter: OneEuroFilter3D,
    camera: CameraProjection,
    /// Snapshot sequence last run through the classifier
    classified: u64,
    reading: GestureReading,
    hand_detected: bool,
    smoothed: [f32; 3],
    world: Vector3<f32>,

    // Graph
    topology: TopologyMode,
    edges: Vec<GraphEdge>,
    hub: Option<usize>,
    cluster_labels: Vec<ClusterLabel>,
    edge_labels: Vec<EdgeLabel>,
    transition: Option<Transition>,

    /// Cached while a collapse is held
    centroids: Option<Centroids>,
    /// Frame clock (ms), advanced by `frame`
    clock_ms: f64,
}

impl Simulation {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            particles: ParticleSet::new(),
            categories: Vec::new(),
            category_names: Vec::new(),
            labels: None,
            hidden: HashSet::new(),
            tracking: TrackingSession::new(&config.tracking),
            classifier: GestureClassifier::new(config.gesture.clone()),
            filter: OneEuroFilter3D::from_config(&config.filter),
            camera: CameraProjection::default(),
            classified: 0,
            reading: GestureReading::NONE,
            hand_detected: false,
            smoothed: [0.0; 3],
            world: Vector3::zeros(),
            topology: TopologyMode::default(),
            edges: Vec::new(),
            hub: None,
            cluster_labels: Vec::new(),
            edge_labels: Vec::new(),
            transition: None,
            centroids: None,
            clock_ms: 0.0,
            config,
        }
    }

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swap config; hand pipeline restarts from neutral
    pub fn configure(&mut self, config: EngineConfig) {
        self.classifier = GestureClassifier::new(config.gesture.clone());
        self.filter = OneEuroFilter3D::from_config(&config.filter);
        self.tracking.reconfigure(&config.tracking);
        self.config = config;
        self.reset_hand();
        log::debug!("engine reconfigured");
    }

    pub fn set_camera(&mut self, camera: CameraProjection) {
        self.camera = camera;
    }

    // ========================================================================
    // DATA
    // ========================================================================

    /// Seeded placeholder cloud before real data arrives
    pub fn initialize_random(&mut self, count: usize, seed: u64) {
        self.particles
            .initialize_random(count, self.config.layout.scene_scale, seed);
        self.after_load();
    }

    /// Load an external n×3 embedding (flat), normalized into the scene.
    /// Empty colours / sizes get defaults.
    pub fn load_embedding(&mut self, flat: &[f32], colors: Vec<f32>, sizes: Vec<f32>) -> Result<()> {
        let rows = rows_from_flat(flat, None)?;
        let positions = place_embedding(&rows, self.config.layout.scene_scale);
        self.load_positions(positions, colors, sizes)
    }

    /// Load positions already in scene units
    pub fn load_positions(&mut self, positions: Vec<f32>, colors: Vec<f32>, sizes: Vec<f32>) -> Result<()> {
        let count = positions.len() / 3;
        let colors = if colors.is_empty() {
            default_colors(count)
        } else {
            colors
        };
        let sizes = if sizes.is_empty() {
            vec![DEFAULT_SIZE; count]
        } else {
            sizes
        };
        self.particles.set_from_data(positions, colors, sizes)?;
        log::info!("loaded {count} particles");
        self.after_load();
        Ok(())
    }

    fn after_load(&mut self) {
        let count = self.particles.count();
        if self.categories.len() != count {
            self.categories.clear();
            self.category_names.clear();
        }
        if self.labels.as_ref().is_some_and(|l| l.len() != count) {
            self.labels = None;
        }
        self.centroids = None;
        self.transition = None;
        self.edges = compute_knn_edges(&self.particles.base_positions, self.config.layout.distributed_k);
        self.switch_topology(self.topology);
    }

    /// Category index per particle plus display names
    pub fn set_categories(&mut self, indices: Vec<u32>, names: Vec<String>) -> Result<()> {
        let count = self.particles.count();
        if indices.len() != count {
            return Err(NebulaError::BufferLength {
                buffer: "categories",
                expected: count,
                actual: indices.len(),
            });
        }
        self.categories = indices;
        self.category_names = names;
        self.centroids = None;
        if self.topology == TopologyMode::Decentralized {
            self.switch_topology(self.topology);
        }
        Ok(())
    }

    pub fn set_labels(&mut self, labels: Vec<String>) -> Result<()> {
        let count = self.particles.count();
        if labels.len() != count {
            return Err(NebulaError::BufferLength {
                buffer: "labels",
                expected: count,
                actual: labels.len(),
            });
        }
        self.labels = Some(labels);
        if self.topology == TopologyMode::Distributed {
            self.switch_topology(self.topology);
        }
        Ok(())
    }

    /// Resolve category and label columns from a typed table
    pub fn apply_table(
        &mut self,
        table: &DataTable,
        category_column: Option<&str>,
        label_column: Option<&str>,
    ) -> Result<()> {
        if let Some(column) = category_column {
            let indices = table.category_indices(column)?;
            let names = table.category_names(column)?;
            self.set_categories(indices, names)?;
        }
        if let Some(column) = label_column {
            let labels = table
                .labels(column)
                .ok_or_else(|| NebulaError::UnknownColumn(column.to_string()))?;
            self.set_labels(labels)?;
        }
        Ok(())
    }

    pub fn set_category_visible(&mut self, category: u32, visible: bool) {
        if visible {
            self.hidden.remove(&category);
        } else {
            self.hidden.insert(category);
        }
    }

    pub fn categories(&self) -> &[u32] {
        &self.categories
    }

    // ========================================================================
    // TOPOLOGY
    // ========================================================================

    pub fn topology(&self) -> TopologyMode {
        self.topology
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn hub(&self) -> Option<usize> {
        self.hub
    }

    pub fn cluster_labels(&self) -> &[ClusterLabel] {
        &self.cluster_labels
    }

    pub fn edge_labels(&self) -> &[EdgeLabel] {
        &self.edge_labels
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Full relayout into `mode`. Any pending transition is replaced.
    pub fn switch_topology(&mut self, mode: TopologyMode) {
        self.topology = mode;
        self.hub = None;
        self.cluster_labels.clear();
        self.edge_labels.clear();

        let count = self.particles.count();
        if count == 0 {
            self.edges.clear();
            self.transition = None;
            return;
        }

        let layout = &self.config.layout;
        let base = &self.particles.base_positions;
        let result = match mode {
            TopologyMode::Centralized => centralized_layout(base, &self.edges, layout),
            TopologyMode::Decentralized => {
                decentralized_layout(count, &self.categories, &self.category_names, layout)
            }
            TopologyMode::Distributed => distributed_layout(base, self.labels.as_deref(), layout),
        };

        let colors = topology_colors(
            mode,
            count,
            result.hub,
            &self.categories,
            &self.particles.data_colors,
        );
        self.particles.set_base_colors(colors);
        self.particles.set_target_positions(&result.positions);

        self.edges = result.edges;
        self.hub = result.hub;
        self.cluster_labels = result.cluster_labels;
        self.edge_labels = result.edge_labels;
        self.centroids = None;
        self.transition = Some(Transition::new(
            mode,
            result.positions,
            self.clock_ms,
            layout.transition_ms,
        ));

        log::info!(
            "topology -> {} ({} edges, hub {:?})",
            mode.as_str(),
            self.edges.len(),
            self.hub
        );
    }

    pub fn next_topology(&mut self) {
        self.switch_topology(self.topology.next());
    }

    pub fn previous_topology(&mut self) {
        self.switch_topology(self.topology.prev());
    }

    // ========================================================================
    // HAND TRACKING
    // ========================================================================

    pub fn tracking(&self) -> &TrackingSession {
        &self.tracking
    }

    pub fn tracking_starting(&mut self) {
        self.tracking.begin();
    }

    pub fn tracking_started(&mut self) {
        self.tracking.started();
    }

    pub fn tracking_failed(&mut self, err: TrackingError) {
        self.tracking.fail(err);
        self.reset_hand();
    }

    /// Synchronous stop: no gesture state survives into the next start
    pub fn stop_tracking(&mut self) {
        self.tracking.stop();
        self.reset_hand();
    }

    pub fn should_detect(&mut self, now_ms: f64) -> bool {
        self.tracking.should_detect(now_ms)
    }

    /// Latest detector result; `None` = no hand
    pub fn submit_landmarks(&mut self, frame: Option<HandFrame>) -> Result<()> {
        Ok(self.tracking.submit(frame)?)
    }

    fn reset_hand(&mut self) {
        self.classifier.reset();
        self.filter.reset();
        self.classified = self.tracking.sequence();
        self.reading = GestureReading::NONE;
        self.hand_detected = false;
        self.smoothed = [0.0; 3];
        self.world = Vector3::zeros();
        self.particles.selected = None;
        self.particles.highlighted = None;
    }

    /// Classify the snapshot if it is new since the last frame
    fn read_hand(&mut self) {
        let sequence = self.tracking.sequence();
        if sequence == self.classified {
            return;
        }
        self.classified = sequence;

        let frame = self.tracking.latest();
        self.reading = self.classifier.classify(frame, self.clock_ms);

        match frame {
            Some(hand) => {
                let palm = hand.palm_center();
                self.smoothed = self.filter.filter(palm, Some(self.clock_ms / 1000.0));
                self.world = hand_to_world(self.smoothed[0], self.smoothed[1], &self.camera);
                self.hand_detected = true;
            }
            None => {
                if self.hand_detected {
                    self.filter.reset();
                }
                self.hand_detected = false;
            }
        }

        match self.reading.gesture {
            Gesture::SwipeRight => self.next_topology(),
            Gesture::SwipeLeft => self.previous_topology(),
            _ => {}
        }
    }

    // ========================================================================
    // FRAME
    // ========================================================================

    /// Advance one rendered frame by `dt` seconds
    pub fn frame(&mut self, dt: f32) -> FrameOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock_ms += dt as f64 * 1000.0;

        self.read_hand();

        if self.transition.as_ref().is_some_and(|t| t.is_due(self.clock_ms)) {
            self.particles.commit_positions();
            self.transition = None;
            log::debug!("topology transition committed");
        }

        let behavior = if self.hand_detected {
            behavior_for(self.reading.gesture)
        } else {
            Behavior::Rest
        };

        if behavior == Behavior::Collapse {
            if self.centroids.is_none() && !self.categories.is_empty() {
                self.centroids = Some(compute_centroids(
                    &self.particles.base_positions,
                    &self.categories,
                ));
            }
        } else {
            self.centroids = None;
        }

        let picked = {
            let particles = &mut self.particles;
            let rest = match &self.transition {
                Some(t) => t.layout(),
                None => particles.base_positions.as_slice(),
            };
            let scene = Scene {
                hand: self.world,
                rest,
                collapse: self
                    .centroids
                    .as_ref()
                    .map(|c| (c, self.categories.as_slice())),
                physics: &self.config.physics,
            };
            apply_behavior(
                behavior,
                &particles.current_positions,
                &mut particles.target_positions,
                &scene,
            )
        };

        self.apply_feedback(behavior, picked);

        damp_positions(
            &mut self.particles.current_positions,
            &self.particles.target_positions,
            dt,
            self.config.physics.damp_lambda,
        );

        self.output()
    }

    fn apply_feedback(&mut self, behavior: Behavior, picked: Option<usize>) {
        let particles = &mut self.particles;
        let physics = &self.config.physics;

        particles.selected = match behavior {
            Behavior::Select => picked,
            _ => None,
        };

        let highlight = match behavior {
            Behavior::Highlight => picked.map(|i| self.categories.get(i).copied().unwrap_or(0)),
            _ => None,
        };
        particles.highlighted = highlight;

        match highlight {
            Some(category) => highlight_category(
                &mut particles.colors,
                &particles.base_colors,
                &self.categories,
                category,
                physics.highlight_gain,
                physics.dim_gain,
                physics.highlight_ease,
            ),
            None => restore_colors(
                &mut particles.colors,
                &particles.base_colors,
                physics.restore_ease,
            ),
        }

        fade_scales(
            &mut particles.scales,
            &self.categories,
            &self.hidden,
            physics.fade_ease,
        );
    }

    pub fn output(&self) -> FrameOutput {
        FrameOutput {
            gesture: self.reading.gesture,
            confidence: self.reading.confidence,
            smoothed: self.smoothed,
            world: [self.world.x, self.world.y, self.world.z],
            hand_detected: self.hand_detected,
            selected: self.particles.selected,
            highlighted: self.particles.highlighted,
            topology: self.topology,
            transitioning: self.transition.is_some(),
            tracking: self.tracking.state().clone(),
        }
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::poses::*;
    use crate::physics::read_point;

    const DT: f32 = 1.0 / 30.0;

    fn loaded(n: usize) -> Simulation {
        let mut sim = Simulation::default();
        let positions: Vec<f32> = (0..n)
            .flat_map(|i| {
                let t = i as f32;
                [(t * 0.9).sin() * 3.0, (t * 0.4).cos() * 3.0, (t * 1.7).sin() * 2.0]
            })
            .collect();
        sim.load_positions(positions, Vec::new(), Vec::new()).unwrap();
        // Settle the load-time transition
        for _ in 0..60 {
            sim.frame(DT);
        }
        sim
    }

    fn running(sim: &mut Simulation) {
        sim.tracking_starting();
        sim.tracking_started();
    }

    /// Submit then render, like the detector and rAF loops interleaving
    fn hand_frame(sim: &mut Simulation, frame: Option<HandFrame>) -> FrameOutput {
        sim.submit_landmarks(frame).unwrap();
        sim.frame(DT)
    }

    #[test]
    fn starts_distributed_with_knn_edges() {
        let sim = loaded(20);
        assert_eq!(sim.topology(), TopologyMode::Distributed);
        assert!(!sim.edges().is_empty());
        assert!(sim.transition().is_none());
    }

    #[test]
    fn load_rejects_mismatched_buffers() {
        let mut sim = Simulation::default();
        let err = sim
            .load_positions(vec![0.0; 6], vec![0.0; 3], Vec::new())
            .unwrap_err();
        assert!(matches!(err, NebulaError::BufferLength { .. }));
        assert!(sim.load_embedding(&[0.0; 5], Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn embedding_is_scaled_into_scene() {
        let mut sim = Simulation::default();
        sim.load_embedding(&[0.0, 0.0, 0.0, 10.0, 5.0, 1.0], Vec::new(), Vec::new())
            .unwrap();
        assert_eq!(sim.particles.base_positions, vec![-4.0, -4.0, -4.0, 4.0, 4.0, 4.0]);
        assert_eq!(sim.particles.sizes, vec![DEFAULT_SIZE; 2]);
    }

    #[test]
    fn switch_commits_after_deadline() {
        let mut sim = loaded(30);
        sim.switch_topology(TopologyMode::Centralized);
        let hub = sim.hub().unwrap();
        assert!(sim.transition().is_some());

        // Halfway: not committed, base still the old layout
        for _ in 0..20 {
            sim.frame(DT);
        }
        assert!(sim.transition().is_some());
        assert!(read_point(&sim.particles.base_positions, hub).norm() > 1e-3);

        for _ in 0..40 {
            sim.frame(DT);
        }
        assert!(sim.transition().is_none());
        assert!(read_point(&sim.particles.base_positions, hub).norm() < 0.05);
    }

    #[test]
    fn second_switch_replaces_pending_commit() {
        let mut sim = loaded(30);
        sim.switch_topology(TopologyMode::Centralized);
        for _ in 0..10 {
            sim.frame(DT);
        }
        sim.switch_topology(TopologyMode::Decentralized);
        let t = sim.transition().unwrap();
        assert_eq!(t.mode, TopologyMode::Decentralized);
        assert!(t.remaining_ms(sim.clock_ms()) > 1400.0);
        assert!(sim.hub().is_none());
    }

    #[test]
    fn rest_follows_pending_layout() {
        let mut sim = loaded(30);
        sim.switch_topology(TopologyMode::Centralized);
        sim.frame(DT);
        let layout = sim.transition().unwrap().layout().to_vec();
        assert_eq!(sim.particles.target_positions, layout);
    }

    #[test]
    fn swipe_cycles_topology() {
        let mut sim = loaded(20);
        running(&mut sim);
        for i in 0..5 {
            hand_frame(&mut sim, Some(open_hand_at(0.8 - 0.05 * i as f32, 0.5)));
        }
        assert_eq!(sim.topology(), TopologyMode::Centralized);

        // Cooldown: continued motion does not cycle again
        for i in 0..5 {
            hand_frame(&mut sim, Some(open_hand_at(0.8 - 0.05 * i as f32, 0.5)));
        }
        assert_eq!(sim.topology(), TopologyMode::Centralized);
    }

    #[test]
    fn open_hand_repels_and_release_springs_back() {
        let mut sim = loaded(40);
        running(&mut sim);
        let before = sim.particles.current_positions.clone();
        for _ in 0..10 {
            hand_frame(&mut sim, Some(open_hand()));
        }
        assert_eq!(sim.output().gesture, Gesture::OpenHand);
        assert_ne!(sim.particles.target_positions, sim.particles.base_positions);

        for _ in 0..5 {
            hand_frame(&mut sim, None);
        }
        assert!(!sim.output().hand_detected);
        assert_eq!(sim.particles.target_positions, sim.particles.base_positions);
        for _ in 0..200 {
            sim.frame(DT);
        }
        for (a, b) in sim.particles.current_positions.iter().zip(&before) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn fist_collapses_to_category_centroids() {
        let mut sim = loaded(10);
        sim.set_categories((0..10).map(|i| i % 2).collect(), Vec::new())
            .unwrap();
        running(&mut sim);
        for _ in 0..4 {
            hand_frame(&mut sim, Some(fist()));
        }
        assert_eq!(sim.output().gesture, Gesture::Fist);
        let centroids = compute_centroids(&sim.particles.base_positions, sim.categories());
        let even = read_point(&sim.particles.target_positions, 0);
        assert!((even - centroids[&0]).norm() < 1e-5);

        hand_frame(&mut sim, None);
        assert!(sim.centroids.is_none());
    }

    #[test]
    fn stop_resets_gesture_state() {
        let mut sim = loaded(10);
        running(&mut sim);
        for _ in 0..4 {
            hand_frame(&mut sim, Some(fist()));
        }
        sim.stop_tracking();
        let out = sim.frame(DT);
        assert_eq!(out.gesture, Gesture::None);
        assert_eq!(out.confidence, 0.0);
        assert!(!out.hand_detected);
        assert!(sim.submit_landmarks(Some(fist())).is_err());

        // Restart: one fist frame is not enough to confirm
        running(&mut sim);
        let out = hand_frame(&mut sim, Some(fist()));
        assert_eq!(out.gesture, Gesture::None);
    }

    #[test]
    fn point_without_categories_brightens_whole_cloud() {
        let mut sim = Simulation::default();
        sim.load_positions(vec![0.0, 0.0, 0.0, 3.0, 3.0, 0.0], Vec::new(), Vec::new())
            .unwrap();
        for _ in 0..60 {
            sim.frame(DT);
        }
        running(&mut sim);
        for _ in 0..60 {
            hand_frame(&mut sim, Some(point()));
        }
        let out = sim.output();
        assert_eq!(out.gesture, Gesture::Point);
        assert_eq!(out.highlighted, Some(0));
        for (c, b) in sim.particles.colors.iter().zip(&sim.particles.base_colors) {
            assert!(*c > b * 1.1);
        }
    }

    #[test]
    fn configure_keeps_tracking_failure() {
        let mut sim = Simulation::default();
        sim.tracking_starting();
        sim.tracking_failed(TrackingError::PermissionDenied);
        sim.configure(EngineConfig::default());
        assert_eq!(
            sim.output().tracking,
            TrackingState::Failed(TrackingError::PermissionDenied)
        );

        running(&mut sim);
        sim.configure(EngineConfig::default());
        assert!(sim.tracking().is_running());
    }

    #[test]
    fn hidden_category_fades_out() {
        let mut sim = loaded(4);
        sim.set_categories(vec![0, 1, 0, 1], Vec::new()).unwrap();
        sim.set_category_visible(1, false);
        for _ in 0..100 {
            sim.frame(DT);
        }
        assert!(sim.particles.scales[1] < 0.01);
        assert!((sim.particles.scales[0] - 1.0).abs() < 1e-6);

        sim.set_category_visible(1, true);
        for _ in 0..100 {
            sim.frame(DT);
        }
        assert!(sim.particles.scales[1] > 0.99);
    }

    #[test]
    fn category_length_is_checked() {
        let mut sim = loaded(4);
        assert!(sim.set_categories(vec![0, 1], Vec::new()).is_err());
        assert!(sim.set_labels(vec!["a".into()]).is_err());
    }

    #[test]
    fn table_columns_feed_categories_and_labels() {
        let mut sim = loaded(4);
        let mut table = DataTable::new(4);
        table
            .push_categorical_strings("kind", &["x", "y", "x", "z"])
            .unwrap();
        table
            .push_text("name", vec!["a".into(), "b".into(), "c".into(), "d".into()])
            .unwrap();
        sim.apply_table(&table, Some("kind"), Some("name")).unwrap();
        assert_eq!(sim.categories(), &[0, 1, 0, 2]);
        assert!(!sim.edge_labels().is_empty());
        assert!(sim.apply_table(&table, Some("missing"), None).is_err());
    }

    #[test]
    fn negative_or_nan_dt_does_not_move_time() {
        let mut sim = loaded(5);
        let t = sim.clock_ms();
        sim.frame(-1.0);
        sim.frame(f32::NAN);
        assert_eq!(sim.clock_ms(), t);
    }
}
