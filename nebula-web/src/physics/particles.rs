//! Particle buffers - flat per-particle arrays shared with the renderer
//!
//! Positions and colours are packed xyz/rgb triples; sizes and scales are one
//! value per particle. Loading data or committing a layout replaces buffers
//! wholesale, so the renderer must re-read them after either call.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{DEFAULT_COLOR, DEFAULT_SCALE, DEFAULT_SIZE, EMISSIVE_MULTIPLIER};
use crate::error::{NebulaError, Result};

/// Read particle `i` out of a packed xyz buffer
#[inline]
pub fn read_point(buf: &[f32], i: usize) -> Vector3<f32> {
    let i3 = i * 3;
    Vector3::new(buf[i3], buf[i3 + 1], buf[i3 + 2])
}

/// Write particle `i` into a packed xyz buffer
#[inline]
pub fn write_point(buf: &mut [f32], i: usize, p: &Vector3<f32>) {
    let i3 = i * 3;
    buf[i3] = p.x;
    buf[i3 + 1] = p.y;
    buf[i3 + 2] = p.z;
}

/// Emissive default colour, repeated for `count` particles
pub fn default_colors(count: usize) -> Vec<f32> {
    DEFAULT_COLOR
        .iter()
        .map(|c| c * EMISSIVE_MULTIPLIER)
        .collect::<Vec<_>>()
        .repeat(count)
}

/// The particle cloud
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    count: usize,
    /// Rest layout - where particles return when nothing acts on them
    pub base_positions: Vec<f32>,
    /// What the renderer draws; only ever moved by damping
    pub current_positions: Vec<f32>,
    /// Where damping is heading this frame
    pub target_positions: Vec<f32>,
    /// Rendered colours (eased toward `base_colors`)
    pub colors: Vec<f32>,
    /// Resting colours for the active topology
    pub base_colors: Vec<f32>,
    /// Colours as loaded from data, restored by the distributed topology
    pub data_colors: Vec<f32>,
    pub sizes: Vec<f32>,
    /// Visibility multiplier, faded toward 0 for filtered-out particles
    pub scales: Vec<f32>,
    /// Pinch-selected particle (tooltip)
    pub selected: Option<usize>,
    /// Category lit up by pointing
    pub highlighted: Option<u32>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Seeded placeholder cloud in `[-scale, scale]³`, shown before data loads
    pub fn initialize_random(&mut self, count: usize, scale: f32, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions: Vec<f32> = (0..count * 3)
            .map(|_| rng.gen_range(-scale..=scale))
            .collect();
        self.replace(positions, default_colors(count), vec![DEFAULT_SIZE; count]);
    }

    /// Load a fresh layout. Current and target start at the given positions.
    pub fn set_from_data(
        &mut self,
        positions: Vec<f32>,
        colors: Vec<f32>,
        sizes: Vec<f32>,
    ) -> Result<()> {
        if positions.len() % 3 != 0 {
            return Err(NebulaError::BufferLength {
                buffer: "positions",
                expected: positions.len() / 3 * 3,
                actual: positions.len(),
            });
        }
        let count = positions.len() / 3;
        if colors.len() != count * 3 {
            return Err(NebulaError::BufferLength {
                buffer: "colors",
                expected: count * 3,
                actual: colors.len(),
            });
        }
        if sizes.len() != count {
            return Err(NebulaError::BufferLength {
                buffer: "sizes",
                expected: count,
                actual: sizes.len(),
            });
        }
        self.replace(positions, colors, sizes);
        Ok(())
    }

    fn replace(&mut self, positions: Vec<f32>, colors: Vec<f32>, sizes: Vec<f32>) {
        let count = positions.len() / 3;
        self.count = count;
        self.current_positions = positions.clone();
        self.target_positions = positions.clone();
        self.base_positions = positions;
        self.base_colors = colors.clone();
        self.data_colors = colors.clone();
        self.colors = colors;
        self.sizes = sizes;
        self.scales = vec![DEFAULT_SCALE; count];
        self.selected = None;
        self.highlighted = None;
    }

    /// Overwrite where damping heads. Ignored if the length is wrong.
    pub fn set_target_positions(&mut self, positions: &[f32]) {
        if positions.len() == self.target_positions.len() {
            self.target_positions.copy_from_slice(positions);
        }
    }

    /// Make the rendered layout the new rest layout
    pub fn commit_positions(&mut self) {
        self.base_positions = self.current_positions.clone();
    }

    pub fn reset_targets(&mut self) {
        self.target_positions = self.base_positions.clone();
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn highlighted_category(&self) -> Option<u32> {
        self.highlighted
    }

    /// Swap in new resting colours (topology palettes)
    pub fn set_base_colors(&mut self, colors: Vec<f32>) {
        if colors.len() == self.count * 3 {
            self.base_colors = colors;
        }
    }
}
