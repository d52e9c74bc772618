//! Colour and visibility feedback
//!
//! Colours and scales never jump: every frame they ease a fixed fraction
//! toward their goal.

use std::collections::HashSet;

use crate::constants::{EMISSIVE_MULTIPLIER, HUB_COLOR, SPOKE_COLOR};
use crate::graph::{category_hex, hex_to_rgb, TopologyMode};

/// Point gesture: `category` toward `base * gain`, everything else toward `base * dim`
pub fn highlight_category(
    colors: &mut [f32],
    base_colors: &[f32],
    categories: &[u32],
    category: u32,
    gain: f32,
    dim: f32,
    ease: f32,
) {
    for (i, (rgb, base)) in colors
        .chunks_exact_mut(3)
        .zip(base_colors.chunks_exact(3))
        .enumerate()
    {
        // Uncategorised particles all belong to category 0
        let factor = if categories.get(i).copied().unwrap_or(0) == category {
            gain
        } else {
            dim
        };
        for (c, b) in rgb.iter_mut().zip(base) {
            *c += (b * factor - *c) * ease;
        }
    }
}

/// Ease back toward resting colours
pub fn restore_colors(colors: &mut [f32], base_colors: &[f32], ease: f32) {
    for (c, b) in colors.iter_mut().zip(base_colors) {
        *c += (b - *c) * ease;
    }
}

/// Fade hidden categories out, visible ones in
pub fn fade_scales(scales: &mut [f32], categories: &[u32], hidden: &HashSet<u32>, ease: f32) {
    for (i, s) in scales.iter_mut().enumerate() {
        let cat = categories.get(i).copied().unwrap_or(0);
        let goal = if hidden.contains(&cat) { 0.0 } else { 1.0 };
        *s += (goal - *s) * ease;
    }
}

fn emissive(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(|c| c * EMISSIVE_MULTIPLIER)
}

/// Resting colours for a topology. Distributed restores the data colours.
pub fn topology_colors(
    mode: TopologyMode,
    count: usize,
    hub: Option<usize>,
    categories: &[u32],
    data_colors: &[f32],
) -> Vec<f32> {
    match mode {
        TopologyMode::Centralized => (0..count)
            .flat_map(|i| {
                emissive(if Some(i) == hub {
                    HUB_COLOR
                } else {
                    SPOKE_COLOR
                })
            })
            .collect(),
        TopologyMode::Decentralized => (0..count)
            .flat_map(|i| {
                let cat = categories.get(i).copied().unwrap_or(0);
                emissive(hex_to_rgb(category_hex(cat)).unwrap_or(SPOKE_COLOR))
            })
            .collect(),
        TopologyMode::Distributed => data_colors.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_brightens_category_and_dims_rest() {
        let base = vec![1.0; 6];
        let mut colors = base.clone();
        for _ in 0..200 {
            highlight_category(&mut colors, &base, &[2, 5], 2, 1.2, 0.3, 0.1);
        }
        assert!((colors[0] - 1.2).abs() < 1e-3);
        assert!((colors[3] - 0.3).abs() < 1e-3);
    }

    #[test]
    fn uncategorised_particles_count_as_category_zero() {
        let base = vec![1.0; 6];
        let mut colors = base.clone();
        for _ in 0..200 {
            highlight_category(&mut colors, &base, &[], 0, 1.2, 0.3, 0.1);
        }
        assert!(colors.iter().all(|c| (c - 1.2).abs() < 1e-3));
    }

    #[test]
    fn restore_eases_partway() {
        let base = vec![1.0];
        let mut colors = vec![0.0];
        restore_colors(&mut colors, &base, 0.05);
        assert!((colors[0] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn hidden_categories_fade_out() {
        let mut scales = vec![1.0, 1.0];
        let hidden: HashSet<u32> = [1].into_iter().collect();
        fade_scales(&mut scales, &[0, 1], &hidden, 0.1);
        assert_eq!(scales[0], 1.0);
        assert!((scales[1] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn palettes_per_mode() {
        let data = vec![0.1; 9];
        let hub = topology_colors(TopologyMode::Centralized, 3, Some(1), &[], &data);
        assert_eq!(&hub[3..6], &emissive(HUB_COLOR));
        assert_eq!(&hub[0..3], &emissive(SPOKE_COLOR));

        let clusters = topology_colors(TopologyMode::Decentralized, 3, None, &[0, 1, 0], &data);
        assert_eq!(&clusters[0..3], &clusters[6..9]);
        assert_ne!(&clusters[0..3], &clusters[3..6]);

        assert_eq!(topology_colors(TopologyMode::Distributed, 3, None, &[], &data), data);
    }
}
