//! Placing an external n×3 embedding into the scene cube

use crate::error::{NebulaError, Result};

/// Normalize each axis into `[-scale, scale]`. A flat axis maps to 0.
pub fn place_embedding(embedding: &[[f32; 3]], scale: f32) -> Vec<f32> {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for row in embedding {
        for axis in 0..3 {
            min[axis] = min[axis].min(row[axis]);
            max[axis] = max[axis].max(row[axis]);
        }
    }

    embedding
        .iter()
        .flat_map(|row| {
            (0..3).map(move |axis| {
                let extent = max[axis] - min[axis];
                if extent > f32::EPSILON {
                    ((row[axis] - min[axis]) / extent * 2.0 - 1.0) * scale
                } else {
                    0.0
                }
            })
        })
        .collect()
}

/// Packed rows of 3 from a flat buffer, checked against `expected` rows
pub fn rows_from_flat(flat: &[f32], expected: Option<usize>) -> Result<Vec<[f32; 3]>> {
    let rows = flat.len() / 3;
    if flat.len() % 3 != 0 || expected.is_some_and(|n| n != rows) {
        return Err(NebulaError::EmbeddingShape {
            rows,
            expected: expected.unwrap_or(rows),
        });
    }
    Ok(flat
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect())
}
