//! Fibonacci-spiral points on a sphere

use std::f32::consts::PI;

use nalgebra::Vector3;

/// π(3 - √5)
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Point `index` of `count` evenly spread over a sphere of `radius`
pub fn fibonacci_point(index: usize, count: usize, radius: f32) -> Vector3<f32> {
    let count = count.max(1) as f32;
    let cos_phi = (1.0 - 2.0 * (index as f32 + 0.5) / count).clamp(-1.0, 1.0);
    let phi = cos_phi.acos();
    let theta = (GOLDEN_ANGLE * index as f32) % (2.0 * PI);
    Vector3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * cos_phi,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_angle_constant() {
        assert!((GOLDEN_ANGLE - PI * (3.0 - 5f32.sqrt())).abs() < 1e-5);
    }

    #[test]
    fn points_lie_on_sphere_and_are_distinct() {
        let n = 50;
        let pts: Vec<_> = (0..n).map(|i| fibonacci_point(i, n, 3.6)).collect();
        for p in &pts {
            assert!((p.norm() - 3.6).abs() < 1e-4);
        }
        for i in 0..n {
            for j in i + 1..n {
                assert!((pts[i] - pts[j]).norm() > 1e-3);
            }
        }
    }

    #[test]
    fn single_point_is_on_equator() {
        let p = fibonacci_point(0, 1, 2.0);
        assert!(p.z.abs() < 1e-6);
        assert!((p.norm() - 2.0).abs() < 1e-5);
    }
}
