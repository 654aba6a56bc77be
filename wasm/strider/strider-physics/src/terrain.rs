use nalgebra::DMatrix;
use noise::{NoiseFn, Perlin};
use rapier3d::prelude::*;

/// Square patch of ground centered on the origin.
///
/// With a zero amplitude the ground is a thin slab whose top face sits at
/// `y = 0`. Otherwise it is a Perlin heightfield sampled on a regular grid.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub size: f32,
    pub resolution: usize,
    pub amplitude: f32,
    pub frequency: f64,
    pub seed: u32,
}

impl Terrain {
    pub fn flat(size: f32) -> Self {
        Self { size, resolution: 2, amplitude: 0.0, frequency: 0.0, seed: 0 }
    }

    pub fn rolling(size: f32, amplitude: f32, seed: u32) -> Self {
        Self { size, resolution: 64, amplitude, frequency: 0.15, seed }
    }

    pub fn is_flat(&self) -> bool {
        self.amplitude == 0.0
    }

    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        if self.is_flat() {
            return 0.0;
        }
        let perlin = Perlin::new(self.seed);
        self.sample(&perlin, x, z)
    }

    fn sample(&self, perlin: &Perlin, x: f32, z: f32) -> f32 {
        let n = perlin.get([x as f64 * self.frequency, z as f64 * self.frequency]);
        n as f32 * self.amplitude
    }

    /// Heights on the collider grid. Rows run along Z, columns along X.
    pub fn heights(&self) -> DMatrix<f32> {
        let n = self.resolution.max(2);
        let perlin = Perlin::new(self.seed);
        let step = self.size / (n - 1) as f32;
        let half = self.size * 0.5;
        DMatrix::from_fn(n, n, |row, col| {
            if self.is_flat() {
                0.0
            } else {
                self.sample(&perlin, -half + col as f32 * step, -half + row as f32 * step)
            }
        })
    }

    pub fn collider(&self) -> ColliderBuilder {
        let half = self.size * 0.5;
        if self.is_flat() {
            return ColliderBuilder::cuboid(half, 0.1, half).translation(vector![0.0, -0.1, 0.0]);
        }
        ColliderBuilder::heightfield(self.heights(), vector![self.size, 1.0, self.size])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_terrain_is_level() {
        let terrain = Terrain::flat(10.0);
        assert!(terrain.is_flat());
        assert_eq!(terrain.height_at(3.0, -2.0), 0.0);
        assert!(terrain.heights().iter().all(|h| *h == 0.0));
    }

    #[test]
    fn test_heights_are_bounded_by_amplitude() {
        let terrain = Terrain::rolling(20.0, 0.3, 7);
        let heights = terrain.heights();
        assert_eq!(heights.shape(), (64, 64));
        assert!(heights.iter().all(|h| h.abs() <= 0.3 + 1e-5));
        assert!(heights.iter().any(|h| *h != 0.0));
    }

    #[test]
    fn test_same_seed_same_ground() {
        let a = Terrain::rolling(20.0, 0.3, 11);
        let b = Terrain::rolling(20.0, 0.3, 11);
        assert_eq!(a.heights(), b.heights());
        assert_eq!(a.height_at(1.3, 4.2), b.height_at(1.3, 4.2));
    }

    #[test]
    fn test_grid_matches_height_at() {
        let terrain = Terrain { resolution: 5, ..Terrain::rolling(8.0, 0.5, 3) };
        let heights = terrain.heights();
        // Row 1 is z = -2, column 3 is x = 2.
        assert!((heights[(1, 3)] - terrain.height_at(2.0, -2.0)).abs() < 1e-6);
    }
}
