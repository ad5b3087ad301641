use rand::Rng;
use rayon::prelude::*;

use super::{Rule, Texel};

/// CPU-resident texel grid.
/// Rows are stored bottom-up: row 0 is the bottom edge, matching GPU texture space.
#[derive(Clone, Debug, PartialEq)]
pub struct TexelGrid {
    width: usize,
    height: usize,
    texels: Vec<Texel>,
}

impl TexelGrid {
    /// Create a new grid with all cells dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            texels: vec![Texel::DEAD; width * height],
        }
    }

    /// Grid with roughly `density` of its cells alive
    pub fn random(width: usize, height: usize, density: f64, rng: &mut impl Rng) -> Self {
        let density = density.clamp(0.0, 1.0);
        let texels = (0..width * height)
            .map(|_| {
                if rng.random_bool(density) {
                    Texel::ALIVE
                } else {
                    Texel::DEAD
                }
            })
            .collect();
        Self { width, height, texels }
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get texel at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Texel> {
        (x < self.width && y < self.height).then(|| self.texels[self.index(x, y)])
    }

    /// Set texel at position; out-of-range writes are dropped
    pub fn set(&mut self, x: usize, y: usize, texel: Texel) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.texels[idx] = texel;
        }
    }

    /// Overwrite every texel
    pub fn fill(&mut self, texel: Texel) {
        self.texels.iter_mut().for_each(|t| *t = texel);
    }

    /// Copy tightly packed RGBA bytes into the rectangle at (x, y).
    /// Texels falling outside the grid are dropped.
    pub fn write_region(&mut self, data: &[u8], x: usize, y: usize, w: usize, h: usize) {
        debug_assert!(data.len() >= w * h * 4);
        for row in 0..h {
            for col in 0..w {
                let offset = (row * w + col) * 4;
                let Some(bytes) = data.get(offset..offset + 4) else {
                    return;
                };
                let texel = Texel([bytes[0], bytes[1], bytes[2], bytes[3]]);
                self.set(x + col, y + row, texel);
            }
        }
    }

    /// Tightly packed RGBA bytes of the whole grid, bottom row first
    pub fn to_bytes(&self) -> Vec<u8> {
        self.texels.iter().flat_map(|t| t.bytes()).collect()
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.texels.iter().filter(|t| t.is_alive()).count()
    }

    /// Count live neighbors using toroidal wrapping
    fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let w = self.width as isize;
        let h = self.height as isize;

        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(|(dx, dy)| {
                let nx = (x as isize + dx).rem_euclid(w) as usize;
                let ny = (y as isize + dy).rem_euclid(h) as usize;
                self.texels[self.index(nx, ny)]
            })
            .filter(|texel| texel.is_alive())
            .count() as u8
    }

    /// Run one generation of `rule`, reading `self` and overwriting all of `target`.
    /// Rows are processed in parallel.
    pub fn evolve_into(&self, rule: &dyn Rule, target: &mut TexelGrid) {
        debug_assert_eq!(self.dimensions(), target.dimensions());
        let width = self.width;

        target
            .texels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    let alive = self.texels[self.index(x, y)].is_alive();
                    let neighbors = self.count_live_neighbors(x, y);
                    *out = Texel::from_state(rule.evolve(alive, neighbors));
                }
            });
    }

    /// Iterate over all texels with their positions
    pub fn iter_texels(&self) -> impl Iterator<Item = (usize, usize, Texel)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.texels[self.index(x, y)]))
    }
}
