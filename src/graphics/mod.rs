//! The narrow interface the simulation core needs from a graphics layer.
//!
//! Two implementations live in this crate: the macroquad GPU backend in
//! `rendering`, and the CPU `SoftwareBackend` used headless.

mod software;

pub use software::SoftwareBackend;

use crate::domain::EditTarget;
use crate::error::SimResult;

/// Handle to a grid allocated by a backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridId(pub usize);

/// Texel layout of a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChannelLayout {
    /// Four unsigned 8-bit channels
    #[default]
    Rgba8,
}

impl ChannelLayout {
    pub const fn bytes_per_texel(self) -> usize {
        match self {
            ChannelLayout::Rgba8 => 4,
        }
    }
}

/// Graphics and windowing services consumed by the simulation.
///
/// A kernel run samples whatever grid is bound at slot 0 and renders over
/// the full extent of the bound render target.
pub trait GraphicsBackend {
    /// Compiled rule kernel, including its fullscreen vertex stage
    type Program;

    /// Allocate a zeroed grid
    fn create_grid(&mut self, width: usize, height: usize, layout: ChannelLayout) -> SimResult<GridId>;

    fn bind_as_render_target(&mut self, grid: GridId);

    fn bind_as_sample_source(&mut self, grid: GridId, slot: usize);

    /// Clear a grid to transparent black
    fn clear(&mut self, target: GridId);

    /// Run `program` over the whole of `target`
    fn execute_kernel(&mut self, program: &Self::Program, target: GridId) -> SimResult<()>;

    /// Draw a grid over the whole display surface
    fn present(&mut self, grid: GridId);

    /// Direct texel upload of tightly packed RGBA bytes
    fn write_region(&mut self, grid: GridId, data: &[u8], x: usize, y: usize, w: usize, h: usize);

    /// Seconds since startup
    fn now(&self) -> f64;

    /// Display size in pixels
    fn display_size(&self) -> (f32, f32);
}

/// A backend grid viewed as an edit target
pub struct GridView<'a, B: GraphicsBackend> {
    backend: &'a mut B,
    grid: GridId,
    size: (usize, usize),
}

impl<'a, B: GraphicsBackend> GridView<'a, B> {
    pub fn new(backend: &'a mut B, grid: GridId, size: (usize, usize)) -> Self {
        Self { backend, grid, size }
    }
}

impl<B: GraphicsBackend> EditTarget for GridView<'_, B> {
    fn dimensions(&self) -> (usize, usize) {
        self.size
    }

    fn write_region(&mut self, data: &[u8], x: usize, y: usize, w: usize, h: usize) {
        self.backend.write_region(self.grid, data, x, y, w, h);
    }
}
