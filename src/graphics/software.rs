//! CPU backend: grids live in main memory and rule kernels run on rayon.
//!
//! Runs without a window, so it backs the benchmark binary and the tests.

use super::{ChannelLayout, GraphicsBackend, GridId};
use crate::domain::{Rule, Texel, TexelGrid};
use crate::error::{SimError, SimResult};

/// Number of sampler slots a kernel can read from
const SAMPLE_SLOTS: usize = 4;

pub struct SoftwareBackend {
    grids: Vec<TexelGrid>,
    render_target: Option<GridId>,
    sample_slots: [Option<GridId>; SAMPLE_SLOTS],
    time: f64,
    display: (f32, f32),
    presented: Vec<GridId>,
    region_writes: usize,
    kernel_runs: usize,
}

impl SoftwareBackend {
    pub fn new(display_width: f32, display_height: f32) -> Self {
        Self {
            grids: Vec::new(),
            render_target: None,
            sample_slots: [None; SAMPLE_SLOTS],
            time: 0.0,
            display: (display_width, display_height),
            presented: Vec::new(),
            region_writes: 0,
            kernel_runs: 0,
        }
    }

    /// Set the clock reported by `now()`
    pub fn set_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    /// Move the clock forward
    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }

    /// Read back a grid
    pub fn grid(&self, id: GridId) -> Option<&TexelGrid> {
        self.grids.get(id.0)
    }

    /// Grids handed to `present`, oldest first
    pub fn presented(&self) -> &[GridId] {
        &self.presented
    }

    /// Number of `write_region` calls so far
    pub fn region_writes(&self) -> usize {
        self.region_writes
    }

    /// Number of successful kernel runs so far
    pub fn kernel_runs(&self) -> usize {
        self.kernel_runs
    }

    fn check(&self, id: GridId) -> SimResult<()> {
        if id.0 < self.grids.len() {
            Ok(())
        } else {
            Err(SimError::kernel(format!("unknown grid {:?}", id)))
        }
    }
}

impl GraphicsBackend for SoftwareBackend {
    type Program = Box<dyn Rule>;

    fn create_grid(&mut self, width: usize, height: usize, layout: ChannelLayout) -> SimResult<GridId> {
        if width == 0 || height == 0 {
            return Err(SimError::resource(format!("cannot allocate a {width}x{height} grid")));
        }
        debug_assert_eq!(layout.bytes_per_texel(), 4);
        self.grids.push(TexelGrid::new(width, height));
        Ok(GridId(self.grids.len() - 1))
    }

    fn bind_as_render_target(&mut self, grid: GridId) {
        self.render_target = Some(grid);
    }

    fn bind_as_sample_source(&mut self, grid: GridId, slot: usize) {
        match self.sample_slots.get_mut(slot) {
            Some(entry) => *entry = Some(grid),
            None => tracing::warn!("sampler slot {slot} out of range, binding ignored"),
        }
    }

    fn clear(&mut self, target: GridId) {
        if let Some(grid) = self.grids.get_mut(target.0) {
            grid.fill(Texel::DEAD);
        }
    }

    fn execute_kernel(&mut self, program: &Self::Program, target: GridId) -> SimResult<()> {
        self.check(target)?;
        if self.render_target != Some(target) {
            return Err(SimError::kernel(format!("{:?} is not the bound render target", target)));
        }
        let source = self.sample_slots[0]
            .ok_or_else(|| SimError::kernel("no sample source bound at slot 0"))?;
        self.check(source)?;
        if source == target {
            return Err(SimError::kernel("sample source and render target are the same grid"));
        }
        if self.grids[source.0].dimensions() != self.grids[target.0].dimensions() {
            return Err(SimError::kernel("sample source and render target differ in size"));
        }

        let mut out = std::mem::replace(&mut self.grids[target.0], TexelGrid::new(0, 0));
        self.grids[source.0].evolve_into(program.as_ref(), &mut out);
        self.grids[target.0] = out;
        self.kernel_runs += 1;
        Ok(())
    }

    fn present(&mut self, grid: GridId) {
        self.presented.push(grid);
    }

    fn write_region(&mut self, grid: GridId, data: &[u8], x: usize, y: usize, w: usize, h: usize) {
        match self.grids.get_mut(grid.0) {
            Some(target) => {
                target.write_region(data, x, y, w, h);
                self.region_writes += 1;
            }
            None => tracing::warn!("write to unknown grid {:?} dropped", grid),
        }
    }

    fn now(&self) -> f64 {
        self.time
    }

    fn display_size(&self) -> (f32, f32) {
        self.display
    }
}
