use tracing::{debug, info, warn};

use super::Presenter;
use crate::config::SimConfig;
use crate::domain::{BufferPair, Brush, Edit, EditKind, EditQueue, TexelGrid, TickClock, screen_to_grid};
use crate::error::{SimError, SimResult};
use crate::graphics::{ChannelLayout, GraphicsBackend, GridId, GridView};

/// Scheduler state. `Ticking` only lasts for the duration of `advance`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TickState {
    #[default]
    Idle,
    Ticking,
}

/// Counters for the overlay and logs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Completed generations
    pub generation: u64,
    /// Ticks aborted by a kernel failure
    pub failed_ticks: u64,
    /// Edits that wrote at least one texel
    pub edits_applied: u64,
    /// Edits lying entirely outside the grid
    pub edits_dropped: u64,
}

/// Simulation orchestrates the double-buffered automaton.
///
/// Owns every piece of mutable simulation state; the host loop hands it
/// the graphics backend once per display frame.
pub struct Simulation<B: GraphicsBackend> {
    buffers: BufferPair<GridId>,
    grid_size: (usize, usize),
    queue: EditQueue,
    clock: TickClock,
    state: TickState,
    program: B::Program,
    brush: Brush,
    presenter: Presenter,
    stats: SimStats,
}

impl<B: GraphicsBackend> Simulation<B> {
    /// Allocate the buffer pair and set up an idle simulation
    pub fn new(backend: &mut B, config: &SimConfig, program: B::Program) -> SimResult<Self> {
        config.validate()?;
        let (width, height) = config.grid_size();

        let first = backend.create_grid(width, height, ChannelLayout::Rgba8)?;
        let second = backend.create_grid(width, height, ChannelLayout::Rgba8)?;
        info!(
            "allocated {width}x{height} buffer pair, ticking every {:.3}s",
            config.tick_interval
        );

        Ok(Self {
            buffers: BufferPair::new(first, second),
            grid_size: (width, height),
            queue: EditQueue::new(),
            clock: TickClock::new(config.tick_interval),
            state: TickState::Idle,
            program,
            brush: Brush { radius: config.brush_radius },
            presenter: Presenter::new(),
            stats: SimStats::default(),
        })
    }

    /// Upload an initial pattern into the front buffer
    pub fn seed(&mut self, backend: &mut B, grid: &TexelGrid) -> SimResult<()> {
        let (w, h) = grid.dimensions();
        if (w, h) != self.grid_size {
            return Err(SimError::config(format!(
                "seed is {w}x{h} but the simulation grid is {}x{}",
                self.grid_size.0, self.grid_size.1
            )));
        }
        backend.write_region(self.buffers.front(), &grid.to_bytes(), 0, 0, w, h);
        info!("seeded front buffer with {} live cells", grid.population());
        Ok(())
    }

    /// Queue an edit for the next tick
    pub fn push_edit(&mut self, edit: Edit) {
        self.queue.push(edit);
    }

    /// Queue an edit under a pointer press at display pixel `pointer`
    pub fn press(&mut self, pointer: (f32, f32), kind: EditKind, display: (f32, f32)) {
        let (x, y) = screen_to_grid(pointer, display, self.grid_size);
        self.push_edit(Edit::new(x, y, kind));
    }

    /// Per-frame entry point: tick if due, then present.
    ///
    /// The front buffer is presented even when the tick failed; the tick
    /// error is returned afterwards. `Ok(true)` means a tick fired.
    pub fn frame(&mut self, backend: &mut B) -> SimResult<bool> {
        let ticked = self.advance(backend);
        self.present(backend);
        ticked
    }

    /// Run one tick if the clock allows it
    pub fn advance(&mut self, backend: &mut B) -> SimResult<bool> {
        let now = backend.now();
        if !self.clock.is_due(now) {
            return Ok(false);
        }

        self.state = TickState::Ticking;
        let result = self.step(backend);
        self.state = TickState::Idle;
        result?;

        self.clock.mark(now);
        Ok(true)
    }

    /// Tick body: drain edits into the front buffer, run the kernel from
    /// front into back, then swap.
    ///
    /// On kernel failure the roles stay as they were and the drained edits
    /// are not re-queued.
    fn step(&mut self, backend: &mut B) -> SimResult<()> {
        let front = self.buffers.front();
        let back = self.buffers.back();

        let queued = self.queue.len();
        let applied = {
            let mut view = GridView::new(backend, front, self.grid_size);
            self.queue.drain_into(&mut view, self.brush)
        };
        self.stats.edits_applied += applied as u64;
        self.stats.edits_dropped += (queued - applied) as u64;

        backend.bind_as_render_target(back);
        backend.bind_as_sample_source(front, 0);
        backend.clear(back);
        if let Err(err) = backend.execute_kernel(&self.program, back) {
            self.stats.failed_ticks += 1;
            warn!("tick for generation {} aborted: {err}", self.stats.generation + 1);
            return Err(err);
        }

        self.buffers.swap();
        self.stats.generation += 1;
        debug!(
            "generation {} ({} edits applied, {} dropped)",
            self.stats.generation,
            applied,
            queued - applied
        );
        Ok(())
    }

    /// Draw the current front buffer
    pub fn present(&mut self, backend: &mut B) {
        self.presenter.present(backend, &self.buffers);
    }

    pub fn buffers(&self) -> &BufferPair<GridId> {
        &self.buffers
    }

    pub fn state(&self) -> TickState {
        self.state
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn pending_edits(&self) -> usize {
        self.queue.len()
    }

    pub fn grid_size(&self) -> (usize, usize) {
        self.grid_size
    }

    pub fn frames_presented(&self) -> u64 {
        self.presenter.frames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConwayRule, Rule, Texel};
    use crate::graphics::SoftwareBackend;

    /// Software backend that can be told to fail
    struct FlakyBackend {
        inner: SoftwareBackend,
        fail_kernel: bool,
        fail_create: bool,
    }

    impl FlakyBackend {
        fn new() -> Self {
            Self {
                inner: SoftwareBackend::new(600.0, 600.0),
                fail_kernel: false,
                fail_create: false,
            }
        }
    }

    impl GraphicsBackend for FlakyBackend {
        type Program = Box<dyn Rule>;

        fn create_grid(&mut self, width: usize, height: usize, layout: ChannelLayout) -> SimResult<GridId> {
            if self.fail_create {
                return Err(SimError::resource("out of video memory"));
            }
            self.inner.create_grid(width, height, layout)
        }

        fn bind_as_render_target(&mut self, grid: GridId) {
            self.inner.bind_as_render_target(grid);
        }

        fn bind_as_sample_source(&mut self, grid: GridId, slot: usize) {
            self.inner.bind_as_sample_source(grid, slot);
        }

        fn clear(&mut self, target: GridId) {
            self.inner.clear(target);
        }

        fn execute_kernel(&mut self, program: &Self::Program, target: GridId) -> SimResult<()> {
            if self.fail_kernel {
                return Err(SimError::kernel("device lost"));
            }
            self.inner.execute_kernel(program, target)
        }

        fn present(&mut self, grid: GridId) {
            self.inner.present(grid);
        }

        fn write_region(&mut self, grid: GridId, data: &[u8], x: usize, y: usize, w: usize, h: usize) {
            self.inner.write_region(grid, data, x, y, w, h);
        }

        fn now(&self) -> f64 {
            self.inner.now()
        }

        fn display_size(&self) -> (f32, f32) {
            self.inner.display_size()
        }
    }

    fn config(size: usize) -> SimConfig {
        SimConfig {
            grid_width: size,
            grid_height: size,
            ..SimConfig::default()
        }
    }

    fn setup(size: usize) -> (SoftwareBackend, Simulation<SoftwareBackend>) {
        let mut backend = SoftwareBackend::new(600.0, 600.0);
        let sim = Simulation::new(&mut backend, &config(size), Box::new(ConwayRule)).unwrap();
        (backend, sim)
    }

    fn front_population<B: GraphicsBackend>(backend: &SoftwareBackend, sim: &Simulation<B>) -> usize {
        backend.grid(sim.buffers().front()).unwrap().population()
    }

    #[test]
    fn test_starts_idle_at_time_zero() {
        let (_, sim) = setup(10);
        assert_eq!(sim.state(), TickState::Idle);
        assert_eq!(sim.clock().last_tick_time(), 0.0);
        assert_eq!(sim.stats(), SimStats::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut backend = SoftwareBackend::new(600.0, 600.0);
        let result = Simulation::new(&mut backend, &config(0), Box::new(ConwayRule) as Box<dyn Rule>);
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn test_allocation_failure_aborts_init() {
        let mut backend = FlakyBackend::new();
        backend.fail_create = true;
        let result = Simulation::new(&mut backend, &config(10), Box::new(ConwayRule) as Box<dyn Rule>);
        assert!(matches!(result, Err(SimError::ResourceCreation(_))));
    }

    #[test]
    fn test_tick_is_time_gated() {
        let (mut backend, mut sim) = setup(10);
        let initial_front = sim.buffers().front();

        backend.set_time(0.05);
        assert_eq!(sim.frame(&mut backend), Ok(false));
        assert_eq!(sim.buffers().front(), initial_front);

        backend.set_time(0.1);
        assert_eq!(sim.frame(&mut backend), Ok(true));
        assert_eq!(sim.clock().last_tick_time(), 0.1);
        assert_ne!(sim.buffers().front(), initial_front);

        backend.set_time(0.15);
        assert_eq!(sim.frame(&mut backend), Ok(false));

        backend.set_time(0.2);
        assert_eq!(sim.frame(&mut backend), Ok(true));
        assert_eq!(sim.clock().last_tick_time(), 0.2);
        assert_eq!(sim.buffers().front(), initial_front);
        assert_eq!(sim.stats().generation, 2);
    }

    #[test]
    fn test_presents_every_frame() {
        let (mut backend, mut sim) = setup(10);
        for step in 0..10 {
            backend.set_time(step as f64 * 0.03);
            sim.frame(&mut backend).unwrap();
            assert_eq!(backend.presented().last(), Some(&sim.buffers().front()));
        }
        assert_eq!(backend.presented().len(), 10);
        assert_eq!(sim.frames_presented(), 10);
        assert_eq!(backend.kernel_runs(), 2);
    }

    #[test]
    fn test_edits_wait_for_next_tick() {
        let (mut backend, mut sim) = setup(10);
        sim.push_edit(Edit::paint(5, 5));

        backend.set_time(0.05);
        sim.frame(&mut backend).unwrap();
        assert_eq!(sim.pending_edits(), 1);
        assert_eq!(backend.region_writes(), 0);

        backend.set_time(0.1);
        sim.frame(&mut backend).unwrap();
        assert_eq!(sim.pending_edits(), 0);
        assert_eq!(sim.stats().edits_applied, 1);

        // A full 3x3 block becomes four corners plus four births
        assert_eq!(front_population(&backend, &sim), 8);
        let front = backend.grid(sim.buffers().front()).unwrap();
        assert_eq!(front.get(5, 5), Some(Texel::from_state(false)));
        assert_eq!(front.get(4, 4), Some(Texel::from_state(true)));
        assert_eq!(front.get(5, 3), Some(Texel::from_state(true)));
    }

    #[test]
    fn test_erase_after_paint_wins_within_tick() {
        let (mut backend, mut sim) = setup(10);
        sim.push_edit(Edit::paint(5, 5));
        sim.push_edit(Edit::erase(5, 5));
        backend.set_time(0.1);
        sim.frame(&mut backend).unwrap();
        assert_eq!(front_population(&backend, &sim), 0);
    }

    #[test]
    fn test_out_of_bounds_edit_is_absorbed() {
        let (mut backend, mut sim) = setup(10);
        sim.push_edit(Edit::paint(-5, -5));
        backend.set_time(0.1);
        assert_eq!(sim.frame(&mut backend), Ok(true));
        assert_eq!(backend.region_writes(), 0);
        assert_eq!(sim.stats().edits_dropped, 1);
        assert_eq!(front_population(&backend, &sim), 0);
    }

    #[test]
    fn test_press_maps_pointer_to_grid() {
        let (mut backend, mut sim) = setup(150);
        // Top-left pixel paints the top-left corner, clipped to 2x2
        sim.press((0.0, 0.0), EditKind::Paint, backend.display_size());
        backend.set_time(0.1);
        sim.advance(&mut backend).unwrap();

        let painted = backend.grid(sim.buffers().back()).unwrap();
        assert_eq!(painted.population(), 4);
        assert_eq!(painted.get(0, 149), Some(Texel::ALIVE));
        assert_eq!(painted.get(1, 148), Some(Texel::ALIVE));
    }

    #[test]
    fn test_kernel_failure_keeps_roles() {
        let mut backend = FlakyBackend::new();
        let mut sim = Simulation::new(&mut backend, &config(10), Box::new(ConwayRule) as Box<dyn Rule>).unwrap();
        let front = sim.buffers().front();
        let back = sim.buffers().back();

        sim.push_edit(Edit::paint(5, 5));
        backend.fail_kernel = true;
        backend.inner.set_time(0.1);
        let result = sim.frame(&mut backend);

        assert!(matches!(result, Err(SimError::KernelExecution(_))));
        assert_eq!(sim.buffers().front(), front);
        assert_eq!(sim.buffers().back(), back);
        assert_eq!(sim.state(), TickState::Idle);
        assert_eq!(sim.pending_edits(), 0);
        assert_eq!(sim.clock().last_tick_time(), 0.0);
        assert_eq!(sim.stats().failed_ticks, 1);
        assert_eq!(sim.stats().generation, 0);
        // Presenter still ran
        assert_eq!(backend.inner.presented(), &[front]);
    }

    #[test]
    fn test_recovers_after_kernel_failure() {
        let mut backend = FlakyBackend::new();
        let mut sim = Simulation::new(&mut backend, &config(10), Box::new(ConwayRule) as Box<dyn Rule>).unwrap();

        backend.fail_kernel = true;
        backend.inner.set_time(0.1);
        assert!(sim.frame(&mut backend).is_err());

        backend.fail_kernel = false;
        backend.inner.set_time(0.11);
        assert_eq!(sim.frame(&mut backend), Ok(true));
        assert_eq!(sim.clock().last_tick_time(), 0.11);
        assert_eq!(sim.stats().generation, 1);
    }

    #[test]
    fn test_seed_uploads_into_front() {
        let (mut backend, mut sim) = setup(4);
        let mut seed = TexelGrid::new(4, 4);
        seed.set(1, 1, Texel::ALIVE);
        seed.set(2, 1, Texel::ALIVE);
        sim.seed(&mut backend, &seed).unwrap();
        assert_eq!(front_population(&backend, &sim), 2);

        let wrong = TexelGrid::new(3, 3);
        assert!(matches!(sim.seed(&mut backend, &wrong), Err(SimError::Config(_))));
    }
}
