use crate::domain::BufferPair;
use crate::graphics::{GraphicsBackend, GridId};

/// Draws the front buffer to the display once per frame.
///
/// Holds no grid handle of its own: the front is looked up on every call,
/// so a swap earlier in the same frame is always picked up.
#[derive(Debug, Default)]
pub struct Presenter {
    frames: u64,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present<B: GraphicsBackend>(&mut self, backend: &mut B, buffers: &BufferPair<GridId>) {
        backend.present(buffers.front());
        self.frames += 1;
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
