mod gpu;
mod overlay;
pub mod shaders;

pub use gpu::{KernelProgram, MacroquadBackend};
pub use overlay::draw_overlay;
