// Configuration and errors
pub mod config;
pub mod error;

// Domain layer - grids, edits, clock, rules
pub mod domain;

// Application layer - tick scheduling and presentation
pub mod application;

// Graphics seam and the headless backend
pub mod graphics;

// Infrastructure layer - GPU backend, input
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use domain::{Edit, EditKind, Rule, TexelGrid};
pub use application::{Simulation, SimStats};
pub use graphics::{GraphicsBackend, GridId, SoftwareBackend};
pub use rendering::MacroquadBackend;
